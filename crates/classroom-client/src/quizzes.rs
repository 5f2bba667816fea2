//! Quiz endpoints of the classroom backend.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use classroom_core::grading::{AnswerSubmission, QuizResult};
use classroom_core::model::{ClassroomId, Quiz, QuizId};
use classroom_core::payload::{AnswerSetRequest, QuizEnvelope, QuizListResponse, QuizRequest};
use classroom_core::traits::QuizBackend;

use crate::http::ApiClient;

#[async_trait]
impl QuizBackend for ApiClient {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, quiz), fields(quiz = %quiz.name, questions = quiz.questions.len()))]
    async fn create_quiz(&self, quiz: &Quiz) -> anyhow::Result<Quiz> {
        let body = QuizRequest::try_from(quiz)?;

        let request = self.authorized(self.http().post(self.url("/quizzes")).json(&body))?;
        let response = self.send(request, "quiz endpoint").await?;
        let envelope: QuizEnvelope = Self::decode(response).await?;

        let mut stored = Quiz::try_from(envelope.into_quiz()?)?;
        if stored.classroom_id.is_none() {
            stored.classroom_id = quiz.classroom_id;
        }
        debug!(id = ?stored.id, "quiz stored");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn list_quizzes(&self, classroom_id: ClassroomId) -> anyhow::Result<Vec<Quiz>> {
        let request = self.authorized(
            self.http()
                .get(self.url("/quizzes"))
                .query(&[("classroomId", classroom_id)]),
        )?;
        let response = self
            .send(request, &format!("classroom {classroom_id}"))
            .await?;
        let list: QuizListResponse = Self::decode(response).await?;

        // Stored quizzes that no longer validate are skipped, not fatal.
        let quizzes: Vec<Quiz> = list
            .into_quizzes()
            .into_iter()
            .filter_map(|payload| {
                let (id, name) = (payload.id, payload.name.clone());
                match Quiz::try_from(payload) {
                    Ok(mut quiz) => {
                        quiz.classroom_id.get_or_insert(classroom_id);
                        Some(quiz)
                    }
                    Err(e) => {
                        warn!("skipping quiz {id} ({name}): {:#}", anyhow::Error::from(e));
                        None
                    }
                }
            })
            .collect();
        debug!(count = quizzes.len(), "listed quizzes");
        Ok(quizzes)
    }

    #[instrument(skip(self))]
    async fn fetch_quiz(&self, quiz_id: QuizId) -> anyhow::Result<Quiz> {
        let request = self.authorized(
            self.http()
                .get(self.url(&format!("/quizzes/{quiz_id}")))
                .query(&[("quizId", quiz_id)]),
        )?;
        let response = self.send(request, &format!("quiz {quiz_id}")).await?;
        let envelope: QuizEnvelope = Self::decode(response).await?;
        Ok(Quiz::try_from(envelope.into_quiz()?)?)
    }

    #[instrument(skip(self))]
    async fn delete_quiz(&self, quiz_id: QuizId) -> anyhow::Result<()> {
        let request = self.authorized(
            self.http()
                .delete(self.url("/quizzes"))
                .query(&[("quizId", quiz_id)]),
        )?;
        self.send(request, &format!("quiz {quiz_id}")).await?;
        Ok(())
    }

    #[instrument(skip(self, submission), fields(quiz_id = submission.quiz_id, answers = submission.answers.len()))]
    async fn submit_answers(&self, submission: &AnswerSubmission) -> anyhow::Result<QuizResult> {
        let body = AnswerSetRequest::from(submission);

        let request = self.authorized(self.http().put(self.url("/quizzes")).json(&body))?;
        let response = self
            .send(request, &format!("quiz {}", submission.quiz_id))
            .await?;
        let envelope: QuizEnvelope = Self::decode(response).await?;

        let result = QuizResult::try_from(envelope.into_quiz()?)?;
        debug!(total = result.total_mark, max = result.max_marks, "attempt graded");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classroom_core::model::{Question, QuestionBody, QuestionKind};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::ClientError;

    fn sample_quiz() -> Quiz {
        Quiz {
            id: None,
            name: "Capitals".into(),
            description: "A quiz created in the classroom".into(),
            classroom_id: Some(7),
            questions: vec![Question {
                id: 1,
                prompt: "Capital of France?".into(),
                body: QuestionBody::MultipleChoice {
                    answers: vec!["Paris".into(), "Rome".into()],
                    correct: "Paris".into(),
                },
            }],
        }
    }

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri()).with_token("jwt")
    }

    #[tokio::test]
    async fn create_quiz_posts_request_body() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "name": "Capitals",
            "description": "A quiz created in the classroom",
            "classroomId": 7,
            "questions": [{
                "type": "multiple-choice",
                "question": "Capital of France?",
                "answers": ["Paris", "Rome"],
                "matchAnswers": ["Paris"]
            }]
        });
        let stored = serde_json::json!({
            "quiz": {
                "id": 42,
                "name": "Capitals",
                "description": "A quiz created in the classroom",
                "questions": [{
                    "id": 100,
                    "type": "multiple-choice",
                    "question": "Capital of France?",
                    "answers": ["Paris", "Rome"],
                    "matchAnswers": ["Paris"]
                }]
            }
        });

        Mock::given(method("POST"))
            .and(path("/quizzes"))
            .and(header("authorization", "Bearer jwt"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(201).set_body_json(&stored))
            .expect(1)
            .mount(&server)
            .await;

        let quiz = client(&server).create_quiz(&sample_quiz()).await.unwrap();
        assert_eq!(quiz.id, Some(42));
        assert_eq!(quiz.classroom_id, Some(7));
        assert_eq!(quiz.questions[0].id, 100);
        assert_eq!(quiz.questions[0].kind(), QuestionKind::MultipleChoice);
    }

    #[tokio::test]
    async fn create_without_token_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = ApiClient::new(&server.uri())
            .create_quiz(&sample_quiz())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn list_quizzes_accepts_wrapped_response() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "quizzes": [
                {"id": 1, "name": "One", "questions": []},
                {"id": 2, "name": "Two", "questions": [{
                    "type": "short-answer",
                    "question": "2+2?",
                    "answers": ["4"],
                    "matchAnswers": ["4"]
                }]}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/quizzes"))
            .and(query_param("classroomId", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let quizzes = client(&server).list_quizzes(7).await.unwrap();
        assert_eq!(quizzes.len(), 2);
        assert_eq!(quizzes[1].questions[0].id, 1);
        assert!(quizzes.iter().all(|q| q.classroom_id == Some(7)));
    }

    #[tokio::test]
    async fn list_quizzes_skips_legacy_short_answer_quiz() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "quizzes": [
                {"id": 1, "name": "Good", "questions": [{
                    "type": "multiple-choice",
                    "question": "Capital of France?",
                    "answers": ["Paris", "Rome"],
                    "matchAnswers": ["Paris"]
                }]},
                {"id": 2, "name": "Legacy", "questions": [{
                    "type": "short-answer",
                    "question": "Capital of Spain?",
                    "answers": [""],
                    "matchAnswers": []
                }]}
            ]
        });

        Mock::given(method("GET"))
            .and(path("/quizzes"))
            .and(query_param("classroomId", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let quizzes = client(&server).list_quizzes(7).await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].name, "Good");
    }

    #[tokio::test]
    async fn fetch_legacy_short_answer_quiz_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quizzes/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quiz": {"id": 2, "name": "Legacy", "questions": [{
                    "type": "short-answer",
                    "question": "Capital of Spain?",
                    "answers": [""],
                    "matchAnswers": []
                }]}
            })))
            .mount(&server)
            .await;

        let err = client(&server).fetch_quiz(2).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<classroom_core::error::PayloadError>(),
            Some(classroom_core::error::PayloadError::InvalidQuestion { index: 0, .. })
        ));
        assert!(format!("{err:#}").contains("question 1 is invalid"));
    }

    #[tokio::test]
    async fn fetch_missing_quiz_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quizzes/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "no quiz"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).fetch_quiz(9).await.unwrap_err();
        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert!(matches!(client_err, ClientError::NotFound(m) if m.contains("quiz 9")));
    }

    #[tokio::test]
    async fn delete_quiz_uses_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/quizzes"))
            .and(query_param("quizId", "3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).delete_quiz(3).await.unwrap();
    }

    #[tokio::test]
    async fn submit_answers_returns_graded_attempt() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "quizId": 42,
            "answerSet": [{"questionId": 100, "answers": ["Paris"]}]
        });
        let graded = serde_json::json!({
            "quiz": {
                "id": 42,
                "name": "Capitals",
                "totalMark": 1,
                "questions": [{
                    "id": 100,
                    "type": "multiple-choice",
                    "question": "Capital of France?",
                    "answers": ["Paris", "Rome"],
                    "matchAnswers": ["Paris"],
                    "selectedAnswers": ["Paris"],
                    "mark": 1
                }]
            }
        });

        Mock::given(method("PUT"))
            .and(path("/quizzes"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(&graded))
            .mount(&server)
            .await;

        let submission = AnswerSubmission::new(42).answer(100, ["Paris"]);
        let result = client(&server).submit_answers(&submission).await.unwrap();
        assert_eq!(result.total_mark, 1);
        assert_eq!(result.max_marks, 1);
        assert_eq!(result.questions[0].selected_answers, vec!["Paris"]);
    }

    #[tokio::test]
    async fn server_error_keeps_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/quizzes"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"message": "database down"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .submit_answers(&AnswerSubmission::new(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
        assert!(err.to_string().contains("database down"));
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
            .mount(&server)
            .await;

        let err = client(&server).list_quizzes(1).await.unwrap_err();
        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert!(client_err.is_auth_failure());
    }
}
