//! JSON shapes exchanged with the classroom backend.
//!
//! Field names match the backend exactly (camelCase). Question types travel
//! as plain strings so an unexpected type is reported per question instead
//! of failing the whole response.

use serde::{Deserialize, Serialize};

use crate::builder::{AnswerSlot, QuestionDraft};
use crate::error::PayloadError;
use crate::grading::{AnswerSubmission, QuestionAnswer, QuestionResult, QuizResult};
use crate::model::{ClassroomId, Question, QuestionBody, QuestionId, QuestionKind, Quiz, QuizId};

/// Body of `POST /quizzes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    pub name: String,
    pub description: String,
    pub classroom_id: ClassroomId,
    pub questions: Vec<QuestionRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[serde(rename = "type", alias = "questionType")]
    pub kind: String,
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub match_answers: Vec<String>,
}

impl TryFrom<&Quiz> for QuizRequest {
    type Error = PayloadError;

    fn try_from(quiz: &Quiz) -> Result<Self, Self::Error> {
        Ok(Self {
            name: quiz.name.clone(),
            description: quiz.description.clone(),
            classroom_id: quiz.classroom_id.ok_or(PayloadError::MissingClassroom)?,
            questions: quiz.questions.iter().map(QuestionRequest::from).collect(),
        })
    }
}

impl From<&Question> for QuestionRequest {
    fn from(question: &Question) -> Self {
        Self {
            kind: question.kind().to_string(),
            question: question.prompt.clone(),
            answers: question.answers().to_vec(),
            match_answers: question.match_answers(),
        }
    }
}

/// A quiz as stored by the backend, optionally annotated with a graded
/// attempt (`selectedAnswers`, `mark`, `totalMark`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub id: QuizId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<ClassroomId>,
    #[serde(default)]
    pub questions: Vec<QuestionPayload>,
    #[serde(default)]
    pub total_mark: u32,
    #[serde(default)]
    pub max_marks: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<QuestionId>,
    #[serde(rename = "type", alias = "questionType")]
    pub kind: String,
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub match_answers: Vec<String>,
    #[serde(default)]
    pub selected_answers: Vec<String>,
    #[serde(default)]
    pub mark: u32,
}

impl QuestionPayload {
    fn kind(&self, index: usize) -> Result<QuestionKind, PayloadError> {
        self.kind
            .parse()
            .map_err(|message| PayloadError::UnknownQuestionType { index, message })
    }

    /// Rebuild the question through the same rules the builder applies.
    fn into_question(self, index: usize) -> Result<Question, PayloadError> {
        let kind = self.kind(index)?;

        let slots = if kind.has_candidates() {
            if let Some(answer) = self
                .match_answers
                .iter()
                .find(|m| !self.answers.iter().any(|a| a.trim() == m.trim()))
            {
                return Err(PayloadError::UnmatchedAnswer {
                    index,
                    answer: answer.clone(),
                });
            }
            self.answers
                .iter()
                .map(|text| {
                    let correct = self.match_answers.iter().any(|m| m.trim() == text.trim());
                    AnswerSlot::new(text.as_str(), correct)
                })
                .collect()
        } else {
            self.match_answers
                .iter()
                .map(|text| AnswerSlot::new(text.as_str(), true))
                .collect()
        };

        let draft = QuestionDraft {
            kind,
            prompt: self.question.clone(),
            slots,
        };
        let body = draft
            .validate()
            .map_err(|source| PayloadError::InvalidQuestion { index, source })?;

        Ok(Question {
            // Positional ids keep questions addressable when the backend omits them.
            id: self.id.unwrap_or(index as QuestionId + 1),
            prompt: draft.prompt.trim().to_string(),
            body,
        })
    }
}

impl TryFrom<QuizPayload> for Quiz {
    type Error = PayloadError;

    fn try_from(payload: QuizPayload) -> Result<Self, Self::Error> {
        let questions = payload
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| q.into_question(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Quiz {
            id: Some(payload.id),
            name: payload.name,
            description: payload.description,
            classroom_id: payload.classroom_id,
            questions,
        })
    }
}

impl TryFrom<QuizPayload> for QuizResult {
    type Error = PayloadError;

    /// The backend's graded view of an attempt, taken as reported.
    fn try_from(payload: QuizPayload) -> Result<Self, Self::Error> {
        let questions = payload
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, q)| {
                Ok(QuestionResult {
                    question_id: q.id.unwrap_or(index as QuestionId + 1),
                    kind: q.kind(index)?,
                    prompt: q.question,
                    answers: q.answers,
                    match_answers: q.match_answers,
                    selected_answers: q.selected_answers,
                    mark: q.mark,
                })
            })
            .collect::<Result<Vec<_>, PayloadError>>()?;

        let total_mark = if payload.total_mark == 0 {
            questions.iter().map(|q| q.mark).sum()
        } else {
            payload.total_mark
        };
        let max_marks = if payload.max_marks == 0 {
            questions.len() as u32
        } else {
            payload.max_marks
        };

        Ok(QuizResult {
            quiz_id: Some(payload.id),
            quiz_name: payload.name,
            questions,
            total_mark,
            max_marks,
        })
    }
}

/// A stored quiz comes back either as `{"quiz": {...}}` or as
/// `{"quizzes": [...]}` depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizEnvelope {
    Single { quiz: QuizPayload },
    Many { quizzes: Vec<QuizPayload> },
    Bare(QuizPayload),
}

impl QuizEnvelope {
    /// The first quiz in the envelope.
    pub fn into_quiz(self) -> Result<QuizPayload, PayloadError> {
        match self {
            QuizEnvelope::Single { quiz } | QuizEnvelope::Bare(quiz) => Ok(quiz),
            QuizEnvelope::Many { quizzes } => {
                quizzes.into_iter().next().ok_or(PayloadError::EmptyResponse)
            }
        }
    }
}

/// Response of `GET /quizzes?classroomId=`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizListResponse {
    Wrapped { quizzes: Vec<QuizPayload> },
    Bare(Vec<QuizPayload>),
}

impl QuizListResponse {
    pub fn into_quizzes(self) -> Vec<QuizPayload> {
        match self {
            QuizListResponse::Wrapped { quizzes } | QuizListResponse::Bare(quizzes) => quizzes,
        }
    }
}

/// Body of `PUT /quizzes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSetRequest {
    pub quiz_id: QuizId,
    pub answer_set: Vec<AnswerSetEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSetEntry {
    pub question_id: QuestionId,
    #[serde(default)]
    pub answers: Vec<String>,
}

impl From<&AnswerSubmission> for AnswerSetRequest {
    fn from(submission: &AnswerSubmission) -> Self {
        Self {
            quiz_id: submission.quiz_id,
            answer_set: submission
                .answers
                .iter()
                .map(|a| AnswerSetEntry {
                    question_id: a.question_id,
                    answers: a.selected.clone(),
                })
                .collect(),
        }
    }
}

impl From<AnswerSetRequest> for AnswerSubmission {
    fn from(request: AnswerSetRequest) -> Self {
        Self {
            quiz_id: request.quiz_id,
            answers: request
                .answer_set
                .into_iter()
                .map(|entry| QuestionAnswer {
                    question_id: entry.question_id,
                    selected: entry.answers,
                })
                .collect(),
        }
    }
}

impl Quiz {
    /// The stored form of this quiz under `id`, as the backend would return
    /// it before any attempt.
    pub fn to_payload(&self, id: QuizId) -> QuizPayload {
        QuizPayload {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            classroom_id: self.classroom_id,
            questions: self
                .questions
                .iter()
                .map(|q| {
                    let request = QuestionRequest::from(q);
                    QuestionPayload {
                        id: Some(q.id),
                        kind: request.kind,
                        question: request.question,
                        answers: request.answers,
                        match_answers: request.match_answers,
                        selected_answers: Vec::new(),
                        mark: 0,
                    }
                })
                .collect(),
            total_mark: 0,
            max_marks: self.max_marks(),
        }
    }
}

impl From<&QuizResult> for QuizPayload {
    fn from(result: &QuizResult) -> Self {
        QuizPayload {
            id: result.quiz_id.unwrap_or_default(),
            name: result.quiz_name.clone(),
            description: String::new(),
            classroom_id: None,
            questions: result
                .questions
                .iter()
                .map(|q| QuestionPayload {
                    id: Some(q.question_id),
                    kind: q.kind.to_string(),
                    question: q.prompt.clone(),
                    answers: q.answers.clone(),
                    match_answers: q.match_answers.clone(),
                    selected_answers: q.selected_answers.clone(),
                    mark: q.mark,
                })
                .collect(),
            total_mark: result.total_mark,
            max_marks: result.max_marks,
        }
    }
}
