//! Core trait definitions for the quiz persistence backend.
//!
//! Implemented by the `classroom-client` crate, both over HTTP and in
//! memory.

use async_trait::async_trait;

use crate::grading::{AnswerSubmission, QuizResult};
use crate::model::{ClassroomId, Quiz, QuizId};

/// Where finalized quizzes are stored and attempts are graded.
///
/// A failed call never touches the caller's quiz or submission, so the same
/// value can be sent again.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Store a finalized quiz; returns it with its assigned id.
    async fn create_quiz(&self, quiz: &Quiz) -> anyhow::Result<Quiz>;

    /// All quizzes of a classroom.
    async fn list_quizzes(&self, classroom_id: ClassroomId) -> anyhow::Result<Vec<Quiz>>;

    /// One stored quiz, including its correct answers.
    async fn fetch_quiz(&self, quiz_id: QuizId) -> anyhow::Result<Quiz>;

    async fn delete_quiz(&self, quiz_id: QuizId) -> anyhow::Result<()>;

    /// Submit a respondent's answers and return the graded attempt.
    async fn submit_answers(&self, submission: &AnswerSubmission) -> anyhow::Result<QuizResult>;
}
