//! In-memory backend for testing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use classroom_core::grading::{grade, AnswerSubmission, QuizResult};
use classroom_core::model::{ClassroomId, Quiz, QuizId};
use classroom_core::payload::QuizRequest;
use classroom_core::traits::QuizBackend;

use crate::error::ClientError;

/// A [`QuizBackend`] that keeps quizzes in memory and grades locally.
///
/// Quizzes are stored the way the HTTP backend would accept them, so a quiz
/// without a classroom is rejected the same way.
pub struct InMemoryBackend {
    quizzes: Mutex<BTreeMap<QuizId, Quiz>>,
    next_id: Mutex<QuizId>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Fail every call with this status, to exercise error paths.
    fail_with: Option<u16>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            quizzes: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            call_count: AtomicU32::new(0),
            fail_with: None,
        }
    }

    /// A backend whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::new()
        }
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn len(&self) -> usize {
        self.quizzes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn enter(&self) -> Result<(), ClientError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match self.fail_with {
            Some(status) => Err(ClientError::ApiError {
                status,
                message: "injected failure".into(),
            }),
            None => Ok(()),
        }
    }

    async fn stored(&self, quiz_id: QuizId) -> Result<Quiz, ClientError> {
        self.quizzes
            .lock()
            .await
            .get(&quiz_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("quiz {quiz_id}")))
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn create_quiz(&self, quiz: &Quiz) -> anyhow::Result<Quiz> {
        self.enter()?;
        QuizRequest::try_from(quiz)?;

        let mut next_id = self.next_id.lock().await;
        let mut stored = quiz.clone();
        stored.id = Some(*next_id);
        self.quizzes.lock().await.insert(*next_id, stored.clone());
        *next_id += 1;
        Ok(stored)
    }

    async fn list_quizzes(&self, classroom_id: ClassroomId) -> anyhow::Result<Vec<Quiz>> {
        self.enter()?;
        Ok(self
            .quizzes
            .lock()
            .await
            .values()
            .filter(|q| q.classroom_id == Some(classroom_id))
            .cloned()
            .collect())
    }

    async fn fetch_quiz(&self, quiz_id: QuizId) -> anyhow::Result<Quiz> {
        self.enter()?;
        Ok(self.stored(quiz_id).await?)
    }

    async fn delete_quiz(&self, quiz_id: QuizId) -> anyhow::Result<()> {
        self.enter()?;
        self.quizzes
            .lock()
            .await
            .remove(&quiz_id)
            .map(|_| ())
            .ok_or_else(|| ClientError::NotFound(format!("quiz {quiz_id}")).into())
    }

    async fn submit_answers(&self, submission: &AnswerSubmission) -> anyhow::Result<QuizResult> {
        self.enter()?;
        let quiz = self.stored(submission.quiz_id).await?;
        Ok(grade(&quiz, submission)?)
    }
}
