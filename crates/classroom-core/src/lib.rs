//! classroom-core — quiz authoring, grading and wire payloads.
//!
//! This crate defines the quiz data model, the builder that assembles valid
//! quizzes, the grading reconciler, and the payload shapes the classroom
//! backend speaks. It performs no I/O beyond reading authoring files.

pub mod builder;
pub mod error;
pub mod grading;
pub mod model;
pub mod parser;
pub mod payload;
pub mod report;
pub mod traits;

pub use builder::{AnswerSlot, QuestionDraft, QuizBuilder};
pub use error::{GradingError, PayloadError, ValidationError};
pub use grading::{grade, AnswerSubmission, QuestionAnswer, QuizResult};
pub use model::{Question, QuestionBody, QuestionKind, Quiz};
