//! Core data model types for classroom quizzes.
//!
//! A [`Quiz`] owns an ordered sequence of [`Question`]s. Each question carries
//! a [`QuestionBody`] whose variant fixes how many correct answers it has, so
//! a committed question can never hold a correct-answer set that contradicts
//! its type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned quiz identifier.
pub type QuizId = u64;
/// Question identifier, unique within its quiz.
pub type QuestionId = u64;
/// Backend-assigned classroom identifier.
pub type ClassroomId = u64;

/// Marks awarded for a fully correct question.
pub const MARK_PER_QUESTION: u32 = 1;

/// Maximum number of candidate answers a question may offer.
pub const MAX_CANDIDATE_ANSWERS: usize = 10;

/// Number of empty candidate slots a fresh choice question starts with.
pub const DEFAULT_CANDIDATE_SLOTS: usize = 4;

/// The three supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    /// Several candidates, exactly one correct.
    MultipleChoice,
    /// Several candidates, two or more correct.
    MultipleResponse,
    /// No candidates; one free-text correct value.
    ShortAnswer,
}

impl QuestionKind {
    /// Whether this kind offers a list of candidate answers.
    pub fn has_candidates(self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleChoice | QuestionKind::MultipleResponse
        )
    }

    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::MultipleChoice,
        QuestionKind::MultipleResponse,
        QuestionKind::ShortAnswer,
    ];
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::MultipleResponse => write!(f, "multiple-response"),
            QuestionKind::ShortAnswer => write!(f, "short-answer"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multiple-choice" | "multiple_choice" | "mc" => Ok(QuestionKind::MultipleChoice),
            "multiple-response" | "multiple_response" | "mr" => {
                Ok(QuestionKind::MultipleResponse)
            }
            "short-answer" | "short_answer" | "short" => Ok(QuestionKind::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Type-specific payload of a committed question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionBody {
    MultipleChoice {
        answers: Vec<String>,
        correct: String,
    },
    MultipleResponse {
        answers: Vec<String>,
        /// Correct candidates, in candidate order.
        correct: Vec<String>,
    },
    ShortAnswer {
        correct: String,
    },
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionBody::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            QuestionBody::MultipleResponse { .. } => QuestionKind::MultipleResponse,
            QuestionBody::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }
}

/// One prompt within a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within the owning quiz.
    pub id: QuestionId,
    /// The question text shown to respondents.
    pub prompt: String,
    /// Candidate answers and the correct set.
    pub body: QuestionBody,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        self.body.kind()
    }

    /// Candidate answers offered to the respondent (empty for short-answer).
    pub fn answers(&self) -> &[String] {
        match &self.body {
            QuestionBody::MultipleChoice { answers, .. }
            | QuestionBody::MultipleResponse { answers, .. } => answers,
            QuestionBody::ShortAnswer { .. } => &[],
        }
    }

    /// The authoritative correct answer texts.
    pub fn match_answers(&self) -> Vec<String> {
        match &self.body {
            QuestionBody::MultipleChoice { correct, .. } => vec![correct.clone()],
            QuestionBody::MultipleResponse { correct, .. } => correct.clone(),
            QuestionBody::ShortAnswer { correct } => vec![correct.clone()],
        }
    }

    pub fn max_mark(&self) -> u32 {
        MARK_PER_QUESTION
    }
}

/// A named collection of questions belonging to a classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Assigned by the backend once stored; `None` for a freshly built quiz.
    #[serde(default)]
    pub id: Option<QuizId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owning classroom. Always set by the builder; may be absent on a quiz
    /// read back from the backend.
    #[serde(default)]
    pub classroom_id: Option<ClassroomId>,
    /// Questions in authoring (and display) order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Sum of the per-question maximum marks.
    pub fn max_marks(&self) -> u32 {
        self.questions.iter().map(Question::max_mark).sum()
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
