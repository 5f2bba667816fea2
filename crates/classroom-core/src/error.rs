//! Error types for quiz authoring, grading and payload decoding.
//!
//! All of these are local and recoverable: the caller's draft, quiz or
//! submission is left untouched when one is returned.

use thiserror::Error;

use crate::model::{QuestionId, QuestionKind, QuizId};

/// A question draft or quiz broke one of the authoring rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a valid question")]
    EmptyPrompt,

    /// A candidate answer slot is blank.
    #[error("please complete all answers (answer {} is empty)", .index + 1)]
    IncompleteAnswers { index: usize },

    #[error("{kind} questions need at least {min} candidate answers, found {found}")]
    TooFewAnswers {
        kind: QuestionKind,
        min: usize,
        found: usize,
    },

    #[error("{kind} questions allow at most {max} answers, found {found}")]
    TooManyAnswers {
        kind: QuestionKind,
        max: usize,
        found: usize,
    },

    #[error("answer \"{text}\" is listed more than once")]
    DuplicateAnswer { text: String },

    #[error("{kind} questions require {expected} correct answer(s), found {found}")]
    WrongCorrectCount {
        kind: QuestionKind,
        expected: &'static str,
        found: usize,
    },

    #[error("please type the correct answer")]
    EmptyShortAnswer,

    #[error("answer slot {index} does not exist (draft has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("quiz must have a name")]
    EmptyQuizName,

    #[error("quiz must have at least one question")]
    NoQuestions,
}

/// An answer submission could not be graded against its quiz.
///
/// Any of these rejects the whole submission; no question is graded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    #[error("question {question_id} does not exist in this quiz")]
    UnknownQuestion { question_id: QuestionId },

    #[error("question {question_id} is answered more than once")]
    DuplicateQuestion { question_id: QuestionId },

    #[error("question {question_id} is multiple-choice but {count} answers were selected")]
    TooManySelections { question_id: QuestionId, count: usize },

    #[error("submission is for quiz {found}, not quiz {expected}")]
    QuizMismatch { expected: QuizId, found: QuizId },
}

/// A payload received from the backend does not describe a valid quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("question {}: {message}", .index + 1)]
    UnknownQuestionType { index: usize, message: String },

    #[error("question {} is invalid", .index + 1)]
    InvalidQuestion {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("question {}: match answer \"{answer}\" is not one of the candidate answers", .index + 1)]
    UnmatchedAnswer { index: usize, answer: String },

    #[error("stored quiz has no classroom id")]
    MissingClassroom,

    #[error("response contained no quiz")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violated_rule() {
        assert_eq!(
            ValidationError::IncompleteAnswers { index: 2 }.to_string(),
            "please complete all answers (answer 3 is empty)"
        );
        assert_eq!(
            ValidationError::WrongCorrectCount {
                kind: QuestionKind::MultipleChoice,
                expected: "exactly 1",
                found: 2,
            }
            .to_string(),
            "multiple-choice questions require exactly 1 correct answer(s), found 2"
        );
        assert_eq!(
            GradingError::UnknownQuestion { question_id: 999 }.to_string(),
            "question 999 does not exist in this quiz"
        );
    }

    #[test]
    fn payload_errors_number_questions_from_one() {
        let err = PayloadError::InvalidQuestion {
            index: 0,
            source: ValidationError::EmptyShortAnswer,
        };
        assert_eq!(err.to_string(), "question 1 is invalid");
        assert_eq!(
            PayloadError::UnmatchedAnswer {
                index: 2,
                answer: "Oslo".into(),
            }
            .to_string(),
            "question 3: match answer \"Oslo\" is not one of the candidate answers"
        );
        assert!(PayloadError::UnknownQuestionType {
            index: 0,
            message: "unknown question type: essay".into(),
        }
        .to_string()
        .starts_with("question 1: "));
    }
}
