//! Grading a respondent's answers against a quiz.
//!
//! Every question is worth one mark and scoring is all-or-nothing: a
//! multiple-response question earns its mark only when the selected set is
//! exactly the correct set.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::GradingError;
use crate::model::{Question, QuestionBody, QuestionId, QuestionKind, Quiz, QuizId};

/// A respondent's attempt at a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub quiz_id: QuizId,
    /// Selections in submission order. Questions not listed are unanswered.
    #[serde(default)]
    pub answers: Vec<QuestionAnswer>,
}

/// The answers selected for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question_id: QuestionId,
    #[serde(default)]
    pub selected: Vec<String>,
}

impl AnswerSubmission {
    pub fn new(quiz_id: QuizId) -> Self {
        Self {
            quiz_id,
            answers: Vec::new(),
        }
    }

    /// Append a selection for `question_id`.
    pub fn answer<I, S>(mut self, question_id: QuestionId, selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answers.push(QuestionAnswer {
            question_id,
            selected: selected.into_iter().map(Into::into).collect(),
        });
        self
    }
}

/// The graded view of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub kind: QuestionKind,
    pub prompt: String,
    pub answers: Vec<String>,
    pub match_answers: Vec<String>,
    pub selected_answers: Vec<String>,
    pub mark: u32,
}

/// A graded attempt. Produced alongside the quiz, never written into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz_id: Option<QuizId>,
    pub quiz_name: String,
    pub questions: Vec<QuestionResult>,
    pub total_mark: u32,
    pub max_marks: u32,
}

impl QuizResult {
    /// Score as a percentage of the maximum; 0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.max_marks == 0 {
            0.0
        } else {
            f64::from(self.total_mark) / f64::from(self.max_marks) * 100.0
        }
    }
}

/// Grade `submission` against `quiz`.
///
/// The submission is checked as a whole before any question is scored; an
/// unknown question id, a repeated question id, or more than one selection
/// on a multiple-choice question rejects it.
pub fn grade(quiz: &Quiz, submission: &AnswerSubmission) -> Result<QuizResult, GradingError> {
    if let Some(expected) = quiz.id {
        if expected != submission.quiz_id {
            return Err(GradingError::QuizMismatch {
                expected,
                found: submission.quiz_id,
            });
        }
    }

    let mut selections: HashMap<QuestionId, &[String]> = HashMap::new();
    for answer in &submission.answers {
        let question_id = answer.question_id;
        let question = quiz
            .question(question_id)
            .ok_or(GradingError::UnknownQuestion { question_id })?;

        if question.kind() == QuestionKind::MultipleChoice && answer.selected.len() > 1 {
            return Err(GradingError::TooManySelections {
                question_id,
                count: answer.selected.len(),
            });
        }
        if selections.insert(question_id, &answer.selected).is_some() {
            return Err(GradingError::DuplicateQuestion { question_id });
        }
    }

    let questions: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .map(|question| {
            let selected = selections.get(&question.id).copied().unwrap_or_default();
            QuestionResult {
                question_id: question.id,
                kind: question.kind(),
                prompt: question.prompt.clone(),
                answers: question.answers().to_vec(),
                match_answers: question.match_answers(),
                selected_answers: selected.to_vec(),
                mark: mark_question(question, selected),
            }
        })
        .collect();

    let total_mark = questions.iter().map(|q| q.mark).sum();
    tracing::debug!(quiz = %quiz.name, total_mark, max_marks = quiz.max_marks(), "graded attempt");

    Ok(QuizResult {
        quiz_id: quiz.id,
        quiz_name: quiz.name.clone(),
        questions,
        total_mark,
        max_marks: quiz.max_marks(),
    })
}

/// Marks earned for one question given the respondent's selection.
pub fn mark_question(question: &Question, selected: &[String]) -> u32 {
    let correct = match &question.body {
        QuestionBody::MultipleChoice { correct, .. } => {
            matches!(selected, [only] if only.trim() == correct)
        }
        QuestionBody::MultipleResponse { correct, .. } => {
            let chosen: BTreeSet<&str> = selected.iter().map(|s| s.trim()).collect();
            let expected: BTreeSet<&str> = correct.iter().map(String::as_str).collect();
            !chosen.is_empty() && chosen == expected
        }
        QuestionBody::ShortAnswer { correct } => {
            matches!(selected, [only] if normalize(only) == normalize(correct))
        }
    };

    if correct {
        question.max_mark()
    } else {
        0
    }
}

/// Case-fold and collapse whitespace for free-text comparison.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
