//! Incremental quiz authoring.
//!
//! [`QuestionDraft`] is the in-progress question an instructor is editing;
//! [`QuizBuilder`] owns the committed question sequence and the current
//! draft. Nothing reaches the question sequence without passing
//! [`QuestionDraft::validate`].

use crate::error::ValidationError;
use crate::model::{
    ClassroomId, Question, QuestionBody, QuestionId, QuestionKind, Quiz, DEFAULT_CANDIDATE_SLOTS,
    MAX_CANDIDATE_ANSWERS,
};

/// Description used when the author does not provide one.
pub const DEFAULT_DESCRIPTION: &str = "A quiz created in the classroom";

const MIN_CANDIDATE_ANSWERS: usize = 2;

/// One editable answer slot in a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSlot {
    pub text: String,
    pub correct: bool,
}

impl AnswerSlot {
    pub fn new(text: impl Into<String>, correct: bool) -> Self {
        Self {
            text: text.into(),
            correct,
        }
    }
}

/// A question that has not been committed to a quiz yet.
///
/// For choice questions each slot is a candidate answer. A short-answer
/// draft has exactly one slot holding the free-text correct value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub kind: QuestionKind,
    pub prompt: String,
    pub slots: Vec<AnswerSlot>,
}

impl Default for QuestionDraft {
    fn default() -> Self {
        Self::new(QuestionKind::MultipleChoice)
    }
}

impl QuestionDraft {
    /// An empty draft with slots shaped for `kind`.
    pub fn new(kind: QuestionKind) -> Self {
        Self {
            kind,
            prompt: String::new(),
            slots: fresh_slots(kind),
        }
    }

    /// Switch the question type, discarding every answer slot and mark.
    pub fn set_kind(&mut self, kind: QuestionKind) {
        self.kind = kind;
        self.slots = fresh_slots(kind);
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_answer_text(
        &mut self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ValidationError::SlotOutOfRange { index, len })?;
        slot.text = text.into();
        Ok(())
    }

    /// Toggle whether the slot at `index` is a correct answer.
    ///
    /// Multiple-choice drafts behave like radio buttons: marking one slot
    /// unmarks all the others. Short-answer drafts ignore the call.
    pub fn mark_correct(&mut self, index: usize) -> Result<(), ValidationError> {
        let len = self.slots.len();
        if index >= len {
            return Err(ValidationError::SlotOutOfRange { index, len });
        }

        match self.kind {
            QuestionKind::MultipleChoice => {
                for (i, slot) in self.slots.iter_mut().enumerate() {
                    slot.correct = if i == index { !slot.correct } else { false };
                }
            }
            QuestionKind::MultipleResponse => {
                let slot = &mut self.slots[index];
                slot.correct = !slot.correct;
            }
            QuestionKind::ShortAnswer => {}
        }

        tracing::debug!(kind = %self.kind, index, "toggled correct answer");
        Ok(())
    }

    /// Whether [`add_candidate_answer`](Self::add_candidate_answer) would
    /// append a slot.
    pub fn can_add_candidate(&self) -> bool {
        self.kind == QuestionKind::MultipleResponse
            && self.slots.len() < MAX_CANDIDATE_ANSWERS
            && self
                .slots
                .last()
                .is_some_and(|slot| !slot.text.trim().is_empty())
    }

    /// Append an empty candidate slot; returns `false` (and changes nothing)
    /// when not permitted.
    pub fn add_candidate_answer(&mut self) -> bool {
        if !self.can_add_candidate() {
            return false;
        }
        self.slots.push(AnswerSlot::default());
        true
    }

    /// The correct answer texts implied by the current marks.
    pub fn match_answers(&self) -> Vec<String> {
        match self.kind {
            QuestionKind::ShortAnswer => self
                .slots
                .iter()
                .map(|slot| slot.text.trim().to_string())
                .collect(),
            _ => self
                .slots
                .iter()
                .filter(|slot| slot.correct)
                .map(|slot| slot.text.trim().to_string())
                .collect(),
        }
    }

    /// Check the draft against the rules for its type and build the
    /// committed question body. Texts are trimmed.
    pub fn validate(&self) -> Result<QuestionBody, ValidationError> {
        if self.prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        match self.kind {
            QuestionKind::ShortAnswer => match self.slots.as_slice() {
                [slot] if !slot.text.trim().is_empty() => Ok(QuestionBody::ShortAnswer {
                    correct: slot.text.trim().to_string(),
                }),
                [] | [_] => Err(ValidationError::EmptyShortAnswer),
                slots => Err(ValidationError::TooManyAnswers {
                    kind: self.kind,
                    max: 1,
                    found: slots.len(),
                }),
            },
            QuestionKind::MultipleChoice => {
                let (answers, correct) = self.candidates()?;
                match <[String; 1]>::try_from(correct) {
                    Ok([correct]) => Ok(QuestionBody::MultipleChoice { answers, correct }),
                    Err(correct) => Err(ValidationError::WrongCorrectCount {
                        kind: self.kind,
                        expected: "exactly 1",
                        found: correct.len(),
                    }),
                }
            }
            QuestionKind::MultipleResponse => {
                let (answers, correct) = self.candidates()?;
                if correct.len() < 2 {
                    return Err(ValidationError::WrongCorrectCount {
                        kind: self.kind,
                        expected: "at least 2",
                        found: correct.len(),
                    });
                }
                Ok(QuestionBody::MultipleResponse { answers, correct })
            }
        }
    }

    /// Trimmed candidate texts and the marked subset, after the rules shared
    /// by both choice types.
    fn candidates(&self) -> Result<(Vec<String>, Vec<String>), ValidationError> {
        if let Some(index) = self
            .slots
            .iter()
            .position(|slot| slot.text.trim().is_empty())
        {
            return Err(ValidationError::IncompleteAnswers { index });
        }

        let found = self.slots.len();
        if found < MIN_CANDIDATE_ANSWERS {
            return Err(ValidationError::TooFewAnswers {
                kind: self.kind,
                min: MIN_CANDIDATE_ANSWERS,
                found,
            });
        }
        if found > MAX_CANDIDATE_ANSWERS {
            return Err(ValidationError::TooManyAnswers {
                kind: self.kind,
                max: MAX_CANDIDATE_ANSWERS,
                found,
            });
        }

        let answers: Vec<String> = self
            .slots
            .iter()
            .map(|slot| slot.text.trim().to_string())
            .collect();
        for (i, text) in answers.iter().enumerate() {
            if answers[..i].contains(text) {
                return Err(ValidationError::DuplicateAnswer { text: text.clone() });
            }
        }

        Ok((answers, self.match_answers()))
    }
}

fn fresh_slots(kind: QuestionKind) -> Vec<AnswerSlot> {
    match kind {
        QuestionKind::MultipleChoice | QuestionKind::MultipleResponse => {
            vec![AnswerSlot::default(); DEFAULT_CANDIDATE_SLOTS]
        }
        QuestionKind::ShortAnswer => vec![AnswerSlot::new(String::new(), true)],
    }
}

/// Assembles a [`Quiz`] one validated question at a time.
#[derive(Debug, Clone)]
pub struct QuizBuilder {
    classroom_id: ClassroomId,
    description: String,
    questions: Vec<Question>,
    draft: QuestionDraft,
    next_id: QuestionId,
}

impl QuizBuilder {
    pub fn new(classroom_id: ClassroomId) -> Self {
        Self {
            classroom_id,
            description: DEFAULT_DESCRIPTION.to_string(),
            questions: Vec::new(),
            draft: QuestionDraft::default(),
            next_id: 1,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QuestionDraft {
        &mut self.draft
    }

    /// Replace the current draft wholesale (e.g. with one read from a file).
    pub fn set_draft(&mut self, draft: QuestionDraft) {
        self.draft = draft;
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn set_question_type(&mut self, kind: QuestionKind) {
        self.draft.set_kind(kind);
    }

    pub fn mark_correct(&mut self, index: usize) -> Result<(), ValidationError> {
        self.draft.mark_correct(index)
    }

    pub fn add_candidate_answer(&mut self) -> bool {
        self.draft.add_candidate_answer()
    }

    /// Commit the current draft as the next question.
    ///
    /// On failure neither the draft nor the question sequence changes. On
    /// success the draft is reset to an empty question of the same type.
    pub fn add_question(&mut self) -> Result<&Question, ValidationError> {
        let body = self.draft.validate()?;

        let question = Question {
            id: self.next_id,
            prompt: self.draft.prompt.trim().to_string(),
            body,
        };
        tracing::debug!(id = question.id, kind = %question.kind(), "question added");

        self.next_id += 1;
        self.draft = QuestionDraft::new(self.draft.kind);
        self.questions.push(question);
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Drop a committed question. Ids of the remaining questions are kept.
    pub fn remove_question(&mut self, id: QuestionId) -> Option<Question> {
        let pos = self.questions.iter().position(|q| q.id == id)?;
        Some(self.questions.remove(pos))
    }

    /// Produce the quiz ready for submission. The builder is left intact so
    /// the quiz can be rebuilt if submission fails.
    pub fn finalize(&self, name: &str) -> Result<Quiz, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyQuizName);
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        Ok(Quiz {
            id: None,
            name: name.trim().to_string(),
            description: self.description.clone(),
            classroom_id: Some(self.classroom_id),
            questions: self.questions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(builder: &mut QuizBuilder, prompt: &str, answers: &[&str]) {
        builder.draft_mut().set_prompt(prompt);
        for (i, text) in answers.iter().enumerate() {
            if i >= builder.draft().slots.len() {
                assert!(builder.add_candidate_answer());
            }
            builder.draft_mut().set_answer_text(i, *text).unwrap();
        }
    }

    #[test]
    fn multiple_choice_question_added() {
        let mut builder = QuizBuilder::new(1);
        fill(&mut builder, "Capital of France?", &["Paris", "Berlin", "Rome", "Madrid"]);
        builder.mark_correct(0).unwrap();

        let q = builder.add_question().unwrap();
        assert_eq!(q.id, 1);
        assert_eq!(q.match_answers(), vec!["Paris"]);
        assert_eq!(q.answers().len(), 4);
    }

    #[test]
    fn multiple_choice_marks_are_exclusive() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
        for index in [0, 2, 2, 1, 3, 3, 0, 1] {
            draft.mark_correct(index).unwrap();
            assert!(draft.slots.iter().filter(|s| s.correct).count() <= 1);
        }
    }

    #[test]
    fn multiple_choice_toggle_off_clears_match() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
        draft.set_answer_text(1, "Berlin").unwrap();
        draft.mark_correct(1).unwrap();
        assert_eq!(draft.match_answers(), vec!["Berlin"]);
        draft.mark_correct(1).unwrap();
        assert!(draft.match_answers().is_empty());
    }

    #[test]
    fn two_correct_multiple_choice_rejected() {
        let mut builder = QuizBuilder::new(1);
        builder.set_draft(QuestionDraft {
            kind: QuestionKind::MultipleChoice,
            prompt: "Capital of France?".into(),
            slots: vec![
                AnswerSlot::new("Paris", true),
                AnswerSlot::new("Berlin", true),
                AnswerSlot::new("Rome", false),
            ],
        });
        let before = builder.draft().clone();

        let err = builder.add_question().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WrongCorrectCount { found: 2, .. }
        ));
        assert!(builder.questions().is_empty());
        assert_eq!(builder.draft(), &before);
    }

    #[test]
    fn multiple_response_needs_two_correct() {
        let mut builder = QuizBuilder::new(1);
        builder.set_question_type(QuestionKind::MultipleResponse);
        fill(&mut builder, "Vowels?", &["A", "B", "C", "D"]);
        builder.mark_correct(0).unwrap();

        let err = builder.add_question().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::WrongCorrectCount { found: 1, .. }
        ));

        builder.mark_correct(2).unwrap();
        let q = builder.add_question().unwrap();
        assert_eq!(q.match_answers(), vec!["A", "C"]);
    }

    #[test]
    fn match_answers_follow_edited_text() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
        draft.set_answer_text(0, "Pari").unwrap();
        draft.mark_correct(0).unwrap();
        draft.set_answer_text(0, "Paris").unwrap();
        assert_eq!(draft.match_answers(), vec!["Paris"]);
    }

    #[test]
    fn short_answer_question() {
        let mut builder = QuizBuilder::new(1);
        builder.set_question_type(QuestionKind::ShortAnswer);
        assert_eq!(builder.draft().slots.len(), 1);

        builder.draft_mut().set_prompt("Capital of France?");
        assert_eq!(
            builder.add_question().unwrap_err(),
            ValidationError::EmptyShortAnswer
        );

        builder.draft_mut().set_answer_text(0, " Paris ").unwrap();
        builder.mark_correct(0).unwrap();
        let q = builder.add_question().unwrap();
        assert!(q.answers().is_empty());
        assert_eq!(q.match_answers(), vec!["Paris"]);
    }

    #[test]
    fn short_answer_draft_with_several_slots_rejected() {
        let draft = QuestionDraft {
            kind: QuestionKind::ShortAnswer,
            prompt: "Capital of Italy?".into(),
            slots: vec![AnswerSlot::new("Rome", true), AnswerSlot::new("Roma", true)],
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::TooManyAnswers {
                kind: QuestionKind::ShortAnswer,
                max: 1,
                found: 2,
            }
        );

        let empty = QuestionDraft {
            slots: Vec::new(),
            ..draft
        };
        assert_eq!(empty.validate().unwrap_err(), ValidationError::EmptyShortAnswer);
    }

    #[test]
    fn empty_prompt_and_incomplete_answers() {
        let mut builder = QuizBuilder::new(1);
        assert_eq!(builder.add_question().unwrap_err(), ValidationError::EmptyPrompt);

        fill(&mut builder, "Capital of France?", &["Paris", "Berlin", "  "]);
        assert_eq!(
            builder.add_question().unwrap_err(),
            ValidationError::IncompleteAnswers { index: 2 }
        );
    }

    #[test]
    fn duplicate_candidates_rejected() {
        let mut builder = QuizBuilder::new(1);
        fill(&mut builder, "Pick one", &["A", "B", "A ", "C"]);
        builder.mark_correct(1).unwrap();
        assert_eq!(
            builder.add_question().unwrap_err(),
            ValidationError::DuplicateAnswer { text: "A".into() }
        );
    }

    #[test]
    fn add_candidate_answer_guards() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
        draft.set_answer_text(3, "D").unwrap();
        assert!(!draft.add_candidate_answer());
        assert_eq!(draft.slots.len(), 4);

        draft.set_kind(QuestionKind::MultipleResponse);
        assert!(!draft.add_candidate_answer(), "last slot is empty");

        for i in 0..MAX_CANDIDATE_ANSWERS {
            if i >= draft.slots.len() {
                assert!(draft.add_candidate_answer());
            }
            draft.set_answer_text(i, format!("answer {i}")).unwrap();
        }
        assert_eq!(draft.slots.len(), MAX_CANDIDATE_ANSWERS);
        let before = draft.clone();
        assert!(!draft.add_candidate_answer());
        assert_eq!(draft, before);

        let mut short = QuestionDraft::new(QuestionKind::ShortAnswer);
        short.set_answer_text(0, "x").unwrap();
        assert!(!short.add_candidate_answer());
    }

    #[test]
    fn set_kind_clears_marks() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleResponse);
        draft.set_prompt("kept");
        draft.set_answer_text(0, "A").unwrap();
        draft.mark_correct(0).unwrap();

        draft.set_kind(QuestionKind::MultipleChoice);
        assert_eq!(draft.prompt, "kept");
        assert!(draft.slots.iter().all(|s| !s.correct && s.text.is_empty()));
    }

    #[test]
    fn mark_correct_out_of_range() {
        let mut draft = QuestionDraft::new(QuestionKind::MultipleChoice);
        assert_eq!(
            draft.mark_correct(7).unwrap_err(),
            ValidationError::SlotOutOfRange { index: 7, len: 4 }
        );
    }

    #[test]
    fn draft_resets_after_commit() {
        let mut builder = QuizBuilder::new(1);
        builder.set_question_type(QuestionKind::MultipleResponse);
        fill(&mut builder, "Primes?", &["2", "3", "4", "9"]);
        builder.mark_correct(0).unwrap();
        builder.mark_correct(1).unwrap();
        builder.add_question().unwrap();

        assert_eq!(builder.draft(), &QuestionDraft::new(QuestionKind::MultipleResponse));
    }

    #[test]
    fn finalize_rules() {
        let mut builder = QuizBuilder::new(4).with_description("Geography");
        assert_eq!(builder.finalize("Capitals").unwrap_err(), ValidationError::NoQuestions);

        fill(&mut builder, "Capital of France?", &["Paris", "Berlin", "Rome", "Madrid"]);
        builder.mark_correct(0).unwrap();
        builder.add_question().unwrap();

        assert_eq!(builder.finalize("  ").unwrap_err(), ValidationError::EmptyQuizName);

        let quiz = builder.finalize("Capitals").unwrap();
        assert_eq!(quiz.id, None);
        assert_eq!(quiz.classroom_id, Some(4));
        assert_eq!(quiz.description, "Geography");
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(builder.questions().len(), 1);
    }

    #[test]
    fn remove_question_keeps_ids() {
        let mut builder = QuizBuilder::new(1);
        builder.set_question_type(QuestionKind::ShortAnswer);
        for (prompt, answer) in [("one", "1"), ("two", "2"), ("three", "3")] {
            builder.draft_mut().set_prompt(prompt);
            builder.draft_mut().set_answer_text(0, answer).unwrap();
            builder.add_question().unwrap();
        }

        assert!(builder.remove_question(2).is_some());
        assert!(builder.remove_question(2).is_none());
        let ids: Vec<_> = builder.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
