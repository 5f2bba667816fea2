//! TOML quiz and answer-file parser.
//!
//! Quiz files are replayed through [`QuizBuilder`], so a file is accepted
//! exactly when an instructor could have entered the same questions by hand.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builder::{AnswerSlot, QuestionDraft, QuizBuilder, DEFAULT_DESCRIPTION};
use crate::grading::{AnswerSubmission, QuestionAnswer};
use crate::model::{ClassroomId, QuestionBody, QuestionId, QuestionKind, Quiz, QuizId};

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    classroom_id: Option<ClassroomId>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(rename = "type")]
    kind: String,
    prompt: String,
    #[serde(default)]
    answers: Vec<String>,
    #[serde(default)]
    correct: Vec<String>,
}

impl TomlQuestion {
    fn into_draft(self) -> Result<QuestionDraft> {
        let kind: QuestionKind = self.kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        let slots = if kind.has_candidates() {
            for c in &self.correct {
                if !self.answers.iter().any(|a| a.trim() == c.trim()) {
                    anyhow::bail!("correct answer \"{c}\" is not one of the answers");
                }
            }
            self.answers
                .iter()
                .map(|a| {
                    let correct = self.correct.iter().any(|c| c.trim() == a.trim());
                    AnswerSlot::new(a.as_str(), correct)
                })
                .collect()
        } else {
            if !self.answers.is_empty() {
                anyhow::bail!("short-answer questions take no `answers` list, only `correct`");
            }
            self.correct
                .iter()
                .map(|c| AnswerSlot::new(c.as_str(), true))
                .collect()
        };

        Ok(QuestionDraft {
            kind,
            prompt: self.prompt,
            slots,
        })
    }
}

/// Parse a single TOML quiz file.
pub fn parse_quiz(path: &Path) -> Result<Quiz> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a TOML string into a `Quiz` (useful for testing).
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<Quiz> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let description = parsed
        .quiz
        .description
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let mut builder =
        QuizBuilder::new(parsed.quiz.classroom_id.unwrap_or_default()).with_description(description);

    for (index, question) in parsed.questions.into_iter().enumerate() {
        let draft = question
            .into_draft()
            .with_context(|| format!("{}: question {}", source_path.display(), index + 1))?;
        builder.set_draft(draft);
        builder
            .add_question()
            .with_context(|| format!("{}: question {}", source_path.display(), index + 1))?;
    }

    let mut quiz = builder
        .finalize(&parsed.quiz.name)
        .with_context(|| format!("{}: invalid quiz", source_path.display()))?;
    quiz.classroom_id = parsed.quiz.classroom_id;
    Ok(quiz)
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    let mut quizzes = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            quizzes.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz(&path) {
                Ok(quiz) => quizzes.push(quiz),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(quizzes)
}

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    quiz_id: Option<QuizId>,
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    question_id: QuestionId,
    #[serde(default)]
    selected: Vec<String>,
}

/// Parse a TOML answer file.
///
/// `quiz_id` may be omitted in the file; `default_quiz_id` fills it in.
pub fn parse_submission(path: &Path, default_quiz_id: QuizId) -> Result<AnswerSubmission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file: {}", path.display()))?;

    parse_submission_str(&content, path, default_quiz_id)
}

pub fn parse_submission_str(
    content: &str,
    source_path: &Path,
    default_quiz_id: QuizId,
) -> Result<AnswerSubmission> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(AnswerSubmission {
        quiz_id: parsed.quiz_id.unwrap_or(default_quiz_id),
        answers: parsed
            .answers
            .into_iter()
            .map(|a| QuestionAnswer {
                question_id: a.question_id,
                selected: a.selected,
            })
            .collect(),
    })
}

/// A non-fatal issue found in an otherwise valid quiz.
#[derive(Debug, Clone)]
pub struct QuizWarning {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Check a quiz for issues that are legal but probably unintended.
pub fn lint_quiz(quiz: &Quiz) -> Vec<QuizWarning> {
    let mut warnings = Vec::new();

    let mut seen_prompts = HashSet::new();
    for question in &quiz.questions {
        if !seen_prompts.insert(question.prompt.to_lowercase()) {
            warnings.push(QuizWarning {
                question_id: Some(question.id),
                message: format!("duplicate question: {}", question.prompt),
            });
        }
    }

    for question in &quiz.questions {
        if let QuestionBody::MultipleResponse { answers, correct } = &question.body {
            if answers.len() == correct.len() {
                warnings.push(QuizWarning {
                    question_id: Some(question.id),
                    message: "every answer is marked correct".into(),
                });
            }
        }
    }

    if quiz.description.trim().is_empty() {
        warnings.push(QuizWarning {
            question_id: None,
            message: "quiz has no description".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[quiz]
name = "Capitals"
description = "European capitals"
classroom_id = 12

[[questions]]
type = "multiple-choice"
prompt = "Capital of France?"
answers = ["Paris", "Berlin", "Rome", "Madrid"]
correct = ["Paris"]

[[questions]]
type = "multiple-response"
prompt = "Which are capitals?"
answers = ["Paris", "Lyon", "Rome", "Milan"]
correct = ["Paris", "Rome"]

[[questions]]
type = "short-answer"
prompt = "Capital of Spain?"
correct = ["Madrid"]
"#;

    #[test]
    fn parse_valid_toml() {
        let quiz = parse_quiz_str(VALID_TOML, &PathBuf::from("capitals.toml")).unwrap();
        assert_eq!(quiz.name, "Capitals");
        assert_eq!(quiz.classroom_id, Some(12));
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.questions[1].match_answers(), vec!["Paris", "Rome"]);
        assert_eq!(quiz.questions[2].kind(), QuestionKind::ShortAnswer);
        let ids: Vec<_> = quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn missing_description_uses_default() {
        let toml = r#"
[quiz]
name = "Minimal"

[[questions]]
type = "short-answer"
prompt = "2 + 2?"
correct = ["4"]
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("m.toml")).unwrap();
        assert_eq!(quiz.description, DEFAULT_DESCRIPTION);
        assert_eq!(quiz.classroom_id, None);
    }

    #[test]
    fn builder_rules_apply_to_files() {
        let toml = r#"
[quiz]
name = "Bad"

[[questions]]
type = "multiple-choice"
prompt = "Pick one"
answers = ["a", "b", "c"]
correct = ["a", "b"]
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("question 1"), "{msg}");
        assert!(msg.contains("exactly 1"), "{msg}");
    }

    #[test]
    fn correct_answer_must_be_a_candidate() {
        let toml = r#"
[quiz]
name = "Bad"

[[questions]]
type = "multiple-choice"
prompt = "Pick one"
answers = ["a", "b"]
correct = ["z"]
"#;
        let err = parse_quiz_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("\"z\" is not one of the answers"));
    }

    #[test]
    fn empty_quiz_rejected() {
        let toml = "[quiz]\nname = \"Empty\"\n";
        let err = parse_quiz_str(toml, &PathBuf::from("empty.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("at least one question"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_quiz_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_answer_file() {
        let toml = r#"
[[answers]]
question_id = 1
selected = ["Paris"]

[[answers]]
question_id = 3
selected = ["  madrid "]
"#;
        let submission = parse_submission_str(toml, &PathBuf::from("a.toml"), 42).unwrap();
        assert_eq!(submission.quiz_id, 42);
        assert_eq!(submission.answers.len(), 2);
        assert_eq!(submission.answers[1].selected, vec!["  madrid "]);

        let with_id = "quiz_id = 7\n";
        let submission = parse_submission_str(with_id, &PathBuf::from("a.toml"), 42).unwrap();
        assert_eq!(submission.quiz_id, 7);
        assert!(submission.answers.is_empty());
    }

    #[test]
    fn lint_flags_suspicious_quizzes() {
        let toml = r#"
[quiz]
name = "Lint"
description = " "

[[questions]]
type = "multiple-response"
prompt = "Pick all"
answers = ["a", "b"]
correct = ["a", "b"]

[[questions]]
type = "short-answer"
prompt = "pick all"
correct = ["x"]
"#;
        let quiz = parse_quiz_str(toml, &PathBuf::from("lint.toml")).unwrap();
        let warnings = lint_quiz(&quiz);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question")));
        assert!(warnings.iter().any(|w| w.message.contains("every answer")));
        assert!(warnings.iter().any(|w| w.message.contains("no description")));

        let clean = parse_quiz_str(VALID_TOML, &PathBuf::from("capitals.toml")).unwrap();
        assert!(lint_quiz(&clean).is_empty());
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("capitals.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let quizzes = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].name, "Capitals");
    }
}
