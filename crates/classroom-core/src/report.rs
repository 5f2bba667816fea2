//! Attempt reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::QuizResult;
use crate::model::{Quiz, QuizId};

/// A graded attempt together with where and when it was graded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt was graded.
    pub created_at: DateTime<Utc>,
    /// The quiz that was attempted.
    pub quiz: QuizSummary,
    /// The graded attempt.
    pub result: QuizResult,
}

/// Summary of a quiz (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: Option<QuizId>,
    pub name: String,
    pub question_count: usize,
}

impl AttemptReport {
    pub fn new(quiz: &Quiz, result: QuizResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id,
                name: quiz.name.clone(),
                question_count: quiz.questions.len(),
            },
            result,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz.name));
        md.push_str(&format!(
            "**Score:** {}/{} ({:.1}%)\n\n",
            self.result.total_mark,
            self.result.max_marks,
            self.result.percentage()
        ));

        md.push_str("| # | Question | Type | Selected | Correct | Mark |\n");
        md.push_str("|---|----------|------|----------|---------|------|\n");
        for (i, q) in self.result.questions.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                i + 1,
                escape_cell(&q.prompt),
                q.kind,
                escape_cell(&q.selected_answers.join(", ")),
                escape_cell(&q.match_answers.join(", ")),
                q.mark
            ));
        }

        md
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
