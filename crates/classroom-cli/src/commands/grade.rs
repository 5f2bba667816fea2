//! The `classroom grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use classroom_core::grading::grade;
use classroom_core::parser::{parse_quiz, parse_submission};
use classroom_core::report::AttemptReport;

pub fn execute(
    quiz_path: PathBuf,
    answers_path: PathBuf,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let quiz = parse_quiz(&quiz_path)?;
    let submission = parse_submission(&answers_path, quiz.id.unwrap_or_default())?;

    let result = grade(&quiz, &submission)
        .with_context(|| format!("cannot grade {}", answers_path.display()))?;
    tracing::debug!(total = result.total_mark, max = result.max_marks, "graded locally");

    let report = AttemptReport::new(&quiz, result);
    super::print_report(&report, &format)?;

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
