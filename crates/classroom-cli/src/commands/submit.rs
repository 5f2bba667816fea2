//! The `classroom submit` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use classroom_core::grading::grade;
use classroom_core::parser::parse_submission;
use classroom_core::report::AttemptReport;
use classroom_core::traits::QuizBackend;

pub async fn execute(
    quiz_id: u64,
    answers_path: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let submission = parse_submission(&answers_path, quiz_id)?;

    // Reject answers that do not fit the stored quiz before sending them.
    let quiz = client.fetch_quiz(quiz_id).await?;
    grade(&quiz, &submission)
        .with_context(|| format!("{} does not fit quiz {quiz_id}", answers_path.display()))?;

    let result = client
        .submit_answers(&submission)
        .await
        .context("submission failed; the answer file is unchanged and can be submitted again")?;

    super::print_report(&AttemptReport::new(&quiz, result), &format)
}
