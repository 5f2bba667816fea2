//! The `classroom publish` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use classroom_core::parser::parse_quiz;
use classroom_core::traits::QuizBackend;

pub async fn execute(
    quiz_path: PathBuf,
    classroom_id: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut quiz = parse_quiz(&quiz_path)?;
    let (config, client) = super::connect(config_path)?;

    quiz.classroom_id = classroom_id
        .or(quiz.classroom_id)
        .or(config.default_classroom);
    if quiz.classroom_id.is_none() {
        anyhow::bail!(
            "no classroom for {}: pass --classroom-id or set classroom_id in the quiz file",
            quiz_path.display()
        );
    }

    let stored = client
        .create_quiz(&quiz)
        .await
        .with_context(|| format!("failed to publish \"{}\"", quiz.name))?;

    println!(
        "Published \"{}\" as quiz {} ({} questions)",
        stored.name,
        stored.id.map(|id| id.to_string()).unwrap_or_else(|| "?".into()),
        stored.questions.len()
    );
    Ok(())
}
