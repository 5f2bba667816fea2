//! The `classroom quizzes`, `show` and `delete-quiz` commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use classroom_core::model::QuestionBody;
use classroom_core::traits::QuizBackend;

pub async fn list(classroom_id: Option<u64>, config_path: Option<PathBuf>) -> Result<()> {
    let (config, client) = super::connect(config_path)?;
    let classroom_id = classroom_id
        .or(config.default_classroom)
        .context("pass --classroom-id or set default_classroom in the config")?;

    let quizzes = client.list_quizzes(classroom_id).await?;
    if quizzes.is_empty() {
        println!("No quizzes in classroom {classroom_id}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Questions", "Description"]);
    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(quiz.id.map(|id| id.to_string()).unwrap_or_default()),
            Cell::new(&quiz.name),
            Cell::new(quiz.questions.len()),
            Cell::new(&quiz.description),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(quiz_id: u64, config_path: Option<PathBuf>) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let quiz = client.fetch_quiz(quiz_id).await?;

    println!("{} (quiz {quiz_id})", quiz.name);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!();

    for question in &quiz.questions {
        println!("{}. [{}] {}", question.id, question.kind(), question.prompt);
        match &question.body {
            QuestionBody::ShortAnswer { correct } => println!("   answer: {correct}"),
            _ => {
                let correct = question.match_answers();
                for answer in question.answers() {
                    let mark = if correct.contains(answer) { "x" } else { " " };
                    println!("   [{mark}] {answer}");
                }
            }
        }
    }
    Ok(())
}

pub async fn delete(quiz_id: u64, config_path: Option<PathBuf>) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    client.delete_quiz(quiz_id).await?;
    println!("Deleted quiz {quiz_id}");
    Ok(())
}
