//! The `classroom validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let quizzes = if quiz_path.is_dir() {
        classroom_core::parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![classroom_core::parser::parse_quiz(&quiz_path)?]
    };

    if quizzes.is_empty() {
        anyhow::bail!("no valid quiz files found in {}", quiz_path.display());
    }

    let mut total_warnings = 0;

    for quiz in &quizzes {
        println!(
            "Quiz: {} ({} questions, {} marks)",
            quiz.name,
            quiz.questions.len(),
            quiz.max_marks()
        );

        let warnings = classroom_core::parser::lint_quiz(quiz);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [question {id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
