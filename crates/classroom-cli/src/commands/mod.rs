pub mod account;
pub mod classrooms;
pub mod grade;
pub mod init;
pub mod publish;
pub mod quizzes;
pub mod submit;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use classroom_client::{load_config_from, ApiClient, ClientConfig};
use classroom_core::report::AttemptReport;

/// Load the client config and build an API client from it.
pub fn connect(config_path: Option<PathBuf>) -> Result<(ClientConfig, ApiClient)> {
    let config = load_config_from(config_path.as_deref())?;
    let client = config.client();
    Ok((config, client))
}

/// Print a graded attempt in the requested format.
pub fn print_report(report: &AttemptReport, format: &str) -> Result<()> {
    match format {
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(report)?),
        "text" => {
            let result = &report.result;
            let mut table = Table::new();
            table.set_header(vec!["#", "Question", "Type", "Selected", "Correct", "Mark"]);
            for (i, q) in result.questions.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&q.prompt),
                    Cell::new(q.kind),
                    Cell::new(q.selected_answers.join(", ")),
                    Cell::new(q.match_answers.join(", ")),
                    Cell::new(q.mark),
                ]);
            }
            println!("{} ({} questions)", report.quiz.name, result.questions.len());
            println!("{table}");
            println!(
                "Score: {}/{} ({:.1}%)",
                result.total_mark,
                result.max_marks,
                result.percentage()
            );
        }
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    }
    Ok(())
}
