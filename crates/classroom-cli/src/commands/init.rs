//! The `classroom init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("classroom.toml").exists() {
        println!("classroom.toml already exists, skipping.");
    } else {
        std::fs::write("classroom.toml", SAMPLE_CONFIG)?;
        println!("Created classroom.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: classroom login --email <EMAIL> and export CLASSROOM_TOKEN");
    println!("  2. Run: classroom validate --quiz quizzes/example.toml");
    println!("  3. Run: classroom publish --quiz quizzes/example.toml --classroom-id <ID>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# classroom configuration

base_url = "http://core-craft-smart-classroom-c9f39cc2d22c.herokuapp.com"
token = "${CLASSROOM_TOKEN}"
timeout_secs = 30
# default_classroom = 1
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
name = "Example Quiz"
description = "A quiz created in the classroom"

[[questions]]
type = "multiple-choice"
prompt = "What is the largest planet in the solar system?"
answers = ["Mars", "Jupiter", "Venus", "Earth"]
correct = ["Jupiter"]

[[questions]]
type = "multiple-response"
prompt = "Which of these are primary colors?"
answers = ["Red", "Green", "Blue", "Yellow"]
correct = ["Red", "Blue", "Yellow"]

[[questions]]
type = "short-answer"
prompt = "What is the chemical symbol for water?"
correct = ["H2O"]
"#;
