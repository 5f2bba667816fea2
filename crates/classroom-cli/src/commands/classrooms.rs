//! The `classroom classrooms` subcommands.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use classroom_client::StudentEnrollment;

pub async fn list(config_path: Option<PathBuf>) -> Result<()> {
    let (config, client) = super::connect(config_path)?;
    let classrooms = client.list_classrooms().await?;

    if classrooms.is_empty() {
        println!("No classrooms yet. Create one with: classroom classrooms create --name <NAME>");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", ""]);
    for classroom in &classrooms {
        let marker = if config.default_classroom == Some(classroom.id) {
            "default"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(classroom.id),
            Cell::new(&classroom.name),
            Cell::new(marker),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn create(name: String, config_path: Option<PathBuf>) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("classroom name must not be empty");
    }

    let (_, client) = super::connect(config_path)?;
    let classroom = client.create_classroom(name).await?;
    println!("Created classroom \"{}\" (id {})", classroom.name, classroom.id);
    Ok(())
}

pub async fn delete(classroom_id: u64, config_path: Option<PathBuf>) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    client.delete_classroom(classroom_id).await?;
    println!("Deleted classroom {classroom_id}");
    Ok(())
}

pub async fn add_student(
    classroom_id: u64,
    student: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let enrollment = client.add_student(classroom_id, &student).await?;
    print_enrollment("Added", &enrollment, classroom_id);
    Ok(())
}

pub async fn drop_student(
    classroom_id: u64,
    student: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    let enrollment = client.drop_student(classroom_id, &student).await?;
    print_enrollment("Dropped", &enrollment, classroom_id);
    Ok(())
}

pub async fn set_parent(
    classroom_id: u64,
    student: String,
    parent: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, client) = super::connect(config_path)?;
    client
        .set_parent(classroom_id, &student, parent.as_deref())
        .await?;
    match parent {
        Some(parent) => println!("Linked parent {parent} to {student}"),
        None => println!("Cleared parent of {student}"),
    }
    Ok(())
}

fn print_enrollment(verb: &str, enrollment: &StudentEnrollment, classroom_id: u64) {
    println!(
        "{verb} {} (classroom {})",
        enrollment.username,
        enrollment.classroom_id.unwrap_or(classroom_id)
    );
}
