use std::path::Path;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::board::TaskBoard;
use crate::error::Result;
use crate::import::load_import_file;
use crate::models::{now_timestamp, Task};

/// Which tasks `list` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    Active,
    Completed,
    All,
}

/// Adds a new task. Missing deadlines default to the current local time.
pub fn cmd_add(
    board: &mut TaskBoard,
    title: String,
    priority: i64,
    soft: Option<String>,
    hard: Option<String>,
) -> Result<()> {
    let soft = soft.unwrap_or_else(now_timestamp);
    let hard = hard.unwrap_or_else(now_timestamp);
    let id = board.add(&title, priority, &soft, &hard)?;
    println!("Task added (id = {})", id);
    Ok(())
}

/// Marks a task as complete by ID.
pub fn cmd_complete(board: &mut TaskBoard, id: i64) -> Result<()> {
    if board.complete(id)? {
        println!("Task {} marked as complete.", id);
    } else {
        println!("Task {} not found or already complete.", id);
    }
    Ok(())
}

/// Removes a task by ID.
pub fn cmd_remove(board: &mut TaskBoard, id: i64) -> Result<()> {
    if board.delete(id)? {
        println!("Task {} removed.", id);
    } else {
        println!("Task {} not found.", id);
    }
    Ok(())
}

/// Changes the priority of a task.
pub fn cmd_priority(board: &mut TaskBoard, id: i64, priority: i64) -> Result<()> {
    if board.update_priority(id, priority)? {
        println!("Task {} priority set to {}.", id, priority);
    } else {
        println!("Task {} not found.", id);
    }
    Ok(())
}

/// Imports every task in a JSON file, or none of them.
pub fn cmd_import(board: &mut TaskBoard, path: &Path) -> Result<()> {
    let tasks = load_import_file(path)?;
    let report = board.bulk_add(&tasks)?;
    println!("{}", report);
    Ok(())
}

/// Lists tasks in a formatted table, or as JSON when `json` is set.
pub fn cmd_list(board: &TaskBoard, filter: ListFilter, json: bool) -> Result<()> {
    let tasks = match filter {
        ListFilter::Active => board.active_tasks().to_vec(),
        ListFilter::Completed => board.completed_tasks().to_vec(),
        ListFilter::All => board.store().list_all()?,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }
    println!("{}", task_table(&tasks));
    Ok(())
}

/// Builds the table printed by `list`.
pub fn task_table(tasks: &[Task]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Pri").add_attribute(Attribute::Bold),
            Cell::new("Soft").add_attribute(Attribute::Bold),
            Cell::new("Hard").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Completed").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        let priority_color = if t.completed {
            Color::Grey
        } else if t.priority >= 8 {
            Color::Red
        } else if t.priority >= 4 {
            Color::Yellow
        } else {
            Color::Green
        };

        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(t.priority).fg(priority_color),
            Cell::new(&t.soft_deadline),
            Cell::new(&t.hard_deadline),
            Cell::new(status).fg(status_color),
            Cell::new(t.completion_time.as_deref().unwrap_or("")),
        ]);
    }
    table
}
