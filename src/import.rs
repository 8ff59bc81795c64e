//! Bulk-import file decoding.
//!
//! An import file is a JSON array of task records:
//!
//! ```json
//! [
//!   { "title": "Write report", "priority": 5,
//!     "soft_deadline": "2025-01-01 09:00", "hard_deadline": "2025-01-02 17:00" }
//! ]
//! ```
//!
//! The whole payload is validated before anything touches the store; a single
//! bad record rejects the file.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{Result, TodoError};
use crate::models::NewTask;

/// Reads and validates an import file.
pub fn load_import_file(path: &Path) -> Result<Vec<NewTask>> {
    let raw = fs::read_to_string(path)?;
    parse_import(&raw)
}

/// Decodes and validates an import payload.
pub fn parse_import(raw: &str) -> Result<Vec<NewTask>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| TodoError::import(format!("import file is not valid JSON: {e}")))?;
    let Value::Array(entries) = value else {
        return Err(TodoError::import("import file must contain a list of tasks"));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_record(index, entry))
        .collect()
}

fn parse_record(index: usize, entry: Value) -> Result<NewTask> {
    let task: NewTask = serde_json::from_value(entry)
        .map_err(|e| TodoError::import(format!("record {index}: {e}")))?;
    task.validate()
        .map_err(|e| TodoError::import(format!("record {index}: {e}")))?;
    Ok(task)
}
