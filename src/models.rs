use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// Lowest accepted priority.
pub const MIN_PRIORITY: i64 = 0;
/// Highest accepted priority.
pub const MAX_PRIORITY: i64 = 10;

/// Format used for every timestamp the application writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Represents a single stored task.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Store-assigned identifier, never reused after deletion.
    pub id: i64,
    /// Non-empty title.
    pub title: String,
    /// Priority in `0..=10`, higher is more important.
    pub priority: u8,
    /// Advisory deadline, stored as text.
    pub soft_deadline: String,
    /// Advisory deadline, stored as text. Completed tasks are ordered by it.
    pub hard_deadline: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Local time the task was completed. Rows completed before the column
    /// existed carry `None`.
    pub completion_time: Option<String>,
}

impl Task {
    /// One-line rendering used by the active-task list.
    pub fn active_line(&self) -> String {
        format!(
            "[P{}] {}  soft:{}  hard:{}",
            self.priority, self.title, self.soft_deadline, self.hard_deadline
        )
    }

    /// One-line rendering used by the history list.
    pub fn history_line(&self) -> String {
        format!(
            "[✓] {}  due:{}  done:{}",
            self.title,
            self.hard_deadline,
            self.completion_time.as_deref().unwrap_or("-")
        )
    }
}

/// A task that has not been stored yet; also the record shape of an import file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    /// Kept wide so out-of-range values reach validation instead of failing to decode.
    pub priority: i64,
    pub soft_deadline: String,
    pub hard_deadline: String,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        priority: i64,
        soft_deadline: impl Into<String>,
        hard_deadline: impl Into<String>,
    ) -> Self {
        NewTask {
            title: title.into(),
            priority,
            soft_deadline: soft_deadline.into(),
            hard_deadline: hard_deadline.into(),
        }
    }

    /// Checks the title and priority constraints.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TodoError::validation("title must not be empty"));
        }
        validate_priority(self.priority)
    }
}

/// Fails unless `priority` lies in `MIN_PRIORITY..=MAX_PRIORITY`.
pub fn validate_priority(priority: i64) -> Result<()> {
    if (MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        Ok(())
    } else {
        Err(TodoError::validation(format!(
            "priority {} is outside {}..={}",
            priority, MIN_PRIORITY, MAX_PRIORITY
        )))
    }
}

/// Current local time in `TIMESTAMP_FORMAT`.
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
