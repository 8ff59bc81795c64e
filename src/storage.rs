use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::error::{Result, TodoError};
use crate::models::{now_timestamp, validate_priority, NewTask, Task};

const TASK_COLUMNS: &str =
    "id, title, priority, soft_deadline, hard_deadline, completed, completion_time";

/// Outcome of the `completion_time` column migration. Both are success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMigration {
    Added,
    AlreadyPresent,
}

/// Result of a successful bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub count: usize,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "imported {} tasks", self.count)
    }
}

/// Handle to the on-disk task table.
///
/// Holds only the database path. Every operation opens its own connection
/// and drops it before returning, on success and on error alike.
#[derive(Debug, Clone)]
pub struct TaskStore {
    db_path: PathBuf,
}

impl TaskStore {
    /// Creates a handle without touching the database.
    pub fn new(db_path: impl AsRef<Path>) -> TaskStore {
        TaskStore {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Opens a store at `db_path` and brings its schema up to date.
    pub fn open(db_path: impl AsRef<Path>) -> Result<TaskStore> {
        let store = TaskStore::new(db_path);
        store.initialize()?;
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Connection::open(&self.db_path)?)
    }

    /// Creates the table if absent and adds `completion_time` to stores that predate it.
    ///
    /// Safe to call any number of times.
    pub fn initialize(&self) -> Result<ColumnMigration> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                priority INTEGER CHECK(priority BETWEEN 0 AND 10),
                soft_deadline TEXT,
                hard_deadline TEXT,
                completed INTEGER DEFAULT 0,
                completion_time TEXT
            );",
        )?;
        ensure_completion_time_column(&conn)
    }

    /// Inserts a new active task and returns its id.
    pub fn add(
        &self,
        title: &str,
        priority: i64,
        soft_deadline: &str,
        hard_deadline: &str,
    ) -> Result<i64> {
        let task = NewTask::new(title, priority, soft_deadline, hard_deadline);
        task.validate()?;
        let conn = self.connect()?;
        let id = insert_task(&conn, &task)?;
        debug!(id, priority, "task added");
        Ok(id)
    }

    /// Loads a single task by its id.
    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], task_from_row).optional()?)
    }

    /// All tasks, highest priority first.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        self.query_tasks("ORDER BY priority DESC, id ASC")
    }

    /// Tasks not yet completed, highest priority first, ties in insertion order.
    pub fn list_active(&self) -> Result<Vec<Task>> {
        self.query_tasks("WHERE completed = 0 ORDER BY priority DESC, id ASC")
    }

    /// Completed tasks, latest hard deadline first.
    pub fn list_completed(&self) -> Result<Vec<Task>> {
        self.query_tasks("WHERE completed = 1 ORDER BY hard_deadline DESC, id ASC")
    }

    /// Removes a task. Returns whether a row was deleted.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])? > 0;
        debug!(id, removed, "delete");
        Ok(removed)
    }

    /// Marks a task completed and stamps the completion time.
    ///
    /// Already-completed tasks keep their original completion time. Returns
    /// whether the task transitioned.
    pub fn complete(&self, id: i64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks SET completed = 1, completion_time = ?1 WHERE id = ?2 AND completed = 0",
            params![now_timestamp(), id],
        )? > 0;
        debug!(id, changed, "complete");
        Ok(changed)
    }

    /// Sets a new priority. Returns whether a row was updated.
    pub fn update_priority(&self, id: i64, new_priority: i64) -> Result<bool> {
        validate_priority(new_priority)?;
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE tasks SET priority = ?1 WHERE id = ?2",
            params![new_priority, id],
        )? > 0;
        debug!(id, priority = new_priority, changed, "update priority");
        Ok(changed)
    }

    /// Inserts every task or none of them.
    ///
    /// Each record is validated and inserted inside one transaction; the first
    /// failure rolls the whole batch back and is reported as an import error.
    pub fn bulk_add(&self, tasks: &[NewTask]) -> Result<ImportReport> {
        let mut conn = self.connect()?;
        match insert_batch(&mut conn, tasks) {
            Ok(count) => {
                info!(count, "bulk import committed");
                Ok(ImportReport { count })
            }
            Err(e) => {
                warn!(error = %e, "bulk import rolled back");
                Err(TodoError::import(format!("import failed: {e}")))
            }
        }
    }

    fn query_tasks(&self, clause: &str) -> Result<Vec<Task>> {
        let conn = self.connect()?;
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks {clause}");
        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}

fn ensure_completion_time_column(conn: &Connection) -> Result<ColumnMigration> {
    let columns = {
        let mut stmt = conn.prepare("PRAGMA table_info(tasks)")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        names
    };
    let present = columns.iter().any(|name| name == "completion_time");
    if present {
        debug!("completion_time column already present");
        return Ok(ColumnMigration::AlreadyPresent);
    }
    conn.execute_batch("ALTER TABLE tasks ADD COLUMN completion_time TEXT;")?;
    info!("added completion_time column");
    Ok(ColumnMigration::Added)
}

fn insert_task(conn: &Connection, task: &NewTask) -> Result<i64> {
    conn.execute(
        "INSERT INTO tasks (title, priority, soft_deadline, hard_deadline)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            task.title,
            task.priority,
            task.soft_deadline,
            task.hard_deadline
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_batch(conn: &mut Connection, tasks: &[NewTask]) -> Result<usize> {
    // dropping the transaction without commit rolls it back
    let tx = conn.transaction()?;
    for (index, task) in tasks.iter().enumerate() {
        task.validate()
            .map_err(|e| TodoError::import(format!("record {index}: {e}")))?;
        insert_task(&tx, task)?;
    }
    tx.commit()?;
    Ok(tasks.len())
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        priority: row.get::<_, Option<u8>>(2)?.unwrap_or(0),
        soft_deadline: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        hard_deadline: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        completed: row.get::<_, Option<bool>>(5)?.unwrap_or(false),
        completion_time: row.get(6)?,
    })
}
