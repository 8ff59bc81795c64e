use thiserror::Error;

/// Errors surfaced by the store, the synchronizer and the import parser.
///
/// An absent task id is deliberately not represented here: delete, complete
/// and priority updates on a missing row are silent no-ops.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Caller-supplied data violates a task constraint (empty title, priority out of range).
    #[error("invalid input: {0}")]
    Validation(String),

    /// Schema or connection failure in the underlying database.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Malformed import payload, or a batch that was rolled back.
    #[error("{0}")]
    Import(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn import<M: Into<String>>(message: M) -> Self {
        Self::Import(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
