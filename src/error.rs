use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotepadError {
    #[error("Validation failed for field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid timestamp in column '{column}': '{value}'")]
    InvalidTimestamp { column: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NotepadError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NotepadError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotepadError>;
