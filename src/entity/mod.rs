mod note;

pub use note::{NewNote, Note, NoteUpdate};

use crate::error::{NotepadError, Result};

/// Folder assigned when a note is created without one.
pub const DEFAULT_FOLDER: &str = "General";

/// Validation constants.
pub mod validation {
    pub const MAX_TITLE_LENGTH: usize = 255;
    pub const MAX_FOLDER_LENGTH: usize = 100;
}

/// A title must be present, non-blank and fit the column width.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(NotepadError::validation("title", "field required"));
    }
    let len = title.chars().count();
    if len > validation::MAX_TITLE_LENGTH {
        return Err(NotepadError::validation(
            "title",
            format!(
                "title too long: {} characters (max {})",
                len,
                validation::MAX_TITLE_LENGTH
            ),
        ));
    }
    Ok(())
}

pub fn validate_folder(folder: &str) -> Result<()> {
    let len = folder.chars().count();
    if len > validation::MAX_FOLDER_LENGTH {
        return Err(NotepadError::validation(
            "folder",
            format!(
                "folder too long: {} characters (max {})",
                len,
                validation::MAX_FOLDER_LENGTH
            ),
        ));
    }
    Ok(())
}

/// Blank or missing folder labels collapse to [`DEFAULT_FOLDER`].
pub fn normalize_folder(folder: Option<&str>) -> String {
    match folder {
        Some(f) if !f.trim().is_empty() => f.to_string(),
        _ => DEFAULT_FOLDER.to_string(),
    }
}
