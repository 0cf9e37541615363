// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{normalize_folder, validate_folder, validate_title};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub folder: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    /// Unset until the note is first updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Timestamp used for "most recently updated" ordering.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Fields accepted when creating a note. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl NewNote {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = Some(is_favorite);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        if let Some(folder) = &self.folder {
            validate_folder(folder)?;
        }
        Ok(())
    }

    /// Build the unsaved note with defaults applied. The id is assigned by the
    /// store on insert.
    pub(crate) fn into_note(self, created_at: DateTime<Utc>) -> Note {
        Note {
            id: 0,
            folder: normalize_folder(self.folder.as_deref()),
            title: self.title,
            content: self.content.unwrap_or_default(),
            is_favorite: self.is_favorite.unwrap_or(false),
            created_at,
            updated_at: None,
        }
    }
}

/// Partial update payload. `None` means the field was absent and is left
/// untouched; a JSON `null` is treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.folder.is_none()
            && self.is_favorite.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(folder) = &self.folder {
            validate_folder(folder)?;
        }
        Ok(())
    }

    /// Folder to store, with blank labels mapped to the default folder.
    pub fn normalized_folder(&self) -> Option<String> {
        self.folder
            .as_deref()
            .map(|folder| normalize_folder(Some(folder)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotepadError;

    #[test]
    fn test_new_note_defaults() {
        let now = Utc::now();
        let note = NewNote::new("Groceries")
            .with_content("milk, eggs")
            .into_note(now);

        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.folder, "General");
        assert!(!note.is_favorite);
        assert_eq!(note.created_at, now);
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn test_new_note_deserialize_missing_optionals() {
        let new: NewNote = serde_json::from_str(r#"{"title":"Groceries"}"#).unwrap();
        assert_eq!(new, NewNote::new("Groceries"));

        let new: NewNote =
            serde_json::from_str(r#"{"title":"T","content":null,"is_favorite":null}"#).unwrap();
        assert_eq!(new.content, None);
        assert_eq!(new.is_favorite, None);
    }

    #[test]
    fn test_new_note_missing_title_fails_validation() {
        let new: NewNote = serde_json::from_str(r#"{"content":"no title"}"#).unwrap();
        let err = new.validate().unwrap_err();
        assert!(matches!(err, NotepadError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_update_partial_deserialize() {
        let update: NoteUpdate = serde_json::from_str(r#"{"is_favorite":true}"#).unwrap();
        assert_eq!(update.is_favorite, Some(true));
        assert!(update.title.is_none());
        assert!(update.content.is_none());
        assert!(update.folder.is_none());
        assert!(!update.is_empty());

        let empty: NoteUpdate = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let update = NoteUpdate {
            title: Some(" ".to_string()),
            ..NoteUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_blank_folder_maps_to_default() {
        let update = NoteUpdate {
            folder: Some(String::new()),
            ..NoteUpdate::default()
        };
        assert_eq!(update.normalized_folder().as_deref(), Some("General"));
        assert_eq!(NoteUpdate::default().normalized_folder(), None);
    }

    #[test]
    fn test_note_serializes_null_updated_at() {
        let note = NewNote::new("Groceries").into_note(Utc::now());
        let value = serde_json::to_value(&note).unwrap();
        assert!(value["updated_at"].is_null());
        assert_eq!(value["folder"], "General");
        assert_eq!(value["is_favorite"], false);
    }

    #[test]
    fn test_last_modified_falls_back_to_created_at() {
        let mut note = NewNote::new("T").into_note(Utc::now());
        assert_eq!(note.last_modified(), note.created_at);

        let later = note.created_at + chrono::Duration::seconds(5);
        note.updated_at = Some(later);
        assert_eq!(note.last_modified(), later);
    }
}
