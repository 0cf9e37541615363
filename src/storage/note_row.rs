//! Mapping between rows of the `notes` table and [`Note`] records.
//!
//! Timestamps are stored as RFC 3339 UTC text with a fixed microsecond
//! precision, so ordering the text column orders the instants.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use crate::entity::Note;
use crate::error::{NotepadError, Result};

/// Column list matching the field order read by [`NoteRow::from_row`].
pub const NOTE_COLUMNS: &str = "id, title, content, folder, is_favorite, created_at, updated_at";

/// A `notes` row as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub folder: String,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl NoteRow {
    /// Read a row selected with [`NOTE_COLUMNS`].
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            folder: row.get(3)?,
            is_favorite: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    pub fn into_note(self) -> Result<Note> {
        Ok(Note {
            id: self.id,
            title: self.title,
            content: self.content,
            folder: self.folder,
            is_favorite: self.is_favorite,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: self
                .updated_at
                .map(|value| parse_timestamp("updated_at", &value))
                .transpose()?,
        })
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            folder: note.folder.clone(),
            is_favorite: note.is_favorite,
            created_at: format_timestamp(&note.created_at),
            updated_at: note.updated_at.as_ref().map(format_timestamp),
        }
    }
}

impl TryFrom<NoteRow> for Note {
    type Error = NotepadError;

    fn try_from(row: NoteRow) -> Result<Self> {
        row.into_note()
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(column: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| NotepadError::InvalidTimestamp {
            column,
            value: value.to_string(),
        })
}
