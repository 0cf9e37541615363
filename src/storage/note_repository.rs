use chrono::{SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, ToSql};

use super::note_row::{format_timestamp, NoteRow, NOTE_COLUMNS};
use crate::entity::{NewNote, Note, NoteUpdate};
use crate::error::{NotepadError, Result};

/// Newest first; notes that were never updated sort by creation time.
const ORDER_BY_RECENT: &str = "ORDER BY COALESCE(updated_at, created_at) DESC, id DESC";

pub struct NoteRepository;

impl NoteRepository {
    /// List notes, newest first, optionally restricted to one folder.
    ///
    /// The folder must match exactly. An empty filter lists every note.
    pub fn list(conn: &Connection, folder: Option<&str>) -> Result<Vec<Note>> {
        let rows = match folder.filter(|f| !f.is_empty()) {
            Some(folder) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM notes WHERE folder = ?1 {}",
                    NOTE_COLUMNS, ORDER_BY_RECENT
                ))?;
                let rows = stmt
                    .query_map(params![folder], NoteRow::from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {} FROM notes {}", NOTE_COLUMNS, ORDER_BY_RECENT))?;
                let rows = stmt
                    .query_map([], NoteRow::from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        rows.into_iter().map(NoteRow::into_note).collect()
    }

    /// Create a note. The store assigns the id; `created_at` is now.
    pub fn create(conn: &Connection, new: NewNote) -> Result<Note> {
        new.validate()?;

        // Stored timestamps keep microseconds; truncate so the returned note
        // matches what a later read gives back.
        let mut note = new.into_note(Utc::now().trunc_subsecs(6));
        let row = NoteRow::from(&note);

        conn.execute(
            "INSERT INTO notes (title, content, folder, is_favorite, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.title,
                row.content,
                row.folder,
                row.is_favorite,
                row.created_at,
                row.updated_at,
            ],
        )?;
        note.id = conn.last_insert_rowid();

        tracing::debug!(id = note.id, folder = %note.folder, "created note");
        Ok(note)
    }

    /// Get a note by id.
    pub fn get(conn: &Connection, id: i64) -> Result<Note> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                params![id],
                NoteRow::from_row,
            )
            .optional()?;

        match row {
            Some(row) => row.into_note(),
            None => Err(NotepadError::NoteNotFound(id)),
        }
    }

    /// Apply the fields present in `update` and refresh `updated_at`.
    ///
    /// Absent fields keep their stored values. A missing note is reported
    /// before the payload is validated.
    pub fn update(conn: &Connection, id: i64, update: NoteUpdate) -> Result<Note> {
        if !Self::exists(conn, id)? {
            return Err(NotepadError::NoteNotFound(id));
        }
        update.validate()?;

        let updated_at = format_timestamp(&Utc::now());
        let folder = update.normalized_folder();

        let mut assignments = vec!["updated_at = ?"];
        let mut values: Vec<&dyn ToSql> = vec![&updated_at];

        if let Some(title) = &update.title {
            assignments.push("title = ?");
            values.push(title);
        }
        if let Some(content) = &update.content {
            assignments.push("content = ?");
            values.push(content);
        }
        if let Some(folder) = &folder {
            assignments.push("folder = ?");
            values.push(folder);
        }
        if let Some(is_favorite) = &update.is_favorite {
            assignments.push("is_favorite = ?");
            values.push(is_favorite);
        }
        values.push(&id);

        let sql = format!("UPDATE notes SET {} WHERE id = ?", assignments.join(", "));
        let rows_affected = conn.execute(&sql, values.as_slice())?;

        if rows_affected == 0 {
            return Err(NotepadError::NoteNotFound(id));
        }

        tracing::debug!(id, fields = assignments.len() - 1, "updated note");
        Self::get(conn, id)
    }

    /// Delete a note permanently.
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        let rows_affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;

        if rows_affected == 0 {
            return Err(NotepadError::NoteNotFound(id));
        }

        tracing::debug!(id, "deleted note");
        Ok(())
    }

    /// Distinct folder labels in use, sorted.
    pub fn list_folders(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare("SELECT DISTINCT folder FROM notes ORDER BY folder")?;

        let folders = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(folders)
    }

    /// Whether a note with this id is stored.
    pub fn exists(conn: &Connection, id: i64) -> Result<bool> {
        let found = conn
            .query_row("SELECT 1 FROM notes WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Number of stored notes across all folders.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }
}
