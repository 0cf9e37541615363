mod note_repository;
mod note_row;
mod sqlite_store;

pub use note_repository::NoteRepository;
pub use note_row::{format_timestamp, parse_timestamp, NoteRow, NOTE_COLUMNS};
pub use sqlite_store::{PooledConnection, SqliteStore};
