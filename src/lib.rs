pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod server;
pub mod storage;

pub use config::ServerConfig;
pub use entity::{NewNote, Note, NoteUpdate};
pub use error::{NotepadError, Result};
pub use storage::{NoteRepository, SqliteStore};
