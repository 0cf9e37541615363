//! JSON HTTP API over the notes repository.
//!
//! Routes (relative to the server root):
//! - `GET /api/health`
//! - `GET|POST /api/notes` (and `/api/notes/`)
//! - `GET /api/notes/folders/list`
//! - `GET|PUT|DELETE /api/notes/{note_id}`

pub mod error;
pub mod handlers;

use axum::routing::get;
use axum::Router;
use rusqlite::Connection;

use crate::error::{NotepadError, Result};
use crate::storage::SqliteStore;

pub const NOTES_PREFIX: &str = "/api/notes";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    /// Run `op` on a blocking thread with one pooled connection.
    ///
    /// The connection is checked out inside the task and returned to the pool
    /// when `op` finishes, whether it succeeded or failed.
    pub async fn with_connection<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || -> Result<T> {
            let conn = store.connection()?;
            op(&*conn)
        })
        .await
        .map_err(|e| NotepadError::Internal(format!("store task failed: {}", e)))?
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            NOTES_PREFIX,
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/api/notes/",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/api/notes/folders/list", get(handlers::list_folders))
        .route(
            "/api/notes/{note_id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        .with_state(state)
}
