//! Axum route handlers for the notes API.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::AppState;
use crate::entity::{NewNote, Note, NoteUpdate};
use crate::storage::NoteRepository;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    pub folder: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// GET /api/notes
pub async fn list_notes(
    State(state): State<AppState>,
    Query(query): Query<ListNotesQuery>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state
        .with_connection(move |conn| NoteRepository::list(conn, query.folder.as_deref()))
        .await?;
    Ok(Json(notes))
}

// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(new) = payload?;
    let note = state
        .with_connection(move |conn| NoteRepository::create(conn, new))
        .await?;
    Ok(Json(note))
}

// GET /api/notes/{note_id}
pub async fn get_note(
    State(state): State<AppState>,
    note_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = note_id?;
    let note = state
        .with_connection(move |conn| NoteRepository::get(conn, id))
        .await?;
    Ok(Json(note))
}

// PUT /api/notes/{note_id}
pub async fn update_note(
    State(state): State<AppState>,
    note_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NoteUpdate>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Path(id) = note_id?;
    let Json(update) = payload?;
    let note = state
        .with_connection(move |conn| NoteRepository::update(conn, id, update))
        .await?;
    Ok(Json(note))
}

// DELETE /api/notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    note_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = note_id?;
    state
        .with_connection(move |conn| NoteRepository::delete(conn, id))
        .await?;
    Ok(Json(DeleteResponse {
        message: "Note deleted",
    }))
}

// GET /api/notes/folders/list
pub async fn list_folders(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let folders = state
        .with_connection(NoteRepository::list_folders)
        .await?;
    Ok(Json(folders))
}
