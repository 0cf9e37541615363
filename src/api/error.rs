//! HTTP error responses and their mapping from store and extractor errors.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::error::NotepadError;

pub const NOT_FOUND_DETAIL: &str = "Note not found";
pub const INTERNAL_DETAIL: &str = "Internal server error";

/// One entry in a 422 response's `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Where the problem is, e.g. `["body", "title"]` or `["path", "note_id"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Note not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NotepadError> for ApiError {
    fn from(err: NotepadError) -> Self {
        match err {
            NotepadError::Validation { field, message } => ApiError::Validation(vec![
                FieldError::new(&["body", field.as_str()], message, "value_error"),
            ]),
            NotepadError::NoteNotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::MissingJsonContentType(_) => "type_error.content_type",
            JsonRejection::JsonSyntaxError(_) => "value_error.jsondecode",
            _ => "type_error",
        };
        ApiError::Validation(vec![FieldError::new(
            &["body"],
            rejection.body_text(),
            kind,
        )])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![FieldError::new(
            &["path", "note_id"],
            rejection.body_text(),
            "type_error.integer",
        )])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::NotFound => json!({ "detail": NOT_FOUND_DETAIL }),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                json!({ "detail": INTERNAL_DETAIL })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_notepad_error() {
        let err: ApiError = NotepadError::NoteNotFound(3).into();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = NotepadError::validation("title", "field required").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].loc, vec!["body", "title"]);
                assert_eq!(errors[0].msg, "field required");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }

        let err: ApiError = NotepadError::StoreUnavailable("down".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_field_error_serializes_type_key() {
        let value =
            serde_json::to_value(FieldError::new(&["body", "title"], "field required", "value_error"))
                .unwrap();
        assert_eq!(value["type"], "value_error");
        assert_eq!(value["loc"][1], "title");
    }
}
