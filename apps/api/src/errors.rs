use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assist::AssistError;
use crate::document::patch::PatchError;
use crate::document::store::StoreError;
use crate::export::clipboard::ClipboardError;
use crate::persistence::PersistenceError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The target field changed while a slow operation was in flight.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Already phrased for the user.
    #[error("{0}")]
    Assist(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PatchError> for AppError {
    fn from(err: PatchError) -> Self {
        match err {
            PatchError::EntryNotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Patch(e) => e.into(),
            StoreError::Stale(_) => AppError::Conflict(err.to_string()),
            StoreError::EntryNotFound { .. } => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<AssistError> for AppError {
    fn from(err: AssistError) -> Self {
        match err {
            AssistError::MissingInput(msg) => AppError::Validation(msg.to_string()),
            AssistError::Failed(msg) => AppError::Assist(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Assist(msg) => {
                tracing::error!("Assistant error: {msg}");
                (StatusCode::BAD_GATEWAY, "ASSIST_ERROR", msg.clone())
            }
            AppError::Fetch(msg) => {
                tracing::warn!("Fetch error: {msg}");
                (StatusCode::BAD_GATEWAY, "FETCH_ERROR", msg.clone())
            }
            AppError::Clipboard(e) => {
                tracing::warn!("Clipboard error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CLIPBOARD_ERROR",
                    format!("Could not copy to the clipboard: {e}"),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "Your changes could not be saved locally".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let stale: AppError = StoreError::Stale("summary".into()).into();
        assert_eq!(stale.into_response().status(), StatusCode::CONFLICT);

        let missing: AppError = StoreError::EntryNotFound { kind: "education", id: Uuid::nil() }.into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let bad_path: AppError = StoreError::Patch(PatchError::UnknownPath("x".into())).into();
        assert_eq!(bad_path.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_assist_errors_keep_message() {
        let err: AppError = AssistError::Failed("Error: quota".into()).into();
        assert_eq!(err.to_string(), "Error: quota");
        let err: AppError = AssistError::MissingInput("Add a job description").into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
