use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::suggestions::field_path::FieldPath;

/// Outcomes of editor operations that did not go as asked.
///
/// "No resume yet" is not part of this taxonomy: fetching returns `Option`.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend request failed: {0}")]
    Transport(String),

    #[error("Backend rejected suggestion for '{field}': {message}")]
    AcceptRejectedByServer { field: FieldPath, message: String },

    #[error("Field '{field}' does not resolve in the current resume: {reason}")]
    FieldNotFound { field: FieldPath, reason: String },

    #[error("Resume parsing failed: {0}")]
    ParseFailure(String),

    #[error("Suggestion already resolved: {0}")]
    AlreadyResolved(String),
}

impl EditorError {
    pub fn field_not_found(field: &FieldPath, reason: impl Into<String>) -> Self {
        EditorError::FieldNotFound {
            field: field.clone(),
            reason: reason.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Suggestion rejected: {0}")]
    AcceptRejected(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Validation(msg) => AppError::Validation(msg),
            EditorError::NotFound(msg) => AppError::NotFound(msg),
            EditorError::Transport(msg) => AppError::Backend(msg),
            EditorError::ParseFailure(msg) => AppError::Backend(msg),
            e @ EditorError::AcceptRejectedByServer { .. } => AppError::AcceptRejected(e.to_string()),
            e @ EditorError::FieldNotFound { .. } => AppError::FieldNotFound(e.to_string()),
            EditorError::AlreadyResolved(msg) => AppError::UnprocessableEntity(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::AcceptRejected(msg) => {
                tracing::warn!("Accept rejected: {msg}");
                (StatusCode::CONFLICT, "ACCEPT_REJECTED", msg.clone())
            }
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {msg}");
                (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", msg.clone())
            }
            AppError::FieldNotFound(msg) => {
                tracing::error!("Field path invariant violated: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FIELD_NOT_FOUND",
                    msg.clone(),
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

    #[test]
    fn test_accept_rejection_maps_to_conflict() {
        let err: AppError = EditorError::AcceptRejectedByServer {
            field: FieldPath::from("work[3].description"),
            message: "Array index 3 out of bounds".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_field_not_found_is_loud() {
        let err: AppError =
            EditorError::field_not_found(&FieldPath::from("basics.nickname"), "unknown leaf")
                .into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_maps_to_bad_gateway() {
        let err: AppError = EditorError::Transport("timed out".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
