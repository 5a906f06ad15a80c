//! Application error type mapping to HTTP status codes.
//!
//! Two response shapes, matching what each endpoint's clients expect:
//! `/chat` failures are plain text, upload and execute failures are JSON
//! objects with a single `error` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use parley_core::relay::RelayError;
use parley_infra::files::FileError;
use parley_types::error::StorageError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Relay rejected the chat request.
    Relay(RelayError),
    /// Upload classification or decoding failed.
    File(FileError),
    /// Malformed multipart body.
    Multipart(String),
    /// Missing or empty upload field.
    Upload(&'static str),
    /// Validation error on a JSON endpoint.
    Validation(&'static str),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl From<FileError> for AppError {
    fn from(e: FileError) -> Self {
        AppError::File(e)
    }
}

fn json_error(status: StatusCode, message: String) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Relay(RelayError::InvalidAction(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid action.").into_response()
            }
            AppError::Relay(RelayError::MissingText) => {
                (StatusCode::BAD_REQUEST, "Missing message text.").into_response()
            }
            AppError::Relay(RelayError::Storage(e)) => storage_response(e),
            AppError::File(e @ FileError::Unsupported) => {
                json_error(StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::File(e @ FileError::Process(_)) => {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::Multipart(msg) => {
                json_error(StatusCode::BAD_REQUEST, format!("Failed to process file: {msg}"))
            }
            AppError::Upload(msg) => json_error(StatusCode::BAD_REQUEST, msg.to_string()),
            AppError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg.to_string()),
        }
    }
}

fn storage_response(e: StorageError) -> Response {
    tracing::error!(error = %e, "storage failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Server error: {e}"),
    )
        .into_response()
}
