//! Request error types and their HTTP mapping

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use library::LibraryError;
use thiserror::Error;

use crate::range::{unsatisfied_content_range, RangeError};

/// Application error types
///
/// Every variant is terminal for the request that raised it and maps to
/// exactly one status code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested path is missing, not a regular file, or outside the root
    #[error("media file not found: {0}")]
    NotFound(String),
    /// `Range` header present but not `bytes=<start>-<end?>`
    #[error("malformed range header: {0}")]
    MalformedRange(String),
    /// Range lies outside a file of the given size
    #[error("range not satisfiable, file size {0}")]
    RangeNotSatisfiable(u64),
    /// Unexpected I/O failure while reading media
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Background task panicked or was cancelled
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<RangeError> for AppError {
    fn from(err: RangeError) -> Self {
        match err {
            RangeError::Malformed(reason) => AppError::MalformedRange(reason),
            RangeError::NotSatisfiable { size } => AppError::RangeNotSatisfiable(size),
        }
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::NotFound(path) => AppError::NotFound(path),
            LibraryError::InvalidRoot { path, .. } => {
                AppError::NotFound(path.display().to_string())
            }
        }
    }
}

impl AppError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedRange(_) => StatusCode::BAD_REQUEST,
            AppError::RangeNotSatisfiable(_) => StatusCode::RANGE_NOT_SATISFIABLE,
            AppError::Io(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::NotFound(path) => {
                tracing::debug!("Not found: {}", path);
                status.into_response()
            }
            AppError::MalformedRange(reason) => {
                tracing::debug!("Rejected range header: {}", reason);
                (status, format!("Malformed range header: {}", reason)).into_response()
            }
            AppError::RangeNotSatisfiable(size) => (
                status,
                [(header::CONTENT_RANGE, unsatisfied_content_range(size))],
                format!("Range not satisfiable. File size: {}", size),
            )
                .into_response(),
            err @ (AppError::Io(_) | AppError::Task(_)) => {
                tracing::error!("Request failed: {}", err);
                (status, "Internal server error").into_response()
            }
        }
    }
}
