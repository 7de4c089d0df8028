use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening or resolving paths in the media root
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The configured root is missing or is not a directory
    #[error("invalid media root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },
    /// A relative path does not name a regular file inside the root
    #[error("media file not found: {0}")]
    NotFound(String),
}

/// Result type alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
