//! Media library for the home stream server
//!
//! This crate owns the media root directory: it resolves client supplied
//! relative paths without letting them escape the root, and walks the root
//! to list the media files available for streaming.

pub mod error;
pub mod index;
pub mod root;

pub use error::{LibraryError, LibraryResult};
pub use index::{matches_query, relative_posix};
pub use root::{MediaRoot, DEFAULT_MEDIA_EXTENSION};
