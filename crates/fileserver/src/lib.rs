//! HTTP File Server for streaming local media
//!
//! This crate provides an HTTP server that lists the media files under a
//! single root directory and streams them with proper range request support
//! for video seeking.

mod error;
pub mod pages;
pub mod range;
mod server;
mod state;
mod stream;

pub use error::AppError;
pub use range::{parse_range, ByteRange, RangeError, RangeSpec};
pub use server::{FileServerApi, MediaListing, SearchParams};
pub use state::ServerState;
pub use stream::{open_stream, MediaStream};

/// Result type alias for file server operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
