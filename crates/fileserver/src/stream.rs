//! Media streaming with range request support

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use library::MediaRoot;
use std::io::SeekFrom;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::error::AppError;
use crate::range::{parse_range, ByteRange};

/// An opened media file ready to be sent as a 200 or 206 response
///
/// The file handle is owned by the response body, so it is closed as soon
/// as the body finishes or the client goes away.
#[derive(Debug)]
pub struct MediaStream {
    file: File,
    content_type: String,
    size: u64,
    range: Option<ByteRange>,
}

impl MediaStream {
    /// 206 for range requests, 200 otherwise
    pub fn status(&self) -> StatusCode {
        if self.range.is_some() {
            StatusCode::PARTIAL_CONTENT
        } else {
            StatusCode::OK
        }
    }

    /// Number of bytes the body will carry
    pub fn content_length(&self) -> u64 {
        self.range.map_or(self.size, |range| range.length())
    }
}

/// Open a media file for streaming
///
/// # Arguments
/// * `root` - Media root the path is resolved against
/// * `relative` - Forward slash separated path below the root
/// * `range_header` - Raw `Range` header value, if the client sent one
///
/// # Errors
/// * `AppError::NotFound` - Path is missing, not a file, or escapes the root
/// * `AppError::MalformedRange` - Header is not `bytes=<start>-<end?>`
/// * `AppError::RangeNotSatisfiable` - Range starts past the end of the file
///   or after its own end
/// * `AppError::Io` - Opening, inspecting or seeking the file failed
pub async fn open_stream(
    root: Arc<MediaRoot>,
    relative: &str,
    range_header: Option<&str>,
) -> Result<MediaStream, AppError> {
    // Resolution canonicalizes and stats the path, keep it off the runtime
    let requested = relative.to_string();
    let file_path = tokio::task::spawn_blocking(move || root.resolve(&requested)).await??;

    let mut file = File::open(&file_path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(relative.to_string())
        } else {
            AppError::Io(e)
        }
    })?;

    let size = file.metadata().await?.len();

    let content_type = mime_guess::from_path(&file_path)
        .first_or_octet_stream()
        .to_string();

    let range = match range_header {
        Some(header_value) => {
            let range = parse_range(header_value, size)?;
            file.seek(SeekFrom::Start(range.start())).await?;
            tracing::debug!(
                "Streaming {} bytes {}-{}/{}",
                relative,
                range.start(),
                range.end(),
                size
            );
            Some(range)
        }
        None => {
            tracing::debug!("Streaming {} in full ({} bytes)", relative, size);
            None
        }
    };

    Ok(MediaStream {
        file,
        content_type,
        size,
        range,
    })
}

impl IntoResponse for MediaStream {
    fn into_response(self) -> Response {
        let status = self.status();
        let content_length = self.content_length();
        let MediaStream {
            file,
            content_type,
            range,
            ..
        } = self;

        let mut builder = Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, content_length)
            .header(header::ACCEPT_RANGES, "bytes");

        if let Some(range) = range {
            builder = builder.header(header::CONTENT_RANGE, range.content_range());
        }

        // Never read past the requested range even if the file grows
        let body = Body::from_stream(ReaderStream::new(file.take(content_length)));

        builder.body(body).unwrap_or_else(|e| {
            tracing::error!("Failed to build stream response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
    }
}
