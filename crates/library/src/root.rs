//! Media root directory and safe path resolution

use std::path::{Component, Path, PathBuf};

use crate::error::{LibraryError, LibraryResult};

/// Extension of the files indexed and streamed when none is configured
pub const DEFAULT_MEDIA_EXTENSION: &str = "mp4";

/// Directory that bounds every file the server may list or stream
///
/// The path is canonicalized once at construction and never changes, so a
/// `MediaRoot` can be shared between requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct MediaRoot {
    path: PathBuf,
    extension: String,
}

impl MediaRoot {
    /// Open a media root
    ///
    /// # Arguments
    /// * `path` - Directory holding the media files
    ///
    /// # Errors
    /// Returns `LibraryError::InvalidRoot` if the path does not exist or is
    /// not a directory
    pub fn new(path: impl AsRef<Path>) -> LibraryResult<Self> {
        let path = path.as_ref();
        let canonical = path.canonicalize().map_err(|e| LibraryError::InvalidRoot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if !canonical.is_dir() {
            return Err(LibraryError::InvalidRoot {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        Ok(Self {
            path: canonical,
            extension: DEFAULT_MEDIA_EXTENSION.to_string(),
        })
    }

    /// Use a different media extension (with or without the leading dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Canonical path of the root directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Media extension without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check whether a file name carries the media extension
    pub fn is_media_file(&self, file_name: &str) -> bool {
        file_name
            .strip_suffix(self.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Resolve a client supplied relative path to a file inside the root
    ///
    /// Absolute paths, `..` components and symlinks leading outside the
    /// root are all reported as `NotFound`, the same as a missing file.
    ///
    /// # Arguments
    /// * `relative` - Forward slash separated path below the root
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Canonical path of a regular file inside the root
    /// * `Err(LibraryError::NotFound)` - Anything else
    pub fn resolve(&self, relative: &str) -> LibraryResult<PathBuf> {
        let relative_path = Path::new(relative);
        if relative.is_empty() || !is_plain_relative(relative_path) {
            tracing::warn!("Rejected media path outside root: {}", relative);
            return Err(LibraryError::NotFound(relative.to_string()));
        }

        let canonical = self
            .path
            .join(relative_path)
            .canonicalize()
            .map_err(|_| LibraryError::NotFound(relative.to_string()))?;

        if !canonical.starts_with(&self.path) {
            tracing::warn!(
                "Media path {} resolves outside root: {}",
                relative,
                canonical.display()
            );
            return Err(LibraryError::NotFound(relative.to_string()));
        }

        if !canonical.is_file() {
            return Err(LibraryError::NotFound(relative.to_string()));
        }

        Ok(canonical)
    }
}

/// True when every component is a plain name (or `.`)
fn is_plain_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
