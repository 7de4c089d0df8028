//! Server state shared by every request handler

use library::MediaRoot;
use std::path::Path;
use std::sync::Arc;

/// Server state holding the media root
///
/// The root is fixed at startup and only read afterwards, so cloning the
/// state per request is a reference count bump and needs no locking.
#[derive(Clone)]
pub struct ServerState {
    /// Directory all listings and streams are confined to
    root: Arc<MediaRoot>,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    /// * `root` - Media root opened at startup
    pub fn new(root: MediaRoot) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Get a shared handle to the media root for background tasks
    pub fn shared_root(&self) -> Arc<MediaRoot> {
        Arc::clone(&self.root)
    }

    /// Get the media root directory
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// List media files on the blocking pool
    ///
    /// # Arguments
    /// * `query` - Optional case-insensitive search text
    pub async fn list_media(
        &self,
        query: Option<String>,
    ) -> Result<Vec<String>, tokio::task::JoinError> {
        let root = self.shared_root();
        tokio::task::spawn_blocking(move || root.list_media(query.as_deref())).await
    }
}
