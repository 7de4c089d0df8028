//! Media file indexing
//!
//! The index is never cached: each call walks the root again so listings
//! always reflect what is on disk.

use std::path::Path;
use walkdir::WalkDir;

use crate::root::MediaRoot;

impl MediaRoot {
    /// List media files below the root
    ///
    /// # Arguments
    /// * `query` - Optional search text, matched case-insensitively as a
    ///   substring of the relative path
    ///
    /// # Returns
    /// * Forward slash separated paths relative to the root, sorted by file
    ///   name within each directory. Empty when nothing matches.
    pub fn list_media(&self, query: Option<&str>) -> Vec<String> {
        let query = query.filter(|q| !q.is_empty());

        let entries: Vec<String> = self
            .walk_media()
            .filter(|entry| query.map_or(true, |q| matches_query(entry, q)))
            .collect();

        tracing::debug!(
            "Indexed {} media files under {} (query: {:?})",
            entries.len(),
            self.path().display(),
            query
        );

        entries
    }

    /// Check whether the root holds at least one media file
    pub fn has_media(&self) -> bool {
        self.walk_media().next().is_some()
    }

    fn walk_media(&self) -> impl Iterator<Item = String> + '_ {
        WalkDir::new(self.path())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.is_media_file(name))
            })
            .filter_map(|entry| relative_posix(self.path(), entry.path()))
    }
}

/// Case-insensitive substring match of a search query against an entry
pub fn matches_query(entry: &str, query: &str) -> bool {
    entry.to_lowercase().contains(&query.to_lowercase())
}

/// Express `path` relative to `root` with forward slashes
///
/// Returns `None` when `path` is not below `root` or is not valid UTF-8.
pub fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;

    if parts.is_empty() {
        return None;
    }

    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_library(files: &[&str]) -> (TempDir, MediaRoot) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, file.as_bytes()).unwrap();
        }
        let root = MediaRoot::new(dir.path()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_list_media_filters_extension() {
        let (_dir, root) = create_library(&["a/x.mp4", "b/Y.mp4", "c/z.txt"]);
        let mut entries = root.list_media(None);
        entries.sort();
        assert_eq!(entries, vec!["a/x.mp4", "b/Y.mp4"]);
    }

    #[test]
    fn test_list_media_query_case_insensitive() {
        let (_dir, root) = create_library(&["a/x.mp4", "b/Y.mp4", "c/z.txt"]);
        assert_eq!(root.list_media(Some("y")), vec!["b/Y.mp4"]);
        assert_eq!(root.list_media(Some("Y")), vec!["b/Y.mp4"]);
    }

    #[test]
    fn test_list_media_query_matches_directory() {
        let (_dir, root) = create_library(&["Action/one.mp4", "drama/two.mp4"]);
        assert_eq!(root.list_media(Some("action")), vec!["Action/one.mp4"]);
    }

    #[test]
    fn test_list_media_empty_query_lists_all() {
        let (_dir, root) = create_library(&["one.mp4", "two.mp4"]);
        assert_eq!(root.list_media(Some("")).len(), 2);
    }

    #[test]
    fn test_list_media_query_keeps_whitespace() {
        let (_dir, root) = create_library(&["a x.mp4", "ax.mp4"]);
        assert_eq!(root.list_media(Some(" x")), vec!["a x.mp4"]);
        assert_eq!(root.list_media(Some(" ")), vec!["a x.mp4"]);
    }

    #[test]
    fn test_list_media_no_match_is_empty() {
        let (_dir, root) = create_library(&["one.mp4", "notes.txt"]);
        assert!(root.list_media(Some("zzz")).is_empty());
    }

    #[test]
    fn test_list_media_empty_root() {
        let (_dir, root) = create_library(&[]);
        assert!(root.list_media(None).is_empty());
        assert!(!root.has_media());
    }

    #[test]
    fn test_list_media_skips_directories_named_like_media() {
        let (dir, root) = create_library(&["real.mp4"]);
        fs::create_dir_all(dir.path().join("folder.mp4")).unwrap();
        assert_eq!(root.list_media(None), vec!["real.mp4"]);
    }

    #[test]
    fn test_list_media_deterministic_order() {
        let (_dir, root) = create_library(&["b.mp4", "a.mp4", "sub/c.mp4"]);
        let first = root.list_media(None);
        let second = root.list_media(None);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_list_media_reflects_new_files() {
        let (dir, root) = create_library(&["one.mp4"]);
        assert_eq!(root.list_media(None).len(), 1);

        fs::write(dir.path().join("two.mp4"), b"two").unwrap();
        assert_eq!(root.list_media(None).len(), 2);
    }

    #[test]
    fn test_has_media() {
        let (_dir, root) = create_library(&["deep/down/clip.mp4"]);
        assert!(root.has_media());
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query("Movies/The Matrix.mp4", "matrix"));
        assert!(matches_query("movies/the matrix.mp4", "MATRIX"));
        assert!(!matches_query("movies/alien.mp4", "matrix"));
    }

    #[test]
    fn test_relative_posix() {
        let root = PathBuf::from("/media");
        let path = root.join("shows").join("pilot.mp4");
        assert_eq!(relative_posix(&root, &path).as_deref(), Some("shows/pilot.mp4"));
        assert_eq!(relative_posix(&root, &root), None);
        assert_eq!(relative_posix(&root, Path::new("/other/file.mp4")), None);
    }
}
