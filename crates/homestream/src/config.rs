//! Startup configuration from command line flags and environment variables

use anyhow::{bail, Context};
use clap::Parser;
use library::{MediaRoot, DEFAULT_MEDIA_EXTENSION};
use std::path::PathBuf;

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "homestream=info,fileserver=info,library=info,tower_http=info";

/// Stream a local video library over HTTP
#[derive(Debug, Parser)]
#[command(name = "homestream", version, about)]
pub struct Config {
    /// Directory holding the media files
    #[arg(long, env = "MEDIA_ROOT")]
    pub root: PathBuf,

    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Extension of the files to index and stream
    #[arg(long, env = "MEDIA_EXTENSION", default_value = DEFAULT_MEDIA_EXTENSION)]
    pub extension: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    /// Open the media root and make sure there is something to serve
    ///
    /// # Errors
    /// Returns an error if the root is not a directory or holds no file
    /// with the configured extension
    pub fn open_root(&self) -> anyhow::Result<MediaRoot> {
        let root = MediaRoot::new(&self.root)
            .with_context(|| "No valid media directory configured")?
            .with_extension(&self.extension);

        if !root.has_media() {
            bail!(
                "No .{} files found in {}. Please choose a directory with movies.",
                root.extension(),
                root.path().display()
            );
        }

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("homestream").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_flags() {
        let config = parse(&["--root", "/srv/media", "--host", "127.0.0.1", "--port", "9000"]);
        assert_eq!(config.root, PathBuf::from("/srv/media"));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_parse_log_json_flag() {
        let config = parse(&["--root", "/srv/media", "--log-json"]);
        assert!(config.log_json);
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        let result = Config::try_parse_from(["homestream", "--root", "/srv", "--port", "http"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_open_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("movie.mp4"), b"movie").unwrap();

        let config = parse(&["--root", dir.path().to_str().unwrap(), "--extension", "mp4"]);
        let root = config.open_root().unwrap();
        assert_eq!(root.list_media(None), vec!["movie.mp4"]);
    }

    #[test]
    fn test_open_root_without_media() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"notes").unwrap();

        let config = parse(&["--root", dir.path().to_str().unwrap(), "--extension", "mp4"]);
        let err = config.open_root().unwrap_err();
        assert!(err.to_string().contains("No .mp4 files found"));
    }

    #[test]
    fn test_open_root_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let config = parse(&["--root", missing.to_str().unwrap()]);
        assert!(config.open_root().is_err());
    }

    #[test]
    fn test_open_root_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("movie.mkv"), b"movie").unwrap();

        let config = parse(&["--root", dir.path().to_str().unwrap(), "--extension", ".mkv"]);
        let root = config.open_root().unwrap();
        assert_eq!(root.extension(), "mkv");
    }
}
