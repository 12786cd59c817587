//! Static file resolution for the dashboard.
//!
//! Maps URL paths onto files under the root directory, picks a content type
//! from the file extension, and reads the bytes.

use std::path::{Component, Path, PathBuf};

use tokio::fs;

use crate::config::Config;
use crate::error::{Error, Result};

/// Content type for extensions not in the table.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Where the bytes came from.
    pub path: PathBuf,
    /// MIME type derived from the extension.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Resolves URL paths to files under a root directory.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    dashboard_file: String,
}

impl StaticFiles {
    /// Create a resolver rooted at `root` with the given dashboard page.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, dashboard_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            dashboard_file: dashboard_file.into(),
        }
    }

    /// Create a resolver from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.root(), config.server.dashboard_file.clone())
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the dashboard page.
    #[must_use]
    pub fn dashboard_path(&self) -> PathBuf {
        self.root.join(&self.dashboard_file)
    }

    /// Map a URL path to a file location.
    ///
    /// `/` and `/index.html` always map to the dashboard. Other paths must
    /// name an existing regular file; the dashboard's own URL falls back to
    /// the dashboard location even when that check fails. Paths climbing
    /// out of the root with `..` never resolve.
    pub async fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        if url_path == "/" || url_path == "/index.html" {
            return Some(self.dashboard_path());
        }

        let relative = Path::new(url_path.trim_start_matches('/'));
        if !is_contained(relative) {
            return None;
        }

        let candidate = self.root.join(relative);
        let is_file = fs::metadata(&candidate)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if is_file {
            return Some(candidate);
        }

        let dashboard_url = format!("/{}", self.dashboard_file);
        (url_path == dashboard_url).then(|| self.dashboard_path())
    }

    /// Resolve and read a URL path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the path does not resolve or the file
    /// has vanished, and an I/O error for any other read failure.
    pub async fn load(&self, url_path: &str) -> Result<Asset> {
        let path = self
            .resolve(url_path)
            .await
            .ok_or_else(|| Error::not_found(url_path))?;

        let bytes = fs::read(&path).await.map_err(|err| Error::file(&path, err))?;
        Ok(Asset {
            content_type: content_type_for(&path),
            path,
            bytes,
        })
    }
}

/// Only plain names and `.` are allowed; `..`, roots and prefixes are not.
fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// Content type for a file, from its extension.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html" | "htm") => "text/html",
        Some("js" | "mjs") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("md") => "text/markdown",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("wasm") => "application/wasm",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_root() -> (TempDir, StaticFiles) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mission-control.html"), "<h1>dash</h1>").unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>other</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        std::fs::create_dir(dir.path().join("img")).unwrap();
        std::fs::write(dir.path().join("img/logo.PNG"), [0x89, b'P', b'N', b'G']).unwrap();
        let files = StaticFiles::new(dir.path(), "mission-control.html");
        (dir, files)
    }

    #[test]
    fn test_content_type_table() {
        let cases = [
            ("a.html", "text/html"),
            ("a.js", "text/javascript"),
            ("a.css", "text/css"),
            ("a.json", "application/json"),
            ("a.png", "image/png"),
            ("a.jpg", "image/jpeg"),
            ("a.jpeg", "image/jpeg"),
            ("a.gif", "image/gif"),
            ("a.svg", "image/svg+xml"),
            ("a.ico", "image/x-icon"),
            ("a.woff2", "font/woff2"),
        ];
        for (name, expected) in cases {
            assert_eq!(content_type_for(Path::new(name)), expected, "{name}");
        }
    }

    #[test]
    fn test_content_type_unknown_defaults() {
        assert_eq!(content_type_for(Path::new("a.xyz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert_eq!(content_type_for(Path::new("LOGO.PNG")), "image/png");
    }

    #[tokio::test]
    async fn test_root_resolves_to_dashboard() {
        let (_dir, files) = create_test_root();
        assert_eq!(files.resolve("/").await, Some(files.dashboard_path()));
        assert_eq!(
            files.resolve("/index.html").await,
            Some(files.dashboard_path())
        );
    }

    #[tokio::test]
    async fn test_root_resolves_even_without_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let files = StaticFiles::new(dir.path(), "mission-control.html");
        assert_eq!(files.resolve("/").await, Some(files.dashboard_path()));

        let err = files.load("/").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_resolve_existing_file() {
        let (dir, files) = create_test_root();
        assert_eq!(
            files.resolve("/img/logo.PNG").await,
            Some(dir.path().join("img/logo.PNG"))
        );
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let (_dir, files) = create_test_root();
        assert_eq!(files.resolve("/nope.png").await, None);
    }

    #[tokio::test]
    async fn test_resolve_directory_is_not_a_file() {
        let (_dir, files) = create_test_root();
        assert_eq!(files.resolve("/img").await, None);
        assert_eq!(files.resolve("/img/").await, None);
    }

    #[tokio::test]
    async fn test_dashboard_url_falls_back_to_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let files = StaticFiles::new(dir.path(), "mission-control.html");
        assert_eq!(
            files.resolve("/mission-control.html").await,
            Some(files.dashboard_path())
        );
    }

    #[tokio::test]
    async fn test_parent_components_never_resolve() {
        let (_dir, files) = create_test_root();
        assert_eq!(files.resolve("/../secret.txt").await, None);
        assert_eq!(files.resolve("/img/../../secret.txt").await, None);
    }

    #[tokio::test]
    async fn test_load_reads_bytes_and_type() {
        let (_dir, files) = create_test_root();
        let asset = files.load("/app.js").await.unwrap();
        assert_eq!(asset.bytes, b"console.log(1);");
        assert_eq!(asset.content_type, "text/javascript");
    }

    #[tokio::test]
    async fn test_load_index_serves_dashboard_not_literal_file() {
        let (_dir, files) = create_test_root();
        let asset = files.load("/index.html").await.unwrap();
        assert_eq!(asset.bytes, b"<h1>dash</h1>");
        assert_eq!(asset.content_type, "text/html");
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let (_dir, files) = create_test_root();
        let err = files.load("/nope.png").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
