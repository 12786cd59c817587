//! Flat-file JSON store for mission-control.
//!
//! Three documents live under the root directory:
//! - the projects document, read-only from the server's point of view
//! - the activity log, read and rewritten on every post
//! - saved dashboard data, overwritten on every post
//!
//! Nothing is cached between calls. Every operation opens, parses and (for
//! writes) rewrites the file, so concurrent writers race and the last one to
//! finish wins.

pub mod activity;

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::fs;
use tracing::{debug, warn};

pub use activity::{activity_id, ActivityEntry, ActivityLog};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::now_iso;

/// Result of reading the projects document.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectsDocument {
    /// Parsed from the file on disk.
    Stored(Value),
    /// Synthesized because the file was missing or unreadable as JSON.
    Synthesized(Value),
}

impl ProjectsDocument {
    /// An empty document marked as coming from the server.
    #[must_use]
    pub fn empty() -> Self {
        Self::Synthesized(json!({
            "lastUpdated": now_iso(),
            "source": "server",
            "projectCount": 0,
            "projects": {},
        }))
    }

    /// Whether the document came from disk.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }

    /// The JSON value, wherever it came from.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Stored(value) | Self::Synthesized(value) => value,
        }
    }
}

/// Reads and writes the dashboard's JSON files.
#[derive(Debug, Clone)]
pub struct FileStore {
    projects_path: PathBuf,
    activity_path: PathBuf,
    saved_data_path: PathBuf,
    max_activities: usize,
}

impl FileStore {
    /// Create a store over explicit file paths.
    #[must_use]
    pub fn new(
        projects_path: impl Into<PathBuf>,
        activity_path: impl Into<PathBuf>,
        saved_data_path: impl Into<PathBuf>,
        max_activities: usize,
    ) -> Self {
        Self {
            projects_path: projects_path.into(),
            activity_path: activity_path.into(),
            saved_data_path: saved_data_path.into(),
            max_activities,
        }
    }

    /// Create a store using the configured root and file names.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.projects_path(),
            config.activity_path(),
            config.saved_data_path(),
            config.activity.max_entries,
        )
    }

    /// Path of the projects document.
    #[must_use]
    pub fn projects_path(&self) -> &Path {
        &self.projects_path
    }

    /// Path of the activity log.
    #[must_use]
    pub fn activity_path(&self) -> &Path {
        &self.activity_path
    }

    /// Path of the saved data file.
    #[must_use]
    pub fn saved_data_path(&self) -> &Path {
        &self.saved_data_path
    }

    /// Read the projects document.
    ///
    /// A missing or unparseable file yields [`ProjectsDocument::empty`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub async fn load_projects(&self) -> Result<ProjectsDocument> {
        let Some(raw) = read_optional(&self.projects_path).await? else {
            debug!(path = %self.projects_path.display(), "projects document missing");
            return Ok(ProjectsDocument::empty());
        };

        match serde_json::from_slice(&raw) {
            Ok(value) => Ok(ProjectsDocument::Stored(value)),
            Err(err) => {
                warn!(
                    path = %self.projects_path.display(),
                    error = %err,
                    "projects document is not valid JSON, serving empty document"
                );
                Ok(ProjectsDocument::empty())
            }
        }
    }

    /// Overwrite the saved data file with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_data(&self, data: &Value) -> Result<()> {
        write_json(&self.saved_data_path, data).await
    }

    /// Read the activity log.
    ///
    /// A missing file yields an empty log. Keys the server does not use are
    /// kept, and `count` is reported as the number of entries actually
    /// present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid log.
    pub async fn load_activity(&self) -> Result<ActivityLog> {
        let Some(raw) = read_optional(&self.activity_path).await? else {
            return Ok(ActivityLog::empty());
        };
        let mut log: ActivityLog = serde_json::from_slice(&raw)?;
        log.recount();
        Ok(log)
    }

    /// Add an entry to the activity log and persist it.
    ///
    /// A corrupt log on disk is discarded and replaced by a fresh one.
    /// Returns the id assigned to the new entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written.
    pub async fn record_activity(&self, fields: ActivityEntry) -> Result<String> {
        let mut log = match read_optional(&self.activity_path).await? {
            Some(raw) => serde_json::from_slice(&raw).unwrap_or_else(|err| {
                warn!(
                    path = %self.activity_path.display(),
                    error = %err,
                    "activity log is corrupt, starting a fresh one"
                );
                ActivityLog::empty()
            }),
            None => ActivityLog::empty(),
        };

        let id = log.record(fields, Utc::now(), self.max_activities);
        write_json(&self.activity_path, &log).await?;
        debug!(%id, count = log.count, "activity recorded");
        Ok(id)
    }
}

/// Read a file's bytes, mapping "does not exist" to `None`.
///
/// Content is not decoded here; undecodable text surfaces as a JSON error.
async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::file(path, err)),
    }
}

/// Write `value` as pretty-printed JSON, replacing any existing file.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body)
        .await
        .map_err(|err| Error::file(path, err))
}
