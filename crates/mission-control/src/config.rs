//! Configuration management for mission-control.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "mission-control";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "MISSION_CONTROL_";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8899;

/// Default number of activity entries kept on disk.
pub const DEFAULT_MAX_ACTIVITIES: usize = 100;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `MISSION_CONTROL_`, nested keys
///    separated by `__`)
/// 2. TOML config file at `~/.config/mission-control/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener and static file configuration.
    pub server: ServerConfig,
    /// Data file names.
    pub files: FilesConfig,
    /// Activity log configuration.
    pub activity: ActivityConfig,
}

/// Listener and static file configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Directory holding the dashboard and the JSON data files.
    pub root: PathBuf,
    /// Dashboard page served for `/` and `/index.html`.
    pub dashboard_file: String,
}

/// Names of the JSON files under the root directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Projects document, read by `GET /api/data`.
    pub projects: String,
    /// Activity log, read and written by `/api/activity`.
    pub activity: String,
    /// Saved dashboard data, overwritten by `POST /api/data`.
    pub saved_data: String,
}

/// Activity log configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityConfig {
    /// Maximum entries retained; older ones are dropped on write.
    pub max_entries: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            dashboard_file: "mission-control.html".to_string(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            projects: "projects-data.json".to_string(),
            activity: "mc-activity.json".to_string(),
            saved_data: "mc-data.json".to_string(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ACTIVITIES,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "server.host must not be empty".to_string(),
            });
        }

        if self.activity.max_entries == 0 {
            return Err(Error::ConfigValidation {
                message: "activity.max_entries must be greater than 0".to_string(),
            });
        }

        let names = [
            ("server.dashboard_file", &self.server.dashboard_file),
            ("files.projects", &self.files.projects),
            ("files.activity", &self.files.activity),
            ("files.saved_data", &self.files.saved_data),
        ];
        for (key, name) in names {
            if !is_plain_file_name(name) {
                return Err(Error::ConfigValidation {
                    message: format!("{key} must be a plain file name, got {name:?}"),
                });
            }
        }

        Ok(())
    }

    /// Listen address as `host:port`.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Root directory for static files and data files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.server.root
    }

    /// Path of the projects document.
    #[must_use]
    pub fn projects_path(&self) -> PathBuf {
        self.server.root.join(&self.files.projects)
    }

    /// Path of the activity log.
    #[must_use]
    pub fn activity_path(&self) -> PathBuf {
        self.server.root.join(&self.files.activity)
    }

    /// Path of the saved dashboard data.
    #[must_use]
    pub fn saved_data_path(&self) -> PathBuf {
        self.server.root.join(&self.files.saved_data)
    }

    /// Path of the dashboard page.
    #[must_use]
    pub fn dashboard_path(&self) -> PathBuf {
        self.server.root.join(&self.server.dashboard_file)
    }
}

/// A non-empty name with no directory separators or parent references.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}
