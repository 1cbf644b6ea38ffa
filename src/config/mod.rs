use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result, SongLibraryError};

pub mod builder;
pub mod env;
pub mod validation;

pub use builder::ConfigBuilder;

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_LOOKUP_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOOKUP_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

fn default_lookup_timeout_seconds() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT_SECONDS
}

fn default_shutdown_timeout_seconds() -> u64 {
    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS
}

/// Deployment environment; controls default log verbosity and debug routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = SongLibraryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(ConfigError::InvalidValue {
                field: "environment".to_string(),
                value: other.to_string(),
            }
            .into()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment (local, dev, prod)
    #[serde(default)]
    pub environment: Environment,

    /// Address the HTTP server listens on
    pub address: String,

    /// Database file path
    pub database_path: PathBuf,

    /// Base URL of the song info lookup service
    pub lookup_url: String,

    /// Timeout for lookup requests (seconds)
    #[serde(default = "default_lookup_timeout_seconds")]
    pub lookup_timeout_seconds: u64,

    /// Grace period for in-flight requests on shutdown (seconds)
    #[serde(default = "default_shutdown_timeout_seconds")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            address: DEFAULT_ADDRESS.to_string(),
            database_path: default_data_path().join("songs.db"),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            lookup_timeout_seconds: DEFAULT_LOOKUP_TIMEOUT_SECONDS,
            shutdown_timeout_seconds: DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        }
    }
}

/// Platform data directory, or the current directory when none is available.
pub(crate) fn default_data_path() -> PathBuf {
    match ProjectDirs::from("org", "songlibrary", "song-library") {
        Some(project_dirs) => project_dirs.data_dir().to_path_buf(),
        None => {
            warn!("ProjectDirs unavailable; falling back to current directory for data path");
            PathBuf::from(".")
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file, then `.env` and
    /// process environment variables (highest priority).
    pub fn load(config_path: Option<&str>, env_file: Option<&str>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(ConfigError::EnvFile)?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        let config = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        ConfigBuilder::from_config(config).load_from_env()?.build()
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::Serialize)?)
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "songlibrary", "song-library")
            .map(|project_dirs| project_dirs.config_dir().join("config.toml"))
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_seconds)
    }
}
