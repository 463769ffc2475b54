//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `.env` and `BMKG__*` environment variables, then command-line flags
//! (applied by the CLI through the `with_*` builders).

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATA_DIR, DEFAULT_DATABASE_PATH, DEFAULT_FILE_EXTENSION,
    DEFAULT_INGEST_TAG,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Prefix of environment variables read into the configuration
pub const ENV_PREFIX: &str = "BMKG";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,

    /// Busy timeout applied to the connection, in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Input file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Directory scanned (non-recursively) for exports
    pub data_dir: PathBuf,

    /// Substring a file name must contain
    pub ingest_tag: String,

    /// File extension without the dot
    pub file_extension: String,

    /// Single-character field delimiter
    pub delimiter: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ingest_tag: DEFAULT_INGEST_TAG.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            delimiter: ",".to_string(),
        }
    }
}

/// Top-level loader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub ingestion: IngestionConfig,
}

impl Config {
    /// Load defaults, the config file, `.env` and the environment
    ///
    /// An explicitly given `config_file` must exist. Without one, the
    /// per-user file from [`default_config_path`] is read if present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let mut builder = config::Config::builder();

        match config_file {
            Some(path) => {
                debug!("Reading configuration from {}", path.display());
                builder = builder.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    debug!("Reading configuration from {}", path.display());
                    builder = builder.add_source(config::File::from(path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the loader cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.database.connect_timeout_secs == 0 {
            return Err(Error::configuration("connect_timeout_secs must be greater than 0"));
        }
        if self.ingestion.ingest_tag.trim().is_empty() {
            return Err(Error::configuration("ingest_tag must not be empty"));
        }
        if self.ingestion.file_extension.trim().is_empty() {
            return Err(Error::configuration("file_extension must not be empty"));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// Busy timeout for the database connection
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database.connect_timeout_secs)
    }

    /// The delimiter as a single ASCII byte
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.ingestion.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(Error::configuration(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.ingestion.delimiter
            ))),
        }
    }

    /// Override the database file
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database.path = path.into();
        self
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.ingestion.data_dir = data_dir.into();
        self
    }
}

/// Per-user configuration file, `<config_dir>/bmkg-etl/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bmkg-etl").join("config.toml"))
}
