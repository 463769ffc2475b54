//! BMKG ETL Library
//!
//! A Rust library for loading daily weather-station CSV exports published by
//! BMKG (Badan Meteorologi, Klimatologi, dan Geofisika) into a star-schema
//! SQLite store: a location dimension, a date dimension and a climate fact
//! table.
//!
//! This library provides tools for:
//! - Normalizing Indonesian-locale cell values (decimal commas, `-` placeholders)
//! - A compiled-in registry of station metadata for the West-Java locations
//! - Resolving dimension surrogate keys with idempotent date inserts
//! - Loading fact rows per file with row-level error tolerance
//! - Driving best-effort ingestion across a directory of exports
//! - Exporting the joined, denormalized dataset for downstream dashboards

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bmkg_csv;
        pub mod dataset_export;
        pub mod dimension_resolver;
        pub mod fact_loader;
        pub mod ingestion;
        pub mod station_registry;
    }
    pub mod adapters {
        pub mod sqlite_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::adapters::sqlite_store::Store;
pub use app::models::{ClimateFact, LocationKind, Measurements, StationInfo};
pub use crate::config::Config;

/// Result type alias for the BMKG loader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for BMKG ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Database operation failed
    #[error("Database error: {message}: {source}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Station registry error
    #[error("Station registry error: {message}")]
    StationRegistry { message: String },

    /// Location dimension row not found
    #[error("Location not found: {name}, {kind}")]
    LocationNotFound { name: String, kind: String },

    /// Date cell matched none of the accepted formats
    #[error("Invalid date format: '{value}'")]
    InvalidDate { value: String },

    /// File has neither accepted spelling of the date column
    #[error("No date column (TANGGAL/Tanggal) in file '{file}'")]
    MissingDateColumn { file: String },

    /// File name does not follow the BMKG naming convention
    #[error("Cannot derive a location from file name '{file_name}'")]
    InvalidFileName { file_name: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a database error with context
    pub fn database(message: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a station registry error
    pub fn station_registry(message: impl Into<String>) -> Self {
        Self::StationRegistry {
            message: message.into(),
        }
    }

    /// Create a location not found error
    pub fn location_not_found(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::LocationNotFound {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create a missing date column error
    pub fn missing_date_column(file: impl Into<String>) -> Self {
        Self::MissingDateColumn { file: file.into() }
    }

    /// Create an invalid file name error
    pub fn invalid_file_name(file_name: impl Into<String>) -> Self {
        Self::InvalidFileName {
            file_name: file_name.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Whether this error must abort the whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::StationRegistry { .. } | Self::Database { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Database {
            message: "SQLite operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(error: ::config::ConfigError) -> Self {
        Self::Configuration {
            message: error.to_string(),
        }
    }
}
