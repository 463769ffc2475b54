//! Run-level ingestion report

use super::super::fact_loader::LoadStats;
use serde::Serialize;
use std::time::Duration;

/// A file whose rows were committed
#[derive(Debug, Clone, Serialize)]
pub struct LoadedFile {
    pub file: String,
    pub location: String,
    pub stats: LoadStats,
}

/// A file rejected before commit, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

/// Aggregated outcome of one ingestion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestionReport {
    /// Number of input files discovered
    pub files_seen: usize,
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
    /// Location rows that received station metadata
    pub stations_updated: usize,
    /// Registry keys with no location row
    pub unmatched_stations: Vec<String>,
    pub elapsed: Duration,
}

impl IngestionReport {
    pub fn record_loaded(&mut self, file: impl Into<String>, location: impl Into<String>, stats: LoadStats) {
        self.loaded.push(LoadedFile {
            file: file.into(),
            location: location.into(),
            stats,
        });
    }

    pub fn record_skipped(&mut self, file: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedFile {
            file: file.into(),
            reason: reason.into(),
        });
    }

    /// Fact rows committed across all files
    pub fn rows_imported(&self) -> usize {
        self.loaded.iter().map(|f| f.stats.rows_imported).sum()
    }

    /// Rows that did not become fact rows in committed files
    pub fn rows_skipped(&self) -> usize {
        self.loaded.iter().map(|f| f.stats.rows_skipped()).sum()
    }

    /// True when any file or row was skipped
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty() || self.rows_skipped() > 0
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} of {} files loaded, {} skipped; {} rows imported, {} rows skipped in {:.1}s",
            self.loaded.len(),
            self.files_seen,
            self.skipped.len(),
            self.rows_imported(),
            self.rows_skipped(),
            self.elapsed.as_secs_f64()
        )
    }
}
