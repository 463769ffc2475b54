//! Per-file load statistics

use serde::Serialize;

/// Simple load statistics for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadStats {
    /// Total number of data rows encountered
    pub total_rows: usize,

    /// Number of fact rows inserted
    pub rows_imported: usize,

    /// Number of rows skipped because the date did not parse
    pub invalid_dates: usize,

    /// Number of rows whose insert failed
    pub failed_inserts: usize,

    /// List of row errors for debugging
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_rows: 0,
            rows_imported: 0,
            invalid_dates: 0,
            failed_inserts: 0,
            errors: Vec::new(),
        }
    }

    /// Rows that did not become fact rows
    pub fn rows_skipped(&self) -> usize {
        self.invalid_dates + self.failed_inserts
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.rows_imported as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if loading was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}
