//! Application constants for the BMKG ETL loader
//!
//! This module contains the BMKG header names, sentinel spellings, date
//! formats and default settings used throughout the loader.

// =============================================================================
// Input File Conventions
// =============================================================================

/// Tag a file name must contain to be picked up for ingestion
pub const DEFAULT_INGEST_TAG: &str = "BMKG";

/// Extension (without the dot) of ingestible files
pub const DEFAULT_FILE_EXTENSION: &str = "csv";

/// Default directory scanned for input files
pub const DEFAULT_DATA_DIR: &str = "Data";

/// Marker inside a location label identifying a regency ("Kabupaten")
pub const REGENCY_MARKER: &str = "Kab";

/// Prefixes stripped from a location label to obtain the bare location name
pub const LOCATION_LABEL_PREFIXES: &[&str] = &["Kab. ", "Kota "];

/// Separator between the free-form part of a file name and the location label
pub const LOCATION_LABEL_SEPARATOR: char = '-';

// =============================================================================
// Database Defaults
// =============================================================================

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "bmkg.db";

/// Connection timeout in seconds (applied as the SQLite busy timeout)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 120;

/// Default number of rows shown per table by `inspect`
pub const DEFAULT_INSPECT_LIMIT: usize = 10;

// =============================================================================
// CSV Column Names
// =============================================================================

/// Source header names used in BMKG daily exports
pub mod columns {
    /// Date column, upper-case spelling (preferred when both exist)
    pub const DATE_UPPER: &str = "TANGGAL";
    /// Date column, title-case spelling used by older exports
    pub const DATE_TITLE: &str = "Tanggal";

    pub const RAINFALL: &str = "RR";
    pub const TEMP_MIN: &str = "TN";
    pub const TEMP_MAX: &str = "TX";
    pub const TEMP_AVG: &str = "TAVG";
    pub const HUMIDITY_AVG: &str = "RH_AVG";
    pub const SUNSHINE: &str = "SS";
    pub const WIND_SPEED_MAX: &str = "FF_X";
    pub const WIND_DIR_MAX: &str = "DDD_X";
    pub const WIND_SPEED_AVG: &str = "FF_AVG";
    pub const WIND_DIR_PREDOMINANT: &str = "DDD_CAR";

    /// Accepted spellings of the date column, in lookup order
    pub const DATE_VARIANTS: &[&str] = &[DATE_UPPER, DATE_TITLE];
}

// =============================================================================
// Value Normalization
// =============================================================================

/// Placeholder BMKG writes for a missing observation
pub const PLACEHOLDER_DASH: &str = "-";

/// Spellings read as "no value" when loading a CSV cell
pub const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Date formats tried in order: day-month-year first, then ISO
pub const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%Y-%m-%d"];

/// Rainfall codes meaning "no observation" (8888) or "not measured" (9999)
pub mod rainfall_sentinels {
    pub const NO_DATA: f64 = 8888.0;
    pub const NOT_MEASURED: f64 = 9999.0;

    pub const ALL: &[f64] = &[NO_DATA, NOT_MEASURED];
}

/// Indonesian month names, January first
pub const MONTH_NAMES_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

// =============================================================================
// Progress Reporting
// =============================================================================

/// Upper bound on the row interval between progress messages
pub const MAX_PROGRESS_INTERVAL: usize = 50;

/// Progress is reported roughly this many times per file
pub const PROGRESS_STEPS: usize = 10;

/// Row interval between progress log lines for a file of `total_rows` rows
pub fn progress_interval(total_rows: usize) -> usize {
    (total_rows / PROGRESS_STEPS).clamp(1, MAX_PROGRESS_INTERVAL)
}

/// Localized month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES_ID[(month - 1) as usize],
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_interval_bounds() {
        assert_eq!(progress_interval(0), 1);
        assert_eq!(progress_interval(5), 1);
        assert_eq!(progress_interval(100), 10);
        assert_eq!(progress_interval(365), 36);
        assert_eq!(progress_interval(10_000), MAX_PROGRESS_INTERVAL);
    }

    #[test]
    fn test_month_name_lookup() {
        assert_eq!(month_name(1), "Januari");
        assert_eq!(month_name(8), "Agustus");
        assert_eq!(month_name(12), "Desember");
        assert_eq!(month_name(13), "");
        assert_eq!(month_name(0), "");
    }
}
