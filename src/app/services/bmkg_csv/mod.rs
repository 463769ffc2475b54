//! BMKG CSV handling
//!
//! Reading and cell-level normalization of BMKG daily export files.
//!
//! ## Architecture
//!
//! - [`reader`] - Whole-file CSV reading
//! - [`column_mapping`] - Fixed field-to-header mapping and per-file header resolution
//! - [`field_parsers`] - Measurement, wind direction and date normalization
//!
//! ## Usage
//!
//! ```rust
//! use bmkg_etl::app::services::bmkg_csv::{parse_date, parse_measurement, parse_wind_direction};
//!
//! assert_eq!(parse_measurement("12,5"), Some(12.5));
//! assert_eq!(parse_measurement(" - "), None);
//! assert_eq!(parse_wind_direction(" NE "), Some("NE".to_string()));
//! assert_eq!(
//!     parse_date("31-12-2023").unwrap(),
//!     parse_date("2023-12-31").unwrap()
//! );
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod reader;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnMapping, HeaderIndex};
pub use field_parsers::{RawCell, parse_date, parse_measurement, parse_wind_direction};
pub use reader::{CsvTable, read_table};
