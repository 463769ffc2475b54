//! Ingestion of a directory of BMKG exports
//!
//! - [`discovery`] - Input file enumeration and file-name location labels
//! - [`driver`] - Metadata pass and the per-file transaction loop
//! - [`report`] - Run-level counts and skipped-file reasons

pub mod discovery;
pub mod driver;
pub mod report;

#[cfg(test)]
mod tests;

pub use discovery::{discover_input_files, parse_location_label};
pub use driver::{IngestionDriver, IngestionOptions};
pub use report::{IngestionReport, LoadedFile, SkippedFile};
