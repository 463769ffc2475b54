//! Whole-file CSV reading for BMKG exports

use crate::{Error, Result};
use csv::StringRecord;
use std::path::Path;
use tracing::debug;

/// Tabular content of one export file
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl CsvTable {
    /// Number of data rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header names joined for logging
    pub fn header_list(&self) -> String {
        self.headers.iter().collect::<Vec<_>>().join(", ")
    }
}

/// Read the whole file into memory
///
/// Short or long rows are accepted; a record that cannot be decoded fails the
/// whole file.
pub fn read_table(path: &Path, delimiter: u8) -> Result<CsvTable> {
    let file_label = path.display().to_string();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| Error::csv_parsing(&file_label, "Failed to open file", Some(e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_parsing(&file_label, "Failed to read CSV headers", Some(e)))?
        .clone();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            Error::csv_parsing(
                &file_label,
                format!("Malformed record at data row {}", index + 1),
                Some(e),
            )
        })?;
        records.push(record);
    }

    debug!(
        "Read {} columns and {} rows from {}",
        headers.len(),
        records.len(),
        file_label
    );

    Ok(CsvTable { headers, records })
}
