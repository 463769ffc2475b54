//! Fact loading for one export file
//!
//! Walks the rows of a file in source order, normalizes each row and inserts
//! one fact row per parseable date. Failures are contained to the row: an
//! invalid date or a rejected insert is logged and counted, and the loop moves
//! on. No transaction is opened here; the caller commits once per file.

use super::stats::LoadStats;
use crate::app::models::{ClimateFact, FieldKind, MeasurementValue, Measurements, TargetField};
use crate::app::services::bmkg_csv::{
    ColumnMapping, CsvTable, HeaderIndex, parse_date, parse_measurement, parse_wind_direction,
};
use crate::app::services::dimension_resolver::DimensionResolver;
use crate::constants::{columns, progress_interval};
use crate::Result;
use csv::StringRecord;
use rusqlite::{Connection, ToSql};
use tracing::{debug, error, info, warn};

/// Loads the rows of one file into the fact table
#[derive(Debug)]
pub struct FactLoader<'m> {
    mapping: &'m ColumnMapping,
    insert_sql: String,
}

impl<'m> FactLoader<'m> {
    /// Create a loader for a validated column mapping
    pub fn new(mapping: &'m ColumnMapping) -> Self {
        Self {
            mapping,
            insert_sql: build_insert_sql(),
        }
    }

    /// Insert one fact row per valid record of `table`
    ///
    /// # Errors
    /// * Returns `Error::MissingDateColumn` before touching any row if the
    ///   file has no date column; row-level failures never surface here
    pub fn load_table(
        &self,
        conn: &Connection,
        location_key: i64,
        table: &CsvTable,
        file_label: &str,
    ) -> Result<LoadStats> {
        let header_index = HeaderIndex::analyze(&table.headers, self.mapping, file_label)?;
        debug!("Columns found: {}", table.header_list());

        let missing = header_index.missing_fields();
        if !missing.is_empty() {
            debug!(
                "{} has no source column for: {}",
                file_label,
                missing
                    .iter()
                    .map(|f| f.column_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let resolver = DimensionResolver::new(conn);
        let total_rows = table.len();
        let log_interval = progress_interval(total_rows);
        let mut stats = LoadStats::new();

        info!("Starting to process {} rows of data", total_rows);

        for (position, record) in table.records.iter().enumerate() {
            let row_number = position + 1;
            stats.total_rows += 1;

            if row_number % log_interval == 0 || row_number == total_rows {
                info!(
                    "Progress: {}/{} rows ({}%) for {}",
                    row_number,
                    total_rows,
                    row_number * 100 / total_rows,
                    file_label
                );
                if let Some(index) = header_index.name_to_index.get(columns::RAINFALL) {
                    debug!("Raw RR value: '{}'", record.get(*index).unwrap_or(""));
                }
            }

            let raw_date = record.get(header_index.date_index);
            let date = match parse_date(raw_date) {
                Ok(date) => date,
                Err(e) => {
                    warn!("Invalid date format: {}, skipping row", raw_date.unwrap_or(""));
                    stats.invalid_dates += 1;
                    stats.errors.push(format!("Row {}: {}", row_number, e));
                    continue;
                }
            };

            let date_key = match resolver.resolve_or_create_date(date) {
                Ok(key) => key,
                Err(e) => {
                    error!("Error resolving date {}: {}", date, e);
                    stats.failed_inserts += 1;
                    stats.errors.push(format!("Row {}: {}", row_number, e));
                    continue;
                }
            };

            let fact = ClimateFact {
                date_key,
                location_key,
                measurements: normalize_record(record, &header_index),
            };

            match self.insert_fact(conn, &fact) {
                Ok(()) => stats.rows_imported += 1,
                Err(e) => {
                    error!("Error inserting data: {}", e);
                    stats.failed_inserts += 1;
                    stats.errors.push(format!("Row {}: {}", row_number, e));
                }
            }
        }

        Ok(stats)
    }

    /// Insert a single fact row
    pub fn insert_fact(&self, conn: &Connection, fact: &ClimateFact) -> Result<()> {
        let values: Vec<MeasurementValue> = TargetField::ALL
            .iter()
            .map(|field| fact.measurements.get(*field))
            .collect();

        let mut params: Vec<&dyn ToSql> = Vec::with_capacity(2 + values.len());
        params.push(&fact.date_key);
        params.push(&fact.location_key);
        params.extend(values.iter().map(|v| v as &dyn ToSql));

        conn.prepare_cached(&self.insert_sql)?
            .execute(params.as_slice())?;
        Ok(())
    }
}

/// Normalize the mapped columns of a record
///
/// Every target field gets a value; an absent column yields `None`.
pub fn normalize_record(record: &StringRecord, header_index: &HeaderIndex) -> Measurements {
    let mut measurements = Measurements::default();

    for (field, index) in &header_index.field_indices {
        let raw = index.and_then(|i| record.get(i));
        let value = match field.kind() {
            FieldKind::Numeric => MeasurementValue::Numeric(parse_measurement(raw)),
            FieldKind::WindDirection => MeasurementValue::Direction(parse_wind_direction(raw)),
        };
        measurements.set(*field, value);
    }

    measurements
}

/// `INSERT` statement covering the keys and all ten measurement columns
fn build_insert_sql() -> String {
    let column_list: Vec<&str> = TargetField::ALL.iter().map(|f| f.column_name()).collect();
    let placeholders: Vec<String> = (1..=column_list.len() + 2)
        .map(|i| format!("?{}", i))
        .collect();

    format!(
        "INSERT INTO FactDataIklim (waktu_id, lokasi_id, {}) VALUES ({})",
        column_list.join(", "),
        placeholders.join(", ")
    )
}
