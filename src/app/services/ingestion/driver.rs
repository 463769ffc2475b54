//! Best-effort ingestion over a directory of exports
//!
//! The station metadata pass runs and commits first. Each file then gets its
//! own transaction. A file-level failure is logged, recorded in the report
//! and the run moves on to the next file; a database failure aborts the run.

use super::discovery::{discover_input_files, parse_location_label};
use super::report::IngestionReport;
use crate::Store;
use crate::app::services::bmkg_csv::{ColumnMapping, read_table};
use crate::app::services::dimension_resolver::DimensionResolver;
use crate::app::services::fact_loader::{FactLoader, LoadStats};
use crate::app::services::station_registry::StationRegistry;
use crate::config::Config;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

/// Settings for one ingestion run
#[derive(Debug, Clone)]
pub struct IngestionOptions {
    pub data_dir: PathBuf,
    pub ingest_tag: String,
    pub file_extension: String,
    pub delimiter: u8,
    pub show_progress: bool,
}

impl IngestionOptions {
    /// Options from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            data_dir: config.ingestion.data_dir.clone(),
            ingest_tag: config.ingestion.ingest_tag.clone(),
            file_extension: config.ingestion.file_extension.clone(),
            delimiter: config.delimiter_byte()?,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Drives the metadata pass and the per-file load loop
#[derive(Debug)]
pub struct IngestionDriver<'r> {
    registry: &'r StationRegistry,
    mapping: ColumnMapping,
    options: IngestionOptions,
}

impl<'r> IngestionDriver<'r> {
    pub fn new(registry: &'r StationRegistry, mapping: ColumnMapping, options: IngestionOptions) -> Self {
        Self {
            registry,
            mapping,
            options,
        }
    }

    /// Run the whole ingestion against `store`
    ///
    /// # Errors
    /// * Returns `Error::Configuration` for an invalid column mapping or a
    ///   missing data directory
    /// * Returns `Error::Database` if the metadata pass or any file's
    ///   transaction hits a database failure; the failing file is rolled back
    ///
    /// Other file and row failures are reported, never returned.
    pub fn run(&self, store: &mut Store) -> Result<IngestionReport> {
        let started = Instant::now();
        self.mapping.validate()?;

        let mut report = IngestionReport::default();

        let tx = store.transaction()?;
        let metadata = DimensionResolver::new(&tx).update_station_metadata(self.registry)?;
        tx.commit()
            .map_err(|e| Error::database("Failed to commit station metadata", e))?;
        info!("Updated station metadata for {} locations", metadata.updated);
        report.stations_updated = metadata.updated;
        report.unmatched_stations = metadata.unmatched;

        let files = discover_input_files(
            &self.options.data_dir,
            &self.options.ingest_tag,
            &self.options.file_extension,
        )?;
        report.files_seen = files.len();

        let progress = self.create_progress_bar(files.len() as u64);

        for path in &files {
            let file_name = display_name(path);
            progress.set_message(file_name.clone());
            info!("Processing file: {}", file_name);

            match self.ingest_file(store, path, &file_name) {
                Ok((location, stats)) => {
                    info!(
                        "Completed processing {}. Successfully imported {} rows",
                        file_name, stats.rows_imported
                    );
                    if stats.rows_skipped() > 0 {
                        warn!("{} rows skipped in {}", stats.rows_skipped(), file_name);
                    }
                    report.record_loaded(file_name, location, stats);
                }
                Err(e) if e.is_fatal() => {
                    error!("Aborting ingestion at {}: {}", file_name, e);
                    progress.abandon();
                    return Err(e);
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    report.record_skipped(file_name, e.to_string());
                }
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        report.elapsed = started.elapsed();
        info!("{}", report.summary());
        Ok(report)
    }

    /// Load one file inside its own transaction
    fn ingest_file(&self, store: &mut Store, path: &Path, file_name: &str) -> Result<(String, LoadStats)> {
        let location = parse_location_label(file_name, &self.options.file_extension)?;
        info!("Location: {}", location);

        let tx = store.transaction()?;
        let location_key = DimensionResolver::new(&tx).resolve_location(&location)?;

        let table = read_table(path, self.options.delimiter)?;
        let stats = FactLoader::new(&self.mapping).load_table(&tx, location_key, &table, file_name)?;
        tx.commit()
            .map_err(|e| Error::database(format!("Failed to commit {}", file_name), e))?;

        Ok((location.to_string(), stats))
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
