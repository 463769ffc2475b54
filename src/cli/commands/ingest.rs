//! Ingest command implementation

use super::shared::{load_configuration, open_store, setup_logging};
use crate::Result;
use crate::app::services::bmkg_csv::ColumnMapping;
use crate::app::services::ingestion::{IngestionDriver, IngestionOptions, IngestionReport};
use crate::app::services::station_registry::StationRegistry;
use crate::cli::args::IngestArgs;
use colored::*;
use tracing::info;

/// Run a full ingestion of the configured data directory
///
/// Skipped files and rows are reported but do not make the command fail.
pub fn run_ingest(args: IngestArgs) -> Result<()> {
    setup_logging(&args.common)?;

    let mut config = load_configuration(&args.common)?;
    if let Some(data_dir) = &args.data_dir {
        config = config.with_data_dir(data_dir);
    }
    config.validate()?;

    let registry = StationRegistry::builtin()?;
    info!(
        "Loaded station registry with {} stations",
        registry.station_count()
    );

    let mut store = open_store(&config)?;
    let options = IngestionOptions::from_config(&config)?.with_progress(args.show_progress());

    if !args.common.quiet {
        println!(
            "{} {}",
            "Loading BMKG exports from".bright_green().bold(),
            config.ingestion.data_dir.display().to_string().bright_white()
        );
    }

    let report = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options).run(&mut store)?;
    store.close()?;

    if !args.common.quiet {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &IngestionReport) {
    println!("\n{}", "Ingestion Summary".bright_green().bold());
    println!(
        "  {} {:.1}s",
        "Time elapsed:".bright_cyan(),
        report.elapsed.as_secs_f64()
    );
    println!(
        "  {} {}",
        "Stations updated:".bright_cyan(),
        report.stations_updated.to_string().bright_white()
    );
    println!(
        "  {} {} of {}",
        "Files loaded:".bright_cyan(),
        report.loaded.len().to_string().bright_white(),
        report.files_seen
    );
    for file in &report.loaded {
        let rate = format!("{:.1}%", file.stats.success_rate());
        let rate = if file.stats.is_successful() {
            rate.normal()
        } else {
            rate.bright_yellow()
        };
        println!(
            "    {} {} ({} rows, {})",
            file.file,
            file.location.dimmed(),
            file.stats.rows_imported,
            rate
        );
    }
    if !report.skipped.is_empty() {
        println!(
            "  {} {}",
            "Files skipped:".bright_red(),
            report.skipped.len().to_string().bright_red().bold()
        );
        for skipped in &report.skipped {
            println!("    {}: {}", skipped.file, skipped.reason.red());
        }
    }
    if !report.unmatched_stations.is_empty() {
        println!(
            "  {} {}",
            "Stations without location row:".bright_yellow(),
            report.unmatched_stations.join(", ")
        );
    }
    println!(
        "  {} {}",
        "Rows imported:".bright_cyan(),
        report.rows_imported().to_string().bright_white().bold()
    );
    if report.rows_skipped() > 0 {
        println!(
            "  {} {}",
            "Rows skipped:".bright_yellow(),
            report.rows_skipped().to_string().bright_yellow()
        );
    }
}
