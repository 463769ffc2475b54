//! Inspect and check command implementations

use super::shared::{load_configuration, open_store, setup_logging};
use crate::Result;
use crate::app::adapters::sqlite_store::ALL_TABLES;
use crate::app::adapters::sqlite_store::queries::{TablePreview, preview_table};
use crate::cli::args::{CommonArgs, InspectArgs};
use colored::*;

/// Print the first rows and the row count of each table
pub fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;
    let store = open_store(&config)?;

    for table in ALL_TABLES {
        let preview = preview_table(store.connection(), table, args.limit)?;
        print_preview(&preview);
    }

    store.close()
}

/// Connectivity check printing the row count of each table
pub fn run_check(args: CommonArgs) -> Result<()> {
    setup_logging(&args)?;
    let config = load_configuration(&args)?;
    let store = open_store(&config)?;
    let counts = store.table_counts()?;
    store.close()?;

    println!(
        "{} {}",
        "Connection successful:".bright_green().bold(),
        config.database.path.display()
    );
    println!("  {} {}", "DimLokasi:".bright_cyan(), counts.locations);
    println!("  {} {}", "DimWaktu:".bright_cyan(), counts.dates);
    println!("  {} {}", "FactDataIklim:".bright_cyan(), counts.facts);
    Ok(())
}

fn print_preview(preview: &TablePreview) {
    println!("\n{}", format!("Data from {}", preview.table).bright_green().bold());
    if preview.is_empty() {
        println!("  {}", "No data".dimmed());
        return;
    }

    println!("  {}", preview.columns.join(" | ").bright_cyan());
    for row in &preview.rows {
        println!("  {}", row.join(" | "));
    }
    println!("  {} {}", "Total rows:".bright_cyan(), preview.total_rows);
}
