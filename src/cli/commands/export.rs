//! Export command implementation

use super::shared::{load_configuration, open_store, setup_logging};
use crate::app::services::dataset_export::{load_dataset, write_csv};
use crate::cli::args::ExportArgs;
use crate::{Error, Result};
use colored::*;
use std::fs::File;
use std::io::BufWriter;

/// Write the joined dataset to the output file
pub fn run_export(args: ExportArgs) -> Result<()> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;
    let store = open_store(&config)?;

    let records = load_dataset(store.connection())?;
    store.close()?;

    let file = File::create(&args.output)
        .map_err(|e| Error::io(format!("Cannot create {}", args.output.display()), e))?;
    let written = write_csv(&records, BufWriter::new(file))?;

    if !args.common.quiet {
        println!(
            "{} {} rows to {}",
            "Exported".bright_green().bold(),
            written.to_string().bright_white(),
            args.output.display()
        );
    }
    Ok(())
}
