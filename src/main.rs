use anyhow::Result;
use bmkg_etl::cli::args::{Args, Commands};
use bmkg_etl::cli::commands;
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match run(command) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(command: Commands) -> Result<()> {
    commands::run(command)?;
    Ok(())
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("BMKG ETL - Daily Weather Station Loader");
    println!("=======================================");
    println!();
    println!("Load BMKG daily weather-station CSV exports into a star-schema");
    println!("SQLite store (DimLokasi, DimWaktu, FactDataIklim).");
    println!();
    println!("USAGE:");
    println!("    bmkg-etl <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    init-db     Create the schema (use --seed to add the station locations)");
    println!("    ingest      Load every BMKG export in the data directory");
    println!("    inspect     Show the first rows of each table");
    println!("    check       Check the database connection and print row counts");
    println!("    export      Write the joined dataset to a CSV file");
    println!("    stations    List the compiled-in station registry");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Create the database and seed the five locations:");
    println!("    bmkg-etl init-db --seed");
    println!();
    println!("    # Load the exports in ./Data:");
    println!("    bmkg-etl ingest --progress");
    println!();
    println!("    # Load from another directory into another database:");
    println!("    bmkg-etl ingest --data-dir /path/to/exports --database /path/to/bmkg.db");
    println!();
    println!("For detailed help on any command, use:");
    println!("    bmkg-etl <COMMAND> --help");
}
