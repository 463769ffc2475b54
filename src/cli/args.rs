//! Command-line argument definitions for the BMKG loader
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::constants::DEFAULT_INSPECT_LIMIT;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the BMKG weather data loader
///
/// Loads BMKG daily weather-station CSV exports into a star-schema SQLite
/// store and exports the joined dataset for reporting.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bmkg-etl",
    version,
    about = "Load BMKG daily weather CSV exports into a star-schema SQLite store",
    long_about = "Loads daily weather-station CSV exports published by BMKG into a star schema \
                  (location dimension, date dimension, climate fact table). Indonesian-locale \
                  values such as decimal commas and '-' placeholders are normalized, station \
                  metadata is attached to each location, and bad rows or files are skipped \
                  without aborting the run."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load every matching export in the data directory
    Ingest(IngestArgs),
    /// Create the star schema in a new or existing database
    InitDb(InitDbArgs),
    /// Show the first rows and row count of each table
    Inspect(InspectArgs),
    /// Check the database connection and print table row counts
    Check(CommonArgs),
    /// Write the joined, denormalized dataset to a CSV file
    Export(ExportArgs),
    /// List the compiled-in station registry
    Stations(StationsArgs),
}

/// Options shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Configuration file (TOML)
    ///
    /// Defaults to `<config_dir>/bmkg-etl/config.toml` when that file exists.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(long = "database", value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl CommonArgs {
    /// Get the appropriate log level based on verbose and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}

/// Arguments for the ingest command
#[derive(Debug, Clone, ClapArgs)]
pub struct IngestArgs {
    /// Directory containing the BMKG exports, overriding the configuration
    #[arg(short = 'd', long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show a progress bar over the input files
    #[arg(long = "progress")]
    pub progress: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl IngestArgs {
    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        self.progress && !self.common.quiet
    }
}

/// Arguments for the init-db command
#[derive(Debug, Clone, ClapArgs)]
pub struct InitDbArgs {
    /// Insert the registry's locations (name and kind only)
    #[arg(long = "seed")]
    pub seed: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, ClapArgs)]
pub struct InspectArgs {
    /// Rows shown per table
    #[arg(short = 'n', long = "limit", value_name = "N", default_value_t = DEFAULT_INSPECT_LIMIT)]
    pub limit: usize,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the export command
#[derive(Debug, Clone, ClapArgs)]
pub struct ExportArgs {
    /// Destination CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the stations command
#[derive(Debug, Clone, ClapArgs)]
pub struct StationsArgs {
    /// Print the registry as CSV instead of a table
    #[arg(long = "csv")]
    pub csv: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand() {
        assert!(parse(&["bmkg-etl"]).command.is_none());
    }

    #[test]
    fn test_ingest_args() {
        let args = parse(&[
            "bmkg-etl",
            "ingest",
            "--data-dir",
            "exports",
            "--database",
            "w.db",
            "--progress",
            "-vv",
        ]);
        match args.command {
            Some(Commands::Ingest(ingest)) => {
                assert_eq!(ingest.data_dir, Some(PathBuf::from("exports")));
                assert_eq!(ingest.common.database, Some(PathBuf::from("w.db")));
                assert_eq!(ingest.common.get_log_level(), "trace");
                assert!(ingest.show_progress());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_disables_progress() {
        let args = parse(&["bmkg-etl", "ingest", "--progress", "-q"]);
        match args.command {
            Some(Commands::Ingest(ingest)) => {
                assert!(!ingest.show_progress());
                assert_eq!(ingest.common.get_log_level(), "error");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["bmkg-etl", "check", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_inspect_default_limit() {
        match parse(&["bmkg-etl", "inspect"]).command {
            Some(Commands::Inspect(inspect)) => assert_eq!(inspect.limit, 10),
            other => panic!("unexpected command: {:?}", other),
        }
        match parse(&["bmkg-etl", "inspect", "--limit", "3"]).command {
            Some(Commands::Inspect(inspect)) => assert_eq!(inspect.limit, 3),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_requires_output() {
        assert!(Args::try_parse_from(["bmkg-etl", "export"]).is_err());
        match parse(&["bmkg-etl", "export", "-o", "out.csv"]).command {
            Some(Commands::Export(export)) => assert_eq!(export.output, PathBuf::from("out.csv")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_db_seed() {
        match parse(&["bmkg-etl", "init-db", "--seed"]).command {
            Some(Commands::InitDb(init)) => {
                assert!(init.seed);
                assert_eq!(init.common.get_log_level(), "info");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_and_stations() {
        assert!(matches!(
            parse(&["bmkg-etl", "check", "--database", "x.db"]).command,
            Some(Commands::Check(CommonArgs { database: Some(_), .. }))
        ));
        assert!(matches!(
            parse(&["bmkg-etl", "stations", "--csv"]).command,
            Some(Commands::Stations(StationsArgs { csv: true, .. }))
        ));
    }
}
