//! Command implementations for the BMKG loader CLI
//!
//! Each command is implemented in its own module.

pub mod export;
pub mod ingest;
pub mod init_db;
pub mod inspect;
pub mod shared;
pub mod stations;

use crate::Result;
use crate::cli::args::Commands;

/// Main command runner
///
/// Dispatches to the handler of the given subcommand:
/// - `ingest`: Load the data directory into the star schema
/// - `init-db`: Create the schema, optionally seeding locations
/// - `inspect` / `check`: Look at what is stored
/// - `export`: Write the joined dataset as CSV
/// - `stations`: Print the station registry
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Ingest(args) => ingest::run_ingest(args),
        Commands::InitDb(args) => init_db::run_init_db(args),
        Commands::Inspect(args) => inspect::run_inspect(args),
        Commands::Check(args) => inspect::run_check(args),
        Commands::Export(args) => export::run_export(args),
        Commands::Stations(args) => stations::run_stations(args),
    }
}
