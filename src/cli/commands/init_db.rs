//! Init-db command implementation

use super::shared::{load_configuration, setup_logging};
use crate::app::services::station_registry::StationRegistry;
use crate::cli::args::InitDbArgs;
use crate::{Result, Store};
use colored::*;

/// Create the star schema, and optionally seed the registry's locations
pub fn run_init_db(args: InitDbArgs) -> Result<()> {
    setup_logging(&args.common)?;
    let config = load_configuration(&args.common)?;

    let store = Store::create(&config.database.path, config.connect_timeout())?;
    let seeded = if args.seed {
        store.seed_locations(&StationRegistry::builtin()?)?
    } else {
        0
    };
    let counts = store.table_counts()?;
    store.close()?;

    if !args.common.quiet {
        println!(
            "{} {}",
            "Schema ready in".bright_green().bold(),
            config.database.path.display().to_string().bright_white()
        );
        if args.seed {
            println!(
                "  {} {} ({} total)",
                "Locations seeded:".bright_cyan(),
                seeded.to_string().bright_white(),
                counts.locations
            );
        }
    }
    Ok(())
}
