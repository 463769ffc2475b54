//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and store opening used by
//! every subcommand.

use crate::Store;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bmkg_etl={}", log_level)));

    let initialised = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    initialised.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load the layered configuration and apply command-line overrides
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config.as_deref())?;
    if let Some(database) = &args.database {
        config = config.with_database_path(database);
    }
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Open the configured database; its schema must already exist
pub fn open_store(config: &Config) -> Result<Store> {
    Store::open(&config.database.path, config.connect_timeout())
}
