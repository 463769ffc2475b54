//! Stations command implementation

use super::shared::setup_logging;
use crate::app::services::station_registry::{StationEntry, StationRegistry};
use crate::cli::args::StationsArgs;
use crate::Result;
use colored::*;
use serde::Serialize;
use std::io;

#[derive(Debug, Serialize)]
struct StationRow<'a> {
    key: &'a str,
    nama_lokasi: &'a str,
    jenis_lokasi: &'a str,
    nama_stasiun: &'a str,
    id_wmo: &'a str,
    lintang: f64,
    bujur: f64,
    elevasi: i32,
}

impl<'a> From<&'a StationEntry> for StationRow<'a> {
    fn from(entry: &'a StationEntry) -> Self {
        Self {
            key: entry.key,
            nama_lokasi: &entry.location.name,
            jenis_lokasi: entry.location.kind.as_str(),
            nama_stasiun: entry.info.station_name,
            id_wmo: entry.info.wmo_id,
            lintang: entry.info.latitude_degrees(),
            bujur: entry.info.longitude_degrees(),
            elevasi: entry.info.elevation_m,
        }
    }
}

/// Print the compiled-in registry
pub fn run_stations(args: StationsArgs) -> Result<()> {
    setup_logging(&args.common)?;
    let registry = StationRegistry::builtin()?;

    if args.csv {
        let mut writer = csv::Writer::from_writer(io::stdout());
        for entry in registry.entries() {
            writer.serialize(StationRow::from(entry))?;
        }
        writer.flush()?;
        return Ok(());
    }

    println!(
        "{} ({} stations)",
        "Station registry".bright_green().bold(),
        registry.station_count()
    );
    for entry in registry.entries() {
        println!(
            "  {} {:<32} WMO {}  {:>9.5}, {:>10.5}  {} m",
            format!("{:<22}", entry.key).bright_cyan(),
            entry.info.station_name,
            entry.info.wmo_id,
            entry.info.latitude_degrees(),
            entry.info.longitude_degrees(),
            entry.info.elevation_m
        );
    }
    Ok(())
}
