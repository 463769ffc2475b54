//! Shared fixtures for fact loader tests

use crate::Store;
use crate::app::models::{Location, LocationKind};
use crate::app::services::bmkg_csv::CsvTable;
use crate::app::services::dimension_resolver::DimensionResolver;
use crate::app::services::station_registry::StationRegistry;
use csv::StringRecord;


/// In-memory store with the five registry locations seeded
pub fn seeded_store() -> Store {
    let store = Store::open_in_memory().unwrap();
    store
        .seed_locations(&StationRegistry::builtin().unwrap())
        .unwrap();
    store
}

/// Surrogate key of the Bogor regency row
pub fn bogor_regency_key(store: &Store) -> i64 {
    DimensionResolver::new(store.connection())
        .resolve_location(&Location::new("Bogor", LocationKind::Regency))
        .unwrap()
}

/// Build an in-memory table from a header line and data lines
pub fn table(header: &[&str], rows: &[&[&str]]) -> CsvTable {
    CsvTable {
        headers: StringRecord::from(header.to_vec()),
        records: rows
            .iter()
            .map(|r| StringRecord::from(r.to_vec()))
            .collect(),
    }
}
