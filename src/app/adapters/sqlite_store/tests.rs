//! Tests for `Store` against in-memory and temporary databases.

use super::queries::{count_rows, preview_table};
use super::{FACT_TABLE, LOCATION_TABLE, Store};
use crate::Error;
use crate::app::services::station_registry::StationRegistry;
use std::time::Duration;
use tempfile::TempDir;

fn store() -> Store {
    Store::open_in_memory().expect("in-memory store")
}

#[test]
fn in_memory_store_has_empty_tables() {
    let s = store();
    let counts = s.table_counts().unwrap();
    assert_eq!(counts.locations, 0);
    assert_eq!(counts.dates, 0);
    assert_eq!(counts.facts, 0);
    assert!(s.path().is_none());
}

#[test]
fn seed_locations_is_idempotent() {
    let s = store();
    let registry = StationRegistry::builtin().unwrap();

    assert_eq!(s.seed_locations(&registry).unwrap(), 5);
    assert_eq!(s.seed_locations(&registry).unwrap(), 0);
    assert_eq!(count_rows(s.connection(), LOCATION_TABLE).unwrap(), 5);
}

#[test]
fn location_kind_is_constrained() {
    let s = store();
    let result = s.connection().execute(
        "INSERT INTO DimLokasi (nama_lokasi, jenis_lokasi) VALUES ('Depok', 'Provinsi')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn open_missing_database_fails() {
    let dir = TempDir::new().unwrap();
    let result = Store::open(dir.path().join("absent.db"), Duration::from_secs(1));
    assert!(matches!(result, Err(Error::Database { .. })));
}

#[test]
fn open_requires_schema() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.db");
    rusqlite::Connection::open(&path).unwrap();

    let result = Store::open(&path, Duration::from_secs(1));
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn create_then_open_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bmkg.db");

    let created = Store::create(&path, Duration::from_secs(1)).unwrap();
    created
        .seed_locations(&StationRegistry::builtin().unwrap())
        .unwrap();
    created.close().unwrap();

    let reopened = Store::open(&path, Duration::from_secs(1)).unwrap();
    assert_eq!(reopened.table_counts().unwrap().locations, 5);
    assert_eq!(reopened.path(), Some(path.as_path()));
}

#[test]
fn preview_renders_rows_and_nulls() {
    let s = store();
    s.seed_locations(&StationRegistry::builtin().unwrap())
        .unwrap();

    let preview = preview_table(s.connection(), LOCATION_TABLE, 2).unwrap();
    assert_eq!(preview.rows.len(), 2);
    assert_eq!(preview.total_rows, 5);
    assert_eq!(preview.columns[0], "lokasi_id");
    assert_eq!(preview.rows[0][1], "Bogor");
    assert_eq!(preview.rows[0][2], "Kabupaten");
    assert_eq!(preview.rows[0][3], "NULL");

    let facts = preview_table(s.connection(), FACT_TABLE, 10).unwrap();
    assert!(facts.is_empty());
}

#[test]
fn preview_rejects_unknown_table() {
    let s = store();
    let result = preview_table(s.connection(), "sqlite_master", 10);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}
