//! Tests for the ingestion driver

use super::super::driver::IngestionDriver;
use super::{HEADER, options_for, write_file};
use crate::Error;
use crate::Store;
use crate::app::models::{StationInfo, TargetField};
use crate::app::services::bmkg_csv::ColumnMapping;
use crate::app::services::station_registry::StationRegistry;
use tempfile::TempDir;

fn seeded_store(registry: &StationRegistry) -> Store {
    let store = Store::open_in_memory().unwrap();
    store.seed_locations(registry).unwrap();
    store
}

fn bogor_file() -> String {
    format!("{}\n01-01-2023,20,30,25,80,\"10,5\",5,3,N,2,NE\n", HEADER)
}

#[test]
fn test_single_file_run() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Data BMKG-Kab. Bogor.csv", &bogor_file());

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let report = driver.run(&mut store).unwrap();
    assert_eq!(report.files_seen, 1);
    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].location, "Bogor (Kabupaten)");
    assert_eq!(report.rows_imported(), 1);
    assert_eq!(report.stations_updated, 5);
    assert!(!report.has_failures());

    let counts = store.table_counts().unwrap();
    assert_eq!(counts.facts, 1);
    assert_eq!(counts.dates, 1);

    let station: String = store
        .connection()
        .query_row(
            "SELECT nama_stasiun FROM DimLokasi WHERE nama_lokasi = 'Bogor' AND jenis_lokasi = 'Kabupaten'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(station, "Stasiun Meteorologi Citeko");
}

#[test]
fn test_rerun_appends_duplicate_facts() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "Data BMKG-Kab. Bogor.csv", &bogor_file());

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    driver.run(&mut store).unwrap();
    driver.run(&mut store).unwrap();

    let counts = store.table_counts().unwrap();
    assert_eq!(counts.facts, 2);
    assert_eq!(counts.dates, 1);
    assert_eq!(counts.locations, 5);
}

#[test]
fn test_unmatched_location_is_skipped_and_run_continues() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a BMKG-Kota Depok.csv", &bogor_file());
    write_file(dir.path(), "b BMKG-Kab. Bogor.csv", &bogor_file());

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let report = driver.run(&mut store).unwrap();
    assert_eq!(report.files_seen, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file, "a BMKG-Kota Depok.csv");
    assert!(report.skipped[0].reason.contains("Depok"));
    assert_eq!(report.loaded.len(), 1);
    assert!(report.has_failures());
    assert_eq!(store.table_counts().unwrap().facts, 1);
    assert_eq!(store.table_counts().unwrap().locations, 5);
}

#[test]
fn test_file_without_date_column_is_skipped() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "BMKG-Kota Bandung.csv", "DATE,RR\n01-01-2023,1\n");
    write_file(dir.path(), "BMKG-Kota Bogor.csv", "Tanggal,RR\n2023-01-01,1\n");

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let report = driver.run(&mut store).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file, "BMKG-Kota Bandung.csv");
    assert_eq!(report.rows_imported(), 1);
}

#[test]
fn test_partial_rows_are_counted() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "{}\n01-01-2023,20,30,25,80,1,5,3,N,2,NE\nnot-a-date,20,30,25,80,1,5,3,N,2,NE\n",
        HEADER
    );
    write_file(dir.path(), "BMKG-Kab. Cirebon.csv", &content);

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let report = driver.run(&mut store).unwrap();
    assert_eq!(report.rows_imported(), 1);
    assert_eq!(report.rows_skipped(), 1);
    assert!(report.has_failures());
    assert!(report.summary().contains("1 rows imported"));
}

#[test]
fn test_failed_commit_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a BMKG-Kab. Bogor.csv", &bogor_file());
    write_file(dir.path(), "b BMKG-Kota Bogor.csv", &bogor_file());

    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    // Every fact insert leaves a deferred foreign-key violation behind, so
    // the per-file COMMIT is refused.
    store
        .connection()
        .execute_batch(
            "CREATE TABLE AuditParent (id INTEGER PRIMARY KEY);
             CREATE TABLE Audit (
                 parent_id INTEGER REFERENCES AuditParent(id) DEFERRABLE INITIALLY DEFERRED
             );
             CREATE TRIGGER fact_audit AFTER INSERT ON FactDataIklim
             BEGIN
                 INSERT INTO Audit (parent_id) VALUES (999);
             END;",
        )
        .unwrap();
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let err = driver.run(&mut store).unwrap_err();
    assert!(matches!(err, Error::Database { .. }));
    assert!(err.is_fatal());

    let message = err.to_string();
    assert!(message.contains("a BMKG-Kab. Bogor.csv"), "{}", message);
    assert!(message.contains("FOREIGN KEY constraint failed"), "{}", message);

    let counts = store.table_counts().unwrap();
    assert_eq!(counts.facts, 0);
    assert_eq!(counts.dates, 0);
}

#[test]
fn test_missing_data_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let driver = IngestionDriver::new(
        &registry,
        ColumnMapping::bmkg(),
        options_for(&dir.path().join("missing")),
    );

    let result = driver.run(&mut store);
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_invalid_mapping_is_fatal() {
    let dir = TempDir::new().unwrap();
    let registry = StationRegistry::builtin().unwrap();
    let mut store = seeded_store(&registry);
    let mapping = ColumnMapping::from_entries(vec![(TargetField::Rainfall, "RR")]);
    let driver = IngestionDriver::new(&registry, mapping, options_for(dir.path()));

    assert!(driver.run(&mut store).is_err());
    assert_eq!(store.table_counts().unwrap().facts, 0);
}

#[test]
fn test_registry_entry_without_location_row_is_reported() {
    let dir = TempDir::new().unwrap();
    let registry = StationRegistry::from_entries(&[(
        "Depok-Kota",
        StationInfo {
            station_name: "Stasiun Depok",
            wmo_id: "96700",
            latitude: -640000,
            longitude: 10680000,
            elevation_m: 100,
        },
    )])
    .unwrap();
    let mut store = Store::open_in_memory().unwrap();
    let driver = IngestionDriver::new(&registry, ColumnMapping::bmkg(), options_for(dir.path()));

    let report = driver.run(&mut store).unwrap();
    assert_eq!(report.stations_updated, 0);
    assert_eq!(report.unmatched_stations, vec!["Depok-Kota".to_string()]);
    assert_eq!(store.table_counts().unwrap().locations, 0);
}
