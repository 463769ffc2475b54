//! Tests for registry construction, validation and lookups

use super::create_test_station;
use crate::Error;
use crate::app::models::{Location, LocationKind, StationInfo};
use crate::app::services::station_registry::{StationRegistry, parse_registry_key};

#[test]
fn test_builtin_registry_loads() {
    let registry = StationRegistry::builtin().unwrap();
    assert_eq!(registry.station_count(), 5);

    let citeko = registry.get("Bogor-Kabupaten").unwrap();
    assert_eq!(citeko.station_name, "Stasiun Meteorologi Citeko");
    assert_eq!(citeko.wmo_id, "96751");
    assert_eq!(citeko.latitude, -670000);
    assert_eq!(citeko.longitude, 10685000);
    assert_eq!(citeko.elevation_m, 920);

    let bandung = registry.get("Bandung-Kota").unwrap();
    assert_eq!(bandung.wmo_id, "96783");
    assert_eq!(bandung.elevation_m, 791);
}

#[test]
fn test_builtin_registry_preserves_order() {
    let registry = StationRegistry::builtin().unwrap();
    let keys: Vec<&str> = registry.entries().iter().map(|e| e.key).collect();
    assert_eq!(
        keys,
        vec![
            "Bogor-Kabupaten",
            "Cirebon-Kabupaten",
            "Majalengka-Kabupaten",
            "Bandung-Kota",
            "Bogor-Kota",
        ]
    );
    assert_eq!(
        registry.entries()[4].location,
        Location::new("Bogor", LocationKind::City)
    );
}

#[test]
fn test_lookup_missing_key_is_configuration_error() {
    let registry = StationRegistry::builtin().unwrap();
    assert!(registry.get("Depok-Kota").is_none());
    assert!(!registry.contains("Depok-Kota"));
    assert!(matches!(
        registry.lookup("Depok-Kota"),
        Err(Error::StationRegistry { .. })
    ));

    let location = Location::new("Majalengka", LocationKind::Regency);
    assert_eq!(
        registry.lookup_location(&location).unwrap().station_name,
        "Stasiun Meteorologi Kertajati"
    );
}

#[test]
fn test_parse_registry_key() {
    let location = parse_registry_key("Cirebon-Kabupaten").unwrap();
    assert_eq!(location.name, "Cirebon");
    assert_eq!(location.kind, LocationKind::Regency);

    assert!(parse_registry_key("Cirebon").is_err());
    assert!(parse_registry_key("Cirebon-Provinsi").is_err());
}

#[test]
fn test_malformed_key_is_rejected() {
    let result = StationRegistry::from_entries(&[(
        "Depok Kota",
        create_test_station("Stasiun Depok", "96700"),
    )]);
    assert!(matches!(result, Err(Error::StationRegistry { .. })));
}

#[test]
fn test_duplicate_key_is_rejected() {
    let station = create_test_station("Stasiun Depok", "96700");
    let result = StationRegistry::from_entries(&[
        ("Depok-Kota", station.clone()),
        ("Depok-Kota", station),
    ]);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Duplicate"));
}

#[test]
fn test_invalid_station_fields_are_rejected() {
    let empty_name = create_test_station(" ", "96700");
    assert!(StationRegistry::from_entries(&[("Depok-Kota", empty_name)]).is_err());

    let bad_wmo = create_test_station("Stasiun Depok", "WMO-1");
    assert!(StationRegistry::from_entries(&[("Depok-Kota", bad_wmo)]).is_err());

    let bad_latitude = StationInfo {
        latitude: -9_500_000,
        ..create_test_station("Stasiun Depok", "96700")
    };
    assert!(StationRegistry::from_entries(&[("Depok-Kota", bad_latitude)]).is_err());
}
