//! Compiled-in station metadata for the five West-Java locations

use crate::app::models::StationInfo;

/// Station identity keyed by `<LocationName>-<LocationKind>`
pub const BUILTIN_STATIONS: &[(&str, StationInfo)] = &[
    (
        "Bogor-Kabupaten",
        StationInfo {
            station_name: "Stasiun Meteorologi Citeko",
            wmo_id: "96751",
            latitude: -670000,
            longitude: 10685000,
            elevation_m: 920,
        },
    ),
    (
        "Cirebon-Kabupaten",
        StationInfo {
            station_name: "Stasiun Klimatologi Jayapura",
            wmo_id: "97692",
            latitude: -259231,
            longitude: 14016792,
            elevation_m: 70,
        },
    ),
    (
        "Majalengka-Kabupaten",
        StationInfo {
            station_name: "Stasiun Meteorologi Kertajati",
            wmo_id: "96791",
            latitude: -673440,
            longitude: 10826300,
            elevation_m: 85,
        },
    ),
    (
        "Bandung-Kota",
        StationInfo {
            station_name: "Stasiun Geofisika Bandung",
            wmo_id: "96783",
            latitude: -688356,
            longitude: 10759733,
            elevation_m: 791,
        },
    ),
    (
        "Bogor-Kota",
        StationInfo {
            station_name: "Stasiun Klimatologi Jawa Barat",
            wmo_id: "96753",
            latitude: -650000,
            longitude: 10675000,
            elevation_m: 207,
        },
    ),
];
