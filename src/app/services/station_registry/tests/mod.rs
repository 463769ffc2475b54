//! Shared test utilities and fixtures for station registry tests

use crate::app::models::StationInfo;

pub mod registry_tests;

/// Create a test station with standard parameters
pub fn create_test_station(name: &'static str, wmo_id: &'static str) -> StationInfo {
    StationInfo {
        station_name: name,
        wmo_id,
        latitude: -690000,
        longitude: 10760000,
        elevation_m: 700,
    }
}
