//! Station registry service for O(1) station metadata lookups
//!
//! This module provides the compiled-in table of station identity for each
//! location in the location dimension. The table is validated when the
//! registry is built, so a malformed entry aborts the run at startup rather
//! than surfacing halfway through an ingestion.

use crate::app::models::{Location, LocationKind, StationInfo};
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

pub mod builtin;

#[cfg(test)]
pub mod tests;

pub use builtin::BUILTIN_STATIONS;

/// A registry entry with its key already split into name and kind
#[derive(Debug, Clone, PartialEq)]
pub struct StationEntry {
    pub key: &'static str,
    pub location: Location,
    pub info: StationInfo,
}

/// Station registry providing O(1) station metadata lookups
///
/// Entries keep their declaration order so that metadata updates run
/// deterministically.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    /// Entries in declaration order
    entries: Vec<StationEntry>,

    /// Registry key to entry position
    index: HashMap<&'static str, usize>,
}

impl StationRegistry {
    /// Registry of the compiled-in West-Java stations
    pub fn builtin() -> Result<Self> {
        Self::from_entries(BUILTIN_STATIONS)
    }

    /// Build and validate a registry from `(key, info)` pairs
    ///
    /// # Errors
    /// * Returns `Error::StationRegistry` for a malformed key, a duplicate key,
    ///   an empty station name or WMO id, or coordinates out of range
    pub fn from_entries(stations: &[(&'static str, StationInfo)]) -> Result<Self> {
        let key_pattern = Regex::new(r"^[A-Za-z][A-Za-z .']*-(Kabupaten|Kota)$")
            .map_err(|e| Error::station_registry(format!("Invalid key pattern: {}", e)))?;

        let mut entries = Vec::with_capacity(stations.len());
        let mut index = HashMap::with_capacity(stations.len());

        for (key, info) in stations {
            if !key_pattern.is_match(key) {
                return Err(Error::station_registry(format!(
                    "Malformed registry key '{}' (expected <LocationName>-<Kabupaten|Kota>)",
                    key
                )));
            }

            let location = parse_registry_key(key)?;
            validate_station(key, info)?;

            if index.insert(*key, entries.len()).is_some() {
                return Err(Error::station_registry(format!(
                    "Duplicate registry key '{}'",
                    key
                )));
            }

            entries.push(StationEntry {
                key,
                location,
                info: info.clone(),
            });
        }

        Ok(Self { entries, index })
    }

    /// Get station metadata by registry key (O(1) lookup)
    pub fn get(&self, key: &str) -> Option<&StationInfo> {
        self.index.get(key).map(|&i| &self.entries[i].info)
    }

    /// Get station metadata by key, treating absence as a configuration error
    pub fn lookup(&self, key: &str) -> Result<&StationInfo> {
        self.get(key).ok_or_else(|| {
            Error::station_registry(format!("No station registered for '{}'", key))
        })
    }

    /// Get station metadata for a location
    pub fn lookup_location(&self, location: &Location) -> Result<&StationInfo> {
        self.lookup(&location.registry_key())
    }

    /// Check if a key exists in the registry
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All entries in declaration order
    pub fn entries(&self) -> &[StationEntry] {
        &self.entries
    }

    /// Get the total number of stations in the registry
    pub fn station_count(&self) -> usize {
        self.entries.len()
    }
}

/// Split `<Name>-<Kind>` into a location
pub fn parse_registry_key(key: &str) -> Result<Location> {
    let (name, kind) = key.rsplit_once('-').ok_or_else(|| {
        Error::station_registry(format!("Registry key '{}' has no kind suffix", key))
    })?;
    let kind: LocationKind = kind.parse()?;
    Ok(Location::new(name, kind))
}

fn validate_station(key: &str, info: &StationInfo) -> Result<()> {
    if info.station_name.trim().is_empty() {
        return Err(Error::station_registry(format!(
            "Station name for '{}' cannot be empty",
            key
        )));
    }

    if info.wmo_id.is_empty() || !info.wmo_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::station_registry(format!(
            "Invalid WMO id '{}' for '{}'",
            info.wmo_id, key
        )));
    }

    if !(-90.0..=90.0).contains(&info.latitude_degrees()) {
        return Err(Error::station_registry(format!(
            "Invalid latitude {} for '{}': must be between -90 and 90 degrees",
            info.latitude_degrees(),
            key
        )));
    }

    if !(-180.0..=180.0).contains(&info.longitude_degrees()) {
        return Err(Error::station_registry(format!(
            "Invalid longitude {} for '{}': must be between -180 and 180 degrees",
            info.longitude_degrees(),
            key
        )));
    }

    Ok(())
}
