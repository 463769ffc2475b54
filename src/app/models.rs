//! Data models for BMKG ingestion
//!
//! This module contains the core data structures for the star schema: location
//! kinds and station identity for the location dimension, calendar attributes
//! for the date dimension, and the ten measurement fields of a climate fact.

use crate::constants::{self, columns};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Location Dimension
// =============================================================================

/// Administrative kind of a location
///
/// Stored in the location dimension using the Indonesian terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// Kabupaten
    Regency,
    /// Kota
    City,
}

impl LocationKind {
    /// Value stored in `jenis_lokasi`
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Regency => "Kabupaten",
            LocationKind::City => "Kota",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Kabupaten" => Ok(LocationKind::Regency),
            "Kota" => Ok(LocationKind::City),
            other => Err(Error::station_registry(format!(
                "Unknown location kind '{}' (expected Kabupaten or Kota)",
                other
            ))),
        }
    }
}

/// Natural key of a location dimension row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Bare location name, e.g. "Bogor"
    pub name: String,
    pub kind: LocationKind,
}

impl Location {
    pub fn new(name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Registry key in the form `<Name>-<Kind>`
    pub fn registry_key(&self) -> String {
        format!("{}-{}", self.name, self.kind)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Station identity attached to a location dimension row
///
/// Coordinates are fixed-point integers: decimal degrees × 100000.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationInfo {
    pub station_name: &'static str,
    pub wmo_id: &'static str,
    pub latitude: i64,
    pub longitude: i64,
    pub elevation_m: i32,
}

impl StationInfo {
    /// Scale of the fixed-point coordinate columns
    pub const COORDINATE_SCALE: f64 = 100_000.0;

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude as f64 / Self::COORDINATE_SCALE
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude as f64 / Self::COORDINATE_SCALE
    }
}

// =============================================================================
// Date Dimension
// =============================================================================

/// Calendar attributes written to the date dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDate {
    pub date: NaiveDate,
    pub month: u32,
    pub year: i32,
    pub month_name: &'static str,
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            date,
            month: date.month(),
            year: date.year(),
            month_name: constants::month_name(date.month()),
        }
    }
}

// =============================================================================
// Climate Fact
// =============================================================================

/// How a source cell is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Float measurement with decimal-comma support
    Numeric,
    /// Compass code or degree bin, kept as trimmed text
    WindDirection,
}

/// The ten measurement columns of the fact table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetField {
    Rainfall,
    TempMin,
    TempMax,
    TempAvg,
    HumidityAvg,
    SunshineDuration,
    WindSpeedMax,
    WindDirectionMax,
    WindSpeedAvg,
    WindDirectionPredominant,
}

impl TargetField {
    /// Every target field, in fact-table column order
    pub const ALL: [TargetField; 10] = [
        TargetField::Rainfall,
        TargetField::TempMin,
        TargetField::TempMax,
        TargetField::TempAvg,
        TargetField::HumidityAvg,
        TargetField::SunshineDuration,
        TargetField::WindSpeedMax,
        TargetField::WindDirectionMax,
        TargetField::WindSpeedAvg,
        TargetField::WindDirectionPredominant,
    ];

    /// Column name in `fact_data_iklim`
    pub fn column_name(&self) -> &'static str {
        match self {
            TargetField::Rainfall => "curah_hujan",
            TargetField::TempMin => "suhu_min",
            TargetField::TempMax => "suhu_max",
            TargetField::TempAvg => "suhu_rata",
            TargetField::HumidityAvg => "kelembaban_rata",
            TargetField::SunshineDuration => "lama_penyinaran",
            TargetField::WindSpeedMax => "kecepatan_angin_max",
            TargetField::WindDirectionMax => "arah_angin_max",
            TargetField::WindSpeedAvg => "kecepatan_angin_rata",
            TargetField::WindDirectionPredominant => "arah_angin_terbanyak",
        }
    }

    /// BMKG header this field is read from by default
    pub fn default_source_header(&self) -> &'static str {
        match self {
            TargetField::Rainfall => columns::RAINFALL,
            TargetField::TempMin => columns::TEMP_MIN,
            TargetField::TempMax => columns::TEMP_MAX,
            TargetField::TempAvg => columns::TEMP_AVG,
            TargetField::HumidityAvg => columns::HUMIDITY_AVG,
            TargetField::SunshineDuration => columns::SUNSHINE,
            TargetField::WindSpeedMax => columns::WIND_SPEED_MAX,
            TargetField::WindDirectionMax => columns::WIND_DIR_MAX,
            TargetField::WindSpeedAvg => columns::WIND_SPEED_AVG,
            TargetField::WindDirectionPredominant => columns::WIND_DIR_PREDOMINANT,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            TargetField::WindDirectionMax | TargetField::WindDirectionPredominant => {
                FieldKind::WindDirection
            }
            _ => FieldKind::Numeric,
        }
    }
}

/// A normalized measurement, nullable in either representation
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementValue {
    Numeric(Option<f64>),
    Direction(Option<String>),
}

impl MeasurementValue {
    pub fn is_null(&self) -> bool {
        match self {
            MeasurementValue::Numeric(v) => v.is_none(),
            MeasurementValue::Direction(v) => v.is_none(),
        }
    }
}

impl ToSql for MeasurementValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            MeasurementValue::Numeric(v) => v.to_sql(),
            MeasurementValue::Direction(v) => v.to_sql(),
        }
    }
}

/// Normalized measurements of one daily observation
///
/// Every field is present on a fact row; `None` is stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measurements {
    pub rainfall: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_avg: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub sunshine_duration: Option<f64>,
    pub wind_speed_max: Option<f64>,
    pub wind_direction_max: Option<String>,
    pub wind_speed_avg: Option<f64>,
    pub wind_direction_predominant: Option<String>,
}

impl Measurements {
    /// Store a normalized value in the slot for `field`
    ///
    /// A value whose representation does not match the field's kind is
    /// stored as NULL.
    pub fn set(&mut self, field: TargetField, value: MeasurementValue) {
        match (field, value) {
            (TargetField::WindDirectionMax, MeasurementValue::Direction(v)) => {
                self.wind_direction_max = v
            }
            (TargetField::WindDirectionPredominant, MeasurementValue::Direction(v)) => {
                self.wind_direction_predominant = v
            }
            (TargetField::WindDirectionMax, _) => self.wind_direction_max = None,
            (TargetField::WindDirectionPredominant, _) => self.wind_direction_predominant = None,
            (numeric, MeasurementValue::Numeric(v)) => *self.numeric_slot(numeric) = v,
            (numeric, MeasurementValue::Direction(_)) => *self.numeric_slot(numeric) = None,
        }
    }

    /// Value stored for `field`
    pub fn get(&self, field: TargetField) -> MeasurementValue {
        match field {
            TargetField::Rainfall => MeasurementValue::Numeric(self.rainfall),
            TargetField::TempMin => MeasurementValue::Numeric(self.temp_min),
            TargetField::TempMax => MeasurementValue::Numeric(self.temp_max),
            TargetField::TempAvg => MeasurementValue::Numeric(self.temp_avg),
            TargetField::HumidityAvg => MeasurementValue::Numeric(self.humidity_avg),
            TargetField::SunshineDuration => MeasurementValue::Numeric(self.sunshine_duration),
            TargetField::WindSpeedMax => MeasurementValue::Numeric(self.wind_speed_max),
            TargetField::WindDirectionMax => {
                MeasurementValue::Direction(self.wind_direction_max.clone())
            }
            TargetField::WindSpeedAvg => MeasurementValue::Numeric(self.wind_speed_avg),
            TargetField::WindDirectionPredominant => {
                MeasurementValue::Direction(self.wind_direction_predominant.clone())
            }
        }
    }

    /// Number of fields holding a value
    pub fn populated_count(&self) -> usize {
        TargetField::ALL
            .iter()
            .filter(|field| !self.get(**field).is_null())
            .count()
    }

    fn numeric_slot(&mut self, field: TargetField) -> &mut Option<f64> {
        match field {
            TargetField::Rainfall => &mut self.rainfall,
            TargetField::TempMin => &mut self.temp_min,
            TargetField::TempMax => &mut self.temp_max,
            TargetField::TempAvg => &mut self.temp_avg,
            TargetField::HumidityAvg => &mut self.humidity_avg,
            TargetField::SunshineDuration => &mut self.sunshine_duration,
            TargetField::WindSpeedMax => &mut self.wind_speed_max,
            TargetField::WindSpeedAvg => &mut self.wind_speed_avg,
            TargetField::WindDirectionMax | TargetField::WindDirectionPredominant => {
                unreachable!("wind direction fields are not numeric")
            }
        }
    }
}

/// One row of the fact table
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateFact {
    pub date_key: i64,
    pub location_key: i64,
    pub measurements: Measurements,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_kind_round_trip_strings() {
        assert_eq!("Kabupaten".parse::<LocationKind>().unwrap(), LocationKind::Regency);
        assert_eq!("Kota".parse::<LocationKind>().unwrap(), LocationKind::City);
        assert!("Provinsi".parse::<LocationKind>().is_err());
        assert_eq!(LocationKind::Regency.to_string(), "Kabupaten");
    }

    #[test]
    fn test_location_registry_key() {
        let location = Location::new("Bogor", LocationKind::City);
        assert_eq!(location.registry_key(), "Bogor-Kota");
        assert_eq!(location.to_string(), "Bogor (Kota)");
    }

    #[test]
    fn test_calendar_date_attributes() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
        let calendar = CalendarDate::from(date);
        assert_eq!(calendar.month, 3);
        assert_eq!(calendar.year, 2023);
        assert_eq!(calendar.month_name, "Maret");
    }

    #[test]
    fn test_measurements_set_and_get() {
        let mut measurements = Measurements::default();
        measurements.set(TargetField::Rainfall, MeasurementValue::Numeric(Some(10.5)));
        measurements.set(
            TargetField::WindDirectionMax,
            MeasurementValue::Direction(Some("N".to_string())),
        );

        assert_eq!(measurements.rainfall, Some(10.5));
        assert_eq!(measurements.wind_direction_max.as_deref(), Some("N"));
        assert_eq!(
            measurements.get(TargetField::Rainfall),
            MeasurementValue::Numeric(Some(10.5))
        );
        assert_eq!(measurements.populated_count(), 2);
    }

    #[test]
    fn test_measurements_mismatched_kind_stores_null() {
        let mut measurements = Measurements {
            temp_max: Some(30.0),
            ..Default::default()
        };
        measurements.set(
            TargetField::TempMax,
            MeasurementValue::Direction(Some("N".to_string())),
        );
        assert_eq!(measurements.temp_max, None);
    }

    #[test]
    fn test_station_info_coordinates() {
        let info = StationInfo {
            station_name: "Stasiun Meteorologi Citeko",
            wmo_id: "96751",
            latitude: -670000,
            longitude: 10685000,
            elevation_m: 920,
        };
        assert!((info.latitude_degrees() - -6.7).abs() < 1e-9);
        assert!((info.longitude_degrees() - 106.85).abs() < 1e-9);
    }
}
