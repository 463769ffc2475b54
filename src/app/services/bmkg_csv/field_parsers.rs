//! Cell normalization for BMKG exports
//!
//! Converts raw cell content into typed values. Expected bad data (blank
//! cells, `-` placeholders, NA spellings, malformed numbers) becomes `None`
//! and is never reported individually. Only dates signal a hard failure.

use crate::constants::{DATE_FORMATS, NULL_MARKERS, PLACEHOLDER_DASH};
use crate::{Error, Result};
use chrono::NaiveDate;

/// A cell value before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCell<'a> {
    /// Cell text as read from the file
    Text(&'a str),
    /// Value already held as a number
    Number(f64),
    /// Column absent or record too short
    Missing,
}

impl<'a> From<&'a str> for RawCell<'a> {
    fn from(value: &'a str) -> Self {
        RawCell::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for RawCell<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RawCell::Missing, RawCell::Text)
    }
}

impl From<f64> for RawCell<'_> {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

/// Whether cell text denotes "no data"
pub fn is_null_text(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == PLACEHOLDER_DASH || NULL_MARKERS.contains(&trimmed)
}

/// Parse a numeric measurement, accepting a decimal comma
///
/// Returns `None` for null spellings and for anything that still fails float
/// coercion after `,` has been replaced by `.`.
pub fn parse_measurement<'a>(raw: impl Into<RawCell<'a>>) -> Option<f64> {
    match raw.into() {
        RawCell::Text(text) => {
            if is_null_text(text) {
                return None;
            }
            text.trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| !v.is_nan())
        }
        RawCell::Number(n) if n.is_nan() => None,
        RawCell::Number(n) => Some(n),
        RawCell::Missing => None,
    }
}

/// Parse a wind direction, kept as trimmed text
///
/// Directions come either as compass codes ("N", "NE") or numeric degree
/// bins depending on the export, so no coercion is applied.
pub fn parse_wind_direction<'a>(raw: impl Into<RawCell<'a>>) -> Option<String> {
    match raw.into() {
        RawCell::Text(text) if is_null_text(text) => None,
        RawCell::Text(text) => Some(text.trim().to_string()),
        RawCell::Number(n) if n.is_nan() => None,
        RawCell::Number(n) => Some(format!("{:?}", n)),
        RawCell::Missing => None,
    }
}

/// Parse an observation date
///
/// Tries `DD-MM-YYYY` first and `YYYY-MM-DD` second; export vintages use
/// either.
pub fn parse_date<'a>(raw: impl Into<RawCell<'a>>) -> Result<NaiveDate> {
    let text = match raw.into() {
        RawCell::Text(text) => text.trim(),
        RawCell::Number(n) => return Err(Error::invalid_date(n.to_string())),
        RawCell::Missing => return Err(Error::invalid_date("")),
    };

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| Error::invalid_date(text))
}
