//! Fact loading
//!
//! Turns the rows of one BMKG export into fact rows for a single location.
//!
//! ## Architecture
//!
//! - [`loader`] - Row iteration, normalization and insertion
//! - [`stats`] - Per-file counters for imported and skipped rows

pub mod loader;
pub mod stats;

#[cfg(test)]
mod tests;

pub use loader::{FactLoader, normalize_record};
pub use stats::LoadStats;
