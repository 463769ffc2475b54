//! Dimension key resolution
//!
//! Owns every write into the date dimension and the station metadata update
//! path into the location dimension. Location rows are never created here;
//! they are seeded by schema setup.

use crate::app::models::{CalendarDate, Location};
use crate::app::services::station_registry::StationRegistry;
use crate::{Error, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, warn};

/// Outcome of the station metadata update pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataUpdateStats {
    /// Registry entries whose location row was updated
    pub updated: usize,
    /// Registry keys with no matching location row
    pub unmatched: Vec<String>,
}

/// Resolves surrogate keys against the dimension tables
///
/// Borrows the run's connection (or an open transaction) for its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct DimensionResolver<'c> {
    conn: &'c Connection,
}

impl<'c> DimensionResolver<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Surrogate key of the location row matching `(name, kind)` exactly
    ///
    /// # Errors
    /// * Returns `Error::LocationNotFound` if no row matches; callers skip the file
    pub fn resolve_location(&self, location: &Location) -> Result<i64> {
        self.conn
            .prepare_cached(
                "SELECT lokasi_id FROM DimLokasi WHERE nama_lokasi = ?1 AND jenis_lokasi = ?2",
            )?
            .query_row(params![location.name, location.kind.as_str()], |r| {
                r.get(0)
            })
            .optional()?
            .ok_or_else(|| Error::location_not_found(&location.name, location.kind.as_str()))
    }

    /// Surrogate key of the date row, inserting it first if needed
    ///
    /// The insert is `INSERT OR IGNORE`, so calling this once per fact row for
    /// the same date never duplicates the row nor fails.
    pub fn resolve_or_create_date(&self, date: NaiveDate) -> Result<i64> {
        let calendar = CalendarDate::from(date);

        let inserted = self
            .conn
            .prepare_cached(
                "INSERT OR IGNORE INTO DimWaktu (tanggal, bulan, tahun, nama_bulan)
                 VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(params![
                calendar.date,
                calendar.month,
                calendar.year,
                calendar.month_name
            ])?;
        if inserted > 0 {
            debug!("Created date dimension row for {}", date);
        }

        let key = self
            .conn
            .prepare_cached("SELECT waktu_id FROM DimWaktu WHERE tanggal = ?1")?
            .query_row(params![calendar.date], |r| r.get(0))?;
        Ok(key)
    }

    /// Write station identity from the registry onto matching location rows
    ///
    /// Rows are matched on exact `(name, kind)`; registry entries without a
    /// row are reported, not inserted.
    pub fn update_station_metadata(&self, registry: &StationRegistry) -> Result<MetadataUpdateStats> {
        let mut stmt = self.conn.prepare_cached(
            "UPDATE DimLokasi
             SET nama_stasiun = ?1, id_wmo = ?2, lintang = ?3, bujur = ?4, elevasi = ?5
             WHERE nama_lokasi = ?6 AND jenis_lokasi = ?7",
        )?;

        let mut stats = MetadataUpdateStats::default();
        for entry in registry.entries() {
            let changed = stmt.execute(params![
                entry.info.station_name,
                entry.info.wmo_id,
                entry.info.latitude,
                entry.info.longitude,
                entry.info.elevation_m,
                entry.location.name,
                entry.location.kind.as_str(),
            ])?;

            if changed == 0 {
                warn!("No location row for registry entry {}", entry.key);
                stats.unmatched.push(entry.key.to_string());
            } else {
                stats.updated += 1;
            }
        }

        Ok(stats)
    }
}
