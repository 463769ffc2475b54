//! Denormalized dataset export
//!
//! Joins every fact row with its date and location rows, the same view the
//! reporting dashboards read, and writes it out as CSV.

use crate::constants::rainfall_sentinels;
use crate::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

const DATASET_QUERY: &str = "
    SELECT
        f.fakta_id, f.waktu_id, f.lokasi_id,
        f.curah_hujan, f.suhu_min, f.suhu_max, f.suhu_rata, f.kelembaban_rata,
        f.lama_penyinaran, f.kecepatan_angin_max, f.arah_angin_max,
        f.kecepatan_angin_rata, f.arah_angin_terbanyak,
        w.tanggal, w.bulan, w.tahun, w.nama_bulan,
        l.nama_lokasi, l.jenis_lokasi, l.nama_stasiun
    FROM FactDataIklim f
    JOIN DimWaktu w ON f.waktu_id = w.waktu_id
    JOIN DimLokasi l ON f.lokasi_id = l.lokasi_id
    ORDER BY w.tanggal, l.nama_lokasi";

/// One joined fact row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRecord {
    pub fakta_id: i64,
    pub waktu_id: i64,
    pub lokasi_id: i64,
    pub curah_hujan: Option<f64>,
    pub suhu_min: Option<f64>,
    pub suhu_max: Option<f64>,
    pub suhu_rata: Option<f64>,
    pub kelembaban_rata: Option<f64>,
    pub lama_penyinaran: Option<f64>,
    pub kecepatan_angin_max: Option<f64>,
    pub arah_angin_max: Option<String>,
    pub kecepatan_angin_rata: Option<f64>,
    pub arah_angin_terbanyak: Option<String>,
    pub tanggal: NaiveDate,
    pub bulan: u32,
    pub tahun: i32,
    pub nama_bulan: String,
    pub nama_lokasi: String,
    pub jenis_lokasi: String,
    pub nama_stasiun: Option<String>,
    /// Rainfall with the 8888/9999 codes read as missing
    pub rainfall_clean: Option<f64>,
    /// `"<name> (<kind>)"`
    pub location_full: String,
}

impl DatasetRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let curah_hujan: Option<f64> = row.get(3)?;
        let nama_lokasi: String = row.get(17)?;
        let jenis_lokasi: String = row.get(18)?;

        Ok(Self {
            fakta_id: row.get(0)?,
            waktu_id: row.get(1)?,
            lokasi_id: row.get(2)?,
            curah_hujan,
            suhu_min: row.get(4)?,
            suhu_max: row.get(5)?,
            suhu_rata: row.get(6)?,
            kelembaban_rata: row.get(7)?,
            lama_penyinaran: row.get(8)?,
            kecepatan_angin_max: row.get(9)?,
            arah_angin_max: row.get(10)?,
            kecepatan_angin_rata: row.get(11)?,
            arah_angin_terbanyak: row.get(12)?,
            tanggal: row.get(13)?,
            bulan: row.get(14)?,
            tahun: row.get(15)?,
            nama_bulan: row.get(16)?,
            location_full: format!("{} ({})", nama_lokasi, jenis_lokasi),
            nama_lokasi,
            jenis_lokasi,
            nama_stasiun: row.get(19)?,
            rainfall_clean: clean_rainfall(curah_hujan),
        })
    }
}

/// Drop the rainfall sentinel codes
pub fn clean_rainfall(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !rainfall_sentinels::ALL.contains(v))
}

/// All fact rows joined with their dimensions, ordered by date then location
pub fn load_dataset(conn: &Connection) -> Result<Vec<DatasetRecord>> {
    let mut stmt = conn.prepare(DATASET_QUERY)?;
    let records = stmt
        .query_map([], DatasetRecord::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    debug!("Loaded {} dataset rows", records.len());
    Ok(records)
}

/// Write `records` as CSV with a header row; returns the number of rows written
pub fn write_csv<W: Write>(records: &[DatasetRecord], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    info!("Exported {} rows", records.len());
    Ok(records.len())
}
