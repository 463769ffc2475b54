//! SQL schema for the BMKG star schema.
//!
//! Table names match the ones the dashboard queries. The fact table has no
//! uniqueness constraint on (date, location): loading a file twice yields
//! duplicate fact rows.

/// Table names, in dependency order
pub const LOCATION_TABLE: &str = "DimLokasi";
pub const DATE_TABLE: &str = "DimWaktu";
pub const FACT_TABLE: &str = "FactDataIklim";

pub const ALL_TABLES: [&str; 3] = [LOCATION_TABLE, DATE_TABLE, FACT_TABLE];

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS DimLokasi (
    lokasi_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    nama_lokasi   TEXT    NOT NULL,
    jenis_lokasi  TEXT    NOT NULL CHECK (jenis_lokasi IN ('Kabupaten', 'Kota')),
    nama_stasiun  TEXT,
    id_wmo        TEXT,
    lintang       INTEGER,          -- degrees x 100000
    bujur         INTEGER,          -- degrees x 100000
    elevasi       INTEGER,          -- meters
    UNIQUE (nama_lokasi, jenis_lokasi)
);

CREATE TABLE IF NOT EXISTS DimWaktu (
    waktu_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    tanggal     TEXT    NOT NULL UNIQUE,   -- YYYY-MM-DD
    bulan       INTEGER NOT NULL,
    tahun       INTEGER NOT NULL,
    nama_bulan  TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS FactDataIklim (
    fakta_id              INTEGER PRIMARY KEY AUTOINCREMENT,
    waktu_id              INTEGER NOT NULL REFERENCES DimWaktu(waktu_id),
    lokasi_id             INTEGER NOT NULL REFERENCES DimLokasi(lokasi_id),
    curah_hujan           REAL,
    suhu_min              REAL,
    suhu_max              REAL,
    suhu_rata             REAL,
    kelembaban_rata       REAL,
    lama_penyinaran       REAL,
    kecepatan_angin_max   REAL,
    arah_angin_max        TEXT,
    kecepatan_angin_rata  REAL,
    arah_angin_terbanyak  TEXT
);

CREATE INDEX IF NOT EXISTS fact_waktu_idx  ON FactDataIklim(waktu_id);
CREATE INDEX IF NOT EXISTS fact_lokasi_idx ON FactDataIklim(lokasi_id);
";
