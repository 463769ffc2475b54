//! SQLite backend for the BMKG star schema.
//!
//! [`Store`] owns the single connection used for a whole run. Services borrow
//! it as a plain `&rusqlite::Connection` (or a transaction dereferencing to
//! one), so the handle is threaded explicitly and released when the store is
//! dropped or closed.

pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

use crate::app::services::station_registry::StationRegistry;
use crate::{Error, Result};
use rusqlite::{Connection, OpenFlags, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub use queries::{TableCounts, TablePreview};
pub use schema::{ALL_TABLES, DATE_TABLE, FACT_TABLE, LOCATION_TABLE, SCHEMA};

/// The relational store holding the star schema
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open an existing database; the schema must already be in place
    ///
    /// # Errors
    /// * Returns `Error::Database` if the file cannot be opened
    /// * Returns `Error::Configuration` if a star-schema table is missing
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::database(format!("Cannot open {}", path.display()), e))?;

        let store = Self::configure(conn, Some(path.to_path_buf()), timeout)?;
        store.verify_schema()?;
        info!("Connected to database {}", path.display());
        Ok(store)
    }

    /// Open (or create) a database and run schema initialisation
    pub fn create(path: impl AsRef<Path>, timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .map_err(|e| Error::database(format!("Cannot create {}", path.display()), e))?;

        let store = Self::configure(conn, Some(path.to_path_buf()), timeout)?;
        store.init_schema()?;
        info!("Initialised schema in {}", path.display());
        Ok(store)
    }

    /// Open an in-memory store with the schema applied
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database("Cannot open in-memory database", e))?;
        let store = Self::configure(conn, None, Duration::from_secs(5))?;
        store.init_schema()?;
        Ok(store)
    }

    fn configure(conn: Connection, path: Option<PathBuf>, timeout: Duration) -> Result<Self> {
        conn.busy_timeout(timeout)
            .map_err(|e| Error::database("Failed to set busy timeout", e))?;
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|e| Error::database("Failed to enable foreign keys", e))?;
        Ok(Self { conn, path })
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA)
            .map_err(|e| Error::database("Schema initialisation failed", e))
    }

    /// Check that all three star-schema tables exist
    pub fn verify_schema(&self) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        for table in ALL_TABLES {
            if !stmt.exists(params![table])? {
                return Err(Error::configuration(format!(
                    "Table {} not found; run `init-db` first",
                    table
                )));
            }
        }
        Ok(())
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction; dropped without commit it rolls back
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction()
            .map_err(|e| Error::database("Failed to begin transaction", e))
    }

    /// Database file, `None` for in-memory stores
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Insert a bare location row (name and kind only) for every registry entry
    ///
    /// Existing rows are left untouched. Returns the number of rows inserted.
    pub fn seed_locations(&self, registry: &StationRegistry) -> Result<usize> {
        let mut stmt = self.conn.prepare(
            "INSERT OR IGNORE INTO DimLokasi (nama_lokasi, jenis_lokasi) VALUES (?1, ?2)",
        )?;
        let mut inserted = 0;
        for entry in registry.entries() {
            inserted += stmt.execute(params![entry.location.name, entry.location.kind.as_str()])?;
        }
        debug!("Seeded {} location rows", inserted);
        Ok(inserted)
    }

    /// Row counts of the three tables
    pub fn table_counts(&self) -> Result<TableCounts> {
        queries::table_counts(&self.conn)
    }

    /// Close the connection, reporting any error on release
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| Error::database("Failed to close database", e))
    }
}
