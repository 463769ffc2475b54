//! Read-only inspection queries over the star schema

use super::schema::{ALL_TABLES, DATE_TABLE, FACT_TABLE, LOCATION_TABLE};
use crate::{Error, Result};
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use serde::Serialize;

/// Row counts of the three star-schema tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub locations: i64,
    pub dates: i64,
    pub facts: i64,
}

/// First rows of a table plus its total row count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: i64,
}

impl TablePreview {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }
}

fn ensure_known_table(table: &str) -> Result<()> {
    if ALL_TABLES.contains(&table) {
        Ok(())
    } else {
        Err(Error::configuration(format!(
            "Unknown table '{}'. Available tables: {}",
            table,
            ALL_TABLES.join(", ")
        )))
    }
}

/// Total number of rows in a star-schema table
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    ensure_known_table(table)?;
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
        r.get(0)
    })?;
    Ok(count)
}

/// Row counts of all three tables
pub fn table_counts(conn: &Connection) -> Result<TableCounts> {
    Ok(TableCounts {
        locations: count_rows(conn, LOCATION_TABLE)?,
        dates: count_rows(conn, DATE_TABLE)?,
        facts: count_rows(conn, FACT_TABLE)?,
    })
}

/// Up to `limit` rows of a table, rendered as text
pub fn preview_table(conn: &Connection, table: &str, limit: usize) -> Result<TablePreview> {
    ensure_known_table(table)?;

    let mut stmt = conn.prepare(&format!("SELECT * FROM {} LIMIT ?1", table))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([limit as i64], |row| {
            (0..column_count)
                .map(|i| row.get_ref(i).map(render_value))
                .collect::<rusqlite::Result<Vec<String>>>()
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(TablePreview {
        table: table.to_string(),
        columns,
        rows,
        total_rows: count_rows(conn, table)?,
    })
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
