//! Database query implementations.

pub mod characters;
pub mod films;
pub mod history;
pub mod planets;

use crate::pool::DbResult;
use rusqlite::Connection;

/// Tables reported by [`table_counts`], in display order.
pub const TABLES: [&str; 6] = [
    "planets",
    "films",
    "characters",
    "film_planets",
    "character_films",
    "history",
];

/// Row count of every table.
pub fn table_counts(conn: &Connection) -> DbResult<Vec<(&'static str, i64)>> {
    TABLES
        .iter()
        .map(|table| -> DbResult<(&'static str, i64)> {
            let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok((*table, count))
        })
        .collect()
}
