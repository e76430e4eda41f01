//! Change history queries.

use crate::pool::{DbError, DbResult};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// History row from database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub change_type: String,
    pub snapshot: serde_json::Value,
    pub recorded_at: String,
}

/// Append a creation record for an entity.
pub fn record_created<T: Serialize>(
    conn: &Connection,
    entity_type: &str,
    entity_id: i64,
    row: &T,
) -> DbResult<()> {
    let snapshot = serde_json::to_string(row)?;
    conn.execute(
        "INSERT INTO history (entity_type, entity_id, change_type, snapshot)
         VALUES (?1, ?2, '+', ?3)",
        params![entity_type, entity_id, snapshot],
    )
    .map_err(DbError::from_write)?;
    Ok(())
}

/// List the history of one entity, oldest first.
pub fn list_history(conn: &Connection, entity_type: &str, entity_id: i64) -> DbResult<Vec<HistoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, entity_type, entity_id, change_type, snapshot, recorded_at
         FROM history WHERE entity_type = ?1 AND entity_id = ?2 ORDER BY id",
    )?;

    let rows = stmt.query_map(params![entity_type, entity_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut history = Vec::new();
    for row in rows {
        let (id, entity_type, entity_id, change_type, snapshot, recorded_at) = row?;
        history.push(HistoryRow {
            id,
            entity_type,
            entity_id,
            change_type,
            snapshot: serde_json::from_str(&snapshot)?,
            recorded_at,
        });
    }
    Ok(history)
}
