//! Database migrations.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite_migration::{Migrations, M};

/// SQL schema definition.
const SCHEMA: &str = include_str!("schema.sql");

/// Run all database migrations.
pub fn run_migrations(pool: &DbPool) -> DbResult<()> {
    let migrations = Migrations::new(vec![M::up(SCHEMA)]);

    pool.with_conn_mut(|conn| {
        migrations
            .to_latest(conn)
            .map_err(|e| DbError::Migration(e.to_string()))
    })?;

    tracing::debug!("Database schema is up to date");
    Ok(())
}
