//! SQLite connection pool.
//!
//! A single connection behind a mutex. Every query module takes a plain
//! `&Connection` so the same functions run inside or outside a transaction.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

/// Database error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Connection lock poisoned")]
    LockPoisoned,
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// Turn SQLite constraint failures into [`DbError::Constraint`], keep
    /// everything else as a connection error.
    pub fn from_write(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, msg)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                DbError::Constraint(msg.unwrap_or_else(|| code.to_string()))
            }
            e => DbError::Connection(e),
        }
    }
}

/// Shared handle to the SQLite database.
pub struct DbPool {
    conn: Mutex<Connection>,
}

impl DbPool {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| DbError::Migration(format!("{}: {}", parent.display(), e)))?;
            }
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (used by tests).
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> DbResult<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure with shared access to the connection.
    pub fn with_conn<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    /// Run a closure with exclusive access, e.g. to open a transaction.
    pub fn with_conn_mut<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&mut conn)
    }
}

/// Open a database file and bring its schema up to date.
pub fn init_pool(path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    crate::migrations::run_migrations(&pool)?;
    Ok(pool)
}

/// In-memory database with the schema applied.
pub fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    crate::migrations::run_migrations(&pool)?;
    Ok(pool)
}
