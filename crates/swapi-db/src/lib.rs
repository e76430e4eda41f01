//! SWAPI mirror database layer.
//!
//! SQLite storage for planets, films and characters, their association
//! tables and the change history.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{init_memory_pool, init_pool, DbError, DbPool, DbResult};
pub use rusqlite::Connection;
