//! Application state.

use std::sync::Arc;
use swapi_db::DbPool;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }
}
