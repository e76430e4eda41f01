//! SWAPI importer.
//!
//! Mirrors planets, films and people from the remote API into the local
//! store. Stages run in dependency order (planets, films, characters) inside
//! one transaction, so a failure in any stage leaves the store untouched.
//! Re-running only inserts records whose external id is not stored yet;
//! existing rows are never updated and their links are never revisited.

pub mod characters;
pub mod films;
pub mod planets;
pub mod records;
pub mod source;

use crate::character::model::Character;
use crate::film::model::Film;
use crate::planet::model::Planet;
use serde::Serialize;
use std::fmt;
use swapi_db::{DbError, DbPool};
use thiserror::Error;
use tracing::{error, info};

pub use characters::import_characters;
pub use films::import_films;
pub use planets::import_planets;
pub use source::{HttpSource, RecordSource};

/// Remote collections mirrored by the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Planets,
    Films,
    People,
}

impl Resource {
    /// Path segment under the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Planets => "planets",
            Self::Films => "films",
            Self::People => "people",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Errors that abort an import run.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot extract an id from '{url}': {source}")]
    ExternalId {
        url: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("malformed {resource} record: {source}")]
    MalformedRecord {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource}/{swapi_id}: missing required field '{field}'")]
    MissingField {
        resource: Resource,
        swapi_id: i64,
        field: &'static str,
    },

    #[error("{resource}/{swapi_id}: invalid {field} '{value}'")]
    InvalidField {
        resource: Resource,
        swapi_id: i64,
        field: &'static str,
        value: String,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Entities created by one import run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub planets: Vec<Planet>,
    pub films: Vec<Film>,
    pub characters: Vec<Character>,
}

/// Run all three stages in one transaction.
pub fn run_import(pool: &DbPool, source: &dyn RecordSource) -> ImportResult<ImportSummary> {
    info!("Starting SWAPI data load...");

    let result: ImportResult<ImportSummary> = pool.with_conn_mut(|conn| {
        let tx = conn.transaction().map_err(DbError::from)?;

        let planets = import_planets(&tx, source)?;
        let films = import_films(&tx, source)?;
        let characters = import_characters(&tx, source)?;

        tx.commit().map_err(DbError::from)?;
        Ok(ImportSummary {
            planets,
            films,
            characters,
        })
    });

    match &result {
        Ok(summary) => info!(
            planets = summary.planets.len(),
            films = summary.films.len(),
            characters = summary.characters.len(),
            "SWAPI data loaded successfully."
        ),
        Err(e) => error!(error = %e, "Error loading data, all changes rolled back"),
    }

    result
}
