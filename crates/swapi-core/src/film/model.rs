//! Film domain models.

use crate::global_id::{GlobalId, NodeKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use swapi_db::queries::films::FilmRow;

/// A film of the saga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub id: i64,
    pub swapi_id: Option<i64>,
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producers: String,
    pub release_date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl Film {
    /// Create from database row.
    pub fn from_row(row: FilmRow) -> Self {
        Self {
            id: row.id,
            swapi_id: row.swapi_id,
            title: row.title,
            episode_id: row.episode_id,
            opening_crawl: row.opening_crawl,
            director: row.director,
            producers: row.producers,
            release_date: row.release_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    pub fn global_id(&self) -> GlobalId {
        GlobalId::new(NodeKind::Film, self.id)
    }
}

/// Arguments of the `createFilm` mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateFilmInput {
    pub title: String,
    #[serde(alias = "episodeId")]
    pub episode_id: i64,
    #[serde(alias = "openingCrawl")]
    pub opening_crawl: Option<String>,
    pub director: String,
    pub producers: String,
    /// `YYYY-MM-DD`
    #[serde(alias = "releaseDate")]
    pub release_date: String,
    /// Global ids of planets featured in the film.
    #[serde(default)]
    pub planets: Vec<String>,
}
