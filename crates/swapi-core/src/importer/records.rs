//! Raw SWAPI records and external-id extraction.

use super::{ImportError, ImportResult, Resource};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Extract the numeric id from a record's own URL.
///
/// `https://swapi.dev/api/planets/4/` yields `4`.
pub fn swapi_id_from_url(url: &str) -> ImportResult<i64> {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    segment.parse().map_err(|source| ImportError::ExternalId {
        url: url.to_string(),
        source,
    })
}

/// Decode one page entry into a typed record.
pub fn decode<T: DeserializeOwned>(resource: Resource, value: serde_json::Value) -> ImportResult<T> {
    serde_json::from_value(value).map_err(|source| ImportError::MalformedRecord { resource, source })
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanetRecord {
    pub url: String,
    pub name: Option<String>,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub rotation_period: Option<String>,
    pub orbital_period: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
    pub surface_water: Option<String>,
    pub population: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmRecord {
    pub url: String,
    pub title: Option<String>,
    pub episode_id: Option<i64>,
    pub opening_crawl: Option<String>,
    pub director: Option<String>,
    pub producer: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub planets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRecord {
    pub url: String,
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub homeworld: Option<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
}
