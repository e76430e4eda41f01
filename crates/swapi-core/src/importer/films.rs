//! Film import stage.

use super::records::{decode, swapi_id_from_url, FilmRecord};
use super::source::RecordSource;
use super::{ImportError, ImportResult, Resource};
use crate::film::model::Film;
use crate::validation::DATE_FORMAT;
use chrono::NaiveDate;
use std::collections::HashMap;
use swapi_db::queries::films::{self as queries, NewFilm};
use swapi_db::queries::planets as planet_queries;
use swapi_db::Connection;
use tracing::{debug, info};

fn required<T>(value: Option<T>, swapi_id: i64, field: &'static str) -> ImportResult<T> {
    value.ok_or(ImportError::MissingField {
        resource: Resource::Films,
        swapi_id,
        field,
    })
}

fn build_film(swapi_id: i64, record: &FilmRecord) -> ImportResult<NewFilm> {
    let raw_date = required(record.release_date.clone(), swapi_id, "release_date")?;
    let release_date =
        NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|_| ImportError::InvalidField {
            resource: Resource::Films,
            swapi_id,
            field: "release_date",
            value: raw_date.clone(),
        })?;

    Ok(NewFilm {
        swapi_id: Some(swapi_id),
        title: required(record.title.clone(), swapi_id, "title")?,
        episode_id: required(record.episode_id, swapi_id, "episode_id")?,
        opening_crawl: record.opening_crawl.clone().unwrap_or_default(),
        director: required(record.director.clone(), swapi_id, "director")?,
        producers: required(record.producer.clone(), swapi_id, "producer")?,
        release_date,
    })
}

/// Insert every remote film not yet stored locally and link each new film
/// to the planets it references. Planets missing locally are skipped.
pub fn import_films(conn: &Connection, source: &dyn RecordSource) -> ImportResult<Vec<Film>> {
    info!("Populating films...");

    let mut seen = queries::existing_swapi_ids(conn)?;
    let mut records: HashMap<i64, FilmRecord> = HashMap::new();
    let mut new_films = Vec::new();

    for value in source.fetch_all(Resource::Films) {
        let record: FilmRecord = decode(Resource::Films, value)?;
        let swapi_id = swapi_id_from_url(&record.url)?;

        if seen.insert(swapi_id) {
            new_films.push(build_film(swapi_id, &record)?);
        }
        records.insert(swapi_id, record);
    }

    let planet_index = planet_queries::swapi_id_index(conn)?;
    let created = queries::bulk_insert_films(conn, &new_films)?;
    info!(count = created.len(), "films created");

    for film in &created {
        let Some(record) = film.swapi_id.and_then(|id| records.get(&id)) else {
            continue;
        };

        for planet_url in &record.planets {
            let planet_swapi_id = swapi_id_from_url(planet_url)?;
            match planet_index.get(&planet_swapi_id) {
                Some(planet_id) => queries::add_film_planet(conn, film.id, *planet_id)?,
                None => debug!(film = film.id, planet = planet_swapi_id, "Skipping unknown planet"),
            }
        }
    }

    info!("Films linked to planets.");
    Ok(created.into_iter().map(Film::from_row).collect())
}
