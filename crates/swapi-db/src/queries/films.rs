//! Film-related database queries.

use crate::pool::{DbError, DbResult};
use crate::queries::history;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Storage format of `release_date`.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

const FILM_COLUMNS: &str = "id, swapi_id, title, episode_id, opening_crawl, director, producers,
     release_date, created_at, updated_at";

/// Film row from database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRow {
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

/// Values for a film that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewFilm {
    pub swapi_id: Option<i64>,
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producers: String,
    pub release_date: NaiveDate,
}

/// Exact-match filters for film listings.
#[derive(Debug, Clone, Default)]
pub struct FilmFilter {
    pub title: Option<String>,
    pub director: Option<String>,
}

fn parse_release_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, RELEASE_DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn film_from_row(row: &Row<'_>) -> rusqlite::Result<FilmRow> {
    Ok(FilmRow {
        id: row.get(0)?,
        swapi_id: row.get(1)?,
        title: row.get(2)?,
        episode_id: row.get(3)?,
        opening_crawl: row.get(4)?,
        director: row.get(5)?,
        producers: row.get(6)?,
        release_date: parse_release_date(row, 7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a film and record it in the history.
pub fn insert_film(conn: &Connection, film: &NewFilm) -> DbResult<FilmRow> {
    conn.execute(
        "INSERT INTO films (swapi_id, title, episode_id, opening_crawl, director, producers, release_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            film.swapi_id,
            film.title,
            film.episode_id,
            film.opening_crawl,
            film.director,
            film.producers,
            film.release_date.format(RELEASE_DATE_FORMAT).to_string(),
        ],
    )
    .map_err(DbError::from_write)?;

    let row = get_film(conn, conn.last_insert_rowid())?;
    history::record_created(conn, "film", row.id, &row)?;
    Ok(row)
}

/// Insert many films, returning the stored rows in input order.
pub fn bulk_insert_films(conn: &Connection, films: &[NewFilm]) -> DbResult<Vec<FilmRow>> {
    films.iter().map(|f| insert_film(conn, f)).collect()
}

/// Get a film by local ID.
pub fn get_film(conn: &Connection, id: i64) -> DbResult<FilmRow> {
    find_film(conn, id)?.ok_or_else(|| DbError::NotFound(format!("Film: {}", id)))
}

/// Get a film by local ID, if it exists.
pub fn find_film(conn: &Connection, id: i64) -> DbResult<Option<FilmRow>> {
    let sql = format!("SELECT {} FROM films WHERE id = ?1", FILM_COLUMNS);
    Ok(conn.query_row(&sql, params![id], film_from_row).optional()?)
}

/// External IDs already present locally.
pub fn existing_swapi_ids(conn: &Connection) -> DbResult<HashSet<i64>> {
    let mut stmt = conn.prepare("SELECT swapi_id FROM films WHERE swapi_id IS NOT NULL")?;
    let ids = stmt.query_map([], |row| row.get(0))?;
    ids.collect::<Result<HashSet<_>, _>>().map_err(DbError::from)
}

/// Map of external ID to local ID for every film that has one.
pub fn swapi_id_index(conn: &Connection) -> DbResult<HashMap<i64, i64>> {
    let mut stmt = conn.prepare("SELECT swapi_id, id FROM films WHERE swapi_id IS NOT NULL")?;
    let pairs = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    pairs.collect::<Result<HashMap<_, _>, _>>().map_err(DbError::from)
}

/// List films ordered by local ID. `limit = None` returns everything.
pub fn list_films(
    conn: &Connection,
    filter: &FilmFilter,
    limit: Option<i64>,
    offset: i64,
) -> DbResult<Vec<FilmRow>> {
    let sql = format!(
        "SELECT {} FROM films
         WHERE (?1 IS NULL OR title = ?1) AND (?2 IS NULL OR director = ?2)
         ORDER BY id LIMIT ?3 OFFSET ?4",
        FILM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![filter.title, filter.director, limit.unwrap_or(-1), offset],
        film_from_row,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Count films matching a filter.
pub fn count_films(conn: &Connection, filter: &FilmFilter) -> DbResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM films
         WHERE (?1 IS NULL OR title = ?1) AND (?2 IS NULL OR director = ?2)",
        params![filter.title, filter.director],
        |row| row.get(0),
    )?)
}

/// Link a film to a planet. Linking twice is a no-op.
pub fn add_film_planet(conn: &Connection, film_id: i64, planet_id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO film_planets (film_id, planet_id) VALUES (?1, ?2)",
        params![film_id, planet_id],
    )
    .map_err(DbError::from_write)?;
    Ok(())
}

/// Films shot on a planet.
pub fn list_films_for_planet(conn: &Connection, planet_id: i64) -> DbResult<Vec<FilmRow>> {
    let sql = format!(
        "SELECT {} FROM films
         WHERE id IN (SELECT film_id FROM film_planets WHERE planet_id = ?1)
         ORDER BY id",
        FILM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![planet_id], film_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Films a character appears in.
pub fn list_films_for_character(conn: &Connection, character_id: i64) -> DbResult<Vec<FilmRow>> {
    let sql = format!(
        "SELECT {} FROM films
         WHERE id IN (SELECT film_id FROM character_films WHERE character_id = ?1)
         ORDER BY id",
        FILM_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![character_id], film_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;
    use crate::queries::planets::{self, NewPlanet};

    fn new_hope() -> NewFilm {
        NewFilm {
            swapi_id: Some(1),
            title: "A New Hope".to_string(),
            episode_id: 4,
            opening_crawl: "It is a period of civil war.".to_string(),
            director: "George Lucas".to_string(),
            producers: "Gary Kurtz, Rick McCallum".to_string(),
            release_date: NaiveDate::from_ymd_opt(1977, 5, 25).unwrap(),
        }
    }

    #[test]
    fn test_insert_stores_iso_date() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            let row = insert_film(conn, &new_hope())?;
            assert_eq!(row.release_date, NaiveDate::from_ymd_opt(1977, 5, 25).unwrap());
            let stored: String =
                conn.query_row("SELECT release_date FROM films WHERE id = ?1", [row.id], |r| r.get(0))?;
            assert_eq!(stored, "1977-05-25");
            assert_eq!(row.episode_id, 4);
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_corrupt_stored_date_is_an_error() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            conn.execute(
                "INSERT INTO films (title, episode_id, director, producers, release_date)
                 VALUES ('Holiday Special', 0, 'Steve Binder', 'Gary Smith', '17/11/1978')",
                [],
            )?;
            let id = conn.last_insert_rowid();

            let err = get_film(conn, id).unwrap_err();
            assert!(matches!(
                err,
                DbError::Connection(rusqlite::Error::FromSqlConversionFailure(7, _, _))
            ));
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_filter_by_director() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            insert_film(conn, &new_hope())?;
            insert_film(
                conn,
                &NewFilm {
                    swapi_id: Some(2),
                    title: "The Empire Strikes Back".to_string(),
                    episode_id: 5,
                    director: "Irvin Kershner".to_string(),
                    ..new_hope()
                },
            )?;

            let filter = FilmFilter {
                director: Some("Irvin Kershner".to_string()),
                ..Default::default()
            };
            let films = list_films(conn, &filter, None, 0)?;
            assert_eq!(films.len(), 1);
            assert_eq!(films[0].title, "The Empire Strikes Back");
            assert_eq!(count_films(conn, &filter)?, 1);
            assert_eq!(count_films(conn, &FilmFilter::default())?, 2);
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_film_planet_edges() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            let film = insert_film(conn, &new_hope())?;
            let planet = planets::insert_planet(
                conn,
                &NewPlanet {
                    swapi_id: Some(1),
                    name: "Tatooine".to_string(),
                    ..Default::default()
                },
            )?;

            add_film_planet(conn, film.id, planet.id)?;
            add_film_planet(conn, film.id, planet.id)?;

            let linked = planets::list_planets_for_film(conn, film.id)?;
            assert_eq!(linked.len(), 1);
            assert_eq!(linked[0].name, "Tatooine");

            let reverse = list_films_for_planet(conn, planet.id)?;
            assert_eq!(reverse.len(), 1);
            assert_eq!(reverse[0].title, "A New Hope");
            Ok::<_, DbError>(())
        })
        .unwrap();
    }
}
