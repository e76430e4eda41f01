//! Character-related database queries.

use crate::pool::{DbError, DbResult};
use crate::queries::history;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const CHARACTER_COLUMNS: &str = "id, swapi_id, name, birth_year, species, height, mass, hair_color,
     skin_color, eye_color, gender, homeworld_id, created_at, updated_at";

/// Character row from database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRow {
    pub id: i64,
    pub swapi_id: Option<i64>,
    pub name: String,
    pub birth_year: String,
    pub species: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub gender: String,
    pub homeworld_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Values for a character that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct NewCharacter {
    pub swapi_id: Option<i64>,
    pub name: String,
    pub birth_year: String,
    pub species: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub gender: String,
    pub homeworld_id: Option<i64>,
}

/// Exact-match filters for character listings.
#[derive(Debug, Clone, Default)]
pub struct CharacterFilter {
    pub name: Option<String>,
}

fn character_from_row(row: &Row<'_>) -> rusqlite::Result<CharacterRow> {
    Ok(CharacterRow {
        id: row.get(0)?,
        swapi_id: row.get(1)?,
        name: row.get(2)?,
        birth_year: row.get(3)?,
        species: row.get(4)?,
        height: row.get(5)?,
        mass: row.get(6)?,
        hair_color: row.get(7)?,
        skin_color: row.get(8)?,
        eye_color: row.get(9)?,
        gender: row.get(10)?,
        homeworld_id: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

/// Insert a character and record it in the history.
pub fn insert_character(conn: &Connection, character: &NewCharacter) -> DbResult<CharacterRow> {
    conn.execute(
        "INSERT INTO characters (swapi_id, name, birth_year, species, height, mass, hair_color,
                                 skin_color, eye_color, gender, homeworld_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            character.swapi_id,
            character.name,
            character.birth_year,
            character.species,
            character.height,
            character.mass,
            character.hair_color,
            character.skin_color,
            character.eye_color,
            character.gender,
            character.homeworld_id,
        ],
    )
    .map_err(DbError::from_write)?;

    let row = get_character(conn, conn.last_insert_rowid())?;
    history::record_created(conn, "character", row.id, &row)?;
    Ok(row)
}

/// Insert many characters, returning the stored rows in input order.
pub fn bulk_insert_characters(
    conn: &Connection,
    characters: &[NewCharacter],
) -> DbResult<Vec<CharacterRow>> {
    characters.iter().map(|c| insert_character(conn, c)).collect()
}

/// Get a character by local ID.
pub fn get_character(conn: &Connection, id: i64) -> DbResult<CharacterRow> {
    find_character(conn, id)?.ok_or_else(|| DbError::NotFound(format!("Character: {}", id)))
}

/// Get a character by local ID, if it exists.
pub fn find_character(conn: &Connection, id: i64) -> DbResult<Option<CharacterRow>> {
    let sql = format!("SELECT {} FROM characters WHERE id = ?1", CHARACTER_COLUMNS);
    Ok(conn.query_row(&sql, params![id], character_from_row).optional()?)
}

/// External IDs already present locally.
pub fn existing_swapi_ids(conn: &Connection) -> DbResult<HashSet<i64>> {
    let mut stmt = conn.prepare("SELECT swapi_id FROM characters WHERE swapi_id IS NOT NULL")?;
    let ids = stmt.query_map([], |row| row.get(0))?;
    ids.collect::<Result<HashSet<_>, _>>().map_err(DbError::from)
}

/// List characters ordered by local ID. `limit = None` returns everything.
pub fn list_characters(
    conn: &Connection,
    filter: &CharacterFilter,
    limit: Option<i64>,
    offset: i64,
) -> DbResult<Vec<CharacterRow>> {
    let sql = format!(
        "SELECT {} FROM characters
         WHERE (?1 IS NULL OR name = ?1)
         ORDER BY id LIMIT ?2 OFFSET ?3",
        CHARACTER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![filter.name, limit.unwrap_or(-1), offset],
        character_from_row,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Count characters matching a filter.
pub fn count_characters(conn: &Connection, filter: &CharacterFilter) -> DbResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM characters WHERE (?1 IS NULL OR name = ?1)",
        params![filter.name],
        |row| row.get(0),
    )?)
}

/// Link a character to a film. Linking twice is a no-op.
pub fn add_character_film(conn: &Connection, character_id: i64, film_id: i64) -> DbResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO character_films (character_id, film_id) VALUES (?1, ?2)",
        params![character_id, film_id],
    )
    .map_err(DbError::from_write)?;
    Ok(())
}

/// Characters whose homeworld is the given planet.
pub fn list_residents(conn: &Connection, planet_id: i64) -> DbResult<Vec<CharacterRow>> {
    let sql = format!(
        "SELECT {} FROM characters WHERE homeworld_id = ?1 ORDER BY id",
        CHARACTER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![planet_id], character_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Characters appearing in a film.
pub fn list_characters_for_film(conn: &Connection, film_id: i64) -> DbResult<Vec<CharacterRow>> {
    let sql = format!(
        "SELECT {} FROM characters
         WHERE id IN (SELECT character_id FROM character_films WHERE film_id = ?1)
         ORDER BY id",
        CHARACTER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![film_id], character_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;
    use crate::queries::films::{self, NewFilm};
    use crate::queries::planets::{self, NewPlanet};
    use chrono::NaiveDate;

    #[test]
    fn test_homeworld_set_null_on_planet_delete() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            let tatooine = planets::insert_planet(
                conn,
                &NewPlanet {
                    swapi_id: Some(1),
                    name: "Tatooine".to_string(),
                    ..Default::default()
                },
            )?;
            let luke = insert_character(
                conn,
                &NewCharacter {
                    swapi_id: Some(1),
                    name: "Luke Skywalker".to_string(),
                    homeworld_id: Some(tatooine.id),
                    ..Default::default()
                },
            )?;
            assert_eq!(list_residents(conn, tatooine.id)?.len(), 1);

            planets::delete_planet(conn, tatooine.id)?;

            let luke = get_character(conn, luke.id)?;
            assert_eq!(luke.homeworld_id, None);
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_unknown_homeworld_rejected_by_foreign_key() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            let err = insert_character(
                conn,
                &NewCharacter {
                    name: "Nobody".to_string(),
                    homeworld_id: Some(999),
                    ..Default::default()
                },
            )
            .unwrap_err();
            assert!(matches!(err, DbError::Constraint(_)));
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_character_film_edges() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            let film = films::insert_film(
                conn,
                &NewFilm {
                    swapi_id: Some(1),
                    title: "A New Hope".to_string(),
                    episode_id: 4,
                    opening_crawl: String::new(),
                    director: "George Lucas".to_string(),
                    producers: "Gary Kurtz".to_string(),
                    release_date: NaiveDate::from_ymd_opt(1977, 5, 25).unwrap(),
                },
            )?;
            let leia = insert_character(
                conn,
                &NewCharacter {
                    name: "Leia Organa".to_string(),
                    ..Default::default()
                },
            )?;

            add_character_film(conn, leia.id, film.id)?;

            let cast = list_characters_for_film(conn, film.id)?;
            assert_eq!(cast.len(), 1);
            assert_eq!(cast[0].name, "Leia Organa");
            assert_eq!(films::list_films_for_character(conn, leia.id)?.len(), 1);
            Ok::<_, DbError>(())
        })
        .unwrap();
    }

    #[test]
    fn test_existing_ids_ignore_local_rows() {
        let pool = init_memory_pool().unwrap();
        pool.with_conn(|conn| {
            insert_character(
                conn,
                &NewCharacter {
                    swapi_id: Some(4),
                    name: "Darth Vader".to_string(),
                    ..Default::default()
                },
            )?;
            insert_character(
                conn,
                &NewCharacter {
                    name: "Grogu".to_string(),
                    ..Default::default()
                },
            )?;
            let ids = existing_swapi_ids(conn)?;
            assert_eq!(ids.len(), 1);
            assert!(ids.contains(&4));
            Ok::<_, DbError>(())
        })
        .unwrap();
    }
}
