//! Planet-related database queries.

use crate::pool::{DbError, DbResult};
use crate::queries::history;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const PLANET_COLUMNS: &str = "id, swapi_id, name, climate, terrain, rotation_period, orbital_period,
     diameter, gravity, surface_water, population, created_at, updated_at";

/// Planet row from database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetRow {
    pub id: i64,
    pub swapi_id: Option<i64>,
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub gravity: String,
    pub surface_water: String,
    pub population: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Values for a planet that has not been stored yet.
#[derive(Debug, Clone, Default)]
pub struct NewPlanet {
    pub swapi_id: Option<i64>,
    pub name: String,
    pub climate: String,
    pub terrain: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub gravity: String,
    pub surface_water: String,
    pub population: String,
}

/// Exact-match filters for planet listings.
#[derive(Debug, Clone, Default)]
pub struct PlanetFilter {
    pub name: Option<String>,
}

fn planet_from_row(row: &Row<'_>) -> rusqlite::Result<PlanetRow> {
    Ok(PlanetRow {
        id: row.get(0)?,
        swapi_id: row.get(1)?,
        name: row.get(2)?,
        climate: row.get(3)?,
        terrain: row.get(4)?,
        rotation_period: row.get(5)?,
        orbital_period: row.get(6)?,
        diameter: row.get(7)?,
        gravity: row.get(8)?,
        surface_water: row.get(9)?,
        population: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

/// Insert a planet and record it in the history.
pub fn insert_planet(conn: &Connection, planet: &NewPlanet) -> DbResult<PlanetRow> {
    conn.execute(
        "INSERT INTO planets (swapi_id, name, climate, terrain, rotation_period, orbital_period,
                              diameter, gravity, surface_water, population)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            planet.swapi_id,
            planet.name,
            planet.climate,
            planet.terrain,
            planet.rotation_period,
            planet.orbital_period,
            planet.diameter,
            planet.gravity,
            planet.surface_water,
            planet.population,
        ],
    )
    .map_err(DbError::from_write)?;

    let row = get_planet(conn, conn.last_insert_rowid())?;
    history::record_created(conn, "planet", row.id, &row)?;
    Ok(row)
}

/// Insert many planets, returning the stored rows in input order.
pub fn bulk_insert_planets(conn: &Connection, planets: &[NewPlanet]) -> DbResult<Vec<PlanetRow>> {
    planets.iter().map(|p| insert_planet(conn, p)).collect()
}

/// Get a planet by local ID.
pub fn get_planet(conn: &Connection, id: i64) -> DbResult<PlanetRow> {
    find_planet(conn, id)?.ok_or_else(|| DbError::NotFound(format!("Planet: {}", id)))
}

/// Get a planet by local ID, if it exists.
pub fn find_planet(conn: &Connection, id: i64) -> DbResult<Option<PlanetRow>> {
    let sql = format!("SELECT {} FROM planets WHERE id = ?1", PLANET_COLUMNS);
    Ok(conn.query_row(&sql, params![id], planet_from_row).optional()?)
}

/// External IDs already present locally.
pub fn existing_swapi_ids(conn: &Connection) -> DbResult<HashSet<i64>> {
    let mut stmt = conn.prepare("SELECT swapi_id FROM planets WHERE swapi_id IS NOT NULL")?;
    let ids = stmt.query_map([], |row| row.get(0))?;
    ids.collect::<Result<HashSet<_>, _>>().map_err(DbError::from)
}

/// Map of external ID to local ID for every planet that has one.
pub fn swapi_id_index(conn: &Connection) -> DbResult<HashMap<i64, i64>> {
    let mut stmt = conn.prepare("SELECT swapi_id, id FROM planets WHERE swapi_id IS NOT NULL")?;
    let pairs = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    pairs.collect::<Result<HashMap<_, _>, _>>().map_err(DbError::from)
}

/// List planets ordered by local ID. `limit = None` returns everything.
pub fn list_planets(
    conn: &Connection,
    filter: &PlanetFilter,
    limit: Option<i64>,
    offset: i64,
) -> DbResult<Vec<PlanetRow>> {
    let sql = format!(
        "SELECT {} FROM planets
         WHERE (?1 IS NULL OR name = ?1)
         ORDER BY id LIMIT ?2 OFFSET ?3",
        PLANET_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![filter.name, limit.unwrap_or(-1), offset],
        planet_from_row,
    )?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Count planets matching a filter.
pub fn count_planets(conn: &Connection, filter: &PlanetFilter) -> DbResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM planets WHERE (?1 IS NULL OR name = ?1)",
        params![filter.name],
        |row| row.get(0),
    )?)
}

/// Planets linked to a film.
pub fn list_planets_for_film(conn: &Connection, film_id: i64) -> DbResult<Vec<PlanetRow>> {
    let sql = format!(
        "SELECT {} FROM planets
         WHERE id IN (SELECT planet_id FROM film_planets WHERE film_id = ?1)
         ORDER BY id",
        PLANET_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![film_id], planet_from_row)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
}

/// Delete a planet. Residents keep existing with no homeworld.
pub fn delete_planet(conn: &Connection, id: i64) -> DbResult<()> {
    let affected = conn.execute("DELETE FROM planets WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(DbError::NotFound(format!("Planet: {}", id)));
    }
    Ok(())
}
