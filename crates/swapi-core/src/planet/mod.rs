//! Planets: authoring and lookups.

pub mod model;

use crate::character::model::Character;
use crate::error::SwapiResult;
use crate::film::model::Film;
use crate::validation::required_text;
use model::{CreatePlanetInput, Planet};
use swapi_db::queries::characters as character_queries;
use swapi_db::queries::films as film_queries;
use swapi_db::queries::planets as queries;
use swapi_db::{DbError, DbPool};

pub use swapi_db::queries::planets::PlanetFilter;

/// Create a planet from the authoring surface.
pub fn create_planet(pool: &DbPool, input: CreatePlanetInput) -> SwapiResult<Planet> {
    let new = queries::NewPlanet {
        swapi_id: None,
        name: required_text("name", &input.name)?,
        climate: input.climate.unwrap_or_default(),
        terrain: input.terrain.unwrap_or_default(),
        rotation_period: input.rotation_period.unwrap_or_default(),
        orbital_period: input.orbital_period.unwrap_or_default(),
        diameter: input.diameter.unwrap_or_default(),
        gravity: input.gravity.unwrap_or_default(),
        surface_water: input.surface_water.unwrap_or_default(),
        population: input.population.unwrap_or_default(),
    };

    let planet = pool.with_conn_mut(|conn| {
        let tx = conn.transaction().map_err(DbError::from)?;
        let row = queries::insert_planet(&tx, &new)?;
        tx.commit().map_err(DbError::from)?;
        Ok::<_, crate::SwapiError>(Planet::from_row(row))
    })?;

    tracing::info!(id = planet.id, name = %planet.name, "Planet created");
    Ok(planet)
}

/// Get a planet by local ID.
pub fn get_planet(pool: &DbPool, id: i64) -> SwapiResult<Planet> {
    let row = pool.with_conn(|conn| queries::get_planet(conn, id))?;
    Ok(Planet::from_row(row))
}

/// List planets matching a filter, ordered by local ID.
pub fn list_planets(
    pool: &DbPool,
    filter: &PlanetFilter,
    limit: Option<i64>,
    offset: i64,
) -> SwapiResult<Vec<Planet>> {
    let rows = pool.with_conn(|conn| queries::list_planets(conn, filter, limit, offset))?;
    Ok(rows.into_iter().map(Planet::from_row).collect())
}

/// Count planets matching a filter.
pub fn count_planets(pool: &DbPool, filter: &PlanetFilter) -> SwapiResult<i64> {
    Ok(pool.with_conn(|conn| queries::count_planets(conn, filter))?)
}

/// Films that feature a planet.
pub fn films_of(pool: &DbPool, planet_id: i64) -> SwapiResult<Vec<Film>> {
    let rows = pool.with_conn(|conn| film_queries::list_films_for_planet(conn, planet_id))?;
    Ok(rows.into_iter().map(Film::from_row).collect())
}

/// Characters born on a planet.
pub fn residents_of(pool: &DbPool, planet_id: i64) -> SwapiResult<Vec<Character>> {
    let rows = pool.with_conn(|conn| character_queries::list_residents(conn, planet_id))?;
    Ok(rows.into_iter().map(Character::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapi_db::init_memory_pool;

    #[test]
    fn test_mustafar_round_trip() {
        let pool = init_memory_pool().unwrap();
        let created = create_planet(
            &pool,
            CreatePlanetInput {
                name: "Mustafar".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let planet = get_planet(&pool, created.id).unwrap();
        assert_eq!(planet.name, "Mustafar");
        assert_eq!(planet.swapi_id, None);
        for field in [
            &planet.climate,
            &planet.terrain,
            &planet.rotation_period,
            &planet.orbital_period,
            &planet.diameter,
            &planet.gravity,
            &planet.surface_water,
            &planet.population,
        ] {
            assert_eq!(field, "");
        }

        let found = list_planets(
            &pool,
            &PlanetFilter {
                name: Some("Mustafar".to_string()),
            },
            None,
            0,
        )
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_blank_name_rejected() {
        let pool = init_memory_pool().unwrap();
        let err = create_planet(&pool, CreatePlanetInput::default()).unwrap_err();
        assert_eq!(err.field(), Some("name"));
        assert_eq!(count_planets(&pool, &PlanetFilter::default()).unwrap(), 0);
    }

    #[test]
    fn test_missing_planet() {
        let pool = init_memory_pool().unwrap();
        assert!(matches!(get_planet(&pool, 5), Err(crate::SwapiError::NotFound(_))));
    }
}
