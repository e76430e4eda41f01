//! Films: authoring and lookups.

pub mod model;

use crate::character::model::Character;
use crate::error::{SwapiError, SwapiResult};
use crate::global_id::NodeKind;
use crate::planet::model::Planet;
use crate::validation::{decode_reference, parse_release_date, required_text};
use model::{CreateFilmInput, Film};
use swapi_db::queries::characters as character_queries;
use swapi_db::queries::films as queries;
use swapi_db::queries::planets as planet_queries;
use swapi_db::{DbError, DbPool};

pub use swapi_db::queries::films::FilmFilter;

/// Create a film and link it to the given planets.
///
/// The whole mutation is rejected, with nothing written, if any field is
/// invalid or any planet id does not resolve to an existing planet.
pub fn create_film(pool: &DbPool, input: CreateFilmInput) -> SwapiResult<Film> {
    let new = queries::NewFilm {
        swapi_id: None,
        title: required_text("title", &input.title)?,
        episode_id: input.episode_id,
        opening_crawl: input.opening_crawl.unwrap_or_default(),
        director: required_text("director", &input.director)?,
        producers: required_text("producers", &input.producers)?,
        release_date: parse_release_date("release_date", &input.release_date)?,
    };

    let planet_ids = input
        .planets
        .iter()
        .map(|token| decode_reference("planets", token, NodeKind::Planet))
        .collect::<SwapiResult<Vec<_>>>()?;

    let film = pool.with_conn_mut(|conn| {
        let tx = conn.transaction().map_err(DbError::from)?;

        for planet_id in &planet_ids {
            if planet_queries::find_planet(&tx, *planet_id)?.is_none() {
                return Err(SwapiError::invalid_reference(
                    "planets",
                    "One or more Planet IDs are invalid",
                ));
            }
        }

        let row = queries::insert_film(&tx, &new)?;
        for planet_id in &planet_ids {
            queries::add_film_planet(&tx, row.id, *planet_id)?;
        }

        tx.commit().map_err(DbError::from)?;
        Ok(Film::from_row(row))
    })?;

    tracing::info!(id = film.id, title = %film.title, planets = planet_ids.len(), "Film created");
    Ok(film)
}

/// Get a film by local ID.
pub fn get_film(pool: &DbPool, id: i64) -> SwapiResult<Film> {
    let row = pool.with_conn(|conn| queries::get_film(conn, id))?;
    Ok(Film::from_row(row))
}

/// List films matching a filter, ordered by local ID.
pub fn list_films(
    pool: &DbPool,
    filter: &FilmFilter,
    limit: Option<i64>,
    offset: i64,
) -> SwapiResult<Vec<Film>> {
    let rows = pool.with_conn(|conn| queries::list_films(conn, filter, limit, offset))?;
    Ok(rows.into_iter().map(Film::from_row).collect())
}

/// Count films matching a filter.
pub fn count_films(pool: &DbPool, filter: &FilmFilter) -> SwapiResult<i64> {
    Ok(pool.with_conn(|conn| queries::count_films(conn, filter))?)
}

/// Planets featured in a film.
pub fn planets_of(pool: &DbPool, film_id: i64) -> SwapiResult<Vec<Planet>> {
    let rows = pool.with_conn(|conn| planet_queries::list_planets_for_film(conn, film_id))?;
    Ok(rows.into_iter().map(Planet::from_row).collect())
}

/// Characters appearing in a film.
pub fn characters_of(pool: &DbPool, film_id: i64) -> SwapiResult<Vec<Character>> {
    let rows = pool.with_conn(|conn| character_queries::list_characters_for_film(conn, film_id))?;
    Ok(rows.into_iter().map(Character::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::{create_planet, model::CreatePlanetInput};
    use swapi_db::init_memory_pool;

    fn mandalorian() -> CreateFilmInput {
        CreateFilmInput {
            title: "The Mandalorian".to_string(),
            episode_id: 10,
            director: "Jon Favreau".to_string(),
            producers: "Dave Filoni, Jon Favreau".to_string(),
            release_date: "2023-12-12".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_film() {
        let pool = init_memory_pool().unwrap();
        let film = create_film(&pool, mandalorian()).unwrap();
        assert_eq!(film.title, "The Mandalorian");
        assert_eq!(film.director, "Jon Favreau");
        assert_eq!(film.release_date.to_string(), "2023-12-12");
        assert_eq!(film.opening_crawl, "");
    }

    #[test]
    fn test_wrong_date_format_creates_nothing() {
        let pool = init_memory_pool().unwrap();
        let input = CreateFilmInput {
            title: "Bad Date Movie".to_string(),
            episode_id: 999,
            director: "No One".to_string(),
            producers: "None".to_string(),
            release_date: "12-31-2020".to_string(),
            ..Default::default()
        };

        let err = create_film(&pool, input).unwrap_err();
        assert_eq!(err.field(), Some("release_date"));
        assert_eq!(count_films(&pool, &FilmFilter::default()).unwrap(), 0);
    }

    #[test]
    fn test_create_with_planets() {
        let pool = init_memory_pool().unwrap();
        let hoth = create_planet(
            &pool,
            CreatePlanetInput {
                name: "Hoth".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let film = create_film(
            &pool,
            CreateFilmInput {
                planets: vec![hoth.global_id().encode()],
                ..mandalorian()
            },
        )
        .unwrap();

        let planets = planets_of(&pool, film.id).unwrap();
        assert_eq!(planets.len(), 1);
        assert_eq!(planets[0].name, "Hoth");
    }

    #[test]
    fn test_unknown_planet_rejects_whole_mutation() {
        let pool = init_memory_pool().unwrap();
        let ghost = crate::global_id::GlobalId::new(NodeKind::Planet, 404).encode();

        let err = create_film(
            &pool,
            CreateFilmInput {
                planets: vec![ghost],
                ..mandalorian()
            },
        )
        .unwrap_err();

        assert!(matches!(err, SwapiError::InvalidReference { .. }));
        assert_eq!(count_films(&pool, &FilmFilter::default()).unwrap(), 0);
    }
}
