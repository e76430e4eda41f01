//! Characters: authoring and lookups.

pub mod model;

use crate::error::{SwapiError, SwapiResult};
use crate::film::model::Film;
use crate::global_id::NodeKind;
use crate::planet::model::Planet;
use crate::validation::{decode_reference, required_text};
use model::{Character, CreateCharacterInput};
use swapi_db::queries::characters as queries;
use swapi_db::queries::films as film_queries;
use swapi_db::queries::planets as planet_queries;
use swapi_db::{DbError, DbPool};

pub use swapi_db::queries::characters::CharacterFilter;

/// Create a character, optionally with a homeworld and films.
///
/// An unknown homeworld or film id rejects the mutation and nothing is
/// written.
pub fn create_character(pool: &DbPool, input: CreateCharacterInput) -> SwapiResult<Character> {
    let name = required_text("name", &input.name)?;

    let homeworld_id = input
        .homeworld
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .map(|token| decode_reference("homeworld", token, NodeKind::Planet))
        .transpose()?;

    let film_ids = input
        .films
        .iter()
        .map(|token| decode_reference("films", token, NodeKind::Film))
        .collect::<SwapiResult<Vec<_>>>()?;

    let new = queries::NewCharacter {
        swapi_id: None,
        name,
        birth_year: input.birth_year.unwrap_or_default(),
        species: input.species.unwrap_or_default(),
        height: input.height.unwrap_or_default(),
        mass: input.mass.unwrap_or_default(),
        hair_color: input.hair_color.unwrap_or_default(),
        skin_color: input.skin_color.unwrap_or_default(),
        eye_color: input.eye_color.unwrap_or_default(),
        gender: input.gender.unwrap_or_default(),
        homeworld_id,
    };

    let character = pool.with_conn_mut(|conn| {
        let tx = conn.transaction().map_err(DbError::from)?;

        if let Some(planet_id) = homeworld_id {
            if planet_queries::find_planet(&tx, planet_id)?.is_none() {
                return Err(SwapiError::invalid_reference(
                    "homeworld",
                    format!("Planet with id {} does not exist", input.homeworld.unwrap_or_default()),
                ));
            }
        }
        for film_id in &film_ids {
            if film_queries::find_film(&tx, *film_id)?.is_none() {
                return Err(SwapiError::invalid_reference(
                    "films",
                    "One or more Film IDs are invalid",
                ));
            }
        }

        let row = queries::insert_character(&tx, &new)?;
        for film_id in &film_ids {
            queries::add_character_film(&tx, row.id, *film_id)?;
        }

        tx.commit().map_err(DbError::from)?;
        Ok(Character::from_row(row))
    })?;

    tracing::info!(id = character.id, name = %character.name, films = film_ids.len(), "Character created");
    Ok(character)
}

/// Get a character by local ID.
pub fn get_character(pool: &DbPool, id: i64) -> SwapiResult<Character> {
    let row = pool.with_conn(|conn| queries::get_character(conn, id))?;
    Ok(Character::from_row(row))
}

/// List characters matching a filter, ordered by local ID.
pub fn list_characters(
    pool: &DbPool,
    filter: &CharacterFilter,
    limit: Option<i64>,
    offset: i64,
) -> SwapiResult<Vec<Character>> {
    let rows = pool.with_conn(|conn| queries::list_characters(conn, filter, limit, offset))?;
    Ok(rows.into_iter().map(Character::from_row).collect())
}

/// Count characters matching a filter.
pub fn count_characters(pool: &DbPool, filter: &CharacterFilter) -> SwapiResult<i64> {
    Ok(pool.with_conn(|conn| queries::count_characters(conn, filter))?)
}

/// Home planet of a character, if any.
pub fn homeworld_of(pool: &DbPool, character: &Character) -> SwapiResult<Option<Planet>> {
    let Some(planet_id) = character.homeworld_id else {
        return Ok(None);
    };
    let row = pool.with_conn(|conn| planet_queries::find_planet(conn, planet_id))?;
    Ok(row.map(Planet::from_row))
}

/// Films a character appears in.
pub fn films_of(pool: &DbPool, character_id: i64) -> SwapiResult<Vec<Film>> {
    let rows = pool.with_conn(|conn| film_queries::list_films_for_character(conn, character_id))?;
    Ok(rows.into_iter().map(Film::from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::{create_film, model::CreateFilmInput};
    use crate::global_id::GlobalId;
    use crate::planet::{create_planet, model::CreatePlanetInput};
    use swapi_db::init_memory_pool;

    #[test]
    fn test_create_minimal_character() {
        let pool = init_memory_pool().unwrap();
        let grogu = create_character(
            &pool,
            CreateCharacterInput {
                name: "Grogu".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(grogu.name, "Grogu");
        assert_eq!(grogu.homeworld_id, None);
        assert!(films_of(&pool, grogu.id).unwrap().is_empty());
    }

    #[test]
    fn test_create_with_film_and_homeworld() {
        let pool = init_memory_pool().unwrap();
        let film = create_film(
            &pool,
            CreateFilmInput {
                title: "Test Movie".to_string(),
                episode_id: 1,
                opening_crawl: Some("...".to_string()),
                director: "Lucas".to_string(),
                producers: "Lucas".to_string(),
                release_date: "1977-05-25".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let tatooine = create_planet(
            &pool,
            CreatePlanetInput {
                name: "Tatooine".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let luke = create_character(
            &pool,
            CreateCharacterInput {
                name: "Luke Skywalker".to_string(),
                species: Some("Human".to_string()),
                birth_year: Some("19BBY".to_string()),
                homeworld: Some(tatooine.global_id().encode()),
                films: vec![film.global_id().encode()],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(luke.birth_year, "19BBY");
        let films = films_of(&pool, luke.id).unwrap();
        assert_eq!(films[0].title, "Test Movie");
        let home = homeworld_of(&pool, &luke).unwrap().unwrap();
        assert_eq!(home.name, "Tatooine");
    }

    #[test]
    fn test_garbage_film_id_rejected() {
        let pool = init_memory_pool().unwrap();
        let err = create_character(
            &pool,
            CreateCharacterInput {
                name: "Test Character".to_string(),
                films: vec!["SW_WRONG_ID".to_string()],
                ..Default::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.field(), Some("films"));
        assert_eq!(count_characters(&pool, &CharacterFilter::default()).unwrap(), 0);
    }

    #[test]
    fn test_unknown_homeworld_rejected() {
        let pool = init_memory_pool().unwrap();
        let err = create_character(
            &pool,
            CreateCharacterInput {
                name: "Drifter".to_string(),
                homeworld: Some(GlobalId::new(NodeKind::Planet, 77).encode()),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, SwapiError::InvalidReference { .. }));
        assert_eq!(count_characters(&pool, &CharacterFilter::default()).unwrap(), 0);
    }
}
