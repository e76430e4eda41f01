//! Character import stage.

use super::records::{decode, swapi_id_from_url, PersonRecord};
use super::source::RecordSource;
use super::{ImportResult, Resource};
use crate::character::model::Character;
use std::collections::HashMap;
use swapi_db::queries::characters::{self as queries, NewCharacter};
use swapi_db::queries::films as film_queries;
use swapi_db::queries::planets as planet_queries;
use swapi_db::Connection;
use tracing::{debug, info};

/// Insert every remote person not yet stored locally, resolving homeworlds
/// and film appearances against what is already in the store. References
/// that do not resolve are dropped, never fatal.
pub fn import_characters(conn: &Connection, source: &dyn RecordSource) -> ImportResult<Vec<Character>> {
    info!("Populating characters...");

    let mut seen = queries::existing_swapi_ids(conn)?;
    let people = source.fetch_all(Resource::People);
    let planet_index = planet_queries::swapi_id_index(conn)?;
    let film_index = film_queries::swapi_id_index(conn)?;

    let mut records: HashMap<i64, PersonRecord> = HashMap::new();
    let mut new_characters = Vec::new();

    for value in people {
        let record: PersonRecord = decode(Resource::People, value)?;
        let swapi_id = swapi_id_from_url(&record.url)?;

        if seen.insert(swapi_id) {
            let homeworld_id = match record.homeworld.as_deref().filter(|url| !url.is_empty()) {
                Some(url) => {
                    let planet_swapi_id = swapi_id_from_url(url)?;
                    let local = planet_index.get(&planet_swapi_id).copied();
                    if local.is_none() {
                        debug!(character = swapi_id, planet = planet_swapi_id, "Homeworld not found locally");
                    }
                    local
                }
                None => None,
            };

            new_characters.push(NewCharacter {
                swapi_id: Some(swapi_id),
                name: record.name.clone().unwrap_or_default(),
                birth_year: record.birth_year.clone().unwrap_or_default(),
                species: record.species.join(", "),
                height: record.height.clone().unwrap_or_default(),
                mass: record.mass.clone().unwrap_or_default(),
                hair_color: record.hair_color.clone().unwrap_or_default(),
                skin_color: record.skin_color.clone().unwrap_or_default(),
                eye_color: record.eye_color.clone().unwrap_or_default(),
                gender: record.gender.clone().unwrap_or_default(),
                homeworld_id,
            });
        }
        records.insert(swapi_id, record);
    }

    let created = queries::bulk_insert_characters(conn, &new_characters)?;
    info!(count = created.len(), "characters created");

    for character in &created {
        let Some(record) = character.swapi_id.and_then(|id| records.get(&id)) else {
            continue;
        };

        for film_url in &record.films {
            let film_swapi_id = swapi_id_from_url(film_url)?;
            match film_index.get(&film_swapi_id) {
                Some(film_id) => queries::add_character_film(conn, character.id, *film_id)?,
                None => debug!(character = character.id, film = film_swapi_id, "Skipping unknown film"),
            }
        }
    }

    info!("Characters linked to films.");
    Ok(created.into_iter().map(Character::from_row).collect())
}
