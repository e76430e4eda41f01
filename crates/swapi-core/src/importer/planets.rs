//! Planet import stage.

use super::records::{decode, swapi_id_from_url, PlanetRecord};
use super::source::RecordSource;
use super::{ImportError, ImportResult, Resource};
use crate::planet::model::Planet;
use swapi_db::queries::planets::{self as queries, NewPlanet};
use swapi_db::Connection;
use tracing::info;

/// Insert every remote planet not yet stored locally.
pub fn import_planets(conn: &Connection, source: &dyn RecordSource) -> ImportResult<Vec<Planet>> {
    info!("Populating planets...");

    let mut seen = queries::existing_swapi_ids(conn)?;
    let mut new_planets = Vec::new();

    for value in source.fetch_all(Resource::Planets) {
        let record: PlanetRecord = decode(Resource::Planets, value)?;
        let swapi_id = swapi_id_from_url(&record.url)?;
        if !seen.insert(swapi_id) {
            continue;
        }

        let name = record.name.ok_or(ImportError::MissingField {
            resource: Resource::Planets,
            swapi_id,
            field: "name",
        })?;

        new_planets.push(NewPlanet {
            swapi_id: Some(swapi_id),
            name,
            climate: record.climate.unwrap_or_default(),
            terrain: record.terrain.unwrap_or_default(),
            rotation_period: record.rotation_period.unwrap_or_default(),
            orbital_period: record.orbital_period.unwrap_or_default(),
            diameter: record.diameter.unwrap_or_default(),
            gravity: record.gravity.unwrap_or_default(),
            surface_water: record.surface_water.unwrap_or_default(),
            population: record.population.unwrap_or_default(),
        });
    }

    let created = queries::bulk_insert_planets(conn, &new_planets)?;
    info!(count = created.len(), "planets created");

    Ok(created.into_iter().map(Planet::from_row).collect())
}
