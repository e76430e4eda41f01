//! Planet domain models.

use crate::global_id::{GlobalId, NodeKind};
use serde::{Deserialize, Serialize};
use swapi_db::queries::planets::PlanetRow;

/// A planet, either mirrored from SWAPI or authored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
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

impl Planet {
    /// Create from database row.
    pub fn from_row(row: PlanetRow) -> Self {
        Self {
            id: row.id,
            swapi_id: row.swapi_id,
            name: row.name,
            climate: row.climate,
            terrain: row.terrain,
            rotation_period: row.rotation_period,
            orbital_period: row.orbital_period,
            diameter: row.diameter,
            gravity: row.gravity,
            surface_water: row.surface_water,
            population: row.population,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    pub fn global_id(&self) -> GlobalId {
        GlobalId::new(NodeKind::Planet, self.id)
    }
}

/// Arguments of the `createPlanet` mutation. Every field but `name` is
/// optional and stored as an empty string when absent. Multi-word fields
/// also accept their camelCase names, matching the node views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlanetInput {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    #[serde(alias = "rotationPeriod")]
    pub rotation_period: Option<String>,
    #[serde(alias = "orbitalPeriod")]
    pub orbital_period: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
    #[serde(alias = "surfaceWater")]
    pub surface_water: Option<String>,
    pub population: Option<String>,
}
