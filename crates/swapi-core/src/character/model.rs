//! Character domain models.

use crate::global_id::{GlobalId, NodeKind};
use serde::{Deserialize, Serialize};
use swapi_db::queries::characters::CharacterRow;

/// A person of the saga.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub swapi_id: Option<i64>,
    pub name: String,
    pub birth_year: String,
    /// Comma-separated species names or URLs.
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

impl Character {
    /// Create from database row.
    pub fn from_row(row: CharacterRow) -> Self {
        Self {
            id: row.id,
            swapi_id: row.swapi_id,
            name: row.name,
            birth_year: row.birth_year,
            species: row.species,
            height: row.height,
            mass: row.mass,
            hair_color: row.hair_color,
            skin_color: row.skin_color,
            eye_color: row.eye_color,
            gender: row.gender,
            homeworld_id: row.homeworld_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    pub fn global_id(&self) -> GlobalId {
        GlobalId::new(NodeKind::Character, self.id)
    }
}

/// Arguments of the `createCharacter` mutation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCharacterInput {
    pub name: String,
    pub species: Option<String>,
    #[serde(alias = "birthYear")]
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    #[serde(alias = "hairColor")]
    pub hair_color: Option<String>,
    #[serde(alias = "skinColor")]
    pub skin_color: Option<String>,
    #[serde(alias = "eyeColor")]
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    /// Global id of the home planet.
    pub homeworld: Option<String>,
    /// Global ids of films the character appears in.
    #[serde(default, alias = "movies")]
    pub films: Vec<String>,
}
