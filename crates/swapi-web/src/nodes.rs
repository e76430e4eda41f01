//! JSON views of nodes.
//!
//! Each view carries the node's global id, its scalar fields and short
//! summaries of the nodes it is linked to.

use serde::Serialize;
use swapi_core::character::{self, model::Character};
use swapi_core::film::{self, model::Film};
use swapi_core::node::Node;
use swapi_core::planet::{self, model::Planet};
use swapi_core::SwapiResult;
use swapi_db::DbPool;

/// Summary of a linked node.
#[derive(Debug, Serialize)]
pub struct NodeRef {
    pub id: String,
    pub name: String,
}

impl From<&Planet> for NodeRef {
    fn from(planet: &Planet) -> Self {
        Self {
            id: planet.global_id().encode(),
            name: planet.name.clone(),
        }
    }
}

impl From<&Film> for NodeRef {
    fn from(film: &Film) -> Self {
        Self {
            id: film.global_id().encode(),
            name: film.title.clone(),
        }
    }
}

impl From<&Character> for NodeRef {
    fn from(character: &Character) -> Self {
        Self {
            id: character.global_id().encode(),
            name: character.name.clone(),
        }
    }
}

fn refs<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<NodeRef>
where
    NodeRef: From<&'a T>,
{
    items.into_iter().map(NodeRef::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetNode {
    pub id: String,
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
    pub films: Vec<NodeRef>,
    pub residents: Vec<NodeRef>,
    pub created_at: String,
}

impl PlanetNode {
    pub fn load(pool: &DbPool, planet: Planet) -> SwapiResult<Self> {
        let films = planet::films_of(pool, planet.id)?;
        let residents = planet::residents_of(pool, planet.id)?;

        Ok(Self {
            id: planet.global_id().encode(),
            swapi_id: planet.swapi_id,
            films: refs(&films),
            residents: refs(&residents),
            name: planet.name,
            climate: planet.climate,
            terrain: planet.terrain,
            rotation_period: planet.rotation_period,
            orbital_period: planet.orbital_period,
            diameter: planet.diameter,
            gravity: planet.gravity,
            surface_water: planet.surface_water,
            population: planet.population,
            created_at: planet.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmNode {
    pub id: String,
    pub swapi_id: Option<i64>,
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producers: String,
    pub release_date: String,
    pub planets: Vec<NodeRef>,
    pub characters: Vec<NodeRef>,
    pub created_at: String,
}

impl FilmNode {
    pub fn load(pool: &DbPool, film: Film) -> SwapiResult<Self> {
        let planets = film::planets_of(pool, film.id)?;
        let characters = film::characters_of(pool, film.id)?;

        Ok(Self {
            id: film.global_id().encode(),
            swapi_id: film.swapi_id,
            planets: refs(&planets),
            characters: refs(&characters),
            title: film.title,
            episode_id: film.episode_id,
            opening_crawl: film.opening_crawl,
            director: film.director,
            producers: film.producers,
            release_date: film.release_date.to_string(),
            created_at: film.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterNode {
    pub id: String,
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
    pub homeworld: Option<NodeRef>,
    pub films: Vec<NodeRef>,
    pub created_at: String,
}

impl CharacterNode {
    pub fn load(pool: &DbPool, character: Character) -> SwapiResult<Self> {
        let homeworld = character::homeworld_of(pool, &character)?;
        let films = character::films_of(pool, character.id)?;

        Ok(Self {
            id: character.global_id().encode(),
            swapi_id: character.swapi_id,
            homeworld: homeworld.as_ref().map(NodeRef::from),
            films: refs(&films),
            name: character.name,
            birth_year: character.birth_year,
            species: character.species,
            height: character.height,
            mass: character.mass,
            hair_color: character.hair_color,
            skin_color: character.skin_color,
            eye_color: character.eye_color,
            gender: character.gender,
            created_at: character.created_at,
        })
    }
}

/// Any node, tagged with its type name.
#[derive(Debug, Serialize)]
#[serde(tag = "__typename")]
pub enum NodeView {
    PlanetNode(PlanetNode),
    FilmNode(FilmNode),
    CharacterNode(CharacterNode),
}

impl NodeView {
    pub fn load(pool: &DbPool, node: Node) -> SwapiResult<Self> {
        Ok(match node {
            Node::Planet(planet) => Self::PlanetNode(PlanetNode::load(pool, planet)?),
            Node::Film(film) => Self::FilmNode(FilmNode::load(pool, film)?),
            Node::Character(character) => Self::CharacterNode(CharacterNode::load(pool, character)?),
        })
    }
}
