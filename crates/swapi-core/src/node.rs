//! Lookup of any entity by global id.

use crate::character::{self, model::Character};
use crate::error::SwapiResult;
use crate::film::{self, model::Film};
use crate::global_id::{GlobalId, NodeKind};
use crate::planet::{self, model::Planet};
use swapi_db::queries::history::{self, HistoryRow};
use swapi_db::DbPool;

/// An entity resolved from a global id.
#[derive(Debug, Clone)]
pub enum Node {
    Planet(Planet),
    Film(Film),
    Character(Character),
}

/// Resolve a global id token to the entity it names.
pub fn resolve(pool: &DbPool, token: &str) -> SwapiResult<Node> {
    let gid = GlobalId::decode(token)?;
    fetch(pool, gid)
}

/// Load the entity behind a decoded global id.
pub fn fetch(pool: &DbPool, gid: GlobalId) -> SwapiResult<Node> {
    Ok(match gid.kind {
        NodeKind::Planet => Node::Planet(planet::get_planet(pool, gid.id)?),
        NodeKind::Film => Node::Film(film::get_film(pool, gid.id)?),
        NodeKind::Character => Node::Character(character::get_character(pool, gid.id)?),
    })
}

/// Change history of an entity, oldest first. Fails if the entity does not
/// exist.
pub fn history_of(pool: &DbPool, gid: GlobalId) -> SwapiResult<Vec<HistoryRow>> {
    fetch(pool, gid)?;
    Ok(pool.with_conn(|conn| history::list_history(conn, gid.kind.as_str(), gid.id))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planet::model::CreatePlanetInput;
    use crate::SwapiError;
    use swapi_db::init_memory_pool;

    #[test]
    fn test_resolve_planet() {
        let pool = init_memory_pool().unwrap();
        let hoth = planet::create_planet(
            &pool,
            CreatePlanetInput {
                name: "Hoth".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        match resolve(&pool, &hoth.global_id().encode()).unwrap() {
            Node::Planet(p) => assert_eq!(p.name, "Hoth"),
            other => panic!("unexpected node {:?}", other),
        }

        let history = history_of(&pool, hoth.global_id()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].snapshot["name"], "Hoth");
    }

    #[test]
    fn test_resolve_missing_and_invalid() {
        let pool = init_memory_pool().unwrap();
        let missing = GlobalId::new(NodeKind::Film, 3).encode();
        assert!(matches!(resolve(&pool, &missing), Err(SwapiError::NotFound(_))));
        assert!(matches!(
            resolve(&pool, "not-a-token"),
            Err(SwapiError::InvalidGlobalId(_))
        ));
    }
}
