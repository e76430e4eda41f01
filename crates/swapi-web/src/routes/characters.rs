//! Character route handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use swapi_core::character::{self, model::CreateCharacterInput, CharacterFilter};
use swapi_core::global_id::NodeKind;
use swapi_db::queries::history::HistoryRow;

use crate::connection::{Connection, PageArgs};
use crate::error::ApiResult;
use crate::nodes::CharacterNode;
use crate::routes::node::{decode_id, history};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CharacterQuery {
    pub name: Option<String>,
    pub first: Option<i64>,
    pub after: Option<String>,
}

pub async fn list_characters(
    State(state): State<AppState>,
    query: Result<Query<CharacterQuery>, QueryRejection>,
) -> ApiResult<Json<Connection<CharacterNode>>> {
    let Query(query) = query?;
    let args = PageArgs::parse(query.first, query.after.as_deref())?;
    let filter = CharacterFilter { name: query.name };

    let total = character::count_characters(&state.db, &filter)?;
    let nodes = character::list_characters(&state.db, &filter, args.limit, args.offset)?
        .into_iter()
        .map(|c| CharacterNode::load(&state.db, c))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Connection::new(nodes, args, total)))
}

pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CharacterNode>> {
    let gid = decode_id(&id, NodeKind::Character)?;
    let character = character::get_character(&state.db, gid.id)?;
    Ok(Json(CharacterNode::load(&state.db, character)?))
}

pub async fn create_character(
    State(state): State<AppState>,
    body: Result<Json<CreateCharacterInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CharacterNode>)> {
    let Json(input) = body?;
    let character = character::create_character(&state.db, input)?;
    Ok((StatusCode::CREATED, Json(CharacterNode::load(&state.db, character)?)))
}

pub async fn character_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<HistoryRow>>> {
    history(&state, &id, NodeKind::Character).map(Json)
}
