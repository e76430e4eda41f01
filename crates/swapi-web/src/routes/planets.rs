//! Planet route handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use swapi_core::global_id::NodeKind;
use swapi_core::planet::{self, model::CreatePlanetInput, PlanetFilter};
use swapi_db::queries::history::HistoryRow;

use crate::connection::{Connection, PageArgs};
use crate::error::ApiResult;
use crate::nodes::PlanetNode;
use crate::routes::node::{decode_id, history};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlanetQuery {
    pub name: Option<String>,
    pub first: Option<i64>,
    pub after: Option<String>,
}

pub async fn list_planets(
    State(state): State<AppState>,
    query: Result<Query<PlanetQuery>, QueryRejection>,
) -> ApiResult<Json<Connection<PlanetNode>>> {
    let Query(query) = query?;
    let args = PageArgs::parse(query.first, query.after.as_deref())?;
    let filter = PlanetFilter { name: query.name };

    let total = planet::count_planets(&state.db, &filter)?;
    let nodes = planet::list_planets(&state.db, &filter, args.limit, args.offset)?
        .into_iter()
        .map(|p| PlanetNode::load(&state.db, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Connection::new(nodes, args, total)))
}

pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlanetNode>> {
    let gid = decode_id(&id, NodeKind::Planet)?;
    let planet = planet::get_planet(&state.db, gid.id)?;
    Ok(Json(PlanetNode::load(&state.db, planet)?))
}

pub async fn create_planet(
    State(state): State<AppState>,
    body: Result<Json<CreatePlanetInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PlanetNode>)> {
    let Json(input) = body?;
    let planet = planet::create_planet(&state.db, input)?;
    Ok((StatusCode::CREATED, Json(PlanetNode::load(&state.db, planet)?)))
}

pub async fn planet_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<HistoryRow>>> {
    history(&state, &id, NodeKind::Planet).map(Json)
}
