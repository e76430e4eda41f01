//! Node lookup and history handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use swapi_core::global_id::{GlobalId, NodeKind};
use swapi_core::node;
use swapi_core::SwapiError;
use swapi_db::queries::history::HistoryRow;

use crate::error::ApiResult;
use crate::nodes::NodeView;
use crate::state::AppState;

/// Decode a path id that must name a node of `kind`.
pub(crate) fn decode_id(id: &str, kind: NodeKind) -> ApiResult<GlobalId> {
    Ok(GlobalId::decode_as(id, kind).map_err(SwapiError::from)?)
}

pub(crate) fn history(state: &AppState, id: &str, kind: NodeKind) -> ApiResult<Vec<HistoryRow>> {
    let gid = decode_id(id, kind)?;
    Ok(node::history_of(&state.db, gid)?)
}

pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<NodeView>> {
    let node = node::resolve(&state.db, &id)?;
    Ok(Json(NodeView::load(&state.db, node)?))
}
