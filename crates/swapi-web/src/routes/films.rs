//! Film route handlers.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use swapi_core::film::{self, model::CreateFilmInput, FilmFilter};
use swapi_core::global_id::NodeKind;
use swapi_db::queries::history::HistoryRow;

use crate::connection::{Connection, PageArgs};
use crate::error::ApiResult;
use crate::nodes::FilmNode;
use crate::routes::node::{decode_id, history};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FilmQuery {
    pub title: Option<String>,
    pub director: Option<String>,
    pub first: Option<i64>,
    pub after: Option<String>,
}

pub async fn list_films(
    State(state): State<AppState>,
    query: Result<Query<FilmQuery>, QueryRejection>,
) -> ApiResult<Json<Connection<FilmNode>>> {
    let Query(query) = query?;
    let args = PageArgs::parse(query.first, query.after.as_deref())?;
    let filter = FilmFilter {
        title: query.title,
        director: query.director,
    };

    let total = film::count_films(&state.db, &filter)?;
    let nodes = film::list_films(&state.db, &filter, args.limit, args.offset)?
        .into_iter()
        .map(|f| FilmNode::load(&state.db, f))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(Connection::new(nodes, args, total)))
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<FilmNode>> {
    let gid = decode_id(&id, NodeKind::Film)?;
    let film = film::get_film(&state.db, gid.id)?;
    Ok(Json(FilmNode::load(&state.db, film)?))
}

pub async fn create_film(
    State(state): State<AppState>,
    body: Result<Json<CreateFilmInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FilmNode>)> {
    let Json(input) = body?;
    let film = film::create_film(&state.db, input)?;
    Ok((StatusCode::CREATED, Json(FilmNode::load(&state.db, film)?)))
}

pub async fn film_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<HistoryRow>>> {
    history(&state, &id, NodeKind::Film).map(Json)
}
