//! SWAPI Mirror Web Server
//!
//! Axum-based relay-flavoured JSON API over the local store.

pub mod connection;
pub mod error;
pub mod nodes;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;
use swapi_db::DbPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Planets
        .route(
            "/planets",
            get(routes::planets::list_planets).post(routes::planets::create_planet),
        )
        .route("/planets/{id}", get(routes::planets::get_planet))
        .route("/planets/{id}/history", get(routes::planets::planet_history))
        // Films
        .route(
            "/films",
            get(routes::films::list_films).post(routes::films::create_film),
        )
        .route("/films/{id}", get(routes::films::get_film))
        .route("/films/{id}/history", get(routes::films::film_history))
        // Characters
        .route(
            "/characters",
            get(routes::characters::list_characters).post(routes::characters::create_character),
        )
        .route("/characters/{id}", get(routes::characters::get_character))
        .route("/characters/{id}/history", get(routes::characters::character_history))
        // Any node
        .route("/node/{id}", get(routes::node::get_node));

    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(db: Arc<DbPool>, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(db);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
