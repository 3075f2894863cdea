//! Axum router construction for the map server.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the map server.
///
/// The router includes:
/// - `GET /` -- Leaflet map page
/// - `GET /ws/layers` -- `WebSocket` layer refresh stream
/// - `GET /api/earthquakes` -- styled GeoJSON layer
/// - `GET /api/legend` -- depth legend
/// - `GET /api/basemaps` -- basemap catalog and initial view
/// - `GET /api/encode` -- encode one magnitude/depth pair
/// - `GET /api/health` -- layer status
///
/// CORS allows any origin so the API can back other map clients.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws/layers", get(ws::ws_layers))
        .route("/api/earthquakes", get(handlers::get_earthquakes))
        .route("/api/legend", get(handlers::get_legend))
        .route("/api/basemaps", get(handlers::get_basemaps))
        .route("/api/encode", get(handlers::encode))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
