//! Map server for the Quakemap earthquake map.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Map page** (`GET /`) rendering the Leaflet map with its basemaps,
//!   earthquake overlay, layer control and depth legend
//! - **REST endpoints** for the styled earthquake layer, legend, basemap
//!   catalog, single-value encoding and health
//! - **`WebSocket` endpoint** (`/ws/layers`) announcing layer refreshes
//!   via [`tokio::sync::broadcast`]
//!
//! # Architecture
//!
//! All handlers read from an injected [`AppState`]. The current
//! [`EarthquakeLayer`](quakemap_core::layer::EarthquakeLayer) is styled
//! once when built and replaced wholesale on refresh, so requests only
//! filter and serialize.

pub mod error;
pub mod handlers;
pub mod page;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
