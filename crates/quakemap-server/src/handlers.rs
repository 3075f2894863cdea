//! REST API endpoint handlers for the map server.
//!
//! All handlers read from the shared [`AppState`]. The layer is read under
//! a short read lock; everything else is immutable.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Map page |
//! | `GET` | `/api/earthquakes` | Styled GeoJSON (`?min_magnitude=`, `?limit=`) |
//! | `GET` | `/api/legend` | Legend rows, position and HTML |
//! | `GET` | `/api/basemaps` | Basemap catalog and initial view |
//! | `GET` | `/api/encode` | Encoding for `?magnitude=&depth=` |
//! | `GET` | `/api/health` | Layer status |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use quakemap_core::encoding::encode_values;
use quakemap_core::layer::LayerFilter;
use quakemap_core::legend::label_for;
use quakemap_core::style::style_for_encoding;

use crate::error::ApiError;
use crate::state::AppState;

/// Upper bound on `limit` for `GET /api/earthquakes`.
pub const MAX_LIMIT: usize = 20_000;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/earthquakes` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EarthquakesQuery {
    /// Keep only events at or above this magnitude.
    pub min_magnitude: Option<f64>,
    /// Maximum number of features to return (capped at [`MAX_LIMIT`]).
    pub limit: Option<usize>,
}

/// Query parameters for the `GET /api/encode` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EncodeQuery {
    /// Event magnitude.
    pub magnitude: Option<f64>,
    /// Event depth in kilometres.
    pub depth: Option<f64>,
}

// ---------------------------------------------------------------------------
// GET / -- map page
// ---------------------------------------------------------------------------

/// Serve the map page rendered at startup.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(state.index_html.clone())
}

// ---------------------------------------------------------------------------
// GET /api/earthquakes -- styled layer
// ---------------------------------------------------------------------------

/// Return the current layer as a styled GeoJSON `FeatureCollection`.
///
/// # Query Parameters
///
/// - `min_magnitude`: keep events at or above this magnitude.
/// - `limit`: maximum number of features (max 20000).
pub async fn get_earthquakes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EarthquakesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(min) = params.min_magnitude
        && !min.is_finite()
    {
        return Err(ApiError::InvalidQuery(format!(
            "min_magnitude must be finite, got {min}"
        )));
    }

    let filter = LayerFilter {
        min_magnitude: params.min_magnitude,
        limit: params.limit.map(|l| l.min(MAX_LIMIT)),
    };

    let collection = state.layer.read().await.to_collection(&filter);
    Ok(Json(collection))
}

// ---------------------------------------------------------------------------
// GET /api/legend
// ---------------------------------------------------------------------------

/// Return the legend control: rows, corner and HTML body.
pub async fn get_legend(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.legend.clone())
}

// ---------------------------------------------------------------------------
// GET /api/basemaps
// ---------------------------------------------------------------------------

/// Return the basemap catalog, the active basemap, the initial view and
/// the overlay name.
pub async fn get_basemaps(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = &state.settings;
    Ok(Json(serde_json::json!({
        "default_basemap": settings.default_basemap,
        "overlay_name": settings.overlay_name,
        "view": serde_json::to_value(settings.view)?,
        "basemaps": serde_json::to_value(&settings.basemaps)?,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/encode -- single-record encoding
// ---------------------------------------------------------------------------

/// Encode one magnitude/depth pair with the server's radius policy.
///
/// # Query Parameters
///
/// - `magnitude`: required, finite.
/// - `depth`: required, finite, kilometres.
pub async fn encode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EncodeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let magnitude = require_finite("magnitude", params.magnitude)?;
    let depth = require_finite("depth", params.depth)?;

    let encoding = encode_values(magnitude, depth);
    let style = style_for_encoding(&encoding, state.radius_policy);

    Ok(Json(serde_json::json!({
        "bucket": encoding.bucket,
        "color": encoding.color(),
        "radius": encoding.radius,
        "label": label_for(encoding.bucket),
        "style": serde_json::to_value(style)?,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Report whether a layer has been loaded and how large it is.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let layer = state.layer.read().await;
    let status = if layer.generated_at().is_some() {
        "ok"
    } else {
        "waiting_for_feed"
    };
    Json(serde_json::json!({
        "status": status,
        "features": layer.len(),
        "skipped": layer.skipped(),
        "generated_at": layer.generated_at(),
        "source": layer.source(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a required numeric query parameter, rejecting missing and
/// non-finite values.
fn require_finite(name: &str, value: Option<f64>) -> Result<f64, ApiError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(ApiError::InvalidQuery(format!("{name} must be finite, got {v}"))),
        None => Err(ApiError::InvalidQuery(format!("missing {name}"))),
    }
}
