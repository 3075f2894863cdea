//! Core structs for the Quakemap earthquake map.
//!
//! Covers the earthquake record read from the feed, the derived visual
//! encoding and marker style, the styled GeoJSON handed to the browser,
//! and the legend and basemap types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DepthBucket, LegendPosition};

// ---------------------------------------------------------------------------
// Earthquake record
// ---------------------------------------------------------------------------

/// A single earthquake event read from the feed.
///
/// Immutable once created. A new set of records replaces the old one on
/// every fetch; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EarthquakeRecord {
    /// Event identifier assigned by the seismic network.
    pub id: String,
    /// Magnitude. May be zero or negative for micro-events.
    pub magnitude: f64,
    /// Hypocentre depth in kilometres. Negative above sea level.
    pub depth_km: f64,
    /// Textual location, when the feed provides one.
    pub place: Option<String>,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Origin time.
    pub time: Option<DateTime<Utc>>,
    /// Event detail page.
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// Encodings and styles
// ---------------------------------------------------------------------------

/// Visual encoding derived from a record's depth and magnitude.
///
/// Computed at render time and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VisualEncoding {
    /// Depth bucket selecting the fill color.
    pub bucket: DepthBucket,
    /// Raw marker radius derived from the magnitude.
    pub radius: f64,
}

impl VisualEncoding {
    /// Hex fill color of the bucket.
    pub const fn color(&self) -> &'static str {
        self.bucket.color()
    }
}

/// Per-marker style object consumed by the map renderer.
///
/// Serialized with the camelCase keys of the renderer's path options:
/// `opacity`, `fillOpacity`, `fillColor`, `color`, `radius`, `weight`,
/// `stroke`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MarkerStyle {
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Fill color (hex).
    pub fill_color: String,
    /// Stroke color.
    pub color: String,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Whether the outline is drawn.
    pub stroke: bool,
}

// ---------------------------------------------------------------------------
// Styled GeoJSON
// ---------------------------------------------------------------------------

/// Point geometry of a styled feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PointGeometry {
    /// Always `Point`.
    #[serde(rename = "type")]
    pub kind: String,
    /// `[longitude, latitude, depth_km]`.
    pub coordinates: Vec<f64>,
}

/// Properties of a styled feature: the record fields plus the
/// precomputed style and popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StyledProperties {
    /// Event identifier.
    pub id: String,
    /// Magnitude.
    pub mag: f64,
    /// Depth in kilometres.
    pub depth: f64,
    /// Textual location.
    pub place: Option<String>,
    /// Origin time.
    pub time: Option<DateTime<Utc>>,
    /// Event detail page.
    pub url: Option<String>,
    /// Depth bucket of the marker.
    pub bucket: DepthBucket,
    /// Marker style for the renderer.
    pub style: MarkerStyle,
    /// Popup HTML fragment.
    pub popup: String,
}

/// A GeoJSON feature ready to be drawn as a circle marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StyledFeature {
    /// Always `Feature`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Point location of the event.
    pub geometry: PointGeometry,
    /// Record fields, style and popup.
    pub properties: StyledProperties,
}

/// Metadata describing how a styled collection was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LayerMetadata {
    /// Overlay display name.
    pub name: String,
    /// Feed URL the records came from.
    pub source: String,
    /// When the layer was built. `None` until the first fetch completes.
    pub generated_at: Option<DateTime<Utc>>,
    /// Number of features in the response.
    pub count: usize,
    /// Number of feed features dropped as malformed.
    pub skipped: usize,
}

/// The styled GeoJSON `FeatureCollection` served to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StyledCollection {
    /// Always `FeatureCollection`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Layer provenance.
    pub metadata: LayerMetadata,
    /// Styled features in feed order.
    pub features: Vec<StyledFeature>,
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

/// One legend row: a color swatch and its depth range label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LegendEntry {
    /// Bucket the row describes.
    pub bucket: DepthBucket,
    /// Swatch color (hex).
    pub color: String,
    /// Range label, e.g. `70km - 90km` or `90+`.
    pub label: String,
}

/// The complete legend control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Legend {
    /// Corner the control is anchored to.
    pub position: LegendPosition,
    /// Rows, shallowest bucket first.
    pub entries: Vec<LegendEntry>,
    /// Pre-rendered HTML for the control body.
    pub html: String,
}

// ---------------------------------------------------------------------------
// Basemaps
// ---------------------------------------------------------------------------

/// A raster tile layer usable as a basemap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileLayer {
    /// Display name in the layer control.
    pub name: String,
    /// URL template with `{z}`, `{x}`, `{y}` and optional `{s}`, `{r}`,
    /// `{ext}` placeholders.
    pub url_template: String,
    /// Minimum zoom level.
    #[serde(default)]
    pub min_zoom: u8,
    /// Maximum zoom level.
    pub max_zoom: u8,
    /// Attribution HTML shown in the map corner.
    #[serde(default)]
    pub attribution: String,
    /// Tile file extension substituted for `{ext}`.
    #[serde(default)]
    pub ext: Option<String>,
}

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MapView {
    /// Latitude of the centre.
    pub latitude: f64,
    /// Longitude of the centre.
    pub longitude: f64,
    /// Initial zoom level.
    pub zoom: u8,
}

/// Message pushed over the `WebSocket` whenever the layer is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LayerBroadcast {
    /// Build time of the new layer.
    pub generated_at: DateTime<Utc>,
    /// Number of features in the new layer.
    pub features: usize,
    /// Number of feed features dropped as malformed.
    pub skipped: usize,
}
