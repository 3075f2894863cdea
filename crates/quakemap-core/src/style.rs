//! Marker style construction.
//!
//! Combines the visual encoding with the fixed stroke and opacity
//! settings of the earthquake circle markers.

use quakemap_types::{EarthquakeRecord, MarkerStyle, RadiusPolicy, VisualEncoding};

use crate::encoding::{MIN_VISIBLE_RADIUS, encode};

/// Stroke opacity of every marker.
pub const MARKER_OPACITY: f64 = 0.5;
/// Fill opacity of every marker.
pub const MARKER_FILL_OPACITY: f64 = 0.5;
/// Outline color of every marker.
pub const MARKER_STROKE_COLOR: &str = "black";
/// Outline width of every marker.
pub const MARKER_WEIGHT: f64 = 0.5;

/// Apply the radius policy to a raw radius.
pub fn apply_radius_policy(policy: RadiusPolicy, radius: f64) -> f64 {
    match policy {
        RadiusPolicy::Preserve => radius,
        RadiusPolicy::Clamp => radius.max(MIN_VISIBLE_RADIUS),
    }
}

/// Style for an already computed encoding.
pub fn style_for_encoding(encoding: &VisualEncoding, policy: RadiusPolicy) -> MarkerStyle {
    MarkerStyle {
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
        fill_color: encoding.color().to_owned(),
        color: MARKER_STROKE_COLOR.to_owned(),
        radius: apply_radius_policy(policy, encoding.radius),
        weight: MARKER_WEIGHT,
        stroke: true,
    }
}

/// Style for a feed record.
pub fn style_for_record(record: &EarthquakeRecord, policy: RadiusPolicy) -> MarkerStyle {
    style_for_encoding(&encode(record), policy)
}
