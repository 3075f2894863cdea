//! Wire types for the inbound earthquake GeoJSON feed.
//!
//! These mirror the USGS summary feed format closely and are lenient:
//! every field the map does not strictly need is optional, and unknown
//! fields are ignored. Conversion into [`EarthquakeRecord`] happens in
//! the feed crate, where malformed features are filtered out.
//!
//! [`EarthquakeRecord`]: crate::structs::EarthquakeRecord

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level GeoJSON `FeatureCollection` returned by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedCollection {
    /// GeoJSON object type, `FeatureCollection` for a valid feed.
    #[serde(rename = "type")]
    pub kind: String,
    /// Feed metadata block (generation time, title, count).
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    /// The earthquake events.
    #[serde(default)]
    pub features: Vec<FeedFeature>,
}

/// Metadata block attached to a summary feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMetadata {
    /// Generation time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub generated: Option<i64>,
    /// Canonical URL of the feed.
    #[serde(default)]
    pub url: Option<String>,
    /// Human-readable feed title.
    #[serde(default)]
    pub title: Option<String>,
    /// Number of features in the feed.
    #[serde(default)]
    pub count: Option<u64>,
}

/// One earthquake event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedFeature {
    /// Event identifier assigned by the network.
    #[serde(default)]
    pub id: Option<String>,
    /// Event properties. `null` reads as an empty block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: FeedProperties,
    /// Point geometry `[longitude, latitude, depth]`.
    #[serde(default)]
    pub geometry: Option<FeedGeometry>,
}

/// Properties of a single event. Only the fields the map reads are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedProperties {
    /// Magnitude. Null for some events still under review.
    #[serde(default)]
    pub mag: Option<f64>,
    /// Textual description of the location.
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
    /// Event detail page.
    #[serde(default)]
    pub url: Option<String>,
}

/// GeoJSON geometry of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedGeometry {
    /// GeoJSON geometry type, `Point` for earthquakes.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `[longitude, latitude, depth_km]`. Individual entries may be `null`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub coordinates: Vec<Option<f64>>,
}

impl FeedGeometry {
    /// Longitude, latitude and depth, if all three coordinates are present
    /// and non-null.
    pub fn point(&self) -> Option<(f64, f64, f64)> {
        match self.coordinates.as_slice() {
            [Some(lon), Some(lat), Some(depth), ..] => Some((*lon, *lat, *depth)),
            _ => None,
        }
    }
}

/// Read an explicit `null` as the type's default, so one odd feature
/// cannot fail the whole collection.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
