//! Conversion from feed GeoJSON to [`EarthquakeRecord`]s.
//!
//! Magnitude comes from `properties.mag`, place from `properties.place`
//! and depth from `geometry.coordinates[2]`. A feature without a
//! magnitude or without all three coordinates cannot be encoded and is
//! skipped with a warning; a missing place is kept as `None`.

use chrono::{DateTime, Utc};
use quakemap_types::{EarthquakeRecord, FeedCollection, FeedFeature};
use tracing::warn;

use crate::error::FeedError;

/// Why a feed feature was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `properties.mag` is null or absent.
    MissingMagnitude,
    /// `geometry` is absent or lacks three non-null coordinates.
    MissingCoordinates,
}

/// Records parsed from one feed response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedBatch {
    /// Encodable records in feed order.
    pub records: Vec<EarthquakeRecord>,
    /// Number of features dropped.
    pub skipped: usize,
    /// Feed generation time from the metadata block.
    pub generated: Option<DateTime<Utc>>,
    /// Feed title from the metadata block.
    pub title: Option<String>,
}

/// Decode a raw response body into a batch of records.
///
/// # Errors
///
/// Returns [`FeedError::Decode`] if the body is not JSON of the feed
/// shape, or [`FeedError::Format`] if it is not a `FeatureCollection`.
pub fn parse_feed(body: &[u8]) -> Result<FeedBatch, FeedError> {
    let collection: FeedCollection = serde_json::from_slice(body)?;
    if collection.kind != "FeatureCollection" {
        return Err(FeedError::Format(format!(
            "expected FeatureCollection, got {}",
            collection.kind
        )));
    }
    Ok(records_from_collection(&collection))
}

/// Convert every usable feature of a collection.
pub fn records_from_collection(collection: &FeedCollection) -> FeedBatch {
    let mut records = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for (index, feature) in collection.features.iter().enumerate() {
        match record_from_feature(feature, index) {
            Ok(record) => records.push(record),
            Err(reason) => {
                skipped = skipped.saturating_add(1);
                warn!(
                    index,
                    id = feature.id.as_deref().unwrap_or("-"),
                    ?reason,
                    "Skipping malformed feed feature"
                );
            }
        }
    }

    let metadata = collection.metadata.as_ref();
    FeedBatch {
        records,
        skipped,
        generated: metadata
            .and_then(|m| m.generated)
            .and_then(DateTime::from_timestamp_millis),
        title: metadata.and_then(|m| m.title.clone()),
    }
}

/// Convert one feature. `index` names features that lack an id.
pub fn record_from_feature(
    feature: &FeedFeature,
    index: usize,
) -> Result<EarthquakeRecord, SkipReason> {
    let magnitude = feature
        .properties
        .mag
        .ok_or(SkipReason::MissingMagnitude)?;
    let (longitude, latitude, depth_km) = feature
        .geometry
        .as_ref()
        .and_then(quakemap_types::FeedGeometry::point)
        .ok_or(SkipReason::MissingCoordinates)?;

    Ok(EarthquakeRecord {
        id: feature
            .id
            .clone()
            .unwrap_or_else(|| format!("feature-{index}")),
        magnitude,
        depth_km,
        place: feature.properties.place.clone(),
        longitude,
        latitude,
        time: feature
            .properties
            .time
            .and_then(DateTime::from_timestamp_millis),
        url: feature.properties.url.clone(),
    })
}
