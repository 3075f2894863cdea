//! Earthquake marker layer.
//!
//! [`EarthquakeLayer`] is the overlay built from one feed fetch. Every
//! record is encoded, styled and given its popup in a single synchronous
//! pass. The layer is never mutated after construction; a refresh builds
//! a new one and swaps it in whole.

use chrono::{DateTime, Utc};
use quakemap_types::{
    EarthquakeRecord, LayerBroadcast, LayerMetadata, PointGeometry, RadiusPolicy,
    StyledCollection, StyledFeature, StyledProperties,
};
use tracing::debug;

use crate::encoding::encode;
use crate::popup::popup_html;
use crate::style::style_for_encoding;

/// Filters applied when serving a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayerFilter {
    /// Keep only events at or above this magnitude.
    pub min_magnitude: Option<f64>,
    /// Return at most this many features.
    pub limit: Option<usize>,
}

/// The styled earthquake overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeLayer {
    name: String,
    source: String,
    generated_at: Option<DateTime<Utc>>,
    features: Vec<StyledFeature>,
    skipped: usize,
}

impl EarthquakeLayer {
    /// A layer with no markers, used until the first fetch succeeds.
    pub const fn empty(name: String, source: String) -> Self {
        Self {
            name,
            source,
            generated_at: None,
            features: Vec::new(),
            skipped: 0,
        }
    }

    /// Style every record in feed order.
    ///
    /// `name` is the overlay's display name. `skipped` is the number of feed features that were dropped before
    /// reaching this point; it is carried through to the metadata.
    pub fn build(
        records: &[EarthquakeRecord],
        policy: RadiusPolicy,
        name: &str,
        source: &str,
        skipped: usize,
    ) -> Self {
        let features: Vec<StyledFeature> = records
            .iter()
            .map(|record| styled_feature(record, policy))
            .collect();

        debug!(
            features = features.len(),
            skipped,
            source,
            "Earthquake layer built"
        );

        Self {
            name: name.to_owned(),
            source: source.to_owned(),
            generated_at: Some(Utc::now()),
            features,
            skipped,
        }
    }

    /// Overlay display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed URL the layer was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Build time, `None` for the empty startup layer.
    pub const fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    /// Styled features in feed order.
    pub fn features(&self) -> &[StyledFeature] {
        &self.features
    }

    /// Number of feed features dropped as malformed.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no markers.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serve the layer as a GeoJSON collection, applying `filter`.
    pub fn to_collection(&self, filter: &LayerFilter) -> StyledCollection {
        let limit = filter.limit.unwrap_or(usize::MAX);
        let features: Vec<StyledFeature> = self
            .features
            .iter()
            .filter(|f| {
                filter
                    .min_magnitude
                    .is_none_or(|min| f.properties.mag >= min)
            })
            .take(limit)
            .cloned()
            .collect();

        StyledCollection {
            kind: String::from("FeatureCollection"),
            metadata: LayerMetadata {
                name: self.name.clone(),
                source: self.source.clone(),
                generated_at: self.generated_at,
                count: features.len(),
                skipped: self.skipped,
            },
            features,
        }
    }

    /// Refresh announcement for `WebSocket` clients, `None` for the
    /// empty startup layer.
    pub fn broadcast(&self) -> Option<LayerBroadcast> {
        self.generated_at.map(|generated_at| LayerBroadcast {
            generated_at,
            features: self.features.len(),
            skipped: self.skipped,
        })
    }
}

/// Turn one record into a styled GeoJSON point feature.
pub fn styled_feature(record: &EarthquakeRecord, policy: RadiusPolicy) -> StyledFeature {
    let encoding = encode(record);
    StyledFeature {
        kind: String::from("Feature"),
        geometry: PointGeometry {
            kind: String::from("Point"),
            coordinates: vec![record.longitude, record.latitude, record.depth_km],
        },
        properties: StyledProperties {
            id: record.id.clone(),
            mag: record.magnitude,
            depth: record.depth_km,
            place: record.place.clone(),
            time: record.time,
            url: record.url.clone(),
            bucket: encoding.bucket,
            style: style_for_encoding(&encoding, policy),
            popup: popup_html(record),
        },
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::basemap::EARTHQUAKE_OVERLAY;
    use quakemap_types::DepthBucket;

    fn record(id: &str, magnitude: f64, depth_km: f64) -> EarthquakeRecord {
        EarthquakeRecord {
            id: id.to_owned(),
            magnitude,
            depth_km,
            place: Some(format!("Place {id}")),
            longitude: -120.0,
            latitude: 37.0,
            time: None,
            url: None,
        }
    }

    fn sample() -> Vec<EarthquakeRecord> {
        vec![
            record("a", 0.0, 2.0),
            record("b", 4.5, 95.0),
            record("c", 2.5, 45.0),
            record("d", -0.4, -1.0),
        ]
    }

    #[test]
    fn build_preserves_feed_order() {
        let layer = EarthquakeLayer::build(
            &sample(),
            RadiusPolicy::Clamp,
            EARTHQUAKE_OVERLAY,
            "http://feed",
            1,
        );
        let ids: Vec<&str> = layer
            .features()
            .iter()
            .map(|f| f.properties.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(layer.skipped(), 1);
        assert!(layer.generated_at().is_some());
    }

    #[test]
    fn feature_carries_style_and_popup() {
        let feature = styled_feature(&record("b", 4.5, 95.0), RadiusPolicy::Clamp);
        assert_eq!(feature.kind, "Feature");
        assert_eq!(feature.geometry.coordinates, vec![-120.0, 37.0, 95.0]);
        assert_eq!(feature.properties.bucket, DepthBucket::Deepest);
        assert_eq!(feature.properties.style.fill_color, "#d73027");
        assert_eq!(feature.properties.style.radius, 22.5);
        assert!(feature.properties.popup.starts_with("Magnitude: <b>4.5</b>"));
    }

    #[test]
    fn zero_magnitude_marker_has_unit_radius() {
        let feature = styled_feature(&record("a", 0.0, 2.0), RadiusPolicy::Preserve);
        assert_eq!(feature.properties.style.radius, 1.0);
    }

    #[test]
    fn filter_by_magnitude_and_limit() {
        let layer = EarthquakeLayer::build(
            &sample(),
            RadiusPolicy::Clamp,
            EARTHQUAKE_OVERLAY,
            "http://feed",
            0,
        );

        let strong = layer.to_collection(&LayerFilter {
            min_magnitude: Some(2.5),
            limit: None,
        });
        assert_eq!(strong.metadata.count, 2);
        assert_eq!(strong.metadata.name, "Earthquake Data");

        let first = layer.to_collection(&LayerFilter {
            min_magnitude: None,
            limit: Some(1),
        });
        assert_eq!(first.features.len(), 1);

        let all = layer.to_collection(&LayerFilter::default());
        assert_eq!(all.features.len(), 4);
        assert_eq!(all.kind, "FeatureCollection");
    }

    #[test]
    fn empty_layer_has_no_broadcast() {
        let layer =
            EarthquakeLayer::empty(String::from(EARTHQUAKE_OVERLAY), String::from("http://feed"));
        assert!(layer.is_empty());
        assert!(layer.broadcast().is_none());
        assert_eq!(layer.to_collection(&LayerFilter::default()).metadata.generated_at, None);
    }

    #[test]
    fn built_layer_broadcast_counts_features() {
        let layer = EarthquakeLayer::build(
            &sample(),
            RadiusPolicy::Clamp,
            EARTHQUAKE_OVERLAY,
            "http://feed",
            2,
        );
        let broadcast = layer.broadcast();
        assert_eq!(broadcast.as_ref().map(|b| b.features), Some(4));
        assert_eq!(broadcast.map(|b| b.skipped), Some(2));
    }

    #[test]
    fn collection_uses_configured_overlay_name() {
        let layer = EarthquakeLayer::build(
            &sample(),
            RadiusPolicy::Clamp,
            "Quakes",
            "http://feed",
            0,
        );
        assert_eq!(layer.name(), "Quakes");
        let collection = layer.to_collection(&LayerFilter::default());
        assert_eq!(collection.metadata.name, "Quakes");

        let empty = EarthquakeLayer::empty(String::from("Quakes"), String::from("http://feed"));
        assert_eq!(empty.to_collection(&LayerFilter::default()).metadata.name, "Quakes");
    }
}
