//! Earthquake visual encoder.
//!
//! Maps a record's depth to one of six fixed color buckets and its
//! magnitude to a marker radius. Both mappings are pure: the encoding of
//! a record depends only on its two numeric fields.

use quakemap_types::{DepthBucket, EarthquakeRecord, VisualEncoding};

/// Radius given to zero-magnitude events so they stay visible.
pub const MIN_VISIBLE_RADIUS: f64 = 1.0;

/// Pixels of radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

/// Select the depth bucket for a hypocentre depth in kilometres.
///
/// Thresholds are compared deepest first with strict `>`, so a depth
/// exactly on a boundary falls into the shallower bucket. Depths that
/// fail every comparison (including `NaN`) land in
/// [`DepthBucket::Surface`].
pub fn bucket_for_depth(depth_km: f64) -> DepthBucket {
    for bucket in DepthBucket::DESCENDING {
        if let Some(lower) = bucket.lower_bound_km()
            && depth_km > f64::from(lower)
        {
            return bucket;
        }
    }
    DepthBucket::Surface
}

/// Hex fill color for a depth in kilometres.
pub fn color_of_depth(depth_km: f64) -> &'static str {
    bucket_for_depth(depth_km).color()
}

/// Marker radius for a magnitude.
///
/// Zero maps to [`MIN_VISIBLE_RADIUS`]; anything else is scaled by
/// [`RADIUS_PER_MAGNITUDE`]. Negative magnitudes yield negative radii here;
/// the marker style decides what to draw.
#[allow(clippy::float_cmp)]
pub fn radius_of_magnitude(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        MIN_VISIBLE_RADIUS
    } else {
        magnitude * RADIUS_PER_MAGNITUDE
    }
}

/// Encode raw magnitude and depth values.
pub fn encode_values(magnitude: f64, depth_km: f64) -> VisualEncoding {
    VisualEncoding {
        bucket: bucket_for_depth(depth_km),
        radius: radius_of_magnitude(magnitude),
    }
}

/// Encode a feed record.
pub fn encode(record: &EarthquakeRecord) -> VisualEncoding {
    encode_values(record.magnitude, record.depth_km)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const PALETTE: [&str; 6] = [
        "#d73027", "#fc8d59", "#fee08b", "#d9ef8b", "#91cf60", "#1a9850",
    ];

    #[test]
    fn every_depth_maps_into_the_palette() {
        let mut depth = -50.0;
        while depth < 800.0 {
            assert!(PALETTE.contains(&color_of_depth(depth)), "depth {depth}");
            depth += 0.25;
        }
        assert!(PALETTE.contains(&color_of_depth(f64::INFINITY)));
        assert!(PALETTE.contains(&color_of_depth(f64::NEG_INFINITY)));
    }

    #[test]
    fn thresholds_select_expected_colors() {
        assert_eq!(color_of_depth(95.0), "#d73027");
        assert_eq!(color_of_depth(80.0), "#fc8d59");
        assert_eq!(color_of_depth(60.0), "#fee08b");
        assert_eq!(color_of_depth(40.0), "#d9ef8b");
        assert_eq!(color_of_depth(20.0), "#91cf60");
        assert_eq!(color_of_depth(5.0), "#1a9850");
        assert_eq!(color_of_depth(-3.2), "#1a9850");
    }

    #[test]
    fn boundaries_fall_into_the_shallower_bucket() {
        assert_ne!(color_of_depth(90.0001), color_of_depth(90.0));
        assert_eq!(color_of_depth(90.0), color_of_depth(89.999));
        assert_eq!(color_of_depth(90.0), "#fc8d59");

        assert_eq!(bucket_for_depth(70.0), DepthBucket::Deep);
        assert_eq!(bucket_for_depth(50.0), DepthBucket::Intermediate);
        assert_eq!(bucket_for_depth(30.0), DepthBucket::Shallow);
        assert_eq!(bucket_for_depth(10.0), DepthBucket::Surface);
        assert_eq!(bucket_for_depth(10.000_001), DepthBucket::Shallow);
    }

    #[test]
    fn nan_depth_is_surface() {
        assert_eq!(bucket_for_depth(f64::NAN), DepthBucket::Surface);
    }

    #[test]
    fn zero_magnitude_stays_visible() {
        assert_eq!(radius_of_magnitude(0.0), 1.0);
        assert_eq!(radius_of_magnitude(-0.0), 1.0);
    }

    #[test]
    fn nonzero_magnitude_scales_by_five() {
        assert_eq!(radius_of_magnitude(4.5), 22.5);
        for m in [-1.2, -0.1, 0.01, 1.0, 2.5, 6.9, 9.5] {
            assert_eq!(radius_of_magnitude(m), m * 5.0, "magnitude {m}");
        }
        assert!(radius_of_magnitude(-1.2) < 0.0);
    }

    #[test]
    fn encode_uses_only_depth_and_magnitude() {
        let record = EarthquakeRecord {
            id: String::from("us1"),
            magnitude: 4.5,
            depth_km: 95.0,
            place: Some(String::from("Somewhere")),
            longitude: 140.0,
            latitude: 35.0,
            time: None,
            url: None,
        };
        let mut moved = record.clone();
        moved.id = String::from("us2");
        moved.place = None;
        moved.longitude = -70.0;

        let encoding = encode(&record);
        assert_eq!(encoding, encode(&moved));
        assert_eq!(encoding.bucket, DepthBucket::Deepest);
        assert_eq!(encoding.color(), "#d73027");
        assert_eq!(encoding.radius, 22.5);
    }
}
