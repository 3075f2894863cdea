//! Shared type definitions for the Quakemap earthquake map.
//!
//! This crate is the single source of truth for all types used across the
//! Quakemap workspace. Outbound types flow to `TypeScript` via `ts-rs` for
//! the browser glue that hands them to the map library.
//!
//! # Modules
//!
//! - [`enums`] -- Depth buckets, radius policy, legend position
//! - [`feed`] -- Inbound GeoJSON feed wire types
//! - [`structs`] -- Records, encodings, marker styles, styled GeoJSON,
//!   legend and basemap types

pub mod enums;
pub mod feed;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{DepthBucket, LegendPosition, RadiusPolicy};
pub use feed::{FeedCollection, FeedFeature, FeedGeometry, FeedMetadata, FeedProperties};
pub use structs::{
    EarthquakeRecord, LayerBroadcast, LayerMetadata, Legend, LegendEntry, MapView, MarkerStyle,
    PointGeometry, StyledCollection, StyledFeature, StyledProperties, TileLayer, VisualEncoding,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the outbound types.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to `bindings/` relative to the crate root.
        use ts_rs::TS;

        // Enums
        let _ = crate::enums::DepthBucket::export_all();
        let _ = crate::enums::RadiusPolicy::export_all();
        let _ = crate::enums::LegendPosition::export_all();

        // Structs
        let _ = crate::structs::EarthquakeRecord::export_all();
        let _ = crate::structs::VisualEncoding::export_all();
        let _ = crate::structs::MarkerStyle::export_all();
        let _ = crate::structs::PointGeometry::export_all();
        let _ = crate::structs::StyledProperties::export_all();
        let _ = crate::structs::StyledFeature::export_all();
        let _ = crate::structs::LayerMetadata::export_all();
        let _ = crate::structs::StyledCollection::export_all();
        let _ = crate::structs::LegendEntry::export_all();
        let _ = crate::structs::Legend::export_all();
        let _ = crate::structs::TileLayer::export_all();
        let _ = crate::structs::MapView::export_all();
        let _ = crate::structs::LayerBroadcast::export_all();
    }
}
