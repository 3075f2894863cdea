//! Visual encoding, legend, basemaps and layer construction for Quakemap.
//!
//! This crate owns everything between a parsed earthquake record and the
//! styled GeoJSON the browser hands to the map library.
//!
//! # Modules
//!
//! - [`basemap`] -- Built-in basemap tile layers and the initial view.
//! - [`config`] -- Configuration loading from `quakemap.yaml` into
//!   strongly-typed structs.
//! - [`encoding`] -- Depth to color bucket, magnitude to radius.
//! - [`layer`] -- [`EarthquakeLayer`] construction and filtering.
//! - [`legend`] -- Legend rows and HTML.
//! - [`popup`] -- Marker popup HTML.
//! - [`style`] -- Marker style objects and the radius policy.
//!
//! [`EarthquakeLayer`]: layer::EarthquakeLayer

pub mod basemap;
pub mod config;
pub mod encoding;
pub mod layer;
pub mod legend;
pub mod popup;
pub mod style;
