//! Earthquake GeoJSON feed client for Quakemap.
//!
//! Fetches a summary feed over HTTP and turns its features into
//! [`EarthquakeRecord`]s, dropping the ones that cannot be encoded.
//!
//! ```text
//! GET feed --> FeedCollection --> FeedBatch { records, skipped }
//! ```
//!
//! [`EarthquakeRecord`]: quakemap_types::EarthquakeRecord

pub mod client;
pub mod error;
pub mod parse;
pub mod summary;

pub use client::FeedClient;
pub use error::FeedError;
pub use parse::{FeedBatch, SkipReason, parse_feed};
pub use summary::{FeedLevel, FeedPeriod, SummaryFeed};
