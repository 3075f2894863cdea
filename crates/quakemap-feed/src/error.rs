//! Error types for the feed client.
//!
//! Uses `thiserror` for typed errors covering client construction, the
//! HTTP exchange and payload decoding.

/// Errors that can occur while fetching or decoding the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The request could not be sent or the body could not be read.
    #[error("feed request failed: {0}")]
    Http(String),

    /// The feed answered with a non-success status.
    #[error("feed returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The body is not valid JSON for the feed schema.
    #[error("feed decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The body decoded but is not a GeoJSON `FeatureCollection`.
    #[error("unexpected feed format: {0}")]
    Format(String),

    /// The client configuration is invalid.
    #[error("feed config error: {0}")]
    Config(String),
}
