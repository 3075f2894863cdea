//! Error types for the Quakemap binary.

/// Top-level error for the Quakemap binary.
///
/// Each variant wraps a specific subsystem error so `main` can propagate
/// with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: quakemap_core::config::ConfigError,
    },

    /// The feed client could not be set up.
    #[error("feed error: {source}")]
    Feed {
        /// The underlying feed error.
        #[from]
        source: quakemap_feed::FeedError,
    },

    /// The map server failed to build or run.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: quakemap_server::ServerError,
    },
}
