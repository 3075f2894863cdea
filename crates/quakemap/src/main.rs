//! Quakemap binary.
//!
//! Wires the feed client, the styled earthquake layer and the map server
//! together. Configuration, the basemap catalog and the layer are built
//! here once and injected into the server state.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `quakemap.yaml` (or `QUAKEMAP_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Resolve the feed URL and build the feed client
//! 4. Build the server state with an empty layer
//! 5. Spawn the feed task: fetch once and swap in the styled layer
//! 6. Keep refreshing on the configured interval, if any
//! 7. Serve the map until terminated, without waiting for the feed

mod error;
mod refresh;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quakemap_core::config::{FeedConfig, LoggingConfig, MapConfig};
use quakemap_feed::{FeedClient, SummaryFeed};
use quakemap_server::{AppState, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Configuration file read when `QUAKEMAP_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "quakemap.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the feed client cannot
/// be built, or the server fails to bind.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("quakemap starting");
    info!(
        config = %config_path.display(),
        host = config.server.host,
        port = config.server.port,
        refresh_interval_secs = config.feed.refresh_interval_secs,
        radius_policy = ?config.encoding.radius_policy,
        "Configuration loaded"
    );

    // 3. Feed client.
    let feed_url = resolve_feed_url(&config.feed)?;
    let client = FeedClient::new(
        &feed_url,
        Duration::from_millis(config.feed.request_timeout_ms),
    )?;
    info!(url = client.url(), "Feed client ready");

    // 4. Server state.
    let state = Arc::new(AppState::new(&config, client.url())?);

    // 5-6. Feed task: startup fetch, then periodic refresh if configured.
    //      Not awaited, so the page is served while the feed loads.
    let period = (config.feed.refresh_interval_secs > 0)
        .then(|| Duration::from_secs(config.feed.refresh_interval_secs));
    let _feed_handle = refresh::spawn_feed_task(client, Arc::clone(&state), period);
    info!(
        refresh_secs = period.map_or(0, |p| p.as_secs()),
        "Feed task started"
    );

    // 7. Serve.
    start_server(&config.server, state).await?;

    info!("quakemap stopped");
    Ok(())
}

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load configuration from `QUAKEMAP_CONFIG` or `quakemap.yaml`.
///
/// A missing file means defaults, with environment overrides still
/// applied.
fn load_config() -> Result<(MapConfig, PathBuf), AppError> {
    let path = std::env::var_os("QUAKEMAP_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = MapConfig::from_file(&path)?;
        Ok((config, path))
    } else {
        let mut config = MapConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok((config, path))
    }
}

/// Pick the feed URL: a named summary feed wins over the raw URL.
fn resolve_feed_url(feed: &FeedConfig) -> Result<String, AppError> {
    match &feed.summary {
        Some(name) => {
            let summary: SummaryFeed = name.parse()?;
            Ok(summary.url())
        }
        None => Ok(feed.url.clone()),
    }
}
