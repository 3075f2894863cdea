//! Feed fetching and layer refresh.
//!
//! [`refresh_layer`] performs one fetch-then-build cycle against the
//! shared [`AppState`]. [`spawn_feed_task`] runs it once at startup and
//! then on a fixed interval.
//! A failed fetch never touches the current layer.

use std::sync::Arc;
use std::time::Duration;

use quakemap_feed::{FeedClient, FeedError};
use quakemap_server::AppState;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Fetch the feed once, build a fresh layer and swap it in.
///
/// Returns the number of markers in the new layer.
///
/// # Errors
///
/// Returns the [`FeedError`] from the fetch. The previous layer is kept.
pub async fn refresh_layer(client: &FeedClient, state: &AppState) -> Result<usize, FeedError> {
    let batch = client.fetch().await?;
    let layer = state.build_layer(&batch.records, client.url(), batch.skipped);
    let markers = layer.len();
    let notified = state.replace_layer(layer).await;

    info!(
        markers,
        skipped = batch.skipped,
        notified,
        feed = batch.title.as_deref().unwrap_or("-"),
        feed_generated = ?batch.generated,
        "Earthquake layer refreshed"
    );
    Ok(markers)
}

/// Spawn the feed task: one fetch right away, then one every `period`
/// if given.
///
/// The server does not wait for this task, so the map and basemaps are
/// reachable while the first fetch is in flight. A failed startup fetch
/// leaves the empty layer in place.
pub fn spawn_feed_task(
    client: FeedClient,
    state: Arc<AppState>,
    period: Option<Duration>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match refresh_layer(&client, &state).await {
            Ok(markers) => info!(markers, "Initial earthquake layer loaded"),
            Err(e) => {
                error!(error = %e, url = client.url(), "Initial feed fetch failed, serving empty layer");
            }
        }

        let Some(period) = period else {
            return;
        };
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = refresh_layer(&client, &state).await {
                error!(error = %e, url = client.url(), "Feed refresh failed, keeping previous layer");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use quakemap_core::config::MapConfig;

    const FEED: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "ci1",
                "properties": {"mag": 2.1, "place": "5km S of Somewhere"},
                "geometry": {"type": "Point", "coordinates": [-118.0, 34.0, 7.5]}
            },
            {
                "type": "Feature",
                "id": "ci2",
                "properties": {"mag": null, "place": "Nowhere"},
                "geometry": {"type": "Point", "coordinates": [-118.1, 34.1, 3.0]}
            }
        ]
    }"#;

    async fn serve_feed() -> String {
        let app = Router::new()
            .route("/feed.geojson", get(|| async { FEED }))
            .route(
                "/down.geojson",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn refresh_swaps_in_new_layer() {
        let base = serve_feed().await;
        let url = format!("{base}/feed.geojson");
        let client = FeedClient::new(&url, Duration::from_secs(5)).unwrap();
        let state = AppState::new(&MapConfig::default(), &url).unwrap();

        let markers = refresh_layer(&client, &state).await.unwrap();
        assert_eq!(markers, 1);

        let layer = state.layer.read().await;
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.skipped(), 1);
        assert!(layer.generated_at().is_some());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_layer() {
        let base = serve_feed().await;
        let good = FeedClient::new(&format!("{base}/feed.geojson"), Duration::from_secs(5)).unwrap();
        let bad = FeedClient::new(&format!("{base}/down.geojson"), Duration::from_secs(5)).unwrap();
        let state = AppState::new(&MapConfig::default(), good.url()).unwrap();

        refresh_layer(&good, &state).await.unwrap();
        let result = refresh_layer(&bad, &state).await;
        assert!(matches!(result, Err(FeedError::Status { status: 503, .. })));
        assert_eq!(state.layer.read().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_startup_fetch_leaves_empty_layer() {
        let base = serve_feed().await;
        let bad = FeedClient::new(&format!("{base}/down.geojson"), Duration::from_secs(5)).unwrap();
        let state = AppState::new(&MapConfig::default(), bad.url()).unwrap();

        assert!(refresh_layer(&bad, &state).await.is_err());
        let layer = state.layer.read().await;
        assert!(layer.is_empty());
        assert!(layer.generated_at().is_none());
    }

    async fn wait_for_layer(state: &AppState) -> usize {
        for _ in 0..100 {
            let len = state.layer.read().await.len();
            if len > 0 {
                return len;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        0
    }

    #[tokio::test]
    async fn feed_task_loads_first_layer_in_background() {
        let base = serve_feed().await;
        let client = FeedClient::new(&format!("{base}/feed.geojson"), Duration::from_secs(5)).unwrap();
        let state = Arc::new(AppState::new(&MapConfig::default(), client.url()).unwrap());

        let handle = spawn_feed_task(client, Arc::clone(&state), None);
        assert_eq!(wait_for_layer(&state).await, 1);
        // Without a period the task ends after the startup fetch.
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn feed_task_survives_failed_startup_fetch() {
        let base = serve_feed().await;
        let client = FeedClient::new(&format!("{base}/down.geojson"), Duration::from_secs(5)).unwrap();
        let state = Arc::new(AppState::new(&MapConfig::default(), client.url()).unwrap());

        spawn_feed_task(client, Arc::clone(&state), None).await.unwrap();
        assert!(state.layer.read().await.is_empty());
    }
}
