//! Shared application state for the map server.
//!
//! [`AppState`] is constructed once at startup from the loaded
//! [`MapConfig`] and injected into every handler. It owns the current
//! [`EarthquakeLayer`], the static map settings, the prebuilt legend and
//! page, and the broadcast channel announcing layer refreshes.

use std::sync::Arc;

use quakemap_core::config::{MapConfig, MapSettings};
use quakemap_core::layer::EarthquakeLayer;
use quakemap_core::legend::build_legend;
use quakemap_types::{EarthquakeRecord, LayerBroadcast, Legend, RadiusPolicy};
use tokio::sync::{RwLock, broadcast};

use crate::page::render_index;
use crate::server::ServerError;

/// Capacity of the broadcast channel for layer refresh announcements.
///
/// Refreshes are minutes apart, so a subscriber only lags if it stops
/// reading entirely.
const BROADCAST_CAPACITY: usize = 16;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// layer sits behind a read-write lock and is replaced wholesale on
/// refresh; everything else is immutable after construction.
pub struct AppState {
    /// Broadcast sender for layer refresh messages.
    pub tx: broadcast::Sender<LayerBroadcast>,
    /// The current earthquake layer.
    pub layer: Arc<RwLock<EarthquakeLayer>>,
    /// View, basemaps and overlay settings.
    pub settings: MapSettings,
    /// Radius policy used when building layers.
    pub radius_policy: RadiusPolicy,
    /// Legend control, built once.
    pub legend: Legend,
    /// Rendered map page.
    pub index_html: String,
}

impl AppState {
    /// Build the application state with an empty layer for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Template`] if the map page fails to render.
    pub fn new(config: &MapConfig, source: &str) -> Result<Self, ServerError> {
        let legend = build_legend(config.map.legend_position);
        let index_html = render_index(&config.map, &legend)?;
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);

        Ok(Self {
            tx,
            layer: Arc::new(RwLock::new(EarthquakeLayer::empty(
                config.map.overlay_name.clone(),
                source.to_owned(),
            ))),
            settings: config.map.clone(),
            radius_policy: config.encoding.radius_policy,
            legend,
            index_html,
        })
    }

    /// Style `records` into a layer named after the configured overlay,
    /// using the configured radius policy.
    pub fn build_layer(
        &self,
        records: &[EarthquakeRecord],
        source: &str,
        skipped: usize,
    ) -> EarthquakeLayer {
        EarthquakeLayer::build(
            records,
            self.radius_policy,
            &self.settings.overlay_name,
            source,
            skipped,
        )
    }

    /// Subscribe to layer refresh announcements.
    pub fn subscribe(&self) -> broadcast::Receiver<LayerBroadcast> {
        self.tx.subscribe()
    }

    /// Swap in a freshly built layer and announce it.
    ///
    /// Returns the number of `WebSocket` clients notified. Returns 0 if
    /// none are connected (this is not an error).
    pub async fn replace_layer(&self, layer: EarthquakeLayer) -> usize {
        let announcement = layer.broadcast();
        {
            let mut current = self.layer.write().await;
            *current = layer;
        }
        // send returns Err only when there are zero receivers.
        announcement.map_or(0, |msg| self.tx.send(msg).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> EarthquakeRecord {
        EarthquakeRecord {
            id: id.to_owned(),
            magnitude: 3.0,
            depth_km: 12.0,
            place: None,
            longitude: 0.0,
            latitude: 0.0,
            time: None,
            url: None,
        }
    }

    #[tokio::test]
    async fn starts_with_empty_layer() {
        let state = AppState::new(&MapConfig::default(), "http://feed");
        assert!(state.is_ok());
        if let Ok(state) = state {
            let layer = state.layer.read().await;
            assert!(layer.is_empty());
            assert_eq!(layer.source(), "http://feed");
        }
    }

    #[tokio::test]
    async fn replace_layer_notifies_subscribers() {
        let Ok(state) = AppState::new(&MapConfig::default(), "http://feed") else {
            return;
        };
        let mut rx = state.subscribe();

        let layer = state.build_layer(&[record("a"), record("b")], "http://feed", 0);
        let notified = state.replace_layer(layer).await;
        assert_eq!(notified, 1);

        let msg = rx.recv().await;
        assert_eq!(msg.map(|m| m.features).ok(), Some(2));
        assert_eq!(state.layer.read().await.len(), 2);
    }

    #[tokio::test]
    async fn replace_layer_without_subscribers_is_fine() {
        let Ok(state) = AppState::new(&MapConfig::default(), "http://feed") else {
            return;
        };
        let layer = state.build_layer(&[record("a")], "http://feed", 0);
        assert_eq!(state.replace_layer(layer).await, 0);
    }

    #[tokio::test]
    async fn layers_carry_configured_overlay_name() {
        let mut config = MapConfig::default();
        config.map.overlay_name = String::from("Quakes");
        let Ok(state) = AppState::new(&config, "http://feed") else {
            return;
        };
        assert_eq!(state.layer.read().await.name(), "Quakes");

        let layer = state.build_layer(&[record("a")], "http://feed", 0);
        assert_eq!(layer.name(), "Quakes");
    }
}
