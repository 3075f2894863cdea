//! `WebSocket` stream of layer refresh announcements.
//!
//! `GET /ws/layers` pushes a JSON [`LayerBroadcast`] whenever a fresh
//! earthquake layer is swapped in. A client that connects after a layer
//! has been loaded gets that layer's announcement straight away, so the
//! page never waits a full refresh interval to learn markers are ready.
//!
//! Only the newest layer matters to a client. A receiver that lags is
//! sent the current layer's announcement instead of the missed ones.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use quakemap_types::LayerBroadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade to a `WebSocket` carrying layer refresh announcements.
///
/// # Route
///
/// `GET /ws/layers`
pub async fn ws_layers(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| stream_layers(socket, state))
}

async fn stream_layers(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before reading the current layer so a refresh landing in
    // between is still delivered.
    let mut rx = state.subscribe();
    debug!("Layer stream client connected");

    if let Some(current) = current_layer(&state).await
        && !send_layer(&mut socket, &current).await
    {
        return;
    }

    loop {
        let next = tokio::select! {
            received = rx.recv() => received,
            incoming = socket.recv() => {
                // Pings are answered by the protocol layer; the page never
                // sends data, so only a close or an error matters here.
                match incoming {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => {
                        debug!("Layer stream client disconnected");
                        return;
                    }
                    Some(Ok(_)) => continue,
                }
            }
        };

        let announcement = match next {
            Ok(announcement) => announcement,
            Err(RecvError::Lagged(missed)) => {
                debug!(missed, "Layer stream client lagged, sending current layer");
                match current_layer(&state).await {
                    Some(current) => current,
                    None => continue,
                }
            }
            Err(RecvError::Closed) => return,
        };

        if !send_layer(&mut socket, &announcement).await {
            return;
        }
    }
}

/// Announcement for the layer currently served, `None` before the first
/// successful fetch.
async fn current_layer(state: &AppState) -> Option<LayerBroadcast> {
    state.layer.read().await.broadcast()
}

/// Send one announcement. Returns `false` once the client is gone.
async fn send_layer(socket: &mut WebSocket, announcement: &LayerBroadcast) -> bool {
    let json = match serde_json::to_string(announcement) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize layer broadcast: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}
