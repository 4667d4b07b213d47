//! Realtime events endpoint
//!
//! `GET /events` upgrades to a WebSocket and forwards bus events to the
//! viewer as JSON text frames, e.g.
//!
//! ```json
//! { "event": "order-created", "payload": { "id": "PED-001", ... } }
//! ```
//!
//! Delivery is at-most-once: a viewer that disconnects or lags past the
//! channel capacity silently misses events and is expected to refetch
//! `/orders` and `/menu` on reconnect.

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
    routing::get,
};
use tokio::sync::broadcast;

use crate::core::ServerState;
use crate::message::BusEvent;

pub fn router() -> Router<ServerState> {
    Router::new().route("/events", get(upgrade))
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<ServerState>) -> Response {
    let rx = state.bus.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, rx))
}

/// Pump bus events into one viewer socket until either side closes.
async fn forward_events(mut socket: WebSocket, mut rx: broadcast::Receiver<BusEvent>) {
    tracing::debug!("Viewer connected");
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let Ok(text) = serde_json::to_string(&event) else {
                        continue;
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // at-most-once: the overwritten events are gone
                    tracing::warn!(skipped, "Viewer lagged behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // the channel is publish-only; inbound frames are ignored
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
    tracing::debug!("Viewer disconnected");
}
