//! `GET /ws`: a WebSocket session that relays every order event as a JSON text frame.
//!
//! The session is registered with the broadcaster before the upgrade completes, so
//! it sees every event published after the handshake. Frames sent by the client are
//! read only to notice that it went away.

use crate::model::OrderEvent;
use actor_framework::{Broadcaster, Subscription};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use super::AppState;

/// Handles GET /ws requests.
pub async fn subscribe(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.service.events().clone();
    let subscription = match events.connect().await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!(error = %e, "Broadcaster unavailable, refusing subscriber");
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
    };

    ws.on_upgrade(move |socket| run_session(socket, subscription, events))
}

/// Pumps events to the socket until either side goes away, then deregisters.
async fn run_session(socket: WebSocket, mut subscription: Subscription<OrderEvent>, events: Broadcaster<OrderEvent>) {
    let id = subscription.id();
    info!(%id, "WebSocket session started");
    let (mut sink, mut inbound) = socket.split();

    loop {
        tokio::select! {
            event = subscription.recv() => {
                // None: dropped as lagging, or the broadcaster shut down.
                let Some(event) = event else { break };
                let json = match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(%id, error = %e, "Failed to encode event");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    debug!(%id, "Socket send failed");
                    break;
                }
            }
            frame = inbound.next() => {
                match frame {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        debug!(%id, error = %e, "Socket receive failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let _ = sink.close().await;
    if let Err(e) = events.disconnect(id).await {
        debug!(%id, error = %e, "Broadcaster gone before disconnect");
    }
    info!(%id, "WebSocket session ended");
}
