//! WebSocket result stream.
//!
//! # Endpoints
//!
//! - `GET /ws` - WebSocket upgrade for the result stream
//!
//! # Protocol
//!
//! On connect the client receives the current `SimulationResult` as JSON,
//! then one message per published result. Incoming text is ignored; the
//! connection ends on close or error.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use types::SimulationResult;

use crate::state::ServerState;

/// WebSocket upgrade handler: `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn encode(result: &SimulationResult) -> Option<Message> {
    match serde_json::to_string(result) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!("Failed to serialize result: {}", e);
            None
        }
    }
}

/// Handle a WebSocket connection.
async fn handle_socket(socket: WebSocket, state: ServerState) {
    state.metrics.ws_connect();
    debug!("WebSocket client connected");

    let (mut sender, mut receiver) = socket.split();

    // Subscribe before reading the current result so nothing is missed
    let mut result_rx = state.subscribe_results();
    let current = state.sim.current_result();

    let mut send_task = tokio::spawn(async move {
        if let Some(msg) = encode(&current) {
            if sender.send(msg).await.is_err() {
                return;
            }
        }
        loop {
            match result_rx.recv().await {
                Ok(result) => {
                    if let Some(msg) = encode(&result) {
                        if sender.send(msg).await.is_err() {
                            break; // Client disconnected
                        }
                    }
                }
                Err(RecvError::Lagged(n)) => {
                    debug!("WebSocket client lagged by {} results", n);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    warn!("WebSocket error: {}", e);
                    break;
                }
                _ => {} // Ignore text/binary/ping/pong
            }
        }
    });

    // Wait for either task to complete, then stop the other
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.metrics.ws_disconnect();
    debug!("WebSocket client disconnected");
}
