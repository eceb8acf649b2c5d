use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::InboundMessage;
use crate::state::AppState;
use crate::websocket::connections::ConnectionHandle;
use crate::websocket::msg_update_handler::handle_update_message;

/// WebSocket handler
pub async fn websocket_handler(
    Path(client_id): Path<String>,
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt for client {}", client_id);
    ws.on_upgrade(move |socket| handle_socket(socket, client_id, state))
}

/// Handle WebSocket connection
///
/// Owns the connection for its whole lifetime: registers the client on
/// upgrade, reads one message at a time, and runs cleanup (unregister plus
/// leave-all) when the transport ends, whether by explicit close or fault.
async fn handle_socket(socket: WebSocket, client_id: String, state: Arc<AppState>) {
    info!("WebSocket connection established for client {}", client_id);

    // Split the socket into sender and receiver
    let (mut sender, mut receiver) = socket.split();

    // Register this client's outbound queue. A prior connection under the
    // same client id is superseded and told to close instead of being left
    // orphaned.
    let (handle, mut outbound) = ConnectionHandle::channel();
    if let Some(superseded) = state.connections.register(client_id.clone(), handle.clone()) {
        warn!("Superseding a live connection for client {}", client_id);
        superseded.close();
    }

    // Writer task: drain the outbound queue into the socket. Stops when the
    // queue closes or a send fails.
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    // Read loop: one message fully handled before the next is read, so a
    // sender's updates are relayed in the order they arrive.
    let mut recv_task = {
        let state = state.clone();
        let client_id = client_id.clone();
        tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                let Message::Text(text) = msg else {
                    continue;
                };
                match serde_json::from_str::<InboundMessage>(&text) {
                    Ok(InboundMessage::DocumentUpdate(update)) => {
                        handle_update_message(&update, &text, &client_id, &state);
                    }
                    Ok(InboundMessage::Unrecognized) => {
                        debug!("Discarding unrecognized message from client {}", client_id);
                    }
                    Err(e) => {
                        debug!("Failed to parse message from client {}: {}", client_id, e);
                    }
                }
            }
        })
    };

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Cleanup. When a newer connection superseded this one, the client id is
    // still live under the new entry and both the registry entry and the
    // session memberships belong to it, so they are left untouched.
    let still_registered = state
        .connections
        .lookup(&client_id)
        .map(|current| current.same_channel(&handle))
        .unwrap_or(false);
    if still_registered {
        state.connections.unregister(&client_id);
        state.sessions.leave_all(&client_id);
    }

    info!("WebSocket connection terminated for client {}", client_id);
}
