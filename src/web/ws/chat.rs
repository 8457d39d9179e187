//! Chat WebSocket handler.
//!
//! Binds one WebSocket session to one hub connection: text frames are
//! decoded into commands, hub events are encoded back into text frames.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::chat::{ClientCommand, ConnectionId, RouterHub, ServerEvent};
use crate::{Result, RoomHubError};

/// Socket-level message ceiling.
///
/// Frames above `max_frame_bytes` but below this ceiling reach
/// [`decode_command`] and are ignored; only frames above it end the session.
const SOCKET_MESSAGE_CEILING: usize = 64 << 20;

/// Message size limit handed to the WebSocket protocol layer.
pub fn socket_message_limit(max_frame_bytes: usize) -> usize {
    max_frame_bytes.max(SOCKET_MESSAGE_CEILING)
}

/// State for WebSocket chat handler.
#[derive(Clone)]
pub struct ChatWsState {
    /// Chat hub shared by all sessions.
    pub hub: Arc<RouterHub>,
    /// Largest inbound text frame accepted, in bytes.
    pub max_frame_bytes: usize,
}

impl ChatWsState {
    /// Create a new chat WebSocket state.
    pub fn new(hub: Arc<RouterHub>, max_frame_bytes: usize) -> Self {
        Self {
            hub,
            max_frame_bytes,
        }
    }
}

/// WebSocket chat handler.
///
/// GET /chat
pub async fn chat_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ChatWsState>>,
) -> Response {
    let limit = socket_message_limit(state.max_frame_bytes);
    ws.max_message_size(limit)
        .max_frame_size(limit)
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Decode an inbound text frame into a command.
pub fn decode_command(text: &str, max_frame_bytes: usize) -> Result<ClientCommand> {
    if text.len() > max_frame_bytes {
        return Err(RoomHubError::Validation(format!(
            "frame of {} bytes exceeds limit of {max_frame_bytes}",
            text.len()
        )));
    }
    serde_json::from_str(text)
        .map_err(|e| RoomHubError::Validation(format!("invalid command: {e}")))
}

/// Encode an outbound event into a text frame.
pub fn encode_event(event: &ServerEvent) -> Result<String> {
    serde_json::to_string(event)
        .map_err(|e| RoomHubError::Transport(format!("failed to encode {}: {e}", event.name())))
}

/// Handle a WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<ChatWsState>) {
    let connection_id = ConnectionId::new(uuid::Uuid::new_v4().to_string());

    let mut events = match state.hub.connect(connection_id.clone()).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(connection = %connection_id, error = %e, "Failed to attach connection");
            return;
        }
    };
    tracing::info!(connection = %connection_id, "WebSocket session started");

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut failure: Option<String> = None;

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match decode_command(&text, state.max_frame_bytes) {
                            Ok(command) => state.hub.dispatch(&connection_id, command).await,
                            Err(e) => {
                                tracing::debug!(connection = %connection_id, error = %e, "Ignoring frame");
                            }
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!(connection = %connection_id, "Ignoring binary frame");
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(connection = %connection_id, "WebSocket closed by client");
                        break;
                    }
                    // Pings are answered by the protocol layer
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        failure = Some(e.to_string());
                        break;
                    }
                }
            }

            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                match encode_event(&event) {
                    Ok(json) => {
                        if let Err(e) = ws_sender.send(Message::Text(json)).await {
                            failure = Some(e.to_string());
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(connection = %connection_id, error = %e, "Dropping event");
                    }
                }
            }
        }
    }

    state
        .hub
        .disconnect(&connection_id, failure.as_deref())
        .await;
}
