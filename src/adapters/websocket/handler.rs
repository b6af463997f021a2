//! WebSocket upgrade handler for spray event rooms.
//!
//! Connection lifecycle:
//! 1. Read `userId` from the handshake query; reject the upgrade when it is
//!    missing or empty.
//! 2. Upgrade to WebSocket and join the room named by the user id.
//! 3. Forward room broadcasts out, dispatch inbound `sendSpray` frames to
//!    the broadcaster, answer rejected payloads with an `error` event.
//! 4. Release room membership on disconnect.
//!
//! A connection joins exactly one room, once, from its own handshake data;
//! there is no reconnection-state carryover.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::application::SprayBroadcaster;
use crate::domain::foundation::{RoomId, UserId};
use crate::ports::{ClientId, RoomRegistry};

use super::messages::{ClientMessage, ErrorMessage, ServerMessage};

/// State required for WebSocket handling, shared across connections.
#[derive(Clone)]
pub struct GatewayState {
    /// Room membership and fan-out.
    pub rooms: Arc<dyn RoomRegistry>,

    /// Spray validation + broadcast pipeline.
    pub broadcaster: Arc<SprayBroadcaster>,

    /// Per-connection outbound queue depth.
    pub send_buffer: usize,
}

impl GatewayState {
    /// Create gateway state over a room registry.
    pub fn new(
        rooms: Arc<dyn RoomRegistry>,
        broadcaster: Arc<SprayBroadcaster>,
        send_buffer: usize,
    ) -> Self {
        Self {
            rooms,
            broadcaster,
            send_buffer,
        }
    }
}

/// Handshake query parameters.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Room the connection joins. Trusted as-is; identity verification is
    /// the responsibility of the upstream auth layer.
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?userId=<id>`
///
/// A handshake without a non-empty `userId` is refused with 400 before the
/// upgrade; historically such connections silently joined an empty-string
/// room.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<GatewayState>,
) -> Response {
    let user_id = match params.user_id.map(UserId::new) {
        Some(Ok(id)) => id,
        _ => {
            tracing::debug!("Rejecting handshake without userId");
            return Response::builder()
                .status(400)
                .body("Missing userId".into())
                .unwrap();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

/// Drive an established connection until either side closes it.
async fn handle_socket(socket: WebSocket, user_id: UserId, state: GatewayState) {
    let (mut sink, mut stream) = socket.split();

    let client_id = ClientId::new();
    let room = RoomId::from(&user_id);

    let mut room_rx = state.rooms.join(&room, client_id.clone()).await;

    tracing::debug!(
        client_id = %client_id,
        user_id = %user_id,
        "Client joined room"
    );

    // All outbound traffic (room broadcasts and error events) funnels
    // through one queue so a single task owns the socket sink.
    let (out_tx, mut out_rx) = mpsc::channel::<ServerMessage>(state.send_buffer);

    let mut write_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let json = serde_json::to_string(&msg)
                    .expect("ServerMessage serialization should not fail");
                if let Err(e) = sink.send(Message::Text(json)).await {
                    tracing::debug!(
                        client_id = %client_id,
                        "Send error, closing connection: {}",
                        e
                    );
                    break;
                }
            }
        })
    };

    let mut forward_task = {
        let out_tx = out_tx.clone();
        tokio::spawn(async move {
            while let Ok(spray) = room_rx.recv().await {
                if out_tx.send(ServerMessage::NewSpary(spray)).await.is_err() {
                    break;
                }
            }
        })
    };

    let broadcaster = state.broadcaster.clone();
    let mut read_task = {
        let client_id = client_id.clone();
        tokio::spawn(async move {
            while let Some(result) = stream.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) else {
                            // Unrecognized topics are ignored, not answered.
                            tracing::trace!(
                                client_id = %client_id,
                                "Ignoring unrecognized frame"
                            );
                            continue;
                        };

                        let ClientMessage::SendSpray(payload) = client_msg;
                        if let Err(e) = broadcaster.handle_send(payload).await {
                            tracing::debug!(
                                client_id = %client_id,
                                "Rejected spray: {}",
                                e
                            );
                            let error = ServerMessage::Error(ErrorMessage::from_spray_error(&e));
                            if out_tx.send(error).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(
                            client_id = %client_id,
                            "Received unsupported binary message"
                        );
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Protocol-level frames are handled by axum.
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(
                            client_id = %client_id,
                            "Client sent close frame"
                        );
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(
                            client_id = %client_id,
                            "Receive error: {}",
                            e
                        );
                        break;
                    }
                }
            }
        })
    };

    // Whichever task finishes first tears down the rest. The aborted
    // handles are awaited to completion before membership is released:
    // `abort` alone does not stop the task synchronously, and the
    // empty-room cleanup in `leave` must not observe a broadcast receiver
    // that is still owned by a dying forward task.
    tokio::select! {
        _ = &mut write_task => {
            forward_task.abort();
            read_task.abort();
            let _ = (&mut forward_task).await;
            let _ = (&mut read_task).await;
        }
        _ = &mut forward_task => {
            write_task.abort();
            read_task.abort();
            let _ = (&mut write_task).await;
            let _ = (&mut read_task).await;
        }
        _ = &mut read_task => {
            write_task.abort();
            forward_task.abort();
            let _ = (&mut write_task).await;
            let _ = (&mut forward_task).await;
        }
    }

    state.rooms.leave(&client_id).await;

    tracing::debug!(
        client_id = %client_id,
        user_id = %user_id,
        "Client disconnected"
    );
}

/// Create the axum router for the gateway endpoint.
pub fn gateway_router() -> axum::Router<GatewayState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
