//! WebSocket upgrade handler for real-time room connections.
//!
//! Handles the HTTP → WebSocket upgrade and the connection lifecycle:
//! 1. Resolve the bearer token; unknown tokens are rejected pre-upgrade
//! 2. Upgrade to WebSocket and register the outbound queue
//! 3. Mark the identity present (roster broadcast fires here)
//! 4. Pump outbound events and inbound messages until disconnect
//! 5. Unregister and clear presence

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::application::handlers::{
    ConnectCommand, DisconnectCommand, RequestCoinsCommand, RollDiceCommand, UpdateCoinsCommand,
    UpdateStatsCommand,
};
use crate::application::AppState;
use crate::domain::foundation::{ConnectionId, PlayerToken};
use crate::ports::IdentityStore;

use super::connections::ConnectionRegistry;
use super::messages::{ClientMessage, ServerMessage};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WsState {
    pub app: AppState,
    pub registry: Arc<ConnectionRegistry>,
}

impl WsState {
    pub fn new(app: AppState, registry: Arc<ConnectionRegistry>) -> Self {
        Self { app, registry }
    }
}

/// Query parameters of the upgrade request.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: String,
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?token=<bearer>`
///
/// The token is checked before the upgrade so an unauthorized connect is
/// rejected at the transport layer and never joins the room.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<WsState>,
) -> Response {
    let token: PlayerToken = match params.token.parse() {
        Ok(token) => token,
        Err(_) => return reject(),
    };
    if state.app.store.get(&token).await.is_none() {
        tracing::debug!("websocket upgrade with unknown token rejected");
        return reject();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, token, state))
}

fn reject() -> Response {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .body("unknown token".into())
        .unwrap()
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection: registers the outbound queue,
/// marks presence, then pumps both directions until either side closes.
async fn handle_socket(socket: WebSocket, token: PlayerToken, state: WsState) {
    let (mut sink, mut stream) = socket.split();
    let connection_id = ConnectionId::new();

    let mut outbound = state.registry.register(connection_id).await;

    // The connect broadcast (and the master's coin unicast) land on the
    // queue registered above, so this client sees its own snapshot.
    if state
        .app
        .connect_handler()
        .handle(ConnectCommand {
            token,
            connection_id,
        })
        .await
        .is_err()
    {
        state.registry.unregister(&connection_id).await;
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            let json = serde_json::to_string(&message)
                .expect("ServerMessage serialization should not fail");
            if let Err(e) = sink.send(Message::Text(json)).await {
                tracing::debug!(%connection_id, "send error, closing connection: {}", e);
                break;
            }
        }
    });

    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(message) => dispatch(&recv_state, token, connection_id, message).await,
                    Err(_) => {
                        // Malformed frames are invisible no-ops.
                        tracing::trace!(%connection_id, "unparseable frame dropped");
                    }
                },
                Ok(Message::Binary(_)) => {
                    tracing::warn!(%connection_id, "received unsupported binary message");
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level frames are handled by axum.
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(%connection_id, "client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(%connection_id, "receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    state.registry.unregister(&connection_id).await;
    state
        .app
        .disconnect_handler()
        .handle(DisconnectCommand { connection_id })
        .await;
}

/// Route one parsed client message to its handler.
///
/// Failures stay inside the room: the connection keeps running and the
/// client is told nothing, per the silent-no-op error policy.
async fn dispatch(
    state: &WsState,
    token: PlayerToken,
    connection_id: ConnectionId,
    message: ClientMessage,
) {
    match message {
        ClientMessage::UpdateCharacter(patch) => {
            if let Err(err) = state
                .app
                .update_stats_handler()
                .handle(UpdateStatsCommand { token, patch })
                .await
            {
                tracing::debug!(%connection_id, %err, "update_character dropped");
            }
        }
        ClientMessage::RollDice(request) => {
            if let Err(err) = state
                .app
                .roll_dice_handler()
                .handle(RollDiceCommand { token, request })
                .await
            {
                tracing::debug!(%connection_id, %err, "roll_dice dropped");
            }
        }
        ClientMessage::UpdateCoins(update) => {
            if let Err(err) = state
                .app
                .update_coins_handler()
                .handle(UpdateCoinsCommand { token, update })
                .await
            {
                tracing::debug!(%connection_id, %err, "update_coins dropped");
            }
        }
        ClientMessage::RequestCoins => {
            state
                .app
                .request_coins_handler()
                .handle(RequestCoinsCommand { connection_id })
                .await;
        }
    }
}

/// Create the axum router for the WebSocket endpoint.
pub fn ws_router() -> Router<WsState> {
    Router::new().route("/ws", get(ws_handler))
}
