//! WebSocket upgrade handler for live session connections.
//!
//! Manages the connection lifecycle:
//! 1. Upgrade to WebSocket and announce the connection id
//! 2. Subscribe to sessions and run session commands on request
//! 3. Forward the connection's queue (events and replies) until disconnect
//!    or eviction
//! 4. Remove the connection from every group it joined

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};

use crate::adapters::registry::SessionRegistry;
use crate::application::{
    CastVoteCommand, CastVoteHandler, EndSessionCommand, EndSessionHandler, ResetVotesCommand,
    ResetVotesHandler, RevealVotesCommand, RevealVotesHandler,
};
use crate::domain::foundation::{ParticipantId, SessionCode};
use crate::domain::session::SessionError;

use super::{
    coordinator::{BroadcastCoordinator, Connection},
    messages::{ClientMessage, ServerMessage, SubscribeRequest},
    subscribe::{SubscribeSessionCommand, SubscribeSessionHandler},
};

/// Command handlers reachable over the socket.
struct LiveCommands {
    subscribe: SubscribeSessionHandler,
    vote: CastVoteHandler,
    reveal: RevealVotesHandler,
    reset: ResetVotesHandler,
    end: EndSessionHandler,
}

impl LiveCommands {
    fn new(registry: Arc<SessionRegistry>, coordinator: Arc<BroadcastCoordinator>) -> Self {
        Self {
            subscribe: SubscribeSessionHandler::new(
                Arc::clone(&registry),
                Arc::clone(&coordinator),
            ),
            vote: CastVoteHandler::new(Arc::clone(&registry), coordinator.clone()),
            reveal: RevealVotesHandler::new(Arc::clone(&registry), coordinator.clone()),
            reset: ResetVotesHandler::new(Arc::clone(&registry), coordinator.clone()),
            end: EndSessionHandler::new(registry, coordinator),
        }
    }
}

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    coordinator: Arc<BroadcastCoordinator>,
    commands: Arc<LiveCommands>,
    /// Outbound queue depth per connection.
    connection_buffer: usize,
}

impl WebSocketState {
    pub fn new(
        registry: Arc<SessionRegistry>,
        coordinator: Arc<BroadcastCoordinator>,
        connection_buffer: usize,
    ) -> Self {
        let commands = Arc::new(LiveCommands::new(registry, Arc::clone(&coordinator)));
        Self {
            coordinator,
            commands,
            connection_buffer,
        }
    }

    pub fn coordinator(&self) -> &Arc<BroadcastCoordinator> {
        &self.coordinator
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. A writer task drains the
/// connection's single queue; a reader task processes client messages and
/// queues their replies behind whatever is already pending.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let (connection, mut outbound) = Connection::open(state.connection_buffer);
    let connection_id = connection.id();

    if let Err(e) = send_message(&mut sender, &ServerMessage::connected(connection_id)).await {
        tracing::debug!(connection_id = %connection_id, "Failed to send connected message: {}", e);
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            if let Err(e) = send_message(&mut sender, &msg).await {
                tracing::debug!(
                    connection_id = %connection_id,
                    "Send error, closing connection: {}",
                    e
                );
                return;
            }
        }
        // Evicted or shut down: tell the client so it reconnects.
        let _ = sender.send(Message::Close(None)).await;
    });

    let commands = Arc::clone(&state.commands);
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if let Some(reply) = handle_client_text(&text, &connection, &commands) {
                        if !connection.reply(reply).await {
                            break;
                        }
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "Received unsupported binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // Protocol-level heartbeats are answered by axum.
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.coordinator.unsubscribe(&connection_id);
    tracing::debug!(connection_id = %connection_id, "Connection closed");
}

/// Process one text frame. Returns the direct reply, if any.
///
/// Successful commands reply through the events they broadcast; only
/// failures get an `error` reply.
fn handle_client_text(
    text: &str,
    connection: &Connection,
    commands: &LiveCommands,
) -> Option<ServerMessage> {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(connection_id = %connection.id(), "Malformed client message: {}", e);
            return Some(ServerMessage::error("INVALID_MESSAGE", e.to_string()));
        }
    };

    let result = match msg {
        ClientMessage::Ping => {
            tracing::trace!(connection_id = %connection.id(), "Received ping");
            return Some(ServerMessage::pong());
        }
        ClientMessage::Subscribe(req) => subscribe(req, connection, &commands.subscribe),
        ClientMessage::CastVote(req) => commands.vote.handle(CastVoteCommand {
            session_code: SessionCode::normalize(&req.session_code),
            participant_id: ParticipantId::from(req.participant_id),
            value: req.value,
        }),
        ClientMessage::RevealVotes(req) => commands.reveal.handle(RevealVotesCommand {
            session_code: SessionCode::normalize(&req.session_code),
        }),
        ClientMessage::ResetVotes(req) => commands.reset.handle(ResetVotesCommand {
            session_code: SessionCode::normalize(&req.session_code),
        }),
        ClientMessage::EndSession(req) => commands.end.handle(EndSessionCommand {
            session_code: SessionCode::normalize(&req.session_code),
        }),
    };

    result.err().map(|e| {
        tracing::debug!(connection_id = %connection.id(), error = %e, "Command rejected");
        ServerMessage::from(&e)
    })
}

/// The `subscribed` reply is queued by the handler itself, ahead of any
/// event the subscription lets through.
fn subscribe(
    req: SubscribeRequest,
    connection: &Connection,
    subscribe_handler: &SubscribeSessionHandler,
) -> Result<(), SessionError> {
    let session_code = SessionCode::normalize(&req.session_code);

    let cmd = SubscribeSessionCommand {
        session_code: session_code.clone(),
        participant_id: ParticipantId::from(req.participant_id),
        connection: connection.clone(),
    };

    subscribe_handler.handle(cmd).map(|_| ()).map_err(|e| {
        tracing::warn!(
            session_code = %session_code,
            connection_id = %connection.id(),
            error = %e,
            "Subscription rejected"
        );
        e
    })
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Creates the router for the WebSocket endpoint.
pub fn websocket_routes(state: WebSocketState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}
