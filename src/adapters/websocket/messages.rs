//! WebSocket message types for live session updates.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: connection status, subscription snapshot, session
//!   events, errors, pongs
//! - Client → Server: subscribe, session commands (vote, reveal, reset,
//!   end), ping

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantId, SessionCode, Timestamp};
use crate::domain::session::{
    ParticipantSummary, RevealedVotes, SessionError, SessionEvent, VoteStatus,
};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established successfully.
    Connected(ConnectedMessage),

    /// Subscription accepted, with the session's current state.
    Subscribed(SubscribedMessage),

    /// A session event.
    Event(EventMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

impl ServerMessage {
    pub fn connected(connection_id: impl ToString) -> Self {
        ServerMessage::Connected(ConnectedMessage {
            connection_id: connection_id.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn event(session_code: SessionCode, event: SessionEvent) -> Self {
        ServerMessage::Event(EventMessage {
            session_code,
            event,
        })
    }

    /// The session event carried by this message, if it is one.
    pub fn session_event(&self) -> Option<&SessionEvent> {
        match self {
            ServerMessage::Event(msg) => Some(&msg.event),
            _ => None,
        }
    }
}

impl From<&SessionError> for ServerMessage {
    fn from(err: &SessionError) -> Self {
        ServerMessage::error(err.code().to_string(), err.to_string())
    }
}

/// Sent once when the socket is accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub connection_id: String,
    pub timestamp: String,
}

/// Sent in reply to a successful `subscribe`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedMessage {
    pub session_code: SessionCode,
    pub participant_id: ParticipantId,
    pub snapshot: SessionSnapshot,
}

/// Current state of a session, so a (re)connecting client can render
/// without waiting for the next event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub participants: Vec<ParticipantSummary>,
    pub revealed: bool,
    pub voting_status: Vec<VoteStatus>,
    /// Present only once votes are revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_votes: Option<RevealedVotes>,
}

/// A session event addressed to the session it belongs to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    pub session_code: SessionCode,
    pub event: SessionEvent,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Join a session's live group.
    Subscribe(SubscribeRequest),

    CastVote(CastVoteRequest),
    RevealVotes(SessionRequest),
    ResetVotes(SessionRequest),
    EndSession(SessionRequest),

    /// Heartbeat request.
    Ping,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub session_code: String,
    pub participant_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub session_code: String,
    pub participant_id: String,
    pub value: String,
}

/// A command that only names the session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_code: String,
}
