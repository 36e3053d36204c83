//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::registry::SessionRegistry;
use crate::application::{
    CastVoteCommand, CastVoteHandler, CreateSessionCommand, CreateSessionHandler,
    EndSessionCommand, EndSessionHandler, JoinSessionCommand, JoinSessionHandler,
    ResetVotesCommand, ResetVotesHandler, RevealVotesCommand, RevealVotesHandler,
};
use crate::domain::foundation::{ParticipantId, SessionCode};
use crate::domain::session::SessionError;
use crate::ports::SessionEventPublisher;

use super::dto::{
    CreateSessionRequest, ErrorResponse, JoinSessionRequest, SuccessResponse, VoteRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    create_handler: Arc<CreateSessionHandler>,
    join_handler: Arc<JoinSessionHandler>,
    vote_handler: Arc<CastVoteHandler>,
    reveal_handler: Arc<RevealVotesHandler>,
    reset_handler: Arc<ResetVotesHandler>,
    end_handler: Arc<EndSessionHandler>,
}

impl SessionHandlers {
    /// Wire every session command handler to one registry and publisher.
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            create_handler: Arc::new(CreateSessionHandler::new(Arc::clone(&registry))),
            join_handler: Arc::new(JoinSessionHandler::new(
                Arc::clone(&registry),
                Arc::clone(&publisher),
            )),
            vote_handler: Arc::new(CastVoteHandler::new(
                Arc::clone(&registry),
                Arc::clone(&publisher),
            )),
            reveal_handler: Arc::new(RevealVotesHandler::new(
                Arc::clone(&registry),
                Arc::clone(&publisher),
            )),
            reset_handler: Arc::new(ResetVotesHandler::new(
                Arc::clone(&registry),
                Arc::clone(&publisher),
            )),
            end_handler: Arc::new(EndSessionHandler::new(registry, publisher)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(handlers): State<SessionHandlers>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    let cmd = CreateSessionCommand {
        scale: req.scale,
        host_name: req.host_name,
    };

    match handlers.create_handler.handle(cmd) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:code/join - Join an existing session
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
    Json(req): Json<JoinSessionRequest>,
) -> Response {
    let cmd = JoinSessionCommand {
        session_code: SessionCode::normalize(&code),
        name: req.name,
    };

    match handlers.join_handler.handle(cmd) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:code/vote - Cast or change a vote
pub async fn cast_vote(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
    Json(req): Json<VoteRequest>,
) -> Response {
    let cmd = CastVoteCommand {
        session_code: SessionCode::normalize(&code),
        participant_id: ParticipantId::from(req.participant_id),
        value: req.value,
    };

    command_response(handlers.vote_handler.handle(cmd))
}

/// POST /api/sessions/:code/reveal - Reveal all votes
pub async fn reveal_votes(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
) -> Response {
    let cmd = RevealVotesCommand {
        session_code: SessionCode::normalize(&code),
    };

    command_response(handlers.reveal_handler.handle(cmd))
}

/// POST /api/sessions/:code/reset - Start a new round
pub async fn reset_votes(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
) -> Response {
    let cmd = ResetVotesCommand {
        session_code: SessionCode::normalize(&code),
    };

    command_response(handlers.reset_handler.handle(cmd))
}

/// POST /api/sessions/:code/end - End the session
pub async fn end_session(
    State(handlers): State<SessionHandlers>,
    Path(code): Path<String>,
) -> Response {
    let cmd = EndSessionCommand {
        session_code: SessionCode::normalize(&code),
    };

    command_response(handlers.end_handler.handle(cmd))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn command_response(result: Result<(), SessionError>) -> Response {
    match result {
        Ok(()) => (StatusCode::OK, Json(SuccessResponse::ok())).into_response(),
        Err(e) => handle_session_error(e),
    }
}

fn handle_session_error(error: SessionError) -> Response {
    let status = match &error {
        SessionError::NotFound(_) | SessionError::ParticipantNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::InvalidState(_)
        | SessionError::DuplicateParticipant(_)
        | SessionError::Validation(_) => StatusCode::BAD_REQUEST,
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
