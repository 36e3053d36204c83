//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ParticipantId, SessionCode, ValidationError};

/// Errors raised by session operations.
///
/// An expired session and one that never existed both surface as
/// `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No live session with this code.
    #[error("Session not found: {0}")]
    NotFound(SessionCode),

    /// The participant is not on the session's roster.
    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// The operation is not allowed in the current phase.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A participant with the same id is already on the roster.
    #[error("Participant already in session: {0}")]
    DuplicateParticipant(ParticipantId),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SessionError {
    pub fn not_found(code: &SessionCode) -> Self {
        SessionError::NotFound(code.clone())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::ParticipantNotFound(_) => ErrorCode::ParticipantNotFound,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::DuplicateParticipant(_) => ErrorCode::DuplicateParticipant,
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }

    /// True for both unknown sessions and unknown participants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SessionError::NotFound(_) | SessionError::ParticipantNotFound(_)
        )
    }
}
