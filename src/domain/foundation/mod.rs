//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the planning poker domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{
    ParticipantId, SessionCode, PARTICIPANT_ID_LENGTH, SESSION_CODE_ALPHABET,
    SESSION_CODE_LENGTH,
};
pub use timestamp::Timestamp;
