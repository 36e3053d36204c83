//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod session;

pub use session::{
    CastVoteCommand, CastVoteHandler, CreateSessionCommand, CreateSessionHandler,
    EndSessionCommand, EndSessionHandler, JoinSessionCommand, JoinSessionHandler,
    ResetVotesCommand, ResetVotesHandler, RevealVotesCommand, RevealVotesHandler,
};
