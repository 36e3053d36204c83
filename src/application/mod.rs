//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Every handler resolves a session through the registry, mutates it under
//! its lock, and publishes the resulting event before releasing the lock.

pub mod handlers;

pub use handlers::{
    CastVoteCommand, CastVoteHandler, CreateSessionCommand, CreateSessionHandler,
    EndSessionCommand, EndSessionHandler, JoinSessionCommand, JoinSessionHandler,
    ResetVotesCommand, ResetVotesHandler, RevealVotesCommand, RevealVotesHandler,
};
