//! Session command handlers.

mod cast_vote;
mod create_session;
mod end_session;
mod join_session;
mod reset_votes;
mod reveal_votes;

#[cfg(test)]
pub(crate) mod test_support;

pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use end_session::{EndSessionCommand, EndSessionHandler};
pub use join_session::{JoinSessionCommand, JoinSessionHandler};
pub use reset_votes::{ResetVotesCommand, ResetVotesHandler};
pub use reveal_votes::{RevealVotesCommand, RevealVotesHandler};
