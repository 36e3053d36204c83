//! Session domain module.
//!
//! One planning poker round: the card scale, the roster, hidden votes, and
//! the reveal/reset cycle. Vote statistics are derived on demand by
//! [`aggregator`].
//!
//! # Events
//!
//! - `ParticipantsUpdated` - roster changed
//! - `VotingStatusUpdated` - someone voted, or votes were cleared
//! - `VotesRevealed` - votes and statistics became visible
//! - `VotesReset` - a new round started
//! - `SessionEnded` - the host ended the session

mod aggregate;
pub mod aggregator;
mod errors;
mod events;
mod participant;
mod scale;
mod views;

pub use aggregate::{Session, VotingPhase};
pub use errors::SessionError;
pub use events::SessionEvent;
pub use participant::Participant;
pub use scale::Scale;
pub use views::{
    ParticipantSummary, RevealedVote, RevealedVotes, SessionView, VoteStats, VoteStatus,
};
