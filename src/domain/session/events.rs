//! State-change events pushed to a session's subscribers.
//!
//! Serialized adjacently tagged so clients can switch on `name` and read
//! `payload`:
//!
//! ```json
//! {"name": "VotingStatusUpdated", "payload": [{"participantId": "...", "hasVoted": true, ...}]}
//! {"name": "VotesReset"}
//! ```

use serde::{Deserialize, Serialize};

use super::{ParticipantSummary, RevealedVotes, VoteStatus};

/// Everything a subscriber can be told about a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum SessionEvent {
    /// Roster changed, ordered by join time.
    ParticipantsUpdated(Vec<ParticipantSummary>),

    /// Someone voted or votes were cleared. Never carries vote values.
    VotingStatusUpdated(Vec<VoteStatus>),

    /// Votes and statistics are now visible to everyone.
    VotesRevealed(RevealedVotes),

    /// A new round started.
    VotesReset,

    /// The host ended the session.
    SessionEnded,
}

impl SessionEvent {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ParticipantsUpdated(_) => "ParticipantsUpdated",
            SessionEvent::VotingStatusUpdated(_) => "VotingStatusUpdated",
            SessionEvent::VotesRevealed(_) => "VotesRevealed",
            SessionEvent::VotesReset => "VotesReset",
            SessionEvent::SessionEnded => "SessionEnded",
        }
    }
}
