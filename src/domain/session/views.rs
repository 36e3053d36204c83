//! Read models handed to callers and pushed to subscribers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{ParticipantId, SessionCode};

use super::{Participant, Scale};

/// Roster entry without timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub id: ParticipantId,
    pub name: String,
    pub is_host: bool,
}

impl From<&Participant> for ParticipantSummary {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id().clone(),
            name: p.name().to_string(),
            is_host: p.is_host(),
        }
    }
}

/// What a newly created or joined participant sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_code: SessionCode,
    pub participant_id: ParticipantId,
    pub scale: Scale,
    pub cards: Vec<String>,
    pub participants: Vec<ParticipantSummary>,
    pub revealed: bool,
}

/// Pre-reveal status: who has voted, never what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub participant_id: ParticipantId,
    pub name: String,
    pub is_host: bool,
    pub has_voted: bool,
}

/// A participant's vote after reveal; `value` is empty if they never voted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedVote {
    pub participant_id: ParticipantId,
    pub name: String,
    pub is_host: bool,
    pub value: String,
}

/// Statistics derived from the cast votes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteStats {
    pub min: Option<String>,
    pub max: Option<String>,
    pub average: Option<f64>,
    pub counts: BTreeMap<String, usize>,
    pub total_votes: usize,
}

/// Payload of a reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedVotes {
    pub votes: Vec<RevealedVote>,
    pub stats: VoteStats,
}
