//! Session aggregate: one estimation round.
//!
//! A session is either collecting hidden votes or showing them. Every
//! successful mutation refreshes `last_activity_at`, which the cleanup sweep
//! uses to expire idle sessions. Rejected operations leave the session
//! untouched.

use std::collections::HashMap;

use crate::domain::foundation::{ParticipantId, SessionCode, Timestamp};

use super::aggregator;
use super::{
    Participant, ParticipantSummary, RevealedVotes, Scale, SessionError, SessionView, VoteStatus,
};

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VotingPhase {
    /// Votes are being collected and stay hidden.
    #[default]
    Voting,
    /// Votes are visible; no more voting until reset.
    Revealed,
}

/// Session aggregate.
///
/// # Invariants
///
/// - every key in `votes` is a key in `participants`
/// - exactly one participant is the host
/// - `reset` always empties `votes` and returns to `Voting`
/// - once closed, every operation fails with `NotFound`
#[derive(Debug, Clone)]
pub struct Session {
    code: SessionCode,
    scale: Scale,
    host_id: ParticipantId,
    participants: HashMap<ParticipantId, Participant>,
    votes: HashMap<ParticipantId, String>,
    phase: VotingPhase,
    closed: bool,
    created_at: Timestamp,
    last_activity_at: Timestamp,
}

impl Session {
    /// Create a session in the voting phase with its host as sole participant.
    ///
    /// `host` is expected to come from [`Participant::host`].
    pub fn new(code: SessionCode, scale: Scale, host: Participant) -> Self {
        let now = Timestamp::now();
        let host_id = host.id().clone();
        let mut participants = HashMap::new();
        participants.insert(host_id.clone(), host);
        Self {
            code,
            scale,
            host_id,
            participants,
            votes: HashMap::new(),
            phase: VotingPhase::Voting,
            closed: false,
            created_at: now,
            last_activity_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn code(&self) -> &SessionCode {
        &self.code
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn phase(&self) -> VotingPhase {
        self.phase
    }

    pub fn is_revealed(&self) -> bool {
        self.phase == VotingPhase::Revealed
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn last_activity_at(&self) -> &Timestamp {
        &self.last_activity_at
    }

    /// Raw votes keyed by participant.
    pub fn votes(&self) -> &HashMap<ParticipantId, String> {
        &self.votes
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn host_id(&self) -> &ParticipantId {
        &self.host_id
    }

    /// The session's host.
    pub fn host(&self) -> Option<&Participant> {
        self.participants.get(&self.host_id)
    }

    /// Participants ordered by join time, ties broken by id.
    pub fn participants(&self) -> Vec<&Participant> {
        let mut roster: Vec<&Participant> = self.participants.values().collect();
        roster.sort_by(|a, b| {
            a.joined_at()
                .cmp(b.joined_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        roster
    }

    /// True if the last activity happened strictly before `cutoff`.
    pub fn is_inactive_since(&self, cutoff: &Timestamp) -> bool {
        self.last_activity_at.is_before(cutoff)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn roster(&self) -> Vec<ParticipantSummary> {
        self.participants().into_iter().map(Into::into).collect()
    }

    /// The view handed to `participant_id` after creating or joining.
    pub fn view_for(&self, participant_id: &ParticipantId) -> SessionView {
        SessionView {
            session_code: self.code.clone(),
            participant_id: participant_id.clone(),
            scale: self.scale,
            cards: self.scale.cards().iter().map(|c| c.to_string()).collect(),
            participants: self.roster(),
            revealed: self.is_revealed(),
        }
    }

    pub fn voting_status(&self) -> Vec<VoteStatus> {
        aggregator::voting_status(&self.votes, self.participants())
    }

    pub fn revealed_votes(&self) -> RevealedVotes {
        aggregator::reveal(&self.votes, self.participants())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a non-host participant. Allowed in either phase; votes and
    /// reveal status are kept.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is closed
    /// - `InvalidState` if the participant claims to be host
    /// - `DuplicateParticipant` on id collision
    pub fn join(&mut self, participant: Participant) -> Result<(), SessionError> {
        self.ensure_open()?;
        if participant.is_host() {
            return Err(SessionError::invalid_state("session already has a host"));
        }
        if self.participants.contains_key(participant.id()) {
            return Err(SessionError::DuplicateParticipant(participant.id().clone()));
        }
        self.participants.insert(participant.id().clone(), participant);
        self.touch_now();
        Ok(())
    }

    /// Record or overwrite a participant's vote.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is closed
    /// - `ParticipantNotFound` if the id is not on the roster
    /// - `InvalidState` if votes are revealed
    pub fn vote(
        &mut self,
        participant_id: &ParticipantId,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.ensure_open()?;
        if !self.participants.contains_key(participant_id) {
            return Err(SessionError::ParticipantNotFound(participant_id.clone()));
        }
        if self.is_revealed() {
            return Err(SessionError::invalid_state(
                "Cannot vote after votes are revealed",
            ));
        }
        self.votes.insert(participant_id.clone(), value.into());
        self.touch_now();
        Ok(())
    }

    /// Show all votes. Revealing twice recomputes the same result.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is closed
    pub fn reveal(&mut self) -> Result<RevealedVotes, SessionError> {
        self.ensure_open()?;
        self.phase = VotingPhase::Revealed;
        self.touch_now();
        Ok(self.revealed_votes())
    }

    /// Clear all votes and start a new round.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is closed
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.votes.clear();
        self.phase = VotingPhase::Voting;
        self.touch_now();
        Ok(())
    }

    /// Refresh the activity timestamp without changing state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session is closed
    pub fn touch(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.touch_now();
        Ok(())
    }

    /// End the session on the host's request.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session was already ended or expired
    pub fn end(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.close();
        Ok(())
    }

    /// Mark the session as gone. Idempotent.
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::not_found(&self.code));
        }
        Ok(())
    }

    fn touch_now(&mut self) {
        self.last_activity_at = Timestamp::now();
    }

    #[cfg(test)]
    pub(crate) fn set_last_activity(&mut self, at: Timestamp) {
        self.last_activity_at = at;
    }
}
