//! RevealVotesHandler - Command handler for revealing a round's votes.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::SessionCode;
use crate::domain::session::{SessionError, SessionEvent};
use crate::ports::SessionEventPublisher;

/// Command to reveal all votes in a session.
#[derive(Debug, Clone)]
pub struct RevealVotesCommand {
    pub session_code: SessionCode,
}

/// Handler for revealing votes.
pub struct RevealVotesHandler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
}

impl RevealVotesHandler {
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// Flips the session to revealed and broadcasts every vote with its
    /// statistics. Revealing an already revealed session broadcasts the
    /// same result again.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    pub fn handle(&self, cmd: RevealVotesCommand) -> Result<(), SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;
        let mut session = shared.lock();

        let revealed = session.reveal()?;
        let total_votes = revealed.stats.total_votes;
        self.publisher
            .publish(session.code(), SessionEvent::VotesRevealed(revealed));

        tracing::info!(
            session_code = %session.code(),
            total_votes,
            "Votes revealed"
        );

        Ok(())
    }
}
