//! ResetVotesHandler - Command handler for starting a new round.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::SessionCode;
use crate::domain::session::{SessionError, SessionEvent};
use crate::ports::SessionEventPublisher;

/// Command to clear all votes in a session.
#[derive(Debug, Clone)]
pub struct ResetVotesCommand {
    pub session_code: SessionCode,
}

/// Handler for resetting votes.
pub struct ResetVotesHandler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
}

impl ResetVotesHandler {
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// Clears votes, returns to voting, and broadcasts `VotesReset`
    /// followed by the fresh voting status.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    pub fn handle(&self, cmd: ResetVotesCommand) -> Result<(), SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;
        let mut session = shared.lock();

        session.reset()?;
        self.publisher.publish(session.code(), SessionEvent::VotesReset);
        self.publisher.publish(
            session.code(),
            SessionEvent::VotingStatusUpdated(session.voting_status()),
        );

        tracing::info!(session_code = %session.code(), "Votes reset");

        Ok(())
    }
}
