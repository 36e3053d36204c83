//! JoinSessionHandler - Command handler for adding a participant.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::SessionCode;
use crate::domain::session::{Participant, SessionError, SessionEvent, SessionView};
use crate::ports::SessionEventPublisher;

/// Command to join an existing session.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_code: SessionCode,
    pub name: String,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
}

impl JoinSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// Adds a participant and returns their view. Joining a revealed
    /// session keeps it revealed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `Validation` if the name is blank
    pub fn handle(&self, cmd: JoinSessionCommand) -> Result<SessionView, SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;
        let participant = Participant::guest(&cmd.name)?;
        let participant_id = participant.id().clone();

        let mut session = shared.lock();
        session.join(participant)?;
        self.publisher.publish(
            session.code(),
            SessionEvent::ParticipantsUpdated(session.roster()),
        );

        tracing::info!(
            session_code = %session.code(),
            participant_id = %participant_id,
            "Participant joined session"
        );

        Ok(session.view_for(&participant_id))
    }
}
