//! CastVoteHandler - Command handler for recording a participant's vote.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::{ParticipantId, SessionCode};
use crate::domain::session::{SessionError, SessionEvent};
use crate::ports::SessionEventPublisher;

/// Command to cast or overwrite a vote.
///
/// The value is not checked against the session's card set.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub session_code: SessionCode,
    pub participant_id: ParticipantId,
    pub value: String,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
}

impl CastVoteHandler {
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// Records the vote and broadcasts who has voted, never what.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `ParticipantNotFound` if the participant is not in the session
    /// - `InvalidState` if votes are already revealed
    pub fn handle(&self, cmd: CastVoteCommand) -> Result<(), SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;
        let mut session = shared.lock();

        if let Err(err) = session.vote(&cmd.participant_id, cmd.value) {
            tracing::warn!(
                session_code = %cmd.session_code,
                participant_id = %cmd.participant_id,
                error = %err,
                "Vote rejected"
            );
            return Err(err);
        }

        self.publisher.publish(
            session.code(),
            SessionEvent::VotingStatusUpdated(session.voting_status()),
        );

        tracing::debug!(
            session_code = %session.code(),
            participant_id = %cmd.participant_id,
            "Vote cast"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_guest, registry_with_session, RecordingPublisher};
    use super::*;

    fn cmd(code: &SessionCode, id: &ParticipantId, value: &str) -> CastVoteCommand {
        CastVoteCommand {
            session_code: code.clone(),
            participant_id: id.clone(),
            value: value.to_string(),
        }
    }

    #[test]
    fn vote_broadcasts_status_without_values() {
        let (registry, code, host_id) = registry_with_session();
        let guest_id = add_guest(&registry, &code, "Bob");
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = CastVoteHandler::new(Arc::clone(&registry), publisher.clone());

        handler.handle(cmd(&code, &guest_id, "8")).unwrap();

        match publisher.events().as_slice() {
            [SessionEvent::VotingStatusUpdated(status)] => {
                assert_eq!(status.len(), 2);
                assert_eq!(status[0].participant_id, host_id);
                assert!(!status[0].has_voted);
                assert_eq!(status[1].participant_id, guest_id);
                assert!(status[1].has_voted);
            }
            other => panic!("unexpected events: {:?}", other),
        }
        let json = serde_json::to_string(&publisher.events()[0]).unwrap();
        assert!(!json.contains("\"8\""));
    }

    #[test]
    fn second_vote_overwrites_first() {
        let (registry, code, host_id) = registry_with_session();
        let handler = CastVoteHandler::new(
            Arc::clone(&registry),
            Arc::new(RecordingPublisher::default()),
        );

        handler.handle(cmd(&code, &host_id, "3")).unwrap();
        handler.handle(cmd(&code, &host_id, "13")).unwrap();

        let shared = registry.get(&code).unwrap();
        let session = shared.lock();
        assert_eq!(session.votes().len(), 1);
        assert_eq!(session.votes().get(&host_id).map(String::as_str), Some("13"));
    }

    #[test]
    fn values_outside_the_card_set_are_accepted() {
        let (registry, code, host_id) = registry_with_session();
        let handler =
            CastVoteHandler::new(registry, Arc::new(RecordingPublisher::default()));

        assert!(handler.handle(cmd(&code, &host_id, "banana")).is_ok());
    }

    #[test]
    fn vote_after_reveal_is_rejected_without_side_effects() {
        let (registry, code, host_id) = registry_with_session();
        registry.get(&code).unwrap().lock().reveal().unwrap();
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = CastVoteHandler::new(Arc::clone(&registry), publisher.clone());

        let err = handler.handle(cmd(&code, &host_id, "5")).unwrap_err();

        assert!(matches!(err, SessionError::InvalidState(_)));
        assert!(registry.get(&code).unwrap().lock().votes().is_empty());
        assert!(publisher.events().is_empty());
    }

    #[test]
    fn unknown_participant_is_not_found() {
        let (registry, code, _) = registry_with_session();
        let handler =
            CastVoteHandler::new(registry, Arc::new(RecordingPublisher::default()));

        let err = handler
            .handle(cmd(&code, &ParticipantId::from("000000000000"), "5"))
            .unwrap_err();

        assert!(matches!(err, SessionError::ParticipantNotFound(_)));
    }

    #[test]
    fn unknown_session_is_not_found() {
        let (registry, _, host_id) = registry_with_session();
        let handler =
            CastVoteHandler::new(registry, Arc::new(RecordingPublisher::default()));

        let err = handler
            .handle(cmd(&SessionCode::normalize("XXXXXX"), &host_id, "5"))
            .unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
