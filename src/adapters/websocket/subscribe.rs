//! SubscribeSessionHandler - Attaches a live connection to a session.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::{ParticipantId, SessionCode};
use crate::domain::session::{SessionError, SessionEvent};

use super::coordinator::{BroadcastCoordinator, Connection, Delivery};
use super::messages::{ServerMessage, SessionSnapshot, SubscribedMessage};

/// Command to subscribe a connection to a session's events.
#[derive(Debug, Clone)]
pub struct SubscribeSessionCommand {
    pub session_code: SessionCode,
    pub participant_id: ParticipantId,
    pub connection: Connection,
}

/// Handler for live subscriptions.
pub struct SubscribeSessionHandler {
    registry: Arc<SessionRegistry>,
    coordinator: Arc<BroadcastCoordinator>,
}

impl SubscribeSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>, coordinator: Arc<BroadcastCoordinator>) -> Self {
        Self {
            registry,
            coordinator,
        }
    }

    /// Adds the connection to the session's group, refreshes the session's
    /// activity, and tells the group the roster is live.
    ///
    /// The `subscribed` snapshot is queued on the connection and the
    /// connection joins the group under the session lock, so the client
    /// sees the snapshot first and then every later event, with no overlap
    /// and no gap. If the connection cannot take the snapshot it is not
    /// subscribed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist
    /// - `ParticipantNotFound` if the participant is not in the session
    pub fn handle(&self, cmd: SubscribeSessionCommand) -> Result<SessionSnapshot, SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;
        let mut session = shared.lock();

        if session.participant(&cmd.participant_id).is_none() {
            return Err(SessionError::ParticipantNotFound(cmd.participant_id));
        }
        session.touch()?;

        let snapshot = SessionSnapshot {
            participants: session.roster(),
            revealed: session.is_revealed(),
            voting_status: session.voting_status(),
            revealed_votes: session
                .is_revealed()
                .then(|| session.revealed_votes()),
        };
        let connection_id = cmd.connection.id();

        let subscribed = ServerMessage::Subscribed(SubscribedMessage {
            session_code: session.code().clone(),
            participant_id: cmd.participant_id.clone(),
            snapshot: snapshot.clone(),
        });
        let delivery = cmd.connection.offer(subscribed);
        if delivery != Delivery::Queued {
            tracing::debug!(
                session_code = %session.code(),
                connection_id = %connection_id,
                delivery = ?delivery,
                "Connection gone before subscribing"
            );
            return Ok(snapshot);
        }

        self.coordinator.subscribe(session.code(), cmd.connection);
        self.coordinator.publish(
            session.code(),
            SessionEvent::ParticipantsUpdated(session.roster()),
        );

        tracing::info!(
            session_code = %session.code(),
            participant_id = %cmd.participant_id,
            connection_id = %connection_id,
            "Participant subscribed to session"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::Scale;

    fn setup() -> (
        SubscribeSessionHandler,
        Arc<SessionRegistry>,
        Arc<BroadcastCoordinator>,
        SessionCode,
        ParticipantId,
    ) {
        let registry = Arc::new(SessionRegistry::new());
        let coordinator = Arc::new(BroadcastCoordinator::new());
        let shared = registry.create(Scale::Fibonacci, "Host").unwrap();
        let (code, host_id) = {
            let s = shared.lock();
            (s.code().clone(), s.host_id().clone())
        };
        let handler = SubscribeSessionHandler::new(Arc::clone(&registry), Arc::clone(&coordinator));
        (handler, registry, coordinator, code, host_id)
    }

    #[tokio::test]
    async fn subscribe_joins_group_and_broadcasts_roster() {
        let (handler, _registry, coordinator, code, host_id) = setup();
        let (conn, mut rx) = Connection::open(8);

        let snapshot = handler
            .handle(SubscribeSessionCommand {
                session_code: code.clone(),
                participant_id: host_id.clone(),
                connection: conn,
            })
            .unwrap();

        assert_eq!(coordinator.subscriber_count(&code), 1);
        assert_eq!(snapshot.participants.len(), 1);
        assert!(!snapshot.revealed);
        assert!(snapshot.revealed_votes.is_none());
        match rx.recv().await.unwrap() {
            ServerMessage::Subscribed(msg) => assert_eq!(msg.snapshot, snapshot),
            other => panic!("unexpected message: {:?}", other),
        }
        match rx.recv().await.unwrap().session_event() {
            Some(SessionEvent::ParticipantsUpdated(roster)) => assert_eq!(roster[0].id, host_id),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn snapshot_is_queued_before_later_events() {
        let (handler, registry, coordinator, code, host_id) = setup();
        let (conn, mut rx) = Connection::open(8);

        handler
            .handle(SubscribeSessionCommand {
                session_code: code.clone(),
                participant_id: host_id.clone(),
                connection: conn,
            })
            .unwrap();
        {
            let shared = registry.get(&code).unwrap();
            let mut session = shared.lock();
            session.reveal().unwrap();
            coordinator.publish(&code, SessionEvent::VotesRevealed(session.revealed_votes()));
        }

        match rx.recv().await.unwrap() {
            ServerMessage::Subscribed(msg) => assert!(!msg.snapshot.revealed),
            other => panic!("snapshot must come first, got {:?}", other),
        }
        let names: Vec<_> = [rx.recv().await.unwrap(), rx.recv().await.unwrap()]
            .iter()
            .map(|msg| msg.session_event().map(SessionEvent::name))
            .collect();
        assert_eq!(names, vec![Some("ParticipantsUpdated"), Some("VotesRevealed")]);
    }

    #[tokio::test]
    async fn full_connection_is_not_subscribed() {
        let (handler, _registry, coordinator, code, host_id) = setup();
        let (conn, _rx) = Connection::open(1);
        conn.offer(ServerMessage::pong());

        handler
            .handle(SubscribeSessionCommand {
                session_code: code.clone(),
                participant_id: host_id,
                connection: conn,
            })
            .unwrap();

        assert_eq!(coordinator.subscriber_count(&code), 0);
    }

    #[tokio::test]
    async fn snapshot_includes_revealed_votes_after_reveal() {
        let (handler, registry, _coordinator, code, host_id) = setup();
        {
            let shared = registry.get(&code).unwrap();
            let mut session = shared.lock();
            session.vote(&host_id, "8").unwrap();
            session.reveal().unwrap();
        }
        let (conn, _rx) = Connection::open(8);

        let snapshot = handler
            .handle(SubscribeSessionCommand {
                session_code: code,
                participant_id: host_id,
                connection: conn,
            })
            .unwrap();

        assert!(snapshot.revealed);
        let revealed = snapshot.revealed_votes.unwrap();
        assert_eq!(revealed.votes[0].value, "8");
    }

    #[tokio::test]
    async fn subscribe_refreshes_activity() {
        let (handler, registry, _coordinator, code, host_id) = setup();
        let shared = registry.get(&code).unwrap();
        let old = crate::domain::foundation::Timestamp::now()
            .minus(std::time::Duration::from_secs(3600));
        shared.lock().set_last_activity(old);
        let (conn, _rx) = Connection::open(8);

        handler
            .handle(SubscribeSessionCommand {
                session_code: code,
                participant_id: host_id,
                connection: conn,
            })
            .unwrap();

        assert!(old.is_before(shared.lock().last_activity_at()));
    }

    #[tokio::test]
    async fn unknown_participant_is_rejected() {
        let (handler, _registry, coordinator, code, _) = setup();
        let (conn, _rx) = Connection::open(8);

        let err = handler
            .handle(SubscribeSessionCommand {
                session_code: code.clone(),
                participant_id: ParticipantId::from("ffffffffffff"),
                connection: conn,
            })
            .unwrap_err();

        assert!(matches!(err, SessionError::ParticipantNotFound(_)));
        assert_eq!(coordinator.subscriber_count(&code), 0);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (handler, _registry, _coordinator, _code, host_id) = setup();
        let (conn, _rx) = Connection::open(8);

        let err = handler
            .handle(SubscribeSessionCommand {
                session_code: SessionCode::normalize("NNNNNN"),
                participant_id: host_id,
                connection: conn,
            })
            .unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
    }
}
