//! EndSessionHandler - Command handler for ending a session.

use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::SessionCode;
use crate::domain::session::{SessionError, SessionEvent};
use crate::ports::SessionEventPublisher;

/// Command to end a session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_code: SessionCode,
}

/// Handler for ending sessions.
pub struct EndSessionHandler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
}

impl EndSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self {
            registry,
            publisher,
        }
    }

    /// Broadcasts `SessionEnded`, drops the session's subscribers, and
    /// removes the session. The code is unknown afterwards.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist or was already ended
    pub fn handle(&self, cmd: EndSessionCommand) -> Result<(), SessionError> {
        let shared = self.registry.get(&cmd.session_code)?;

        {
            let mut session = shared.lock();
            session.end()?;
            self.publisher.publish(session.code(), SessionEvent::SessionEnded);
            self.publisher.close_session(session.code());
        }

        // The session lock must be released before touching the registry.
        self.registry.remove(&cmd.session_code);

        tracing::info!(session_code = %cmd.session_code, "Session ended");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{registry_with_session, RecordingPublisher};
    use super::*;

    #[test]
    fn end_broadcasts_and_removes_session() {
        let (registry, code, _) = registry_with_session();
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = EndSessionHandler::new(Arc::clone(&registry), publisher.clone());

        handler
            .handle(EndSessionCommand {
                session_code: code.clone(),
            })
            .unwrap();

        assert_eq!(publisher.event_names(), vec!["SessionEnded"]);
        assert_eq!(publisher.closed(), vec![code.clone()]);
        assert!(registry.get(&code).unwrap_err().is_not_found());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn ending_twice_is_not_found() {
        let (registry, code, _) = registry_with_session();
        let publisher = Arc::new(RecordingPublisher::default());
        let handler = EndSessionHandler::new(registry, publisher.clone());
        let cmd = EndSessionCommand { session_code: code };

        handler.handle(cmd.clone()).unwrap();
        let err = handler.handle(cmd).unwrap_err();

        assert!(matches!(err, SessionError::NotFound(_)));
        assert_eq!(publisher.event_names(), vec!["SessionEnded"]);
    }

    #[test]
    fn stale_handle_sees_ended_session_as_not_found() {
        let (registry, code, host_id) = registry_with_session();
        let stale = registry.get(&code).unwrap();
        let handler = EndSessionHandler::new(
            Arc::clone(&registry),
            Arc::new(RecordingPublisher::default()),
        );

        handler
            .handle(EndSessionCommand {
                session_code: code,
            })
            .unwrap();

        assert!(stale.lock().vote(&host_id, "1").unwrap_err().is_not_found());
    }
}
