//! Test doubles shared by the handler tests.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::{ParticipantId, SessionCode};
use crate::domain::session::{Participant, Scale, SessionEvent};
use crate::ports::SessionEventPublisher;

/// Records every published event in order.
#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(SessionCode, SessionEvent)>>,
    closed: Mutex<Vec<SessionCode>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.published.lock().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.published.lock().iter().map(|(_, e)| e.name()).collect()
    }

    pub fn closed(&self) -> Vec<SessionCode> {
        self.closed.lock().clone()
    }
}

impl SessionEventPublisher for RecordingPublisher {
    fn publish(&self, code: &SessionCode, event: SessionEvent) {
        self.published.lock().push((code.clone(), event));
    }

    fn close_session(&self, code: &SessionCode) {
        self.closed.lock().push(code.clone());
    }
}

/// A registry holding one fibonacci session, plus its code and host id.
pub fn registry_with_session() -> (Arc<SessionRegistry>, SessionCode, ParticipantId) {
    let registry = Arc::new(SessionRegistry::new());
    let shared = registry.create(Scale::Fibonacci, "Host").unwrap();
    let (code, host_id) = {
        let session = shared.lock();
        (session.code().clone(), session.host_id().clone())
    };
    (registry, code, host_id)
}

/// Adds a guest directly to the registry's session.
pub fn add_guest(registry: &SessionRegistry, code: &SessionCode, name: &str) -> ParticipantId {
    let guest = Participant::guest(name).unwrap();
    let id = guest.id().clone();
    registry.get(code).unwrap().lock().join(guest).unwrap();
    id
}
