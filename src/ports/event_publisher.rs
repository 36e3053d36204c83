//! SessionEventPublisher port - Interface for pushing session events.
//!
//! Command handlers publish through this port without knowing how events
//! reach clients (WebSocket fan-out in production, a recorder in tests).

use crate::domain::foundation::SessionCode;
use crate::domain::session::SessionEvent;

/// Port for fanning out session events to subscribers.
///
/// Implementations must ensure:
/// - `publish` never blocks; it is called while the session's lock is held
/// - events for one session reach each subscriber in call order
/// - delivery is best-effort: absent subscribers simply miss the event
///
/// # Example
///
/// ```ignore
/// publisher.publish(session.code(), SessionEvent::VotesReset);
/// ```
pub trait SessionEventPublisher: Send + Sync {
    /// Deliver `event` to every current subscriber of `code`.
    fn publish(&self, code: &SessionCode, event: SessionEvent);

    /// Forget every subscriber of `code`. Called after `SessionEnded`.
    fn close_session(&self, code: &SessionCode);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SessionEventPublisher) {}

    #[test]
    fn event_publisher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionEventPublisher>();
    }
}
