//! Broadcast coordinator for session-based event fan-out.
//!
//! Groups are organized by session code, allowing targeted delivery of
//! session events to every connection subscribed to that session.
//!
//! # Architecture
//!
//! ```text
//! Group: K7M2QX        Group: 9HPWZA
//! ├── conn-a           ├── conn-d
//! ├── conn-b           └── conn-e
//! └── conn-c
//! ```
//!
//! Each connection owns one bounded FIFO drained by its socket writer.
//! Session events and direct replies share that queue, so a client sees
//! them in the order they were queued. Publishing never waits: a
//! connection whose queue is full is evicted and must re-subscribe.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::foundation::SessionCode;
use crate::domain::session::SessionEvent;
use crate::ports::SessionEventPublisher;

use super::messages::ServerMessage;

/// Unique identifier for a live client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of offering a message to a connection without waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// The queue was full. The connection has been told to shut down.
    Evicted,
    /// The writer is gone.
    Closed,
}

/// Sending half of a client connection's outbound queue.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    queue: mpsc::Sender<ServerMessage>,
    evicted: Arc<Notify>,
}

impl Connection {
    /// Open a connection with room for `buffer` pending messages.
    ///
    /// The [`Outbound`] half is drained by whoever writes to the client.
    /// Dropping it marks the connection closed; the coordinator prunes it
    /// on the next publish.
    pub fn open(buffer: usize) -> (Self, Outbound) {
        let (queue, rx) = mpsc::channel(buffer.max(1));
        let evicted = Arc::new(Notify::new());
        (
            Self {
                id: ConnectionId::new(),
                queue,
                evicted: Arc::clone(&evicted),
            },
            Outbound { queue: rx, evicted },
        )
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }

    /// Queue `msg` without waiting. A full queue evicts the connection.
    pub fn offer(&self, msg: ServerMessage) -> Delivery {
        match self.queue.try_send(msg) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => {
                self.evicted.notify_one();
                Delivery::Evicted
            }
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }

    /// Queue a direct reply, waiting for room. Returns false once the
    /// writer is gone.
    pub async fn reply(&self, msg: ServerMessage) -> bool {
        self.queue.send(msg).await.is_ok()
    }
}

/// Receiving half of a connection's queue.
#[derive(Debug)]
pub struct Outbound {
    queue: mpsc::Receiver<ServerMessage>,
    evicted: Arc<Notify>,
}

impl Outbound {
    /// Next queued message, or `None` once the connection was evicted or
    /// every sender is gone. Messages still queued at eviction are dropped.
    pub async fn recv(&mut self) -> Option<ServerMessage> {
        tokio::select! {
            biased;
            _ = self.evicted.notified() => None,
            msg = self.queue.recv() => msg,
        }
    }

    /// Take a queued message without waiting.
    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.queue.try_recv().ok()
    }
}

/// Tracks which connections belong to which session and fans events out.
///
/// # Thread Safety
///
/// Both maps are sharded, and no method holds a guard on one map while
/// locking the other. Publishing only takes a read guard on one group, so
/// it is safe to call while a session's lock is held.
#[derive(Debug, Default)]
pub struct BroadcastCoordinator {
    /// session code → subscribed connections.
    groups: DashMap<SessionCode, HashMap<ConnectionId, Connection>>,

    /// connection → sessions it is subscribed to, for O(1) cleanup on
    /// disconnect.
    memberships: DashMap<ConnectionId, HashSet<SessionCode>>,
}

impl BroadcastCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to the group for `code`. Subscribing twice is a
    /// no-op.
    pub fn subscribe(&self, code: &SessionCode, connection: Connection) {
        let id = connection.id();
        self.groups
            .entry(code.clone())
            .or_default()
            .insert(id, connection);
        self.memberships.entry(id).or_default().insert(code.clone());

        tracing::debug!(
            session_code = %code,
            connection_id = %id,
            "Connection subscribed"
        );
    }

    /// Remove a connection from every group it belongs to. Empty groups are
    /// dropped.
    pub fn unsubscribe(&self, id: &ConnectionId) {
        let Some((_, codes)) = self.memberships.remove(id) else {
            return;
        };

        for code in codes {
            self.leave_group(&code, id);
        }

        tracing::debug!(connection_id = %id, "Connection unsubscribed");
    }

    /// Queue `event` for every connection subscribed to `code`.
    ///
    /// A connection that cannot take the event is dropped from every group:
    /// closed ones are pruned, full ones are evicted so the client
    /// reconnects rather than silently missing events.
    pub fn publish(&self, code: &SessionCode, event: SessionEvent) {
        let name = event.name();
        let message = ServerMessage::event(code.clone(), event);
        let mut dropped = Vec::new();

        {
            let Some(group) = self.groups.get(code) else {
                tracing::trace!(session_code = %code, event = name, "No subscribers");
                return;
            };

            for connection in group.values() {
                match connection.offer(message.clone()) {
                    Delivery::Queued => {}
                    Delivery::Evicted => {
                        tracing::warn!(
                            session_code = %code,
                            connection_id = %connection.id,
                            event = name,
                            "Connection queue full, evicting connection"
                        );
                        dropped.push(connection.id);
                    }
                    Delivery::Closed => {
                        tracing::debug!(
                            session_code = %code,
                            connection_id = %connection.id,
                            "Pruning closed connection"
                        );
                        dropped.push(connection.id);
                    }
                }
            }
        }

        for id in dropped {
            self.unsubscribe(&id);
        }
    }

    /// Forget every subscriber of `code`.
    pub fn close_group(&self, code: &SessionCode) {
        let Some((_, group)) = self.groups.remove(code) else {
            return;
        };

        for id in group.keys() {
            if let Some(mut codes) = self.memberships.get_mut(id) {
                codes.remove(code);
            }
            self.memberships.remove_if(id, |_, codes| codes.is_empty());
        }

        tracing::debug!(session_code = %code, connections = group.len(), "Group closed");
    }

    /// Number of connections subscribed to `code`.
    pub fn subscriber_count(&self, code: &SessionCode) -> usize {
        self.groups.get(code).map(|g| g.len()).unwrap_or(0)
    }

    /// Codes of every session with at least one subscriber.
    pub fn active_groups(&self) -> Vec<SessionCode> {
        self.groups.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of connections subscribed to at least one session.
    pub fn total_connections(&self) -> usize {
        self.memberships.len()
    }

    fn leave_group(&self, code: &SessionCode, id: &ConnectionId) {
        if let Some(mut group) = self.groups.get_mut(code) {
            group.remove(id);
        }
        self.groups.remove_if(code, |_, group| group.is_empty());
    }
}

impl SessionEventPublisher for BroadcastCoordinator {
    fn publish(&self, code: &SessionCode, event: SessionEvent) {
        BroadcastCoordinator::publish(self, code, event);
    }

    fn close_session(&self, code: &SessionCode) {
        self.close_group(code);
    }
}
