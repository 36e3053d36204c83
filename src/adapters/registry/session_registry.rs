//! In-memory session registry.
//!
//! The single owner of live sessions. Built once at process start and shared
//! as an `Arc` with every component that needs it.
//!
//! # Locking
//!
//! Sessions live in a sharded [`DashMap`], each behind its own mutex, so
//! unrelated sessions never contend. Callers lock a session only after the
//! registry lookup has returned; the registry itself takes a session lock
//! while holding a shard lock only during removal. No code path holds a
//! session lock while calling back into the registry.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::domain::foundation::{SessionCode, Timestamp, ValidationError};
use crate::domain::session::{Participant, Scale, Session, SessionError};

/// Handle to a live session. Lock it for the duration of one operation.
pub type SharedSession = Arc<Mutex<Session>>;

/// A session found idle by an inactivity scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleSession {
    pub code: SessionCode,
    pub last_activity_at: Timestamp,
}

/// Concurrent directory of live sessions keyed by code.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionCode, SharedSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create a session with `host_name` as host and register it under a
    /// fresh code.
    ///
    /// Code collisions are resolved by generating a new code; two sessions
    /// are never registered under the same code.
    ///
    /// # Errors
    ///
    /// - `EmptyField("hostName")` if the host name is blank
    pub fn create(&self, scale: Scale, host_name: &str) -> Result<SharedSession, ValidationError> {
        let host = Participant::host(host_name)?;

        loop {
            let code = SessionCode::generate();
            match self.sessions.entry(code) {
                Entry::Occupied(occupied) => {
                    tracing::debug!(session_code = %occupied.key(), "Session code collision, regenerating");
                }
                Entry::Vacant(vacant) => {
                    let session = Session::new(vacant.key().clone(), scale, host);
                    let shared = Arc::new(Mutex::new(session));
                    vacant.insert(Arc::clone(&shared));
                    return Ok(shared);
                }
            }
        }
    }

    /// Look up a live session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session is registered under `code`
    pub fn get(&self, code: &SessionCode) -> Result<SharedSession, SessionError> {
        self.sessions
            .get(code)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| SessionError::not_found(code))
    }

    /// Remove a session. Returns whether it existed; calling twice is safe.
    ///
    /// The removed session is closed, so holders of a stale handle get
    /// `NotFound` from every operation.
    pub fn remove(&self, code: &SessionCode) -> bool {
        self.sessions
            .remove_if(code, |_, session| {
                session.lock().close();
                true
            })
            .is_some()
    }

    /// Remove a session only if it is still idle relative to `cutoff`.
    ///
    /// Checked under the session lock, so activity that lands between an
    /// inactivity scan and this call keeps the session alive.
    pub fn remove_if_inactive(&self, code: &SessionCode, cutoff: &Timestamp) -> bool {
        self.sessions
            .remove_if(code, |_, session| {
                let mut session = session.lock();
                if session.is_inactive_since(cutoff) {
                    session.close();
                    true
                } else {
                    false
                }
            })
            .is_some()
    }

    /// Every session whose last activity is strictly older than
    /// `now - threshold`.
    pub fn list_inactive_since(&self, threshold: Duration) -> Vec<IdleSession> {
        let cutoff = Timestamp::now().minus(threshold);
        self.list_inactive_before(&cutoff)
    }

    /// Every session whose last activity is strictly before `cutoff`.
    pub fn list_inactive_before(&self, cutoff: &Timestamp) -> Vec<IdleSession> {
        // Snapshot handles first so no shard lock is held while locking sessions.
        let handles: Vec<SharedSession> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        handles
            .iter()
            .filter_map(|handle| {
                let session = handle.lock();
                if !session.is_closed() && session.is_inactive_since(cutoff) {
                    Some(IdleSession {
                        code: session.code().clone(),
                        last_activity_at: *session.last_activity_at(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// Number of live sessions.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}
