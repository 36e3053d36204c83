//! CleanupScheduler - Background service that expires idle sessions.
//!
//! Wakes on a fixed interval and removes every session whose last activity
//! is older than the session timeout. Expired sessions simply disappear:
//! no `SessionEnded` is broadcast, their subscriber groups are dropped, and
//! their codes answer `NotFound`.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 10 min | Time between sweeps; the first sweep runs one interval after start |
//! | `session_timeout` | 2 h | Idle time after which a session expires |
//!
//! ## Graceful Shutdown
//!
//! The loop listens for a shutdown signal while waiting and stops at once.
//! A sweep already in progress finishes on its blocking thread.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::adapters::registry::SessionRegistry;
use crate::domain::foundation::{SessionCode, Timestamp};
use crate::ports::SessionEventPublisher;

/// Configuration for the CleanupScheduler service.
#[derive(Debug, Clone)]
pub struct CleanupSchedulerConfig {
    /// Time between sweeps.
    pub interval: Duration,

    /// Sessions idle for longer than this are removed.
    pub session_timeout: Duration,
}

impl Default for CleanupSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10 * 60),
            session_timeout: Duration::from_secs(2 * 60 * 60),
        }
    }
}

impl CleanupSchedulerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }
}

/// A sweep that did not complete.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("cleanup sweep aborted: {0}")]
    Aborted(#[from] JoinError),
}

/// Background service that removes idle sessions from the registry.
pub struct CleanupScheduler {
    registry: Arc<SessionRegistry>,
    publisher: Arc<dyn SessionEventPublisher>,
    config: CleanupSchedulerConfig,
}

impl CleanupScheduler {
    /// Create a scheduler with default configuration.
    pub fn new(registry: Arc<SessionRegistry>, publisher: Arc<dyn SessionEventPublisher>) -> Self {
        Self::with_config(registry, publisher, CleanupSchedulerConfig::default())
    }

    pub fn with_config(
        registry: Arc<SessionRegistry>,
        publisher: Arc<dyn SessionEventPublisher>,
        config: CleanupSchedulerConfig,
    ) -> Self {
        Self {
            registry,
            publisher,
            config,
        }
    }

    /// Run sweeps until the shutdown signal is received.
    ///
    /// A failed sweep is logged and the loop keeps going.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let period = self.config.interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = period.as_secs(),
            session_timeout_secs = self.config.session_timeout.as_secs(),
            "Session cleanup started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender counts as shutdown.
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Session cleanup stopped");
                        return;
                    }
                }

                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::error!(error = %e, "Session cleanup sweep failed");
                    }
                }
            }
        }
    }

    /// Run exactly one sweep on a blocking thread, then forget the expired
    /// sessions' subscribers. Returns the expired codes.
    pub async fn sweep_once(&self) -> Result<Vec<SessionCode>, CleanupError> {
        let registry = Arc::clone(&self.registry);
        let timeout = self.config.session_timeout;

        let removed =
            tokio::task::spawn_blocking(move || sweep_inactive(&registry, timeout)).await?;

        for code in &removed {
            self.publisher.close_session(code);
        }

        if removed.is_empty() {
            tracing::debug!(remaining = self.registry.count(), "No inactive sessions");
        } else {
            let codes: Vec<&str> = removed.iter().map(SessionCode::as_str).collect();
            tracing::info!(
                expired = removed.len(),
                codes = ?codes,
                remaining = self.registry.count(),
                "Expired inactive sessions"
            );
        }

        Ok(removed)
    }
}

/// Remove every session idle for longer than `timeout`. Returns the removed
/// codes.
///
/// Each candidate is re-checked under its own lock, so a session touched
/// after the scan survives.
pub fn sweep_inactive(registry: &SessionRegistry, timeout: Duration) -> Vec<SessionCode> {
    let cutoff = Timestamp::now().minus(timeout);

    registry
        .list_inactive_before(&cutoff)
        .into_iter()
        .filter(|idle| registry.remove_if_inactive(&idle.code, &cutoff))
        .map(|idle| idle.code)
        .collect()
}
