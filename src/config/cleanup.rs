//! Session expiry configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Idle-session cleanup configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    /// Seconds between cleanup sweeps
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Seconds of inactivity after which a session expires
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,
}

impl CleanupConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    /// Validate cleanup configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval_secs == 0 {
            return Err(ValidationError::InvalidCleanupInterval);
        }
        if self.session_timeout_secs == 0 {
            return Err(ValidationError::InvalidSessionTimeout);
        }
        Ok(())
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            session_timeout_secs: default_session_timeout_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    10 * 60
}

fn default_session_timeout_secs() -> u64 {
    2 * 60 * 60
}
