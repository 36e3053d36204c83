//! Live-update fan-out configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Broadcast configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// Events queued per connection before new ones are dropped
    #[serde(default = "default_connection_buffer")]
    pub connection_buffer: usize,
}

impl BroadcastConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.connection_buffer == 0 {
            return Err(ValidationError::InvalidConnectionBuffer);
        }
        Ok(())
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            connection_buffer: default_connection_buffer(),
        }
    }
}

fn default_connection_buffer() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_defaults() {
        assert_eq!(BroadcastConfig::default().connection_buffer, 64);
    }

    #[test]
    fn test_zero_buffer_is_invalid() {
        let config = BroadcastConfig {
            connection_buffer: 0,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidConnectionBuffer)
        );
    }
}
