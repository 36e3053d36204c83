//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PLANNING_POKER` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use planning_poker::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod broadcast;
mod cleanup;
mod error;
mod server;

pub use broadcast::BroadcastConfig;
pub use cleanup::CleanupConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Idle-session expiry
    #[serde(default)]
    pub cleanup: CleanupConfig,

    /// Live-update fan-out
    #[serde(default)]
    pub broadcast: BroadcastConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PLANNING_POKER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PLANNING_POKER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PLANNING_POKER__CLEANUP__SESSION_TIMEOUT_SECS=7200` -> `cleanup.session_timeout_secs = 7200`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PLANNING_POKER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero port, an unparseable bind
    /// address, or a zero interval, timeout, or buffer size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.cleanup.validate()?;
        self.broadcast.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PLANNING_POKER__SERVER__PORT",
        "PLANNING_POKER__SERVER__ENVIRONMENT",
        "PLANNING_POKER__SERVER__CORS_ORIGINS",
        "PLANNING_POKER__CLEANUP__INTERVAL_SECS",
        "PLANNING_POKER__CLEANUP__SESSION_TIMEOUT_SECS",
        "PLANNING_POKER__BROADCAST__CONNECTION_BUFFER",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.cleanup.interval_secs, 600);
        assert_eq!(config.cleanup.session_timeout_secs, 7200);
        assert_eq!(config.broadcast.connection_buffer, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__SERVER__PORT", "3000");
        env::set_var("PLANNING_POKER__CLEANUP__INTERVAL_SECS", "30");
        env::set_var("PLANNING_POKER__CLEANUP__SESSION_TIMEOUT_SECS", "900");
        env::set_var("PLANNING_POKER__BROADCAST__CONNECTION_BUFFER", "16");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.cleanup.interval_secs, 30);
        assert_eq!(config.cleanup.session_timeout_secs, 900);
        assert_eq!(config.broadcast.connection_buffer, 16);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__CLEANUP__SESSION_TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSessionTimeout)
        );
    }

    #[test]
    fn test_unparseable_value_is_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PLANNING_POKER__SERVER__PORT", "not-a-port");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
