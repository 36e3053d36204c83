//! HTTP listener settings.

use serde::Deserialize;
use std::net::SocketAddr;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Comma-separated browser origins. Unset or empty allows any origin.
    pub cors_origins: Option<String>,
}

/// Deployment flavour. Production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl ServerConfig {
    /// Address to bind. `host` must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(addr))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Configured origins with blanks dropped.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,planning_poker=debug,tower_http=info".to_string(),
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_origins(raw: &str) -> ServerConfig {
        ServerConfig {
            cors_origins: Some(raw.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn loopback_host_binds() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn hostname_is_not_a_bind_address() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress("localhost:8080".to_string()))
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn origins_skip_blank_entries() {
        let origins = with_origins(" http://localhost:5173 ,, http://poker.test,").allowed_origins();
        assert_eq!(origins, vec!["http://localhost:5173", "http://poker.test"]);
    }

    #[test]
    fn blank_origins_mean_any_origin() {
        assert!(with_origins(" , ").allowed_origins().is_empty());
        assert!(ServerConfig::default().allowed_origins().is_empty());
    }
}
