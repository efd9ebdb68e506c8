//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use errata_config::{Config, ErrorConfig, HealthConfig, ServerConfig, ValidationConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with an empty error table and default validation
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                ..Config::default()
            },
        }
    }

    /// Register an error template under `name`
    pub fn with_error(mut self, name: &str, status: u16, message: &str) -> Self {
        self.config.errors.insert(
            name.to_owned(),
            ErrorConfig {
                status,
                message: message.to_owned(),
            },
        );
        self
    }

    /// Turn off the status range check
    pub fn without_validation(mut self) -> Self {
        self.config.validation = ValidationConfig {
            enabled: false,
            ..ValidationConfig::default()
        };
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
