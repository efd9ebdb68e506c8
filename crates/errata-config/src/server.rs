use std::net::SocketAddr;

use serde::Deserialize;

/// Preview server configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind; `127.0.0.1:3000` when unset
    pub listen_address: Option<SocketAddr>,
    pub health: HealthConfig,
}

/// `[server.health]`, served at `/health` unless disabled
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_owned(),
        }
    }
}
