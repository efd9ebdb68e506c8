#![allow(clippy::must_use_candidate)]

mod env;
pub mod errors;
mod loader;
pub mod server;
pub mod telemetry;
pub mod validation;

use indexmap::IndexMap;
use serde::Deserialize;

pub use errors::ErrorConfig;
pub use server::{HealthConfig, ServerConfig};
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
pub use validation::ValidationConfig;

/// Top-level errata configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Preview server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Acceptance rules applied to every error template
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Error table: sentinel name to status and message, in declaration order
    #[serde(default)]
    pub errors: IndexMap<String, ErrorConfig>,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
