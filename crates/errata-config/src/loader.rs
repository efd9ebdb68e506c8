use std::path::Path;

use anyhow::Context;
use http::StatusCode;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config = Self::parse(&raw)?;

        tracing::debug!(path = %path.display(), errors = config.errors.len(), "configuration loaded");

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).context("config variable expansion failed")?;

        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Range checks against `[validation]` are left to the registry, which
    /// applies them when the error table is built.
    ///
    /// # Errors
    ///
    /// Returns an error if a status code is not a valid HTTP status, a
    /// message or name is empty, or the validation range is inverted
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_range()?;
        self.validate_errors()?;
        self.validate_health()?;
        Ok(())
    }

    fn validate_range(&self) -> anyhow::Result<()> {
        let validation = &self.validation;

        for bound in [validation.min_status, validation.max_status] {
            StatusCode::from_u16(bound)
                .map_err(|_| anyhow::anyhow!("validation bound {bound} is not a valid HTTP status code"))?;
        }

        if validation.min_status > validation.max_status {
            anyhow::bail!(
                "validation min_status ({}) must not exceed max_status ({})",
                validation.min_status,
                validation.max_status
            );
        }

        Ok(())
    }

    fn validate_errors(&self) -> anyhow::Result<()> {
        for (name, error) in &self.errors {
            if name.trim().is_empty() {
                anyhow::bail!("error names must not be empty");
            }

            StatusCode::from_u16(error.status)
                .map_err(|_| anyhow::anyhow!("error '{name}' has invalid status code {}", error.status))?;

            if error.message.trim().is_empty() {
                anyhow::bail!("error '{name}' must have a non-empty message");
            }
        }

        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("health path must start with '/': {}", health.path);
        }

        Ok(())
    }
}
