use std::path::Path;

use crate::{Allowed, Config};

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
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_forwarder()?;
        self.validate_server()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_forwarder(&self) -> anyhow::Result<()> {
        let forwarder = &self.forwarder;

        if forwarder.models.is_empty() {
            anyhow::bail!("forwarder.models must name at least one model");
        }

        if let Some(blank) = forwarder.models.iter().position(|m| m.trim().is_empty()) {
            anyhow::bail!("forwarder.models[{blank}] must not be empty");
        }

        if forwarder.retries_per_model == 0 {
            anyhow::bail!("forwarder.retries_per_model must be at least 1");
        }

        if forwarder.base_backoff > forwarder.max_backoff {
            anyhow::bail!("forwarder.base_backoff must not exceed forwarder.max_backoff");
        }

        if forwarder.request_timeout.is_zero() {
            anyhow::bail!("forwarder.request_timeout must be greater than zero");
        }

        if forwarder.total_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("forwarder.total_timeout must be greater than zero when set");
        }

        if forwarder.default_max_tokens == 0 {
            anyhow::bail!("forwarder.default_max_tokens must be at least 1");
        }

        if !(0.0..=2.0).contains(&forwarder.default_temperature) {
            anyhow::bail!("forwarder.default_temperature must be between 0 and 2");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        if let Some(cors) = &self.server.cors
            && cors.credentials
            && cors.origins == Allowed::Any
        {
            anyhow::bail!("server.cors.credentials cannot be combined with wildcard origins");
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.telemetry.sampling_rate) {
            anyhow::bail!("telemetry.sampling_rate must be between 0 and 1");
        }
        Ok(())
    }
}
