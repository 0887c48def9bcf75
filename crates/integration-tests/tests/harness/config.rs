//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use tutor_config::{Config, CorsConfig, ForwarderConfig, HealthConfig, ServerConfig, TelemetryConfig, UpstreamConfig};

/// Builder for constructing test configurations
///
/// Starts with two models, `primary` then `backup`, and millisecond backoff
/// so retry sequences finish quickly.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal configuration pointed at a mock upstream
    pub fn new(base_url: &str) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                upstream: UpstreamConfig {
                    base_url: base_url.parse().expect("valid URL"),
                    api_key: Some(SecretString::from("test-key")),
                },
                forwarder: ForwarderConfig {
                    models: vec!["primary".to_owned(), "backup".to_owned()],
                    base_backoff: Duration::from_millis(10),
                    max_backoff: Duration::from_millis(40),
                    request_timeout: Duration::from_secs(2),
                    ..ForwarderConfig::default()
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Replace the model sequence
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.config.forwarder.models = models.iter().map(|m| (*m).to_owned()).collect();
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.config.forwarder.retries_per_model = retries;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.config.forwarder.request_timeout = timeout;
        self
    }

    pub fn with_total_timeout(mut self, timeout: Duration) -> Self {
        self.config.forwarder.total_timeout = Some(timeout);
        self
    }

    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.config.forwarder.system_prompt = Some(prompt.to_owned());
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Serve health checks on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
