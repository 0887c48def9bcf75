#![allow(clippy::must_use_candidate)]

pub mod cors;
mod duration;
mod env;
pub mod forwarder;
pub mod health;
mod loader;
pub mod server;
pub mod telemetry;
pub mod upstream;

use serde::Deserialize;

pub use cors::*;
pub use forwarder::*;
pub use health::*;
pub use server::*;
pub use telemetry::*;
pub use upstream::*;

/// Top-level Tutor configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream chat-completion endpoint
    pub upstream: UpstreamConfig,
    /// Retry, backoff and model fallback policy
    #[serde(default)]
    pub forwarder: ForwarderConfig,
    /// Logging and OTLP export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
