//! Transport seam between the forwarder and the chat-completion provider

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tutor_config::UpstreamConfig;

use crate::error::ForwardError;
use crate::protocol::upstream::UpstreamRequest;

/// Raw reply from the provider, before classification
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: String,
}

/// The call failed before a complete reply was received
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Sends one chat-completion request
///
/// Implementations perform exactly one outbound call per invocation. Retry,
/// timeout and classification are the forwarder's job.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn send(&self, request: &UpstreamRequest<'_>) -> Result<UpstreamReply, TransportError>;
}

/// OpenAI-compatible HTTP transport
pub struct HttpUpstream {
    client: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpUpstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .user_agent(concat!("tutor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ForwardError::Setup(e.to_string()))?;

        let base = config.base_url.as_str().trim_end_matches('/');

        Ok(Self {
            client,
            endpoint: format!("{base}/chat/completions"),
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn send(&self, request: &UpstreamRequest<'_>) -> Result<UpstreamReply, TransportError> {
        let mut builder = self.client.post(&self.endpoint).json(request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(model = request.model, error = %e, "upstream request failed");
            TransportError::Request(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(UpstreamReply { status, body })
    }
}
