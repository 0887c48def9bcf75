use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Upstream chat-completion API the gateway forwards to
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL; `/chat/completions` is appended
    pub base_url: Url,
    /// Bearer token sent in the `Authorization` header
    #[serde(default)]
    pub api_key: Option<SecretString>,
}
