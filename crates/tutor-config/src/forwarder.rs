use std::time::Duration;

use serde::Deserialize;

/// Retry, backoff and model fallback policy
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForwarderConfig {
    /// Models to try in order when the request carries no usable hint
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Attempts per model before moving to the next one
    #[serde(default = "default_retries_per_model")]
    pub retries_per_model: u32,
    /// Base of the exponential backoff between attempts
    #[serde(default = "default_base_backoff", with = "crate::duration")]
    pub base_backoff: Duration,
    /// Upper bound for a single backoff wait
    #[serde(default = "default_max_backoff", with = "crate::duration")]
    pub max_backoff: Duration,
    /// Timeout applied to each outbound call
    #[serde(default = "default_request_timeout", with = "crate::duration")]
    pub request_timeout: Duration,
    /// Optional wall-clock budget for the whole model sequence
    #[serde(default, deserialize_with = "crate::duration::deserialize_option")]
    pub total_timeout: Option<Duration>,
    /// `max_tokens` used when the request does not set one
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,
    /// `temperature` used when the request does not set one
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    /// System message prepended to single-question requests
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            retries_per_model: default_retries_per_model(),
            base_backoff: default_base_backoff(),
            max_backoff: default_max_backoff(),
            request_timeout: default_request_timeout(),
            total_timeout: None,
            default_max_tokens: default_max_tokens(),
            default_temperature: default_temperature(),
            system_prompt: None,
        }
    }
}

fn default_models() -> Vec<String> {
    vec!["deepseek-r1".to_owned(), "deepseek-v3".to_owned()]
}

const fn default_retries_per_model() -> u32 {
    3
}

const fn default_base_backoff() -> Duration {
    Duration::from_secs(1)
}

const fn default_max_backoff() -> Duration {
    Duration::from_secs(10)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

const fn default_max_tokens() -> u32 {
    1000
}

const fn default_temperature() -> f64 {
    0.7
}
