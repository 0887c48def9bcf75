use tutor_config::ForwarderConfig;

use super::message::{ChatMessage, Role};
use crate::error::ForwardError;

/// Defaults applied when an inbound request leaves a parameter unset
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub max_tokens: u32,
    pub temperature: f64,
    /// Prepended to requests that arrive as a bare question
    pub system_prompt: Option<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            system_prompt: None,
        }
    }
}

impl From<&ForwarderConfig> for RequestDefaults {
    fn from(config: &ForwarderConfig) -> Self {
        Self {
            max_tokens: config.default_max_tokens,
            temperature: config.default_temperature,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// A validated chat request
///
/// Only constructible through [`CompletionRequestBuilder`], so every value
/// the forwarder sees already has a non-empty conversation and in-range
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    messages: Vec<ChatMessage>,
    model_hint: Option<String>,
    max_tokens: u32,
    temperature: f64,
}

impl CompletionRequest {
    pub fn builder(messages: Vec<ChatMessage>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            messages,
            model_hint: None,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn model_hint(&self) -> Option<&str> {
        self.model_hint.as_deref()
    }

    pub const fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// The text the student asked, used to pick a fallback answer
    ///
    /// This is the latest user message, or the latest message of any role
    /// when the transcript has no user turn.
    pub fn question(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User && !m.content.trim().is_empty())
            .or_else(|| self.messages.iter().rev().find(|m| !m.content.trim().is_empty()))
            .map_or("", |m| m.content.as_str())
    }
}

/// Collects optional parameters before validation
#[derive(Debug, Clone)]
pub struct CompletionRequestBuilder {
    messages: Vec<ChatMessage>,
    model_hint: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
}

impl CompletionRequestBuilder {
    #[must_use]
    pub fn model_hint(mut self, model: Option<String>) -> Self {
        self.model_hint = model;
        self
    }

    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub const fn temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Validate and freeze the request
    pub fn build(self, defaults: &RequestDefaults) -> Result<CompletionRequest, ForwardError> {
        if self.messages.is_empty() {
            return Err(ForwardError::InvalidRequest("messages must not be empty".to_owned()));
        }

        if self.messages.iter().all(|m| m.content.trim().is_empty()) {
            return Err(ForwardError::InvalidRequest("question must not be empty".to_owned()));
        }

        let max_tokens = self.max_tokens.unwrap_or(defaults.max_tokens);
        if max_tokens == 0 {
            return Err(ForwardError::InvalidRequest("max_tokens must be at least 1".to_owned()));
        }

        let temperature = self.temperature.unwrap_or(defaults.temperature);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ForwardError::InvalidRequest(format!(
                "temperature must be between 0 and 2, got {temperature}"
            )));
        }

        let model_hint = self
            .model_hint
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty());

        Ok(CompletionRequest {
            messages: self.messages,
            model_hint,
            max_tokens,
            temperature,
        })
    }
}

/// Models to try, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidates(Vec<String>);

impl ModelCandidates {
    /// Build a candidate list, dropping blanks and repeated names
    pub fn new<I, S>(models: I) -> Result<Self, ForwardError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();

        for model in models {
            let model = model.into().trim().to_owned();
            if !model.is_empty() && !ordered.contains(&model) {
                ordered.push(model);
            }
        }

        if ordered.is_empty() {
            return Err(ForwardError::NoCandidates);
        }

        Ok(Self(ordered))
    }

    /// The request's preferred model first, then the configured sequence
    pub fn with_hint(hint: Option<&str>, configured: &[String]) -> Result<Self, ForwardError> {
        Self::new(hint.into_iter().map(str::to_owned).chain(configured.iter().cloned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}
