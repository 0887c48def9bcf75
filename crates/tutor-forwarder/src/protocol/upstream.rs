use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, CompletionRequest};

/// Body posted to `{base_url}/chat/completions`
#[derive(Debug, Serialize)]
pub struct UpstreamRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f64,
    pub stream: bool,
}

impl<'a> UpstreamRequest<'a> {
    /// Substitute `model` into the request body
    pub fn new(request: &'a CompletionRequest, model: &'a str) -> Self {
        Self {
            model,
            messages: request.messages(),
            max_tokens: request.max_tokens(),
            temperature: request.temperature(),
            stream: false,
        }
    }
}

/// Successful response body, tolerant of missing fields
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamResponse {
    #[serde(default)]
    pub choices: Vec<UpstreamChoice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamChoice {
    #[serde(default)]
    pub message: UpstreamMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamMessage {
    #[serde(default)]
    pub content: Option<String>,
    /// Reasoning models may put the whole answer here
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

impl UpstreamMessage {
    /// The answer text, preferring `content` over `reasoning_content`
    ///
    /// Returns `None` when neither field carries any text.
    pub fn into_content(self) -> Option<String> {
        let has_text = |s: &String| !s.trim().is_empty();

        self.content
            .filter(has_text)
            .or_else(|| self.reasoning_content.filter(has_text))
    }
}

impl UpstreamResponse {
    /// Normalized content of the first choice
    pub fn into_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message.into_content()
    }
}
