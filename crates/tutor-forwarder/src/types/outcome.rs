use serde::{Deserialize, Serialize};

/// Where the final answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A candidate model answered
    Upstream,
    /// Every attempt failed and a canned answer was synthesized
    Fallback,
}

impl Source {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upstream => "upstream",
            Self::Fallback => "fallback",
        }
    }
}

/// Final answer for one inbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub content: String,
    pub source: Source,
    /// Model that produced the answer; `None` for the fallback
    pub model_used: Option<String>,
}

impl CompletionOutcome {
    pub fn upstream(content: String, model: &str) -> Self {
        Self {
            content,
            source: Source::Upstream,
            model_used: Some(model.to_owned()),
        }
    }

    pub const fn fallback(content: String) -> Self {
        Self {
            content,
            source: Source::Fallback,
            model_used: None,
        }
    }
}
