use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ChatMessage, CompletionOutcome, Source};

/// Model name reported when the answer was synthesized locally
pub const FALLBACK_MODEL: &str = "local-fallback";

/// Canonical answer body, identical in shape for upstream and fallback answers
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub source: Source,
    pub model_used: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

impl From<CompletionOutcome> for ChatCompletion {
    fn from(outcome: CompletionOutcome) -> Self {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            id: format!("chatcmpl-{}", Uuid::new_v4().simple()),
            object: "chat.completion".to_owned(),
            created,
            model: outcome.model_used.clone().unwrap_or_else(|| FALLBACK_MODEL.to_owned()),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage::assistant(outcome.content),
                finish_reason: "stop".to_owned(),
            }],
            source: outcome.source,
            model_used: outcome.model_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_and_fallback_share_one_shape() {
        let upstream = serde_json::to_value(ChatCompletion::from(CompletionOutcome::upstream(
            "Photosynthesis turns light into sugar.".to_owned(),
            "deepseek-r1",
        )))
        .unwrap();
        let fallback =
            serde_json::to_value(ChatCompletion::from(CompletionOutcome::fallback("Sorry!".to_owned()))).unwrap();

        for body in [&upstream, &fallback] {
            assert_eq!(body["object"], "chat.completion");
            assert_eq!(body["choices"][0]["message"]["role"], "assistant");
            assert_eq!(body["choices"][0]["finish_reason"], "stop");
        }

        assert_eq!(upstream["choices"][0]["message"]["content"], "Photosynthesis turns light into sugar.");
        assert_eq!(upstream["source"], "upstream");
        assert_eq!(upstream["model_used"], "deepseek-r1");

        assert_eq!(fallback["source"], "fallback");
        assert_eq!(fallback["model_used"], serde_json::Value::Null);
        assert_eq!(fallback["model"], FALLBACK_MODEL);
    }
}
