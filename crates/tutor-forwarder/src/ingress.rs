//! Decoding of inbound request bodies from the study pages
//!
//! Pages send either `{question}` or an OpenAI-style
//! `{messages, model?, max_tokens?, temperature?}`. Both collapse into one
//! validated [`CompletionRequest`].

use serde::Deserialize;

use crate::error::ForwardError;
use crate::types::{ChatMessage, CompletionRequest, RequestDefaults};

/// Inbound body as sent by the browser
#[derive(Debug, Default, Deserialize)]
pub struct InboundRequest {
    /// Single question from a subject page
    #[serde(default)]
    pub question: Option<String>,
    /// Full transcript; takes precedence over `question` when non-empty
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    /// Preferred upstream model
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl InboundRequest {
    /// Shorthand for a question-only body
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            ..Self::default()
        }
    }

    /// Validate and convert into a [`CompletionRequest`]
    pub fn into_request(self, defaults: &RequestDefaults) -> Result<CompletionRequest, ForwardError> {
        let messages = match (self.messages, self.question) {
            (Some(messages), _) if !messages.is_empty() => messages,
            (_, Some(question)) if !question.trim().is_empty() => {
                let mut messages = Vec::with_capacity(2);
                if let Some(prompt) = &defaults.system_prompt {
                    messages.push(ChatMessage::system(prompt.clone()));
                }
                messages.push(ChatMessage::user(question));
                messages
            }
            (Some(_), _) => return Err(ForwardError::InvalidRequest("messages must not be empty".to_owned())),
            (None, _) => return Err(ForwardError::InvalidRequest("question must not be empty".to_owned())),
        };

        CompletionRequest::builder(messages)
            .model_hint(self.model)
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn decode(body: &str) -> Result<CompletionRequest, ForwardError> {
        serde_json::from_str::<InboundRequest>(body)
            .unwrap()
            .into_request(&RequestDefaults::default())
    }

    #[test]
    fn question_becomes_single_user_message() {
        let request = decode(r#"{"question":"What is a haiku?"}"#).unwrap();
        assert_eq!(request.messages(), [ChatMessage::user("What is a haiku?")]);
    }

    #[test]
    fn system_prompt_precedes_question() {
        let defaults = RequestDefaults {
            system_prompt: Some("You are a patient tutor.".to_owned()),
            ..RequestDefaults::default()
        };

        let request = InboundRequest::question("Explain long division")
            .into_request(&defaults)
            .unwrap();

        assert_eq!(request.messages().len(), 2);
        assert_eq!(request.messages()[0].role, Role::System);
        assert_eq!(request.messages()[1].content, "Explain long division");
    }

    #[test]
    fn messages_carry_parameters() {
        let request = decode(
            r#"{
                "messages": [
                    {"role": "system", "content": "Answer in Chinese."},
                    {"role": "user", "content": "What does 画蛇添足 mean?"}
                ],
                "model": "deepseek-v3",
                "max_tokens": 300,
                "temperature": 1.2
            }"#,
        )
        .unwrap();

        assert_eq!(request.messages().len(), 2);
        assert_eq!(request.model_hint(), Some("deepseek-v3"));
        assert_eq!(request.max_tokens(), 300);
        assert!((request.temperature() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn messages_win_over_question() {
        let request = decode(r#"{"question":"ignored","messages":[{"role":"user","content":"used"}]}"#).unwrap();
        assert_eq!(request.question(), "used");
    }

    #[test]
    fn empty_question_is_invalid() {
        assert!(matches!(decode(r#"{"question":""}"#), Err(ForwardError::InvalidRequest(_))));
        assert!(matches!(decode("{}"), Err(ForwardError::InvalidRequest(_))));
    }

    #[test]
    fn empty_messages_are_invalid() {
        let err = decode(r#"{"messages":[]}"#).unwrap_err();
        assert!(err.to_string().contains("messages must not be empty"));
    }

    #[test]
    fn empty_messages_fall_back_to_question() {
        let request = decode(r#"{"messages":[],"question":"What is 5 x 5?"}"#).unwrap();
        assert_eq!(request.question(), "What is 5 x 5?");
    }

    #[test]
    fn unknown_role_fails_to_decode() {
        assert!(serde_json::from_str::<InboundRequest>(r#"{"messages":[{"role":"tool","content":"x"}]}"#).is_err());
    }
}
