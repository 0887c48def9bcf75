//! Mock chat-completion provider for integration tests
//!
//! Serves `POST /v1/chat/completions` and answers according to a
//! per-model [`Behavior`]. Models without a behavior get a 404.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers requests for one model
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with `content` set
    Answer(String),
    /// 200 with empty `content` and the text in `reasoning_content`
    Reasoning(String),
    /// Always respond with this status
    Status(StatusCode),
    /// Fail the first `failures` calls with 500, then answer
    FailThenAnswer { failures: u32, content: String },
    /// Answer only after sleeping for `delay`
    Slow { delay: Duration, content: String },
}

impl Behavior {
    pub fn answer(content: &str) -> Self {
        Self::Answer(content.to_owned())
    }
}

struct MockState {
    behaviors: HashMap<String, Behavior>,
    calls: Mutex<HashMap<String, u32>>,
    last_body: Mutex<Option<serde_json::Value>>,
    last_authorization: Mutex<Option<String>>,
}

/// Running mock provider
pub struct MockUpstream {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

impl MockUpstream {
    /// Start the mock with a behavior per model name
    pub async fn start<'a>(behaviors: impl IntoIterator<Item = (&'a str, Behavior)>) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behaviors: behaviors
                .into_iter()
                .map(|(model, behavior)| (model.to_owned(), behavior))
                .collect(),
            calls: Mutex::new(HashMap::new()),
            last_body: Mutex::new(None),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for the upstream config; includes `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Completion requests received for `model`
    pub fn calls(&self, model: &str) -> u32 {
        self.state.calls.lock().unwrap().get(model).copied().unwrap_or(0)
    }

    /// Completion requests received across all models
    pub fn total_calls(&self) -> u32 {
        self.state.calls.lock().unwrap().values().sum()
    }

    /// Body of the most recent request
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.state.last_body.lock().unwrap().clone()
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Base URL of a port that refuses connections
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/v1")
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let model = body["model"].as_str().unwrap_or_default().to_owned();

    let call = {
        let mut calls = state.calls.lock().unwrap();
        let count = calls.entry(model.clone()).or_insert(0);
        *count += 1;
        *count
    };
    *state.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    *state.last_body.lock().unwrap() = Some(body);

    match state.behaviors.get(&model).cloned() {
        None => error(StatusCode::NOT_FOUND, &format!("model '{model}' not found")),
        Some(Behavior::Answer(content)) => completion(&model, &content, None),
        Some(Behavior::Reasoning(reasoning)) => completion(&model, "", Some(&reasoning)),
        Some(Behavior::Status(status)) => error(status, "scripted failure"),
        Some(Behavior::FailThenAnswer { failures, content }) => {
            if call <= failures {
                error(StatusCode::INTERNAL_SERVER_ERROR, "temporarily unavailable")
            } else {
                completion(&model, &content, None)
            }
        }
        Some(Behavior::Slow { delay, content }) => {
            tokio::time::sleep(delay).await;
            completion(&model, &content, None)
        }
    }
}

fn completion(model: &str, content: &str, reasoning: Option<&str>) -> Response {
    let mut message = serde_json::json!({ "role": "assistant", "content": content });
    if let Some(reasoning) = reasoning {
        message["reasoning_content"] = serde_json::Value::from(reasoning);
    }

    Json(serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": model,
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
    }))
    .into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": { "message": message, "type": "mock_error" } })),
    )
        .into_response()
}
