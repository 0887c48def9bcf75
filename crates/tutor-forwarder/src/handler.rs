//! Axum route handlers for the study pages and OpenAI-style clients

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Serialize;
use tutor_core::HttpError;

use crate::error::ForwardError;
use crate::forwarder::Forwarder;
use crate::ingress::InboundRequest;
use crate::protocol::completion::ChatCompletion;

/// Build the forwarding router
pub fn forwarder_router(forwarder: Forwarder) -> Router {
    Router::new()
        // Used by the subject pages
        .route("/api/chat", routing::post(chat))
        // Same contract under the OpenAI path
        .route("/v1/chat/completions", routing::post(chat))
        .route("/api/models", routing::get(list_models))
        .with_state(forwarder)
}

/// Handle `POST /api/chat` and `POST /v1/chat/completions`
///
/// Upstream trouble never reaches the caller: a response is always a
/// completion, from a model or from the local fallback. Only malformed
/// input is rejected.
async fn chat(State(forwarder): State<Forwarder>, body: Result<Json<InboundRequest>, JsonRejection>) -> Response {
    let inbound = match body {
        Ok(Json(inbound)) => inbound,
        Err(rejection) => return error_response(&ForwardError::InvalidRequest(rejection.body_text())),
    };

    match forwarder.complete(inbound).await {
        Ok(outcome) => Json(ChatCompletion::from(outcome)).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Serialize)]
struct ModelList<'a> {
    object: &'static str,
    data: Vec<ModelEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ModelEntry<'a> {
    id: &'a str,
    object: &'static str,
    /// Position in the trial order, starting at 0
    priority: usize,
}

/// Handle `GET /api/models`
async fn list_models(State(forwarder): State<Forwarder>) -> Response {
    let data = forwarder
        .models()
        .iter()
        .enumerate()
        .map(|(priority, id)| ModelEntry {
            id,
            object: "model",
            priority,
        })
        .collect();

    Json(ModelList { object: "list", data }).into_response()
}

fn error_response(error: &ForwardError) -> Response {
    if error.status_code().is_server_error() {
        tracing::error!(error = %error, "request failed");
    } else {
        tracing::debug!(error = %error, "request rejected");
    }

    let body = serde_json::json!({
        "error": {
            "message": error.client_message(),
            "type": error.error_type(),
            "code": serde_json::Value::Null,
        }
    });

    (error.status_code(), Json(body)).into_response()
}
