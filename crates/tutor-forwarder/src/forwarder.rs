//! Model fallback and retry orchestration

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tutor_config::Config;
use tutor_telemetry::ForwarderMetrics;

use crate::backoff::RetryPolicy;
use crate::error::ForwardError;
use crate::fallback;
use crate::ingress::InboundRequest;
use crate::protocol::upstream::{UpstreamRequest, UpstreamResponse};
use crate::types::{AttemptResult, CompletionOutcome, CompletionRequest, ModelCandidates, RequestDefaults, Source};
use crate::upstream::{HttpUpstream, Upstream, UpstreamReply};

/// Shared, read-only forwarding engine
///
/// Cheap to clone. Concurrent requests never coordinate: each call to
/// [`Forwarder::forward`] walks its own candidate list sequentially.
#[derive(Clone)]
pub struct Forwarder {
    inner: Arc<ForwarderInner>,
}

struct ForwarderInner {
    upstream: Arc<dyn Upstream>,
    policy: RetryPolicy,
    models: ModelCandidates,
    defaults: RequestDefaults,
    metrics: ForwarderMetrics,
}

impl Forwarder {
    pub fn new(
        upstream: Arc<dyn Upstream>,
        policy: RetryPolicy,
        models: ModelCandidates,
        defaults: RequestDefaults,
    ) -> Self {
        Self {
            inner: Arc::new(ForwarderInner {
                upstream,
                policy,
                models,
                defaults,
                metrics: ForwarderMetrics::new(),
            }),
        }
    }

    /// Build the forwarder with the HTTP transport described by `config`
    pub fn from_config(config: &Config) -> Result<Self, ForwardError> {
        let upstream = HttpUpstream::new(&config.upstream)?;
        tracing::info!(endpoint = upstream.endpoint(), "upstream configured");

        Ok(Self::new(
            Arc::new(upstream),
            RetryPolicy::from(&config.forwarder),
            ModelCandidates::new(config.forwarder.models.iter().cloned())?,
            RequestDefaults::from(&config.forwarder),
        ))
    }

    /// Configured models in trial order
    pub fn models(&self) -> &[String] {
        self.inner.models.as_slice()
    }

    /// Validate an inbound body and forward it
    ///
    /// The request's `model` hint, if any, is tried before the configured
    /// models. Only invalid input produces an error; no outbound call is
    /// made in that case.
    pub async fn complete(&self, inbound: InboundRequest) -> Result<CompletionOutcome, ForwardError> {
        let request = inbound.into_request(&self.inner.defaults)?;
        let candidates = ModelCandidates::with_hint(request.model_hint(), self.inner.models.as_slice())?;

        Ok(self.forward(&request, &candidates).await)
    }

    /// Try each candidate in order until one answers
    ///
    /// Each model gets up to `retries_per_model` attempts. Transient failures
    /// (5xx, network errors, timeouts) are retried after an exponential
    /// backoff; a 4xx moves straight to the next model. When nothing
    /// succeeds, or the optional total budget runs out, the answer comes
    /// from [`fallback::answer`].
    pub async fn forward(&self, request: &CompletionRequest, candidates: &ModelCandidates) -> CompletionOutcome {
        let started = std::time::Instant::now();
        let policy = &self.inner.policy;
        let deadline = policy.deadline(Instant::now());

        'models: for model in candidates.iter() {
            for attempt in 1..=policy.retries_per_model {
                let Some(timeout) = policy.attempt_timeout(deadline) else {
                    tracing::warn!(model, attempt, "time budget exhausted before attempt");
                    break 'models;
                };

                let result = self.attempt(request, model, timeout).await;
                self.inner.metrics.record_attempt(model, result.label());

                match result {
                    AttemptResult::Success(content) => {
                        tracing::info!(model, attempt, "upstream answered");
                        self.inner.metrics.record_duration(started, Source::Upstream.as_str());
                        return CompletionOutcome::upstream(content, model);
                    }
                    failure if !failure.is_transient() => {
                        tracing::warn!(
                            model,
                            attempt,
                            result = failure.label(),
                            detail = %describe(&failure),
                            "upstream rejected request, trying next model"
                        );
                        continue 'models;
                    }
                    failure => {
                        tracing::warn!(
                            model,
                            attempt,
                            result = failure.label(),
                            detail = %describe(&failure),
                            "upstream attempt failed"
                        );
                    }
                }

                if attempt < policy.retries_per_model {
                    let delay = policy.backoff(attempt);
                    if !pause(delay, deadline).await {
                        tracing::warn!(model, attempt, "time budget exhausted during backoff");
                        break 'models;
                    }
                }
            }
        }

        tracing::warn!(models = ?candidates.as_slice(), "all upstream attempts failed, answering locally");
        self.inner.metrics.record_fallback();
        self.inner.metrics.record_duration(started, Source::Fallback.as_str());

        CompletionOutcome::fallback(fallback::answer(request.question()))
    }

    /// One outbound call, cancelled when `timeout` elapses
    async fn attempt(&self, request: &CompletionRequest, model: &str, timeout: Duration) -> AttemptResult {
        let body = UpstreamRequest::new(request, model);

        match tokio::time::timeout(timeout, self.inner.upstream.send(&body)).await {
            Err(_) => AttemptResult::Timeout,
            Ok(Err(e)) => AttemptResult::NetworkError(e.to_string()),
            Ok(Ok(reply)) => classify(reply),
        }
    }
}

/// Turn a raw reply into an attempt result
///
/// Any non-2xx status is a failure regardless of body. A 2xx body must parse
/// and carry content (after `reasoning_content` normalization); otherwise
/// the attempt counts as a transient failure.
pub fn classify(reply: UpstreamReply) -> AttemptResult {
    if !reply.status.is_success() {
        return AttemptResult::UpstreamError {
            status: reply.status,
            body: reply.body,
        };
    }

    match serde_json::from_str::<UpstreamResponse>(&reply.body) {
        Ok(response) => response.into_content().map_or_else(
            || AttemptResult::NetworkError("upstream response carried no content".to_owned()),
            AttemptResult::Success,
        ),
        Err(e) => AttemptResult::NetworkError(format!("failed to parse upstream response: {e}")),
    }
}

/// Sleep for the backoff delay unless that would overrun the deadline
///
/// Returns `false` when the wait was abandoned.
async fn pause(delay: Duration, deadline: Option<Instant>) -> bool {
    if deadline.is_some_and(|deadline| Instant::now() + delay >= deadline) {
        return false;
    }

    tracing::debug!(delay_ms = delay.as_millis(), "backing off before retry");
    tokio::time::sleep(delay).await;
    true
}

fn describe(result: &AttemptResult) -> String {
    const MAX_BODY: usize = 200;

    match result {
        AttemptResult::UpstreamError { status, body } => {
            let body: String = body.chars().take(MAX_BODY).collect();
            format!("status {status}: {body}")
        }
        AttemptResult::NetworkError(cause) => cause.clone(),
        AttemptResult::Timeout => "timed out".to_owned(),
        AttemptResult::Success(_) => String::new(),
    }
}
