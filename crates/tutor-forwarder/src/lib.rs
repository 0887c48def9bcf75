//! Resilient completion forwarding for the Tutor gateway
//!
//! Takes a student's question (or a full chat transcript), tries each
//! candidate model on the upstream chat-completion API with per-attempt
//! timeouts and exponential backoff, normalizes whatever shape the answer
//! comes back in, and falls back to a canned local answer when every attempt
//! fails.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod backoff;
pub mod error;
pub mod fallback;
pub mod forwarder;
#[cfg(feature = "http")]
pub mod handler;
pub mod ingress;
pub mod protocol;
pub mod types;
pub mod upstream;

pub use backoff::RetryPolicy;
pub use error::ForwardError;
pub use forwarder::Forwarder;
#[cfg(feature = "http")]
pub use handler::forwarder_router;
pub use ingress::InboundRequest;
pub use types::{AttemptResult, ChatMessage, CompletionOutcome, CompletionRequest, ModelCandidates, Role, Source};
pub use upstream::{HttpUpstream, TransportError, Upstream, UpstreamReply};
