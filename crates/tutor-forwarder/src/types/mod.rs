//! Canonical request, candidate and outcome types
//!
//! Everything here lives for exactly one inbound call.

pub mod attempt;
pub mod message;
pub mod outcome;
pub mod request;

pub use attempt::AttemptResult;
pub use message::{ChatMessage, Role};
pub use outcome::{CompletionOutcome, Source};
pub use request::{CompletionRequest, CompletionRequestBuilder, ModelCandidates, RequestDefaults};
