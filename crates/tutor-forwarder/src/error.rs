use http::StatusCode;
use thiserror::Error;
use tutor_core::HttpError;

/// Errors surfaced to callers of the forwarder
///
/// Upstream failures never appear here: they are retried, skipped, or
/// absorbed by the local fallback.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The inbound request is missing its question or has invalid parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No model is left to try after deduplicating the candidate list
    #[error("no candidate models configured")]
    NoCandidates,

    /// The upstream transport could not be constructed
    #[error("failed to set up upstream client: {0}")]
    Setup(String),
}

impl HttpError for ForwardError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NoCandidates | Self::Setup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::NoCandidates | Self::Setup(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(_) => self.to_string(),
            Self::NoCandidates | Self::Setup(_) => "an internal error occurred".to_owned(),
        }
    }
}
