use http::StatusCode;

/// Result of a single outbound call for one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// The upstream answered with usable content
    Success(String),
    /// The upstream answered with a non-2xx status
    UpstreamError { status: StatusCode, body: String },
    /// The call failed before a usable answer arrived
    NetworkError(String),
    /// The call exceeded the per-attempt timeout and was cancelled
    Timeout,
}

impl AttemptResult {
    /// Whether another attempt on the same model may succeed
    ///
    /// 4xx responses mean the request itself is wrong for this model, so
    /// only the next candidate is worth trying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Success(_) => false,
            Self::UpstreamError { status, .. } => !status.is_client_error(),
            Self::NetworkError(_) | Self::Timeout => true,
        }
    }

    /// Short label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::UpstreamError { status, .. } if status.is_client_error() => "client_error",
            Self::UpstreamError { .. } => "server_error",
            Self::NetworkError(_) => "network_error",
            Self::Timeout => "timeout",
        }
    }
}
