use http::StatusCode;

/// Trait for domain errors that can be rendered as HTTP responses
///
/// Feature crates implement this for their error enums. The ingress layer
/// turns them into JSON bodies, so domain errors never depend on axum.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to show to the browser
    fn client_message(&self) -> String;
}
