//! Error taxonomy for API calls.

use thiserror::Error;

/// Everything a dispatched call can fail with. The structured HTTP case
/// and the transport case reach callers through the same `Result`, but
/// they originate differently and log differently; screens usually render
/// both as the same inline banner.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The request never completed (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// A nominally successful response carried a body that isn't the JSON
    /// we expected.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request payload could not be serialized.
    #[error("could not serialize request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Base URL and path did not combine into a valid URL.
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    /// The token source could not produce a bearer token.
    #[error("token source error: {0}")]
    Token(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
    /// The HTTP status, when this is the structured-failure case.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
