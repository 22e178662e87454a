//! Relay error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Which side of the outbound call a failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any outbound call was attempted.
    Validation,
    /// Failed during or after the outbound call.
    Failure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Failure => "RelayFailure",
        }
    }
}

/// Errors that can occur while relaying a request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Structured request without a target URL.
    #[error("URL is required")]
    MissingUrl,

    /// Simple request without the `url` query parameter.
    #[error("URL parameter is required")]
    MissingUrlParam,

    /// Target URL does not parse as an absolute URL.
    #[error("Invalid URL format")]
    InvalidUrl,

    /// Inbound body is not a relay request document.
    #[error("Invalid request body")]
    InvalidBody(String),

    /// Method name is not a valid HTTP token.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// Header name or value cannot be sent.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Outbound call exceeded its deadline.
    #[error("Upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection, TLS, DNS or protocol failure from the HTTP client.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream declared JSON but sent something else.
    #[error("Invalid JSON in upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RelayError {
    /// Taxonomy entry for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::MissingUrl
            | RelayError::MissingUrlParam
            | RelayError::InvalidUrl
            | RelayError::InvalidBody(_) => ErrorKind::Validation,
            _ => ErrorKind::Failure,
        }
    }

    /// HTTP status the inbound caller receives.
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message with the full source chain, for callers and logs.
    ///
    /// reqwest hides the interesting part ("connection refused", "dns error")
    /// behind `source()`, so the chain is walked here.
    pub fn diagnostic(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        if let RelayError::Transport(inner) = self {
            source = std::error::Error::source(inner);
        }
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
