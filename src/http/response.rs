//! Error envelopes.
//!
//! # Responsibilities
//! - Map relay errors to HTTP status codes
//! - Render the JSON error body callers depend on
//!
//! # Design Decisions
//! - Validation errors: 400 `{ "error": <message> }`
//! - Relay failures: 500 `{ "error": "Proxy request failed", "message": <detail> }`
//! - Timeouts, DNS, refused connections and parse failures are not distinguished

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::relay::{ErrorKind, RelayError};

/// Top-level error text for every relay failure.
pub const RELAY_FAILED: &str = "Proxy request failed";

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&RelayError> for ErrorEnvelope {
    fn from(err: &RelayError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self {
                error: err.to_string(),
                message: None,
            },
            ErrorKind::Failure => Self {
                error: RELAY_FAILED.to_string(),
                message: Some(err.diagnostic()),
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorEnvelope::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn render(err: RelayError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_envelope() {
        let (status, body) = render(RelayError::InvalidUrl).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid URL format"}));

        let (status, body) = render(RelayError::MissingUrlParam).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL parameter is required"}));
    }

    #[tokio::test]
    async fn test_failure_envelope() {
        let (status, body) = render(RelayError::Timeout(10)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "error": "Proxy request failed",
                "message": "Upstream request timed out after 10 seconds"
            })
        );
    }
}
