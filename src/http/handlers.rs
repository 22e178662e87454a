//! Route handlers.
//!
//! # Routes
//! - `GET /`: liveness
//! - `POST /relay`, `POST /proxy`: structured relay
//! - `GET /relay?url=`, `GET /proxy?url=`: simple relay

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::observability::metrics as relay_metrics;
use crate::relay::{ErrorKind, RelayError, RelayRequest, SimpleRelayQuery};

/// Liveness document returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "online",
        message: "Relay server is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Structured relay. The body is parsed as JSON whatever its content type,
/// so pages can post `text/plain` and skip the CORS preflight.
pub async fn structured_relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    let result = match RelayRequest::from_slice(&body) {
        Ok(request) => {
            tracing::debug!(
                request_id = %request_id,
                method = %request.method_name(),
                "Structured relay"
            );
            state.relay.handle_structured(request).await
        }
        Err(e) => Err(e),
    };

    finish("structured", &request_id, start, result)
}

/// Simple relay of `?url=`.
pub async fn simple_relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SimpleRelayQuery>,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers);

    tracing::debug!(request_id = %request_id, "Simple relay");
    let result = state.relay.handle_simple(query.url).await;

    finish("simple", &request_id, start, result)
}

/// Log, record and render the outcome of one relay.
fn finish<T: Serialize>(
    variant: &'static str,
    request_id: &str,
    start: Instant,
    result: Result<T, RelayError>,
) -> Response {
    relay_metrics::record_relay(variant, relay_metrics::outcome_label(result.as_ref().err()), start);

    match result {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => {
            match err.kind() {
                ErrorKind::Validation => tracing::warn!(
                    request_id = %request_id,
                    variant,
                    kind = err.kind().as_str(),
                    error = %err,
                    "Rejected relay request"
                ),
                ErrorKind::Failure => tracing::error!(
                    request_id = %request_id,
                    variant,
                    kind = err.kind().as_str(),
                    error = %err.diagnostic(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Relay failed"
                ),
            }
            err.into_response()
        }
    }
}
