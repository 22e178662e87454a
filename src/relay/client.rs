//! Outbound relay client.
//!
//! # Responsibilities
//! - Validate the inbound description (structured variant only)
//! - Build the outbound request: method, merged headers, body
//! - Dispatch it under a single deadline covering send and body read
//! - Classify and package the upstream response
//!
//! # Design Decisions
//! - One shared `reqwest::Client`; pooling is whatever reqwest does
//! - The deadline is a `tokio::time::timeout` around the whole exchange so a
//!   slow body counts against the same budget as a slow connect
//! - Dropping the returned future cancels the outbound call

use std::time::{Duration, Instant};

use axum::body::Bytes;
use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use tokio::time::timeout;
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::classify::{content_type, decode_body, flatten_headers};
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::types::{RelayRequest, RelayResponse, SimpleRelayResponse};
use crate::security::HeaderPolicy;

/// Content type sent with a body when the caller names none.
const DEFAULT_BODY_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Raw upstream reply, before classification.
struct UpstreamReply {
    status: StatusCode,
    /// Reason phrase from the status line, only when it differs from the canonical one.
    reason: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

/// Stateless relay: turns relay requests into outbound calls.
///
/// Cloning is cheap; the inner client is reference counted.
#[derive(Clone)]
pub struct Relay {
    client: reqwest::Client,
    user_agent: HeaderValue,
    timeout: Duration,
    header_policy: HeaderPolicy,
}

impl Relay {
    /// Create a relay from upstream settings and a forwarded-header policy.
    pub fn new(config: &UpstreamConfig, header_policy: HeaderPolicy) -> RelayResult<Self> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| RelayError::InvalidHeader {
                name: USER_AGENT.to_string(),
                reason: e.to_string(),
            })?;

        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent,
            timeout: Duration::from_secs(config.timeout_secs),
            header_policy,
        })
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers
    }

    /// Build the outbound request for the structured variant.
    ///
    /// Fails with a validation error when the URL is missing or not absolute.
    pub fn prepare_structured(&self, request: RelayRequest) -> RelayResult<reqwest::Request> {
        let target = Url::parse(request.target_url()?).map_err(|_| RelayError::InvalidUrl)?;

        let method_name = request.method_name();
        let method = Method::from_bytes(method_name.as_bytes())
            .map_err(|_| RelayError::InvalidMethod(method_name.clone()))?;

        let mut headers = self.default_headers();
        for (name, value) in request.header_pairs()? {
            if !self.header_policy.permits(name) {
                tracing::debug!(header = %name, "Dropping header outside forward list");
                continue;
            }
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| RelayError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| RelayError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let body = request.encoded_body(&method);
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_BODY_CONTENT_TYPE),
            );
        }

        let mut builder = self.client.request(method, target).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder.build()?)
    }

    /// Build the outbound request for the simple variant.
    ///
    /// Only presence is checked; a malformed URL surfaces as a transport error.
    pub fn prepare_simple(&self, url: Option<String>) -> RelayResult<reqwest::Request> {
        let raw_url = url
            .filter(|u| !u.is_empty())
            .ok_or(RelayError::MissingUrlParam)?;

        Ok(self
            .client
            .get(raw_url.as_str())
            .headers(self.default_headers())
            .build()?)
    }

    /// Relay a structured request and return the full envelope.
    pub async fn handle_structured(&self, request: RelayRequest) -> RelayResult<RelayResponse> {
        let outbound = self.prepare_structured(request)?;
        self.execute(outbound).await
    }

    /// Relay a bare URL and return the reduced envelope.
    pub async fn handle_simple(&self, url: Option<String>) -> RelayResult<SimpleRelayResponse> {
        let outbound = self.prepare_simple(url)?;
        self.execute(outbound).await.map(SimpleRelayResponse::from)
    }

    /// Send a prepared request and package the reply.
    pub async fn execute(&self, outbound: reqwest::Request) -> RelayResult<RelayResponse> {
        let reply = self.dispatch(outbound).await?;
        let data = decode_body(content_type(&reply.headers), &reply.body)?;

        Ok(RelayResponse {
            status: reply.status.as_u16(),
            status_text: status_text(reply.status, reply.reason),
            headers: flatten_headers(&reply.headers),
            data,
        })
    }

    async fn dispatch(&self, outbound: reqwest::Request) -> RelayResult<UpstreamReply> {
        let start = Instant::now();
        let method = outbound.method().clone();
        let host = outbound.url().host_str().unwrap_or_default().to_string();

        tracing::debug!(method = %method, host = %host, "Dispatching upstream request");

        let exchange = async {
            let response = self.client.execute(outbound).await?;
            let status = response.status();
            let reason = response
                .extensions()
                .get::<ReasonPhrase>()
                .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned());
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, RelayError>(UpstreamReply {
                status,
                reason,
                headers,
                body,
            })
        };

        let reply = timeout(self.timeout, exchange)
            .await
            .map_err(|_| RelayError::Timeout(self.timeout.as_secs()))??;

        tracing::debug!(
            method = %method,
            host = %host,
            status = reply.status.as_u16(),
            bytes = reply.body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream responded"
        );

        Ok(reply)
    }
}

/// The upstream's own reason phrase, else the canonical one, else empty.
fn status_text(status: StatusCode, reason: Option<String>) -> String {
    reason
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_default()
}
