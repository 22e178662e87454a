//! Relay request and response envelopes.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::error::{RelayError, RelayResult};

/// Method used when the caller does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Structured relay request, as posted to `POST /relay`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayRequest {
    /// Target URL. Must be an absolute URL string; anything else fails
    /// URL validation rather than body parsing.
    #[serde(default)]
    pub url: Option<Value>,

    /// HTTP method, case-insensitive. Defaults to GET.
    #[serde(default)]
    pub method: Option<String>,

    /// Headers merged over the relay defaults. Caller wins on collision.
    /// Scalar values are forwarded as their text form.
    #[serde(default)]
    pub headers: Option<BTreeMap<String, Value>>,

    /// Request body. Non-string values are sent as compact JSON.
    #[serde(default)]
    pub body: Option<Value>,
}

impl RelayRequest {
    /// Parse an inbound POST body.
    ///
    /// An empty body is treated as an empty request so it fails with
    /// "URL is required" rather than a body error.
    pub fn from_slice(bytes: &[u8]) -> RelayResult<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|e| RelayError::InvalidBody(e.to_string()))
    }

    /// Target URL text, checked for presence and type but not parsed.
    ///
    /// Absent, null, false, 0 and "" count as missing; other non-strings are
    /// invalid URLs.
    pub fn target_url(&self) -> RelayResult<&str> {
        match self.url.as_ref() {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Err(RelayError::MissingUrl),
            Some(Value::String(url)) if url.is_empty() => Err(RelayError::MissingUrl),
            Some(Value::String(url)) => Ok(url.as_str()),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Err(RelayError::MissingUrl),
            Some(_) => Err(RelayError::InvalidUrl),
        }
    }

    /// Caller headers as text pairs. Null values are skipped; arrays and
    /// objects cannot be sent as a header value.
    pub fn header_pairs(&self) -> RelayResult<Vec<(&str, String)>> {
        let mut pairs = Vec::new();
        for (name, value) in self.headers.iter().flatten() {
            let text = match value {
                Value::Null => continue,
                Value::String(text) => text.clone(),
                Value::Bool(_) | Value::Number(_) => value.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(RelayError::InvalidHeader {
                        name: name.clone(),
                        reason: "value must be a string, number or boolean".to_string(),
                    })
                }
            };
            pairs.push((name.as_str(), text));
        }
        Ok(pairs)
    }

    /// Upper-cased method name.
    pub fn method_name(&self) -> String {
        self.method
            .as_deref()
            .unwrap_or(DEFAULT_METHOD)
            .to_ascii_uppercase()
    }

    /// Body text to transmit for `method`, if any.
    ///
    /// GET never carries a body. Null and empty-string bodies count as absent.
    pub fn encoded_body(&self, method: &Method) -> Option<String> {
        if *method == Method::GET {
            return None;
        }
        match self.body.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Query string of `GET /relay`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimpleRelayQuery {
    pub url: Option<String>,
}

/// Upstream body after content-type classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelayData {
    /// Parsed because the upstream declared `application/json`.
    Json(Value),
    /// Anything else, as text.
    Text(String),
}

/// Envelope returned by the structured variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: BTreeMap<String, String>,
    pub data: RelayData,
}

/// Reduced envelope returned by the simple variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimpleRelayResponse {
    pub status: u16,
    pub data: RelayData,
}

impl From<RelayResponse> for SimpleRelayResponse {
    fn from(full: RelayResponse) -> Self {
        Self {
            status: full.status,
            data: full.data,
        }
    }
}
