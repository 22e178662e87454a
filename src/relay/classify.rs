//! Content-type classification and header flattening.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, CONTENT_TYPE};

use crate::relay::error::RelayResult;
use crate::relay::types::RelayData;

/// Media type that switches the body to structured parsing.
const JSON_MEDIA_TYPE: &str = "application/json";

/// True when the declared content type contains `application/json`.
pub fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains(JSON_MEDIA_TYPE))
}

/// Declared content type of a response, if readable.
pub fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

/// Classify an upstream body by its declared content type.
///
/// Text bodies are decoded lossily; invalid UTF-8 never fails the relay.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> RelayResult<RelayData> {
    if is_json(content_type) {
        Ok(RelayData::Json(serde_json::from_slice(body)?))
    } else {
        Ok(RelayData::Text(String::from_utf8_lossy(body).into_owned()))
    }
}

/// Flatten response headers into one value per name.
///
/// Repeated names are joined with ", ".
pub fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::error::RelayError;
    use reqwest::header::{HeaderValue, SET_COOKIE};
    use serde_json::json;

    #[test]
    fn test_json_detection() {
        assert!(is_json(Some("application/json")));
        assert!(is_json(Some("application/json; charset=utf-8")));
        assert!(is_json(Some("Application/JSON")));
        assert!(!is_json(Some("text/plain")));
        assert!(!is_json(Some("application/problem+json")));
        assert!(!is_json(None));
    }

    #[test]
    fn test_json_body_is_parsed() {
        let data = decode_body(Some("application/json"), br#"{"a":1}"#).unwrap();
        assert_eq!(data, RelayData::Json(json!({"a": 1})));
    }

    #[test]
    fn test_text_body_is_opaque() {
        let data = decode_body(Some("text/plain"), b"hello").unwrap();
        assert_eq!(data, RelayData::Text("hello".into()));

        // JSON-looking text stays text without the declared type.
        let data = decode_body(None, br#"{"a":1}"#).unwrap();
        assert_eq!(data, RelayData::Text(r#"{"a":1}"#.into()));
    }

    #[test]
    fn test_malformed_json_fails() {
        let err = decode_body(Some("application/json"), b"<html>").unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));

        let err = decode_body(Some("application/json"), b"").unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
    }

    #[test]
    fn test_flatten_joins_repeated_names() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers.append(SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(SET_COOKIE, HeaderValue::from_static("b=2"));

        let flat = flatten_headers(&headers);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat["content-type"], "text/html");
        assert_eq!(flat["set-cookie"], "a=1, b=2");
    }
}
