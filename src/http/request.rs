//! Request handling.
//!
//! # Responsibilities
//! - Attach a unique request ID (UUID v4) as early as possible for tracing
//! - Decode the inbound JSON body the way a lenient JSON body parser would
//!
//! # Design Decisions
//! - A missing body or non-JSON content type reads as an empty object, so
//!   validation reports every required field rather than failing the parse
//! - A JSON array carries no named keys and reads as an empty object
//! - Malformed JSON and scalar JSON are rejected before validation

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderName};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::error::RelayError;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer that stamps `x-request-id` on requests lacking one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that copies the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID placed by [`set_request_id_layer`].
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Decode an inbound body into a JSON object.
pub fn parse_json_object(headers: &HeaderMap, body: &Bytes) -> Result<Map<String, Value>, RelayError> {
    if body.is_empty() || !is_json_content_type(headers) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Array(_)) => Ok(Map::new()),
        Ok(other) => Err(RelayError::MalformedBody(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(RelayError::MalformedBody(e.to_string())),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_parses_object_and_keeps_key_order() {
        let body = Bytes::from_static(br#"{"zeta":1,"alpha":2}"#);
        let map = parse_json_object(&json_headers("application/json; charset=utf-8"), &body).unwrap();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_missing_or_foreign_body_reads_as_empty() {
        let body = Bytes::from_static(br#"{"a":1}"#);
        assert!(parse_json_object(&HeaderMap::new(), &body).unwrap().is_empty());
        assert!(parse_json_object(&json_headers("text/plain"), &body).unwrap().is_empty());
        assert!(parse_json_object(&json_headers("application/json"), &Bytes::new()).unwrap().is_empty());
    }

    #[test]
    fn test_vendor_json_type_is_accepted() {
        let body = Bytes::from_static(br#"{"a":1}"#);
        let map = parse_json_object(&json_headers("application/vnd.api+json"), &body).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_array_body_reads_as_empty() {
        let body = Bytes::from_static(br#"[{"username":"a"}]"#);
        assert!(parse_json_object(&json_headers("application/json"), &body).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_malformed_and_scalars() {
        let headers = json_headers("application/json");
        for raw in [&b"{not json"[..], b"42", b"\"text\"", b"null", b"true"] {
            let err = parse_json_object(&headers, &Bytes::copy_from_slice(raw)).unwrap_err();
            assert_eq!(err.kind(), "malformed_body");
        }
    }

    #[test]
    fn test_request_id_fallback() {
        assert_eq!(request_id(&HeaderMap::new()), "unknown");
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(request_id(&headers), "abc");
    }
}
