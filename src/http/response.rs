//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn relay outcomes into the status/body pair sent to the caller
//! - Map relay errors to HTTP status codes per route policy
//!
//! # Design Decisions
//! - Every 2xx upstream reply is normalized to 200
//! - Transport and parse details never reach the caller

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::RelayError;
use crate::routing::RelayPolicy;

/// What the original caller receives.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResult {
    pub status: StatusCode,
    pub body: Value,
}

impl RelayResult {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn message(status: StatusCode, message: impl Into<Value>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    /// Render a relay outcome under the route's policy.
    pub fn from_outcome(outcome: Result<Value, RelayError>, policy: &RelayPolicy) -> Self {
        let err = match outcome {
            Ok(body) => return Self::ok(body),
            Err(err) => err,
        };

        match err {
            // Local rejections read the same on every route.
            RelayError::MissingFields(_) | RelayError::MalformedBody(_) => {
                Self::message(StatusCode::BAD_REQUEST, err.to_string())
            }
            _ => match *policy {
                RelayPolicy::Strict { failure_message } => {
                    Self::message(StatusCode::INTERNAL_SERVER_ERROR, failure_message)
                }
                RelayPolicy::Passthrough {
                    rejected_message,
                    transport_message,
                    unparsable_message,
                } => match err {
                    RelayError::Application { status, message } => {
                        Self::message(status, message.unwrap_or_else(|| rejected_message.into()))
                    }
                    RelayError::Unparsable { .. } => {
                        Self::message(StatusCode::INTERNAL_SERVER_ERROR, unparsable_message)
                    }
                    _ => Self::message(StatusCode::INTERNAL_SERVER_ERROR, transport_message),
                },
            },
        }
    }
}

impl IntoResponse for RelayResult {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::{relay_response, UpstreamResponse};
    use crate::routing::ROUTES;

    fn read_policy() -> &'static RelayPolicy {
        &ROUTES[0].policy
    }

    fn write_policy() -> &'static RelayPolicy {
        &ROUTES[2].policy
    }

    fn relay(status: u16, text: &str, policy: &RelayPolicy) -> RelayResult {
        let upstream = UpstreamResponse {
            status: StatusCode::from_u16(status).unwrap(),
            text: text.to_string(),
        };
        RelayResult::from_outcome(relay_response(&upstream), policy)
    }

    #[test]
    fn test_created_is_normalized_to_ok() {
        let result = relay(201, r#"{"id":42}"#, write_policy());
        assert_eq!(result, RelayResult::ok(json!({"id": 42})));
    }

    #[test]
    fn test_mapping_is_repeatable() {
        for (status, text) in [(200, "{}"), (422, r#"{"message":"x"}"#), (200, "not json"), (500, "")] {
            assert_eq!(relay(status, text, write_policy()), relay(status, text, write_policy()));
        }
    }

    #[test]
    fn test_passthrough_keeps_upstream_status_and_message() {
        let result = relay(422, r#"{"message":"duplicate extension"}"#, write_policy());
        assert_eq!(result.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(result.body, json!({"message": "duplicate extension"}));
    }

    #[test]
    fn test_passthrough_falls_back_to_route_message() {
        let result = relay(403, r#"{"message":null}"#, write_policy());
        assert_eq!(result.status, StatusCode::FORBIDDEN);
        assert_eq!(result.body, json!({"message": "Failed to create extension on PBX."}));

        let result = relay(403, "{}", &ROUTES[1].policy);
        assert_eq!(result.body, json!({"message": "Failed to create user on PBX."}));
    }

    #[test]
    fn test_passthrough_unparsable_is_500() {
        let result = relay(200, "not json", write_policy());
        assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(result.body, json!({"message": "Failed to parse response from PBX API."}));
    }

    #[test]
    fn test_strict_collapses_failures() {
        for (status, text) in [(404, r#"{"message":"nope"}"#), (200, "<html>"), (502, "")] {
            let result = relay(status, text, read_policy());
            assert_eq!(result.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(result.body, json!({"message": "Error fetching PBX data"}));
        }
        assert_eq!(relay(200, "[1]", read_policy()), RelayResult::ok(json!([1])));
    }

    #[test]
    fn test_validation_is_400_on_any_policy() {
        let outcome = Err(RelayError::MissingFields(vec!["email"]));
        let result = RelayResult::from_outcome(outcome, write_policy());
        assert_eq!(result.status, StatusCode::BAD_REQUEST);
        assert_eq!(result.body, json!({"message": "Missing required fields: email"}));
    }
}
