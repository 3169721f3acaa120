//! Interpretation of upstream replies.

use serde_json::Value;

use crate::error::RelayError;
use crate::relay::forwarder::UpstreamResponse;
use crate::relay::validator::is_truthy;

/// Decide what an upstream reply means for the caller.
///
/// The body is parsed before the status is looked at, so a malformed body is
/// reported as unparsable whatever the status. A 2xx reply yields its payload;
/// anything else becomes [`RelayError::Application`] carrying the upstream's
/// `message` when it is truthy.
///
/// Pure: the same input always maps to the same outcome.
pub fn relay_response(upstream: &UpstreamResponse) -> Result<Value, RelayError> {
    let parsed: Value = serde_json::from_str(&upstream.text).map_err(|e| RelayError::Unparsable {
        status: upstream.status,
        detail: e.to_string(),
    })?;

    if upstream.status.is_success() {
        return Ok(parsed);
    }

    let message = match &parsed {
        // A bare `null` error body has no fields to read.
        Value::Null => {
            return Err(RelayError::Unparsable {
                status: upstream.status,
                detail: "error body is null".to_string(),
            })
        }
        Value::Object(map) => map.get("message").filter(|m| is_truthy(m)).cloned(),
        _ => None,
    };

    Err(RelayError::Application {
        status: upstream.status,
        message,
    })
}
