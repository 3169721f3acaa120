//! Relay error kinds.
//!
//! Every failure is caught at the route handler and rendered as a JSON
//! `{"message": ...}` body. Which message and status the caller sees depends
//! on the route's [`RelayPolicy`](crate::routing::RelayPolicy); see
//! [`RelayResult::from_outcome`](crate::http::response::RelayResult::from_outcome).

use axum::http::StatusCode;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Required fields absent or falsy. No upstream call was made.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Inbound body was not a JSON object.
    #[error("Malformed JSON body")]
    MalformedBody(String),

    /// The upstream call itself failed (connect, DNS, TLS, timeout, body read).
    #[error("upstream transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status and a JSON body.
    #[error("upstream rejected request with status {status}")]
    Application {
        status: StatusCode,
        /// The upstream's own `message`, when it carried a truthy one.
        message: Option<Value>,
    },

    /// Upstream body could not be interpreted as JSON.
    #[error("unparsable upstream response (status {status}): {detail}")]
    Unparsable { status: StatusCode, detail: String },
}

impl RelayError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingFields(_) => "validation",
            RelayError::MalformedBody(_) => "malformed_body",
            RelayError::Transport(_) => "transport",
            RelayError::Application { .. } => "application",
            RelayError::Unparsable { .. } => "unparsable",
        }
    }
}
