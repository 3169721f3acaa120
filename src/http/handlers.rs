//! Route handlers.
//!
//! Every relayed route runs the same sequence:
//! validate (write routes only) → forward → relay. Failures at any step are
//! converted to a JSON body here; nothing escapes the handler.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::error::RelayError;
use crate::http::request::{parse_json_object, request_id};
use crate::http::response::RelayResult;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::{missing_fields, relay_response};
use crate::routing::ResolvedRoute;

/// `GET /`: liveness greeting, no upstream call.
pub async fn greeting(State(state): State<AppState>) -> String {
    state.greeting.to_string()
}

/// Unknown paths.
pub async fn not_found() -> RelayResult {
    RelayResult::message(StatusCode::NOT_FOUND, "Not found")
}

/// Shared handler behind every entry of the routing table.
pub async fn relay(state: AppState, route: &ResolvedRoute, headers: HeaderMap, body: Bytes) -> RelayResult {
    let start = Instant::now();
    let name = route.spec.name;
    let request_id = request_id(&headers).to_string();

    let outcome = relay_once(&state, route, &headers, &body).await;
    if let Err(err) = &outcome {
        log_failure(name, &request_id, err);
        metrics::record_failure(name, err.kind());
    }

    let result = RelayResult::from_outcome(outcome, &route.spec.policy);
    tracing::info!(
        request_id = %request_id,
        route = name,
        status = result.status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Relay finished"
    );
    metrics::record_request(name, result.status.as_u16(), start);
    result
}

async fn relay_once(
    state: &AppState,
    route: &ResolvedRoute,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Value, RelayError> {
    let spec = route.spec;

    let payload = if spec.forwards_body() {
        let object = parse_json_object(headers, body)?;
        let missing = missing_fields(&object, spec.required_fields);
        if !missing.is_empty() {
            return Err(RelayError::MissingFields(missing));
        }
        Some(object)
    } else {
        None
    };

    let upstream = state
        .forwarder
        .forward(spec.method.clone(), &route.upstream_url, payload.as_ref())
        .await?;

    tracing::debug!(
        route = spec.name,
        status = upstream.status.as_u16(),
        body = %upstream.text,
        "Raw upstream response"
    );

    relay_response(&upstream)
}

fn log_failure(route: &'static str, request_id: &str, err: &RelayError) {
    match err {
        RelayError::MissingFields(missing) => {
            tracing::warn!(request_id = %request_id, route, missing = ?missing, "Rejected: missing fields")
        }
        RelayError::MalformedBody(detail) => {
            tracing::warn!(request_id = %request_id, route, detail = %detail, "Rejected: malformed body")
        }
        RelayError::Transport(e) => {
            tracing::error!(request_id = %request_id, route, error = %e, "Upstream request failed")
        }
        RelayError::Application { status, .. } => {
            tracing::warn!(request_id = %request_id, route, status = status.as_u16(), "Upstream rejected request")
        }
        RelayError::Unparsable { status, detail } => tracing::error!(
            request_id = %request_id,
            route,
            status = status.as_u16(),
            detail = %detail,
            "Upstream response is not valid JSON"
        ),
    }
}
