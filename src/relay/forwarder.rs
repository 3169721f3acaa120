//! Outbound calls to the upstream PBX API.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value};
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::RelayError;

/// Status and raw body of an upstream reply, before any JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub text: String,
}

/// Error raised while building the forwarder at startup.
#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    #[error("credential cannot be encoded as a header: {0}")]
    Credential(#[from] reqwest::header::InvalidHeaderValue),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Performs the single outbound call of each relayed request.
///
/// Holds one pooled client and the precomputed `Authorization` value; both
/// are shared by every request.
#[derive(Debug, Clone)]
pub struct UpstreamForwarder {
    client: reqwest::Client,
    authorization: HeaderValue,
}

impl UpstreamForwarder {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ForwarderError> {
        let authorization = config.credential().authorization_header()?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            authorization,
        })
    }

    /// Send `method` to `url`, with `body` serialized as JSON when present.
    ///
    /// Any HTTP status is a normal outcome. Only transport-level failures
    /// return an error.
    pub async fn forward(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Map<String, Value>>,
    ) -> Result<UpstreamResponse, RelayError> {
        let mut request = self
            .client
            .request(method, url.clone())
            .header(AUTHORIZATION, self.authorization.clone());

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|e| RelayError::MalformedBody(e.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        Ok(UpstreamResponse { status, text })
    }
}
