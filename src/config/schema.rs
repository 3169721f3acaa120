//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

/// Root configuration for the PBX relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Upstream PBX API location and credentials.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,

    /// Maximum accepted inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            max_body_bytes: 100 * 1024,
        }
    }
}

/// Upstream PBX administration API.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every upstream path is appended to
    /// (e.g., "https://pbx.example.com/webapi").
    pub base_url: String,

    /// Basic-Auth username shared by every upstream call.
    pub username: String,

    /// Basic-Auth password. Only set from `PBX_RELAY_UPSTREAM_PASSWORD`;
    /// config files can neither supply nor receive it.
    #[serde(skip)]
    pub password: String,

    /// Total time allowed for one upstream call. Unset means no limit.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pbx.example.com/webapi".to_string(),
            username: String::new(),
            password: String::new(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// The process-wide identity used for every upstream call.
    pub fn credential(&self) -> UpstreamCredential {
        UpstreamCredential::new(self.username.clone(), self.password.clone())
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Username/password pair sent as Basic Auth on every upstream call.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamCredential {
    username: String,
    password: String,
}

impl UpstreamCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Build the `Authorization` header value.
    ///
    /// Called once at startup; the result is shared by all requests and is
    /// flagged sensitive so it never shows up in header debug output.
    pub fn authorization_header(&self) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
        let token = B64.encode(format!("{}:{}", self.username, self.password));
        let mut value = HeaderValue::from_str(&format!("Basic {token}"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for UpstreamCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
