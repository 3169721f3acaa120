//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_BIND: &str = "PBX_RELAY_BIND";
pub const ENV_UPSTREAM_URL: &str = "PBX_RELAY_UPSTREAM_URL";
pub const ENV_UPSTREAM_USERNAME: &str = "PBX_RELAY_UPSTREAM_USERNAME";
pub const ENV_UPSTREAM_PASSWORD: &str = "PBX_RELAY_UPSTREAM_PASSWORD";
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "PBX_RELAY_UPSTREAM_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file (if given), then environment overrides,
/// then validation.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let config = match path {
        Some(path) => parse_file(path)?,
        None => RelayConfig::default(),
    };
    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Overlay `PBX_RELAY_*` variables on top of a file-sourced config.
///
/// `lookup` abstracts the environment so callers can supply a fixed map.
pub fn apply_env_overrides<F>(mut config: RelayConfig, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(bind) = lookup(ENV_BIND) {
        config.listener.bind_address = bind;
    }
    if let Some(url) = lookup(ENV_UPSTREAM_URL) {
        config.upstream.base_url = url;
    }
    if let Some(username) = lookup(ENV_UPSTREAM_USERNAME) {
        config.upstream.username = username;
    }
    if let Some(password) = lookup(ENV_UPSTREAM_PASSWORD) {
        config.upstream.password = password;
    }
    if let Some(raw) = lookup(ENV_UPSTREAM_TIMEOUT_SECS) {
        let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Env {
            var: ENV_UPSTREAM_TIMEOUT_SECS,
            value: raw.clone(),
        })?;
        config.upstream.timeout_secs = Some(secs);
    }
    Ok(config)
}
