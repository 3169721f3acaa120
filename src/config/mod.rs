//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → PBX_RELAY_* environment overrides (credentials live here)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → read once at startup, shared by reference
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig, UpstreamConfig,
    UpstreamCredential,
};
pub use validation::ValidationError;
