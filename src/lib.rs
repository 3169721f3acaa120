//! PBX administration relay.
//!
//! Validates inbound JSON payloads, forwards them with a shared Basic-Auth
//! identity to a single upstream PBX API, and relays the upstream reply.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;
pub mod routing;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
