//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     ROUTES (static table)
//!     → resolve upstream paths against the configured base URL
//!     → one axum route per entry, sharing one handler
//! ```
//!
//! # Design Decisions
//! - Routes are data, compiled at startup, immutable at runtime
//! - Upstream URLs are resolved once, never per request

pub mod table;

pub use table::{resolve_routes, RelayPolicy, ResolvedRoute, RouteSpec, ROUTES};
