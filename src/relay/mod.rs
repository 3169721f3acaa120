//! Request relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound JSON object
//!     → validator.rs (required keys present and truthy?)      ── no → 400
//!     → forwarder.rs (one upstream call, Basic Auth injected) ── transport error → 500
//!     → response.rs (parse text, then look at status)
//!     → RelayResult sent to the caller
//! ```

pub mod forwarder;
pub mod response;
pub mod validator;

pub use forwarder::{ForwarderError, UpstreamForwarder, UpstreamResponse};
pub use response::relay_response;
pub use validator::{is_truthy, missing_fields};
