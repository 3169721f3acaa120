//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, JSON body decoding)
//!     → handlers.rs (validate → forward → relay)
//!     → response.rs (status/body for the caller)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::RelayResult;
pub use server::{AppState, HttpServer, ServerError};
