//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace span, access gate)
//!     → request.rs (target extraction, body buffering, header scrubbing)
//!     → [routing resolves upstream URL]
//!     → [cache lookup / forwarder]
//!     → response.rs (fresh or cached response to client)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
