//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! UpstreamRequest (method, url, scrubbed headers, buffered body)
//!     → forwarder.rs (attempt loop, RetryPolicy)
//!     → transport.rs (reqwest call, whole-body read)
//!     → 200: store in ResponseCache
//!     → UpstreamResponse or UpstreamExhausted
//! ```

pub mod forwarder;
pub mod transport;

pub use forwarder::Forwarder;
pub use transport::{HttpTransport, Transport, TransportError, UpstreamRequest, UpstreamResponse};
