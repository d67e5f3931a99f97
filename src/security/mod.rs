//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_key.rs (PROXYKEY gate, 407 on mismatch)
//!     → Pass to routing
//!
//! Outgoing request / returning response:
//!     → headers.rs (strip PROXYKEY, Host, hop-by-hop)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a configured key is required on every request
//! - The shared secret never reaches the upstream

pub mod access_key;
pub mod headers;

pub use access_key::{access_key_middleware, AccessGate, PROXY_KEY_HEADER};
