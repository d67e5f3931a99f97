//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → per-request span (request id, method, path) from the HTTP layer
//!
//! Consumers:
//!     → logging.rs subscriber → stdout
//! ```

pub mod logging;
