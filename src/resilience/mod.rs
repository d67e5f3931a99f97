//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeout enforced by the upstream client (TIMEOUT)
//!     → On transport failure: retries.rs (next attempt or exhausted)
//!     → Exhausted: synthetic 500 to the client
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Retries are bounded and immediate
//! - No circuit breaking: each request stands alone

pub mod retries;

pub use retries::{AttemptState, RetryPolicy};
