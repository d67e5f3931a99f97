//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request target (path + query)
//!     → resolver.rs (first-slash split, subdomain check)
//!     → Return: upstream Url or InvalidRoute (400)
//! ```
//!
//! # Design Decisions
//! - No route table: the path itself names the upstream host
//! - Deterministic: same input always resolves to the same URL
//! - Runs after the access gate, so bad keys are rejected first

pub mod resolver;

pub use resolver::{resolve, Route};
