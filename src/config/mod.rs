//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, TIMEOUT, RETRIES, KEY, ...)
//!     → loader.rs (lookup & parse)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer, which hands pieces to each subsystem
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; no reload
//! - All fields have defaults to allow a bare environment
//! - Validation separates syntactic (parse) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_with, ConfigError};
pub use schema::{
    CacheConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, RetryConfig, SecurityConfig,
    TimeoutConfig, UpstreamConfig,
};
