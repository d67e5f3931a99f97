//! Response cache subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved upstream URL + inbound Cookie
//!     → key.rs (CacheKey)
//!     → store.rs lookup: fresh → serve / expired → evict, miss / absent → miss
//!
//! Upstream 200 response
//!     → entry.rs (CacheEntry, expires_at = now + TTL)
//!     → store.rs store (overwrite)
//! ```
//!
//! # Design Decisions
//! - One entry per key; stores overwrite, racing stores may lose updates
//! - Expiry checked at read time only, no sweeper task
//! - Time comes from `tokio::time::Instant` so tests can pause the clock
//! - Nothing is persisted; the cache lives as long as the process

pub mod entry;
pub mod key;
pub mod store;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use store::ResponseCache;
