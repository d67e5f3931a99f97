//! Cached upstream responses.

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use std::time::Duration;
use tokio::time::Instant;

/// An upstream response eligible for reuse until `expires_at`.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub expires_at: Instant,
}

impl CacheEntry {
    /// Create an entry that expires `ttl` from now.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, ttl: Duration) -> Self {
        Self {
            status,
            headers,
            body,
            expires_at: Instant::now() + ttl,
        }
    }

    /// An entry is fresh strictly before its expiry instant.
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }
}
