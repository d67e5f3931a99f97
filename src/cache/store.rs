//! Concurrent response store with lazy expiry.

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::cache::entry::CacheEntry;
use crate::cache::key::CacheKey;

/// A thread-safe cache of upstream responses.
///
/// Cloning is cheap and every clone shares the same map. Expired entries are
/// only dropped when a lookup observes them; there is no background sweep.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    inner: Arc<DashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create an empty cache applying `ttl` to every stored entry.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the entry for `key` if it is still fresh.
    pub fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.lookup_at(key, Instant::now())
    }

    pub fn lookup_at(&self, key: &CacheKey, now: Instant) -> Option<CacheEntry> {
        match self.inner.get(key) {
            Some(entry) if entry.is_fresh_at(now) => return Some(entry.value().clone()),
            Some(_) => {}
            None => return None,
        }

        // Only evict what was seen expired; a concurrent store may have
        // replaced it with a fresh entry in between.
        self.inner.remove_if(key, |_, entry| !entry.is_fresh_at(now));
        None
    }

    /// Insert `entry`, replacing anything stored under `key`.
    pub fn store(&self, key: CacheKey, entry: CacheEntry) {
        self.inner.insert(key, entry);
    }

    /// Store an upstream response with the cache-wide TTL.
    pub fn store_response(&self, key: CacheKey, status: StatusCode, headers: HeaderMap, body: Bytes) {
        let entry = CacheEntry::new(status, headers, body, self.ttl);
        self.store(key, entry);
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn key(url: &str, cookie: &str) -> CacheKey {
        CacheKey {
            url: url.to_string(),
            cookie: cookie.as_bytes().to_vec(),
        }
    }

    fn ok_entry(body: &'static str, ttl: Duration) -> CacheEntry {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        CacheEntry::new(StatusCode::OK, headers, Bytes::from_static(body.as_bytes()), ttl)
    }

    #[test]
    fn test_cache_operations() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let k = key("https://users.roblox.com/v1/users/1", "");

        // Initial check
        assert!(cache.lookup(&k).is_none());

        cache.store_response(
            k.clone(),
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from_static(b"{\"id\":1}"),
        );
        let entry = cache.lookup(&k).unwrap();
        assert_eq!(entry.status, StatusCode::OK);
        assert_eq!(&entry.body[..], b"{\"id\":1}");

        // Different cookie, different partition
        assert!(cache.lookup(&key("https://users.roblox.com/v1/users/1", "s=1")).is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let k = key("https://a.roblox.com/x", "");

        cache.store(k.clone(), ok_entry("first", Duration::from_secs(60)));
        cache.store(k.clone(), ok_entry("second", Duration::from_secs(60)));

        assert_eq!(cache.len(), 1);
        assert_eq!(&cache.lookup(&k).unwrap().body[..], b"second");
    }

    #[test]
    fn test_expired_entry_is_evicted_on_read() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let k = key("https://a.roblox.com/x", "");

        cache.store(k.clone(), ok_entry("stale", Duration::from_secs(10)));
        let later = Instant::now() + Duration::from_secs(10);

        // Exactly at expiry counts as expired
        assert!(cache.lookup_at(&k, later).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_fresh_entry_survives_stale_eviction() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let k = key("https://a.roblox.com/x", "");

        cache.store(k.clone(), ok_entry("fresh", Duration::from_secs(300)));
        let soon = Instant::now() + Duration::from_secs(1);

        assert!(cache.lookup_at(&k, soon).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_window() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let k = key("https://a.roblox.com/x", "");
        cache.store_response(k.clone(), StatusCode::OK, HeaderMap::new(), Bytes::new());

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.lookup(&k).is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.lookup(&k).is_none());
    }

    #[test]
    fn test_concurrent_access() {
        let cache = ResponseCache::new(Duration::from_secs(300));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for j in 0..100 {
                        let k = key(&format!("https://a.roblox.com/{}", j % 10), "");
                        cache.store(k.clone(), ok_entry("v", Duration::from_secs(60)));
                        assert!(cache.lookup(&k).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 10);
    }
}
