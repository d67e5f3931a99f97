//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! It is populated from the environment and serialized once at startup so
//! the effective settings appear in the log. The access key never does.

use serde::Serialize;
use std::time::Duration;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream host family requests are rewritten onto.
    pub upstream: UpstreamConfig,

    /// Timeout configuration for the upstream client.
    pub timeouts: TimeoutConfig,

    /// Retry configuration.
    pub retries: RetryConfig,

    /// Response cache configuration.
    pub cache: CacheConfig,

    /// Access key and request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream host family.
///
/// Every request for `/{subdomain}/{rest}` is sent to
/// `{scheme}://{subdomain}.{domain}/{rest}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamConfig {
    pub scheme: String,
    pub domain: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            domain: "roblox.com".to_string(),
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Serialize)]
pub struct TimeoutConfig {
    /// Upstream request timeout (connect + full response read) in seconds.
    pub request_secs: u64,

    /// Idle pooled connection lifetime in seconds.
    pub idle_secs: u64,
}

impl TimeoutConfig {
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            idle_secs: 60,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Serialize)]
pub struct RetryConfig {
    /// Retry bound on transport failure. The attempt counter starts at 1
    /// and the call gives up once it exceeds this value.
    ///
    /// Defaults to 3 when `RETRIES` is unset, where a bare integer parse of
    /// the empty string would give 0 (no attempts at all). `TIMEOUT`
    /// likewise defaults to 30 seconds rather than 0 (no timeout).
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Response cache configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CacheConfig {
    /// Enable the response cache.
    pub enabled: bool,

    /// Time-to-live applied to every stored entry, in seconds.
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300, // 5 minutes
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityConfig {
    /// Required value of the `PROXYKEY` header. `None` disables the gate.
    #[serde(skip_serializing)]
    pub access_key: Option<String>,

    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
