//! Path to upstream URL translation.
//!
//! # Responsibilities
//! - Split the request target on its first `/` into subdomain and remainder
//! - Reject targets that cannot name a host inside the upstream family
//! - Build the absolute upstream URL
//!
//! # Design Decisions
//! - Query strings travel inside the remainder (split is on the first slash only)
//! - Subdomain restricted to `[A-Za-z0-9.-]` so the authority cannot be
//!   steered outside the upstream domain (`evil.com#`, `user@host`)
//! - Pure: same input always yields the same URL

use url::Url;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;

/// A request target split into its upstream parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub subdomain: &'a str,
    pub remainder: &'a str,
}

impl<'a> Route<'a> {
    /// Parse a request target such as `/users/v1/users/1?x=1`.
    pub fn parse(target: &'a str) -> Result<Self, ProxyError> {
        let trimmed = target.strip_prefix('/').unwrap_or(target);
        let (subdomain, remainder) = trimmed
            .split_once('/')
            .ok_or_else(|| ProxyError::InvalidRoute(target.to_string()))?;

        if !is_valid_subdomain(subdomain) {
            return Err(ProxyError::InvalidRoute(target.to_string()));
        }

        Ok(Self {
            subdomain,
            remainder,
        })
    }

    /// Absolute upstream URL for this route.
    pub fn upstream_url(&self, upstream: &UpstreamConfig) -> Result<Url, ProxyError> {
        let raw = format!(
            "{}://{}.{}/{}",
            upstream.scheme, self.subdomain, upstream.domain, self.remainder
        );
        Url::parse(&raw).map_err(|e| ProxyError::InvalidRoute(format!("{raw}: {e}")))
    }
}

fn is_valid_subdomain(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// Resolve a request target straight to its upstream URL.
pub fn resolve(target: &str, upstream: &UpstreamConfig) -> Result<Url, ProxyError> {
    Route::parse(target)?.upstream_url(upstream)
}
