//! Access key gate.
//! Enforces the shared `PROXYKEY` secret before any routing happens.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ProxyError;

/// Header carrying the shared secret.
pub const PROXY_KEY_HEADER: &str = "proxykey";

/// State required for the access gate.
#[derive(Clone, Debug, Default)]
pub struct AccessGate {
    key: Option<Arc<str>>,
}

impl AccessGate {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.map(Arc::from),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Check request headers against the configured key.
    ///
    /// A missing header compares as the empty string; values must match
    /// byte-for-byte.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), ProxyError> {
        let Some(expected) = self.key.as_deref() else {
            return Ok(());
        };

        let presented = headers
            .get(PROXY_KEY_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();

        if presented == expected.as_bytes() {
            Ok(())
        } else {
            Err(ProxyError::Unauthorized)
        }
    }
}

pub async fn access_key_middleware(
    State(gate): State<AccessGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // Passthrough mode when no key is configured
    if !gate.is_enabled() {
        return next.run(req).await;
    }

    match gate.check(req.headers()) {
        Ok(()) => next.run(req).await,
        Err(e) => {
            tracing::warn!(path = %req.uri().path(), "Rejected request with bad access key");
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_open_mode_allows_everything() {
        let gate = AccessGate::new(None);
        assert!(gate.check(&HeaderMap::new()).is_ok());
        assert!(gate.check(&headers_with("proxykey", "anything")).is_ok());
    }

    #[test]
    fn test_matching_key_passes() {
        let gate = AccessGate::new(Some("s3cret".into()));
        assert!(gate.check(&headers_with("proxykey", "s3cret")).is_ok());
    }

    #[test]
    fn test_mismatch_or_absence_rejected() {
        let gate = AccessGate::new(Some("s3cret".into()));
        assert!(matches!(
            gate.check(&HeaderMap::new()),
            Err(ProxyError::Unauthorized)
        ));
        assert!(gate.check(&headers_with("proxykey", "S3CRET")).is_err());
        assert!(gate.check(&headers_with("proxykey", "s3cret ")).is_err());
    }

    #[test]
    fn test_empty_key_accepts_missing_header() {
        let gate = AccessGate::new(Some(String::new()));
        assert!(gate.check(&HeaderMap::new()).is_ok());
        assert!(gate.check(&headers_with("proxykey", "x")).is_err());
    }
}
