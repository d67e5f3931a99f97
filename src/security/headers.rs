//! Header filtering between client and upstream.
//!
//! # Responsibilities
//! - Strip the access key before a request leaves the proxy
//! - Strip `Host` and hop-by-hop headers in both directions
//! - Collapse repeated response headers (last value wins)
//!
//! # Design Decisions
//! - Header names are matched case-insensitively (`HeaderName` is lowercase)
//! - Everything else is copied verbatim, cookies included

use axum::http::{header, HeaderMap, HeaderName};

use crate::security::access_key::PROXY_KEY_HEADER;

/// Connection-scoped headers never cross the proxy.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-connection"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Headers to send upstream for an inbound request.
pub fn outbound_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if name.as_str() == PROXY_KEY_HEADER || *name == header::HOST || is_hop_by_hop(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// Headers to return to the client for an upstream response.
pub fn inbound_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_hop_by_hop(name) {
            continue;
        }
        headers.insert(name.clone(), value.clone());
    }
    headers
}
