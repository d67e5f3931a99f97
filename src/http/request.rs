//! Request handling and transformation.
//!
//! # Responsibilities
//! - Extract the request target used for routing (path + query)
//! - Buffer the inbound body within the configured limit
//! - Prepare the scrubbed request that is forwarded upstream
//!
//! # Design Decisions
//! - Bodies are buffered whole so every retry resends identical bytes
//! - Original headers are filtered, never mutated in place

use axum::body::{Body, Bytes};
use axum::http::{request::Parts, Request};
use url::Url;

use crate::error::ProxyError;
use crate::security::headers::outbound_request_headers;
use crate::upstream::UpstreamRequest;

/// The raw request target (`/sub/path?query`) as received.
pub fn request_target(request: &Request<Body>) -> &str {
    request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/")
}

/// Read the whole body, failing once it grows past `limit` bytes.
pub async fn buffer_body(body: Body, limit: usize) -> Result<Bytes, ProxyError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        tracing::debug!(error = %e, limit, "Failed to buffer request body");
        ProxyError::PayloadTooLarge
    })
}

/// Build the upstream request for `url` from the inbound parts and body.
pub fn upstream_request(parts: &Parts, url: Url, body: Bytes) -> UpstreamRequest {
    UpstreamRequest {
        method: parts.method.clone(),
        url,
        headers: outbound_request_headers(&parts.headers),
        body,
    }
}
