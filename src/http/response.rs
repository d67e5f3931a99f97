//! Response construction for the client.
//!
//! # Responsibilities
//! - Turn a fresh upstream response into an axum response
//! - Turn a cached entry into an identical axum response
//!
//! # Design Decisions
//! - Headers were normalised by the forwarder, so both paths copy them as-is
//! - Bodies are complete buffers; the server frames them itself

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::cache::CacheEntry;
use crate::upstream::UpstreamResponse;

fn build(status: StatusCode, headers: HeaderMap, body: Bytes) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

pub fn from_upstream(upstream: UpstreamResponse) -> Response {
    build(upstream.status, upstream.headers, upstream.body)
}

pub fn from_cache(entry: CacheEntry) -> Response {
    build(entry.status, entry.headers, entry.body)
}
