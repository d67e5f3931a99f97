//! Upstream HTTP transport.
//!
//! # Responsibilities
//! - Issue one upstream call and buffer the whole response
//! - Classify failures that prevented a response from being obtained
//!
//! # Design Decisions
//! - Connection pooling, TLS and keep-alive belong to `reqwest`
//! - Redirects are not followed; 3xx goes back to the client as-is
//! - Environment proxy settings are ignored; upstream is dialled directly
//! - A failure while reading the body counts as a transport failure

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use futures_util::future::{BoxFuture, FutureExt};
use thiserror::Error;
use url::Url;

use crate::config::TimeoutConfig;

/// A fully buffered request bound for the upstream.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Failure to obtain any response from the upstream.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("reading response body failed: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            Self::Body(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Something that can carry a request to the upstream.
///
/// The production implementation is [`HttpTransport`]; tests plug in
/// scripted transports to observe attempts.
pub trait Transport: Send + Sync + 'static {
    fn send<'a>(
        &'a self,
        request: &'a UpstreamRequest,
    ) -> BoxFuture<'a, Result<UpstreamResponse, TransportError>>;
}

/// `reqwest`-backed transport with a pooled client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeouts.request())
            .pool_idle_timeout(timeouts.idle())
            .redirect(reqwest::redirect::Policy::none())
            .no_proxy()
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        request: &'a UpstreamRequest,
    ) -> BoxFuture<'a, Result<UpstreamResponse, TransportError>> {
        async move {
            let mut builder = self
                .client
                .request(request.method.clone(), request.url.clone())
                .headers(request.headers.clone());
            if !request.body.is_empty() {
                builder = builder.body(request.body.clone());
            }

            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok::<_, TransportError>(UpstreamResponse {
                status,
                headers,
                body,
            })
        }
        .boxed()
    }
}
