//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use futures_util::future::{BoxFuture, FutureExt};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use roblox_proxy::config::ProxyConfig;
use roblox_proxy::upstream::{Transport, TransportError, UpstreamRequest, UpstreamResponse};
use roblox_proxy::HttpServer;

type Handler = dyn Fn(&UpstreamRequest) -> Result<UpstreamResponse, TransportError> + Send + Sync;

/// In-process upstream that records every request it receives.
pub struct MockUpstream {
    handler: Box<Handler>,
    requests: Mutex<Vec<UpstreamRequest>>,
}

impl MockUpstream {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&UpstreamRequest) -> Result<UpstreamResponse, TransportError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with `status` and `body`.
    pub fn responding(status: u16, body: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(response(status, body)))
    }

    /// Echoes the request body back with status 200.
    pub fn echo() -> Arc<Self> {
        Self::new(|req| {
            Ok(UpstreamResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: req.body.clone(),
            })
        })
    }

    /// Fails every call at the transport level.
    pub fn unreachable() -> Arc<Self> {
        Self::new(|_| Err(TransportError::Connect("connection refused".into())))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for MockUpstream {
    fn send<'a>(
        &'a self,
        request: &'a UpstreamRequest,
    ) -> BoxFuture<'a, Result<UpstreamResponse, TransportError>> {
        self.requests.lock().unwrap().push(request.clone());
        let outcome = (self.handler)(request);
        async move { outcome }.boxed()
    }
}

/// A JSON upstream response.
pub fn response(status: u16, body: &'static str) -> UpstreamResponse {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", "application/json".parse().unwrap());
    headers.insert("x-upstream", "roblox".parse().unwrap());
    UpstreamResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers,
        body: Bytes::from_static(body.as_bytes()),
    }
}

/// Default config with a known retry bound.
pub fn test_config() -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.retries.max_retries = 3;
    config
}

/// Build the layered proxy router around `upstream`.
pub fn proxy(config: ProxyConfig, upstream: Arc<MockUpstream>) -> Router {
    HttpServer::with_transport(config, upstream).router()
}

/// Drive one request through `router` and collect the full response.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
