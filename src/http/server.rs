//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing span with request ID, access gate)
//! - Bind server to listener with graceful shutdown
//! - Run the pipeline: resolve → cache lookup → forward → respond

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::cache::{CacheKey, ResponseCache};
use crate::config::{ProxyConfig, UpstreamConfig};
use crate::error::ProxyError;
use crate::http::{request, response};
use crate::resilience::RetryPolicy;
use crate::routing;
use crate::security::{access_key_middleware, AccessGate};
use crate::upstream::{Forwarder, HttpTransport, Transport, TransportError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamConfig>,
    pub forwarder: Forwarder,
    pub max_body_size: usize,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server that reaches the upstream over HTTP(S).
    pub fn new(config: ProxyConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.timeouts)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a server around an arbitrary transport.
    pub fn with_transport(config: ProxyConfig, transport: Arc<dyn Transport>) -> Self {
        if config.retries.max_retries == 0 {
            tracing::warn!("RETRIES is 0: every request will fail without contacting upstream");
        }

        let cache = config
            .cache
            .enabled
            .then(|| ResponseCache::new(config.cache.ttl()));
        let forwarder = Forwarder::new(
            transport,
            RetryPolicy::new(config.retries.max_retries),
            cache,
        );

        let state = AppState {
            upstream: Arc::new(config.upstream.clone()),
            forwarder,
            max_body_size: config.security.max_body_size,
        };
        let gate = AccessGate::new(config.security.access_key.clone());

        let router = Self::build_router(state, gate);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, gate: AccessGate) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(gate, access_key_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        id = %Uuid::new_v4(),
                        method = %req.method(),
                        path = %req.uri().path(),
                    )
                }),
            )
    }

    /// The fully layered router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.domain,
            cache_enabled = self.config.cache.enabled,
            gate_enabled = self.config.security.access_key.is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    match handle(state, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(error = %e, error_type = e.error_type(), "Request failed");
            e.into_response()
        }
    }
}

async fn handle(state: AppState, req: Request<Body>) -> Result<Response, ProxyError> {
    // 1. Resolve upstream URL
    let url = routing::resolve(request::request_target(&req), &state.upstream)?;
    let key = CacheKey::new(&url, req.headers());

    // 2. Cache lookup
    if let Some(cache) = state.forwarder.cache() {
        if let Some(entry) = cache.lookup(&key) {
            tracing::debug!(url = %url, "Cache hit");
            return Ok(response::from_cache(entry));
        }
        tracing::debug!(url = %url, "Cache miss");
    }

    // 3. Buffer body and scrub headers
    let (parts, body) = req.into_parts();
    let body = request::buffer_body(body, state.max_body_size).await?;
    let upstream_request = request::upstream_request(&parts, url, body);

    // 4. Forward on a detached task so a client disconnect does not cancel
    //    an attempt that has already started
    let forwarder = state.forwarder.clone();
    let upstream_response =
        tokio::spawn(async move { forwarder.forward(&upstream_request, &key).await })
            .await
            .map_err(|e| ProxyError::Internal(e.to_string()))??;

    Ok(response::from_upstream(upstream_response))
}
