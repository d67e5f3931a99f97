//! Retrying forwarding client.
//!
//! # Responsibilities
//! - Drive attempts through the transport until a response or exhaustion
//! - Normalise response headers once, so fresh and cached replies match
//! - Populate the response cache with 200 responses
//!
//! # Design Decisions
//! - Bounded loop, no recursion and no backoff
//! - Any obtained response is final, whatever its status

use axum::http::StatusCode;
use std::sync::Arc;

use crate::cache::{CacheKey, ResponseCache};
use crate::error::ProxyError;
use crate::resilience::{AttemptState, RetryPolicy};
use crate::security::headers::inbound_response_headers;
use crate::upstream::transport::{Transport, UpstreamRequest, UpstreamResponse};

#[derive(Clone)]
pub struct Forwarder {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    cache: Option<ResponseCache>,
}

impl Forwarder {
    /// Create a forwarder. Passing `None` for `cache` disables caching.
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy, cache: Option<ResponseCache>) -> Self {
        Self {
            transport,
            policy,
            cache,
        }
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    /// Forward `request`, retrying transport failures within the policy bound.
    pub async fn forward(
        &self,
        request: &UpstreamRequest,
        key: &CacheKey,
    ) -> Result<UpstreamResponse, ProxyError> {
        let mut state = AttemptState::start(&self.policy);

        loop {
            match state {
                AttemptState::Attempt(attempt) => match self.transport.send(request).await {
                    Ok(mut response) => {
                        tracing::debug!(
                            url = %request.url,
                            attempt,
                            status = %response.status,
                            "Upstream responded"
                        );
                        response.headers = inbound_response_headers(&response.headers);
                        self.remember(key, &response);
                        return Ok(response);
                    }
                    Err(e) => {
                        tracing::warn!(
                            url = %request.url,
                            attempt,
                            max_retries = self.policy.max_retries(),
                            error = %e,
                            "Upstream transport failure"
                        );
                        state = state.on_transport_error(&self.policy);
                    }
                },
                AttemptState::Exhausted => {
                    tracing::error!(
                        url = %request.url,
                        attempts = self.policy.max_attempts(),
                        "Upstream unreachable, giving up"
                    );
                    return Err(ProxyError::UpstreamExhausted {
                        attempts: self.policy.max_attempts(),
                    });
                }
            }
        }
    }

    fn remember(&self, key: &CacheKey, response: &UpstreamResponse) {
        let Some(cache) = &self.cache else {
            return;
        };
        if response.status != StatusCode::OK {
            return;
        }

        cache.store_response(
            key.clone(),
            response.status,
            response.headers.clone(),
            response.body.clone(),
        );
        tracing::debug!(url = %key.url, ttl = ?cache.ttl(), "Cached upstream response");
    }
}
