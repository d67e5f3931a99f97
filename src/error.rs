//! Request pipeline error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body sent when the upstream could not be reached within the retry bound.
pub const EXHAUSTED_MESSAGE: &str = "Proxy failed to connect. Please try again.";

/// Body sent when the access gate rejects a request.
pub const UNAUTHORIZED_MESSAGE: &str = "Missing or invalid PROXYKEY header.";

/// Body sent when the request path cannot be resolved to an upstream URL.
pub const INVALID_ROUTE_MESSAGE: &str = "URL format invalid.";

/// Errors that terminate a request inside the proxy.
///
/// Upstream responses with error statuses are not errors here; they are
/// passed through to the client untouched.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("missing or mismatched access key")]
    Unauthorized,

    #[error("upstream unreachable after {attempts} attempts")]
    UpstreamExhausted { attempts: u32 },

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("forwarding task failed: {0}")]
    Internal(String),
}

impl ProxyError {
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidRoute(_) => "invalid_route",
            Self::Unauthorized => "unauthorized",
            Self::UpstreamExhausted { .. } => "upstream_exhausted",
            Self::PayloadTooLarge => "payload_too_large",
            Self::Internal(_) => "internal",
        }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRoute(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::PROXY_AUTHENTICATION_REQUIRED,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UpstreamExhausted { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Clients only ever see the fixed messages
        let message = match &self {
            Self::InvalidRoute(_) => INVALID_ROUTE_MESSAGE,
            Self::Unauthorized => UNAUTHORIZED_MESSAGE,
            Self::PayloadTooLarge => "Request body too large",
            Self::UpstreamExhausted { .. } | Self::Internal(_) => EXHAUSTED_MESSAGE,
        };

        (status, message).into_response()
    }
}
