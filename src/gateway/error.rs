//! Gateway error types and their HTTP representation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors raised while forwarding a request upstream.
///
/// These cover failures of the forwarding machinery itself. When the
/// upstream *answers*, even with an error status, the gateway relays that
/// answer verbatim instead of raising one of these.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The upstream service could not be reached.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The upstream did not answer within the configured deadline.
    #[error("upstream timed out after {timeout_secs}s")]
    UpstreamTimeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// The upstream answered with something the gateway refuses to relay.
    #[error("invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    /// The inbound request could not be forwarded as-is.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl GatewayError {
    /// Creates an unreachable error.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::UpstreamUnreachable(message.into())
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidUpstreamResponse(message.into())
    }

    /// Status and machine-readable code for the HTTP representation.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::UpstreamUnreachable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNREACHABLE"),
            Self::UpstreamTimeout { .. } => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            Self::InvalidUpstreamResponse(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(%code, "gateway error: {}", self);
        }
        (
            status,
            Json(json!({
                "error": self.to_string(),
                "code": code,
            })),
        )
            .into_response()
    }
}
