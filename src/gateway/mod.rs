//! The authenticated forwarding gateway.
//!
//! A same-origin HTTP surface that proxies completion traffic to the real
//! upstream service. Inbound requests under the reserved path prefix are
//! session-checked, re-credentialed with the upstream secret, and streamed
//! through. The browser-analogue client only ever holds a session token.

mod error;
mod forward;
mod middleware;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, UpstreamConfig};
use crate::ports::SessionValidator;

pub use error::GatewayError;
pub use middleware::{require_session, SharedValidator};

/// Shared state for the gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    /// Validates inbound session tokens.
    pub validator: SharedValidator,
    /// Where and how to reach the completion service.
    pub upstream: UpstreamConfig,
    /// Outbound HTTP client, built once with the configured timeout.
    pub http: reqwest::Client,
}

impl GatewayState {
    /// Wires a gateway state from its collaborators.
    pub fn new(
        validator: Arc<dyn SessionValidator>,
        upstream: UpstreamConfig,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(upstream.timeout())
            .build()?;

        Ok(Self {
            validator,
            upstream,
            http,
        })
    }
}

/// Builds the gateway router.
///
/// Everything under `/{prefix}/*` requires a valid session; `/health` does
/// not. Any HTTP method is forwarded - the upstream decides what it accepts.
pub fn app(state: GatewayState) -> Router {
    let forward_route = format!("/{}/*path", state.upstream.path_prefix);

    Router::new()
        .route(&forward_route, any(forward::forward))
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state.validator),
            require_session,
        ))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe, deliberately outside the session check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds a CORS layer from the configured origins, if any.
pub fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_layer_absent_without_origins() {
        let config = ServerConfig::default();
        assert!(cors_layer(&config).is_none());
    }

    #[test]
    fn cors_layer_present_with_origins() {
        let config = ServerConfig {
            cors_origins: Some("http://localhost:5173".to_string()),
            ..Default::default()
        };
        assert!(cors_layer(&config).is_some());
    }
}
