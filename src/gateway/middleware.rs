//! Session-validation middleware.
//!
//! Every request to the reserved forwarding prefix passes through here. The
//! caller's bearer token is validated against the session validator port and
//! the resolved [`AuthenticatedSession`] - which carries the upstream
//! credential - is made available to the forwarding handler via request
//! extensions. The inbound session token itself never travels upstream.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::ports::{AuthError, SessionValidator};

/// Shared validator handle used as middleware state.
pub type SharedValidator = Arc<dyn SessionValidator>;

/// Rejects requests without a valid session.
pub async fn require_session(
    State(validator): State<SharedValidator>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let Some(token) = token else {
        return unauthorized("Missing session token");
    };

    match validator.validate(token).await {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(AuthError::InvalidToken) => unauthorized("Invalid session token"),
        Err(AuthError::ServiceUnavailable(message)) => {
            tracing::error!("session validation unavailable: {}", message);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "Session validation unavailable",
                    "code": "AUTH_UNAVAILABLE",
                })),
            )
                .into_response()
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message,
            "code": "UNAUTHORIZED",
        })),
    )
        .into_response()
}
