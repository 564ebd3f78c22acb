//! The forwarding handler.
//!
//! Takes an authenticated inbound request, strips the reserved prefix,
//! swaps the session token for the session's upstream credential, and
//! streams the body both ways - no buffering, no parsing of the payload
//! beyond a content-type check on the way back.

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Extension;

use crate::ports::{AuthenticatedSession, PROVIDER_HINT_HEADER};

use super::error::GatewayError;
use super::GatewayState;

/// Forwards one request to the upstream completion service.
///
/// The wildcard `path` is everything after the reserved prefix; it is
/// appended verbatim (query string included) to the upstream base URL.
pub async fn forward(
    State(state): State<GatewayState>,
    Path(path): Path<String>,
    Extension(session): Extension<AuthenticatedSession>,
    request: Request,
) -> Result<Response, GatewayError> {
    // axum speaks http 1.x, reqwest 0.11 speaks http 0.2: convert by value.
    let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
        .map_err(|_| GatewayError::BadRequest(format!("unsupported method {}", request.method())))?;

    let url = upstream_url(&state.upstream.base_url, &path, request.uri().query());

    let provider_hint = request
        .headers()
        .get(PROVIDER_HINT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    tracing::debug!(%url, subject = %session.subject, "forwarding to upstream");

    let body = reqwest::Body::wrap_stream(request.into_body().into_data_stream());

    let mut outbound = state
        .http
        .request(method, &url)
        .header("Authorization", format!("Bearer {}", session.access_token()))
        .header("Content-Type", "application/json")
        .body(body);

    if let Some(hint) = provider_hint {
        outbound = outbound.header(PROVIDER_HINT_HEADER, hint);
    }

    let upstream = outbound.send().await.map_err(|err| {
        if err.is_timeout() {
            GatewayError::UpstreamTimeout {
                timeout_secs: state.upstream.timeout_secs,
            }
        } else if err.is_connect() {
            GatewayError::unreachable(format!("connection failed: {}", err))
        } else {
            GatewayError::unreachable(err.to_string())
        }
    })?;

    relay(upstream)
}

/// Joins the upstream base URL, the stripped path, and the original query.
fn upstream_url(base_url: &str, path: &str, query: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    match query {
        Some(query) => format!("{}/{}?{}", base, path, query),
        None => format!("{}/{}", base, path),
    }
}

/// Relays an upstream answer back to the caller, streaming the body.
///
/// Status and payload pass through untouched - upstream error statuses
/// included, so the caller sees exactly what the completion service said.
/// A non-JSON answer (a load balancer's HTML error page, say) is refused
/// rather than relayed as if it were a completion.
fn relay(upstream: reqwest::Response) -> Result<Response, GatewayError> {
    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|err| GatewayError::invalid_response(err.to_string()))?;

    let content_type = upstream
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    if !content_type.starts_with("application/json") {
        return Err(GatewayError::invalid_response(format!(
            "expected application/json, got {:?}",
            content_type
        )));
    }

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|err| GatewayError::invalid_response(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ═══════════════════════════════════════════════════════════
    // URL resolution
    // ═══════════════════════════════════════════════════════════

    #[test]
    fn prefix_stripped_path_lands_on_upstream_base() {
        assert_eq!(
            upstream_url("http://localhost:3001", "v1/chat/completions", None),
            "http://localhost:3001/v1/chat/completions"
        );
    }

    #[test]
    fn trailing_and_leading_slashes_do_not_double() {
        assert_eq!(
            upstream_url("http://localhost:3001/", "/v1/chat/completions", None),
            "http://localhost:3001/v1/chat/completions"
        );
    }

    #[test]
    fn query_string_is_preserved() {
        assert_eq!(
            upstream_url("http://localhost:3001", "v1/models", Some("limit=5")),
            "http://localhost:3001/v1/models?limit=5"
        );
    }

    #[test]
    fn base_url_with_own_path_segment_is_kept() {
        assert_eq!(
            upstream_url("https://llm.internal/api", "v1/chat/completions", None),
            "https://llm.internal/api/v1/chat/completions"
        );
    }
}
