//! Bearer-auth and incoming-rate-limit middleware for `POST /api/companies`.
//!
//! Both are external collaborators per spec.md §1/§6: the health endpoints
//! are wired outside these layers entirely (see `routes::build_router`)
//! rather than carrying a per-route bypass flag through the stack.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ucr_errors::{resolve_correlation_id, ErrorCode, ErrorResponse, ResponseSource};

use crate::state::AppState;

fn header_lookup(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

fn correlation_id_from(headers: &HeaderMap) -> String {
    resolve_correlation_id(|name| header_lookup(headers, name))
}

fn error_response(code: ErrorCode, message: &str, correlation_id: &str) -> Response {
    let body = ErrorResponse::new(code, message, correlation_id, ResponseSource::Internal);
    (
        axum::http::StatusCode::from_u16(code.http_status()).expect("status codes in ErrorCode are valid"),
        Json(body),
    )
        .into_response()
}

/// Requires `Authorization: Bearer <key>` against `config.api_keys`. An empty
/// `api_keys` list (the default outside production) disables the check.
pub async fn require_bearer_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.api_keys.is_empty() {
        return next.run(request).await;
    }

    let correlation_id = correlation_id_from(request.headers());
    let auth_header = header_lookup(request.headers(), "authorization");

    let key = match auth_header.as_deref().and_then(|v| v.strip_prefix("Bearer ")) {
        Some(key) if !key.trim().is_empty() => key.trim(),
        _ => {
            return error_response(ErrorCode::MissingApiKey, "missing bearer API key", &correlation_id);
        }
    };

    if !state.config.api_keys.iter().any(|k| k == key) {
        return error_response(ErrorCode::InvalidApiKey, "invalid API key", &correlation_id);
    }

    next.run(request).await
}

/// Admits the request against the process-wide incoming token bucket, or
/// responds `429 RATE_LIMIT_EXCEEDED` immediately.
pub async fn enforce_incoming_rate_limit(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.incoming_rate_limiter.admit() {
        let correlation_id = correlation_id_from(request.headers());
        return error_response(
            ErrorCode::RateLimitExceeded,
            "incoming rate limit exceeded",
            &correlation_id,
        );
    }

    next.run(request).await
}
