//! Axum router and all HTTP handlers for ucr-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use bytes::Bytes;
use ucr_errors::{resolve_correlation_id, ErrorCode, ErrorResponse, ResponseSource};
use ucr_schemas::Nip;

use crate::api_types::{CompanyLookupRequest, HealthResponse};
use crate::middleware as ucr_middleware;
use crate::state::AppState;

/// Build the complete application router wired to the given shared state.
///
/// Auth and rate-limit layers apply only to `/api/companies`; the health
/// routes are exempt per spec.md §6 and are wired outside that nested router
/// entirely rather than carrying a per-route bypass flag.
pub fn build_router(state: Arc<AppState>) -> Router {
    let companies = Router::new()
        .route("/api/companies", post(company_lookup))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            ucr_middleware::enforce_incoming_rate_limit,
        ))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            ucr_middleware::require_bearer_auth,
        ));

    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/live", get(health))
        .route("/api/health/ready", get(health))
        .merge(companies)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /api/health, /api/health/live, /api/health/ready
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /api/companies
// ---------------------------------------------------------------------------

fn correlation_id_from(headers: &HeaderMap) -> String {
    resolve_correlation_id(|name| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string))
}

fn error_response(
    code: ErrorCode,
    message: impl Into<String>,
    correlation_id: &str,
    source: ResponseSource,
) -> Response {
    let body = ErrorResponse::new(code, message, correlation_id, source);
    (
        StatusCode::from_u16(code.http_status()).expect("status codes in ErrorCode are valid"),
        Json(body),
    )
        .into_response()
}

/// Parses the request body per spec.md §4.7 step 1: malformed JSON is
/// `INVALID_REQUEST_FORMAT`, an absent/non-string `nip` is
/// `MISSING_REQUIRED_FIELDS`, and a present-but-invalid `nip` is
/// `INVALID_NIP_FORMAT` — three distinct wire codes out of one field.
fn parse_and_validate_nip(body: &Bytes, correlation_id: &str) -> Result<Nip, Response> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        error_response(
            ErrorCode::InvalidRequestFormat,
            format!("request body is not valid JSON: {e}"),
            correlation_id,
            ResponseSource::Internal,
        )
    })?;

    let request: CompanyLookupRequest = serde_json::from_value(value).map_err(|_| {
        error_response(
            ErrorCode::MissingRequiredFields,
            "request body must contain a string field 'nip'",
            correlation_id,
            ResponseSource::Internal,
        )
    })?;

    Nip::parse(&request.nip).map_err(|e| {
        error_response(ErrorCode::InvalidNipFormat, e.to_string(), correlation_id, ResponseSource::Internal)
    })
}

pub(crate) async fn company_lookup(
    State(st): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let correlation_id = correlation_id_from(&headers);

    let nip = match parse_and_validate_nip(&body, &correlation_id) {
        Ok(nip) => nip,
        Err(response) => return response,
    };

    match ucr_orchestrator::handle_company_lookup(&st.orchestrator_deps, &nip, &correlation_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(failure) => {
            let response = ucr_orchestrator::into_error_response(failure, &correlation_id);
            let status = ErrorCode::from_wire_code(response.error_code)
                .map(|c| c.http_status())
                .unwrap_or(500);
            (StatusCode::from_u16(status).expect("status codes in ErrorCode are valid"), Json(response))
                .into_response()
        }
    }
}
