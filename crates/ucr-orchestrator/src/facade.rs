//! Request orchestrator entry (C7): the single async facade `ucr-daemon`
//! calls per request. Builds the per-request scratchpad, drives the state
//! machine to a terminal outcome, and on failure maps it through the
//! canonical error taxonomy (C6).

use std::time::Duration;

use ucr_errors::{ErrorResponse, ResponseSource};
use ucr_schemas::{Nip, OrchestrationContext, UnifiedCompanyRecord, UpstreamSource};

use crate::state_machine::{self, OrchestrationFailure, OrchestratorDeps};

/// Drives one request end to end. `correlation_id` must already be resolved
/// (spec.md §4.6's header-priority/generation logic lives in `ucr-errors`
/// and is the daemon's job to invoke before calling this).
pub async fn handle_company_lookup(
    deps: &OrchestratorDeps,
    nip: &Nip,
    correlation_id: &str,
) -> Result<UnifiedCompanyRecord, OrchestrationFailure> {
    let mut context = OrchestrationContext::new(
        nip.as_str().to_string(),
        correlation_id.to_string(),
        Duration::from_millis(deps.config.request_timeout_ms),
    );

    let result = state_machine::run(deps, nip, correlation_id).await;

    let elapsed_ms = context.started_at.elapsed().as_millis() as u64;
    context.record_timing("total", elapsed_ms);

    match &result {
        Ok(_) => tracing::info!(correlation_id, elapsed_ms, "orchestration.success"),
        Err(e) => {
            context.last_error = failure_typed_error(e);
            tracing::warn!(correlation_id, elapsed_ms, failure = ?e, "orchestration.failure");
        }
    }

    result
}

fn failure_typed_error(failure: &OrchestrationFailure) -> Option<ucr_schemas::TypedError> {
    match failure {
        OrchestrationFailure::ClassificationFailed(e) | OrchestrationFailure::SystemFault(e) => {
            Some(e.clone())
        }
        _ => None,
    }
}

fn source_to_response_source(source: UpstreamSource) -> ResponseSource {
    match source {
        UpstreamSource::Gus => ResponseSource::Gus,
        UpstreamSource::Krs => ResponseSource::Krs,
        UpstreamSource::Ceidg => ResponseSource::Ceidg,
    }
}

/// Maps a terminal orchestration failure onto the canonical error response
/// (spec.md §4.6's table). `*_SERVICE_UNAVAILABLE` vs `CLASSIFICATION_FAILED`
/// distinguishes a downstream fetch exhausting retries from classification
/// itself failing; both are otherwise "GUS said no" at the HTTP edge.
pub fn into_error_response(
    failure: OrchestrationFailure,
    correlation_id: &str,
) -> ErrorResponse {
    use ucr_errors::ErrorCode;

    match failure {
        OrchestrationFailure::EntityNotFound => {
            ErrorResponse::new(ErrorCode::EntityNotFound, "entity not found", correlation_id, ResponseSource::Gus)
        }
        OrchestrationFailure::EntityDeregistered => ErrorResponse::new(
            ErrorCode::EntityDeregistered,
            "entity is deregistered",
            correlation_id,
            ResponseSource::Gus,
        ),
        OrchestrationFailure::ClassificationFailed(e) => {
            ErrorResponse::new(ErrorCode::ClassificationFailed, e.message.clone(), correlation_id, ResponseSource::Gus)
        }
        OrchestrationFailure::SystemFault(e) => {
            let code = match e.source {
                UpstreamSource::Gus => ErrorCode::GusServiceUnavailable,
                UpstreamSource::Krs => ErrorCode::KrsServiceUnavailable,
                UpstreamSource::Ceidg => ErrorCode::CeidgServiceUnavailable,
            };
            ErrorResponse::new(code, e.message.clone(), correlation_id, source_to_response_source(e.source))
        }
        OrchestrationFailure::Timeout => ErrorResponse::new(
            ErrorCode::TimeoutError,
            "request exceeded the total deadline",
            correlation_id,
            ResponseSource::Internal,
        ),
        OrchestrationFailure::Mapping(e) => ErrorResponse::new(
            ErrorCode::DataMappingFailed,
            e.to_string(),
            correlation_id,
            ResponseSource::Internal,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucr_schemas::{ErrorKind, TypedError};

    #[test]
    fn classification_failed_maps_to_502_gus() {
        let err = TypedError::new(UpstreamSource::Gus, ErrorKind::ServerError, "gus down");
        let response = into_error_response(OrchestrationFailure::ClassificationFailed(err), "req-test");
        assert_eq!(response.error_code, "CLASSIFICATION_FAILED");
        assert_eq!(response.source, ResponseSource::Gus);
    }

    #[test]
    fn system_fault_picks_code_by_source() {
        let err = TypedError::new(UpstreamSource::Krs, ErrorKind::ServerError, "krs down");
        let response = into_error_response(OrchestrationFailure::SystemFault(err), "req-test");
        assert_eq!(response.error_code, "KRS_SERVICE_UNAVAILABLE");
        assert_eq!(response.source, ResponseSource::Krs);
    }

    #[test]
    fn timeout_maps_to_internal_source() {
        let response = into_error_response(OrchestrationFailure::Timeout, "req-test");
        assert_eq!(response.error_code, "TIMEOUT_ERROR");
        assert_eq!(response.source, ResponseSource::Internal);
    }

    #[test]
    fn entity_not_found_maps_to_gus_source() {
        let response = into_error_response(OrchestrationFailure::EntityNotFound, "req-test");
        assert_eq!(response.error_code, "ENTITY_NOT_FOUND");
        assert_eq!(response.source, ResponseSource::Gus);
    }
}
