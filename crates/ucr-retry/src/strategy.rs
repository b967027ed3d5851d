use ucr_schemas::{ErrorKind, TypedError};

/// Stateless predicate deciding whether a failed attempt is worth retrying.
pub trait RetryStrategy {
    fn can_retry(&self, error: &TypedError) -> bool;
}

/// GUS: retry on server/session/timeout/network trouble only.
pub struct GusStrategy;

impl RetryStrategy for GusStrategy {
    fn can_retry(&self, error: &TypedError) -> bool {
        matches!(
            error.kind,
            ErrorKind::ServerError
                | ErrorKind::SessionExpired
                | ErrorKind::Timeout
                | ErrorKind::Network
        )
    }
}

/// KRS: `NotFound` is a branching signal for the orchestrator, not something
/// to retry here.
pub struct KrsStrategy;

impl RetryStrategy for KrsStrategy {
    fn can_retry(&self, error: &TypedError) -> bool {
        matches!(
            error.kind,
            ErrorKind::ServerError | ErrorKind::Timeout | ErrorKind::Network
        )
    }
}

/// CEIDG: never retry rate limiting, missing records, or auth failures.
pub struct CeidgStrategy;

impl RetryStrategy for CeidgStrategy {
    fn can_retry(&self, error: &TypedError) -> bool {
        matches!(
            error.kind,
            ErrorKind::ServerError | ErrorKind::Timeout | ErrorKind::Network
        )
    }
}
