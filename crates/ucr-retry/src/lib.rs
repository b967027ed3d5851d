//! Generic retry engine (C2) and the three upstream retry strategies (C3).
//!
//! The state machine is a closed `enum` with a pure transition function,
//! mirroring `OmsOrder`'s `apply`/`do_transition` split in spirit: the
//! transition itself never touches IO, so it is fully covered by synchronous
//! unit tests, and the async driver on top of it is a thin `tokio::select!`
//! loop.

mod strategy;

pub use strategy::{CeidgStrategy, GusStrategy, KrsStrategy, RetryStrategy};

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use ucr_schemas::TypedError;

/// Where one retry-engine run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting,
    Retrying,
    Succeeded,
    Failed,
}

impl RetryState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Pure transition: given the outcome of the attempt just made, decide the
/// next state. No IO, no sleeping — callers drive the actual sleep
/// themselves based on the returned state.
pub fn next_state<T>(
    attempt: u32,
    max_retries: u32,
    strategy: &impl RetryStrategy,
    result: &Result<T, TypedError>,
) -> RetryState {
    match result {
        Ok(_) => RetryState::Succeeded,
        Err(e) if attempt < max_retries && strategy.can_retry(e) => RetryState::Retrying,
        Err(_) => RetryState::Failed,
    }
}

/// `delay(attempt, initial) = min(initial * 2^attempt + jitter, 5000ms)`,
/// `jitter` uniformly drawn from `[-10%, +10%]` of the exponential term.
pub fn delay(attempt: u32, initial_delay_ms: u64) -> Duration {
    let exp_ms = initial_delay_ms.saturating_mul(1u64 << attempt.min(32));
    let jitter_bound = (exp_ms as f64 * 0.1) as i64;
    let jitter = if jitter_bound > 0 {
        rand::thread_rng().gen_range(-jitter_bound..=jitter_bound)
    } else {
        0
    };
    let with_jitter = (exp_ms as i64 + jitter).max(0) as u64;
    Duration::from_millis(with_jitter.min(5_000))
}

/// Run `op` under the given retry strategy and budget, racing each backoff
/// sleep against `deadline`. `op` receives the zero-based attempt index.
///
/// A cancelled backoff sleep returns the last attempt's error unchanged —
/// the retry engine never invents a new error on deadline cancellation, it
/// just stops waiting for the next attempt.
pub async fn run_with_retry<T, S, F, Fut>(
    strategy: &S,
    max_retries: u32,
    initial_delay_ms: u64,
    correlation_id: &str,
    deadline: tokio::time::Instant,
    mut op: F,
) -> Result<T, TypedError>
where
    S: RetryStrategy,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, TypedError>>,
{
    let mut attempt: u32 = 0;
    loop {
        let result = {
            let span = tracing::info_span!(
                "retry_attempt",
                correlation_id = correlation_id,
                attempt = attempt
            );
            let _enter = span.enter();
            op(attempt).await
        };

        match next_state(attempt, max_retries, strategy, &result) {
            RetryState::Succeeded | RetryState::Failed => return result,
            RetryState::Retrying => {
                let last_err = match result {
                    Err(e) => e,
                    Ok(_) => unreachable!("Retrying is only returned for Err results"),
                };
                let sleep_for = delay(attempt, initial_delay_ms);
                tokio::select! {
                    _ = tokio::time::sleep(sleep_for) => {
                        attempt += 1;
                    }
                    _ = tokio::time::sleep_until(deadline) => {
                        return Err(last_err);
                    }
                }
            }
            RetryState::Attempting => unreachable!("next_state never returns Attempting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucr_schemas::{ErrorKind, UpstreamSource};

    fn server_error() -> TypedError {
        TypedError::new(UpstreamSource::Gus, ErrorKind::ServerError, "boom")
    }

    fn not_found() -> TypedError {
        TypedError::new(UpstreamSource::Gus, ErrorKind::NotFound, "missing")
    }

    #[test]
    fn success_transitions_to_succeeded() {
        let result: Result<(), TypedError> = Ok(());
        let state = next_state(0, 2, &GusStrategy, &result);
        assert_eq!(state, RetryState::Succeeded);
    }

    #[test]
    fn retryable_error_under_budget_transitions_to_retrying() {
        let result: Result<(), TypedError> = Err(server_error());
        let state = next_state(0, 2, &GusStrategy, &result);
        assert_eq!(state, RetryState::Retrying);
    }

    #[test]
    fn retryable_error_at_budget_transitions_to_failed() {
        let result: Result<(), TypedError> = Err(server_error());
        let state = next_state(2, 2, &GusStrategy, &result);
        assert_eq!(state, RetryState::Failed);
    }

    #[test]
    fn non_retryable_error_transitions_to_failed_even_under_budget() {
        let result: Result<(), TypedError> = Err(not_found());
        let state = next_state(0, 2, &GusStrategy, &result);
        assert_eq!(state, RetryState::Failed);
    }

    #[test]
    fn delay_never_exceeds_cap() {
        for attempt in 0..10 {
            let d = delay(attempt, 1000);
            assert!(d.as_millis() <= 5000);
        }
    }

    #[test]
    fn delay_grows_exponentially_before_the_cap() {
        let d0 = delay(0, 100).as_millis() as f64;
        let d1 = delay(1, 100).as_millis() as f64;
        // jitter is +/-10%, so attempt 1's delay must still clear attempt 0's
        // lower jitter bound to confirm the doubling actually happened.
        assert!(d1 > d0 * 1.5);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_one_retryable_failure() {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        let mut calls = 0u32;
        let result: Result<&'static str, TypedError> = run_with_retry(
            &GusStrategy,
            2,
            10,
            "req-test",
            deadline,
            |attempt| {
                calls += 1;
                async move {
                    if attempt == 0 {
                        Err(server_error())
                    } else {
                        Ok("ok")
                    }
                }
            },
        )
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausting_retries_surfaces_last_error() {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        let result: Result<(), TypedError> = run_with_retry(
            &GusStrategy,
            1,
            10,
            "req-test",
            deadline,
            |_attempt| async { Err(server_error()) },
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServerError);
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_error_returns_immediately() {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        let mut calls = 0u32;
        let result: Result<(), TypedError> = run_with_retry(
            &GusStrategy,
            5,
            10,
            "req-test",
            deadline,
            |_attempt| {
                calls += 1;
                async { Err(not_found()) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_cancels_backoff_and_returns_last_error() {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(5);
        let result: Result<(), TypedError> = run_with_retry(
            &GusStrategy,
            5,
            10_000,
            "req-test",
            deadline,
            |_attempt| async { Err(server_error()) },
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServerError);
    }
}
