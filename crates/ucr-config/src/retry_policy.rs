/// Per-service retry budget: max retry attempts plus the initial backoff
/// delay `ucr-retry` grows exponentially from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}
