//! Process-wide GUS outgoing token-bucket rate limiter (spec.md §5): a
//! single `GusRateLimiter` instance is shared (via `Arc`) across every task
//! issuing GUS calls. Built on `governor`'s GCRA implementation, the same
//! crate family the surrounding ecosystem uses for request-rate limiting.

use std::num::NonZeroU32;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

pub struct GusRateLimiter {
    inner: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl GusRateLimiter {
    /// `requests_per_second` must be > 0; burst equals the rate, matching
    /// spec.md §6's description of the GUS token bucket.
    pub fn new(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second.max(1)).expect("rate is clamped to >= 1");
        Self {
            inner: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    /// Block the calling task until a token is available. FIFO under the
    /// hood via `governor`'s internal queueing.
    pub async fn acquire(&self) {
        self.inner.until_ready().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquire_completes_under_quota() {
        let limiter = GusRateLimiter::new(100);
        limiter.acquire().await;
        limiter.acquire().await;
    }
}
