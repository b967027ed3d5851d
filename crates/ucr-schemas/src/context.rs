//! `OrchestrationContext` — the per-request scratchpad mutated only by the
//! state machine's own actions. Never shared across requests, never read
//! concurrently within one request.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::ceidg::CeidgCompany;
use crate::classification::ClassificationResult;
use crate::error::{TypedError, UpstreamSource};
use crate::gus::GusDetailReport;
use crate::krs::KrsResponse;

/// Per-service retry attempt counters, keyed by the three upstream sources.
#[derive(Debug, Clone, Default)]
pub struct RetryCounters {
    pub gus: u32,
    pub krs: u32,
    pub ceidg: u32,
}

impl RetryCounters {
    pub fn get(&self, source: UpstreamSource) -> u32 {
        match source {
            UpstreamSource::Gus => self.gus,
            UpstreamSource::Krs => self.krs,
            UpstreamSource::Ceidg => self.ceidg,
        }
    }

    pub fn set(&mut self, source: UpstreamSource, value: u32) {
        match source {
            UpstreamSource::Gus => self.gus = value,
            UpstreamSource::Krs => self.krs = value,
            UpstreamSource::Ceidg => self.ceidg = value,
        }
    }
}

/// Mutable scratchpad threaded through one request's state-machine run.
#[derive(Debug, Clone)]
pub struct OrchestrationContext {
    pub nip: String,
    pub correlation_id: String,
    pub started_at: Instant,
    pub deadline: Instant,
    pub classification: Option<ClassificationResult>,
    pub krs_number: Option<String>,
    pub krs_data: Option<KrsResponse>,
    pub ceidg_data: Option<CeidgCompany>,
    pub gus_data: Option<GusDetailReport>,
    pub retry_counters: RetryCounters,
    pub last_error: Option<TypedError>,
    /// Per-service elapsed milliseconds, keyed by a short service label
    /// ("gus", "krs", "ceidg").
    pub timings: BTreeMap<String, u64>,
}

impl OrchestrationContext {
    pub fn new(nip: String, correlation_id: String, total_timeout: std::time::Duration) -> Self {
        let started_at = Instant::now();
        Self {
            nip,
            correlation_id,
            started_at,
            deadline: started_at + total_timeout,
            classification: None,
            krs_number: None,
            krs_data: None,
            ceidg_data: None,
            gus_data: None,
            retry_counters: RetryCounters::default(),
            last_error: None,
            timings: BTreeMap::new(),
        }
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn record_timing(&mut self, service: &str, elapsed_ms: u64) {
        self.timings.insert(service.to_string(), elapsed_ms);
    }

    /// Testable invariant: at most one of `krs_data`, `ceidg_data` is ever set.
    pub fn has_at_most_one_branch_source(&self) -> bool {
        !(self.krs_data.is_some() && self.ceidg_data.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_no_branch_data() {
        let ctx = OrchestrationContext::new(
            "5260250995".to_string(),
            "req-test".to_string(),
            std::time::Duration::from_secs(15),
        );
        assert!(ctx.has_at_most_one_branch_source());
        assert!(!ctx.is_deadline_exceeded());
    }

    #[test]
    fn retry_counters_set_and_get_roundtrip() {
        let mut counters = RetryCounters::default();
        counters.set(UpstreamSource::Krs, 2);
        assert_eq!(counters.get(UpstreamSource::Krs), 2);
        assert_eq!(counters.get(UpstreamSource::Gus), 0);
    }
}
