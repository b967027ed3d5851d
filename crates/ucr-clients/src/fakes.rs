//! In-memory fake clients for `ucr-orchestrator` and `ucr-daemon` tests.
//! Each fake is configured with a queue of canned results consumed in
//! call order; an exhausted queue is a test-author bug, not a silent
//! default, so it panics loudly rather than returning a made-up success.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use ucr_schemas::{CeidgCompany, ClassificationResult, GusDetailReport, KrsRegistry, KrsResponse, SilosId, TypedError};

use crate::ceidg::CeidgClient;
use crate::gus::GusClient;
use crate::krs::KrsClient;

pub struct FakeGusClient {
    classify_results: Mutex<VecDeque<(Duration, Result<ClassificationResult, TypedError>)>>,
    detail_results: Mutex<VecDeque<(Duration, Result<GusDetailReport, TypedError>)>>,
    session_id: Mutex<Option<String>>,
}

impl FakeGusClient {
    pub fn new() -> Self {
        Self {
            classify_results: Mutex::new(VecDeque::new()),
            detail_results: Mutex::new(VecDeque::new()),
            session_id: Mutex::new(None),
        }
    }

    pub fn push_classify_result(&self, result: Result<ClassificationResult, TypedError>) {
        self.classify_results.lock().unwrap().push_back((Duration::ZERO, result));
    }

    /// Like [`Self::push_classify_result`], but the fake sleeps `delay`
    /// before returning it — used to simulate a stalled upstream that
    /// outlives the orchestration deadline.
    pub fn push_classify_result_after(&self, delay: Duration, result: Result<ClassificationResult, TypedError>) {
        self.classify_results.lock().unwrap().push_back((delay, result));
    }

    pub fn push_detail_result(&self, result: Result<GusDetailReport, TypedError>) {
        self.detail_results.lock().unwrap().push_back((Duration::ZERO, result));
    }

    /// Set the value `current_session_id` reports, for exercising the
    /// `registrySignature` session-id-vs-REGON fallback in mapper tests.
    pub fn set_session_id(&self, session_id: Option<String>) {
        *self.session_id.lock().unwrap() = session_id;
    }
}

impl Default for FakeGusClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GusClient for FakeGusClient {
    async fn classify_by_nip(
        &self,
        _nip: &str,
        _correlation_id: &str,
        _deadline: Instant,
    ) -> Result<ClassificationResult, TypedError> {
        let (delay, result) = self
            .classify_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeGusClient.classify_by_nip called more times than results were queued");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn detailed_report(
        &self,
        _regon: &str,
        _silos_id: SilosId,
        _correlation_id: &str,
        _deadline: Instant,
    ) -> Result<GusDetailReport, TypedError> {
        let (delay, result) = self
            .detail_results
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeGusClient.detailed_report called more times than results were queued");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    fn current_session_id(&self) -> Option<String> {
        self.session_id.lock().unwrap().clone()
    }
}

pub struct FakeKrsClient {
    results: Mutex<VecDeque<Result<KrsResponse, TypedError>>>,
}

impl FakeKrsClient {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_result(&self, result: Result<KrsResponse, TypedError>) {
        self.results.lock().unwrap().push_back(result);
    }
}

impl Default for FakeKrsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KrsClient for FakeKrsClient {
    async fn fetch(
        &self,
        _krs_number: &str,
        _registry: KrsRegistry,
        _correlation_id: &str,
        _deadline: Instant,
    ) -> Result<KrsResponse, TypedError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeKrsClient.fetch called more times than results were queued")
    }
}

pub struct FakeCeidgClient {
    results: Mutex<VecDeque<Result<CeidgCompany, TypedError>>>,
}

impl FakeCeidgClient {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push_result(&self, result: Result<CeidgCompany, TypedError>) {
        self.results.lock().unwrap().push_back(result);
    }
}

impl Default for FakeCeidgClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CeidgClient for FakeCeidgClient {
    async fn fetch_by_nip(
        &self,
        _nip: &ucr_schemas::Nip,
        _correlation_id: &str,
        _deadline: Instant,
    ) -> Result<CeidgCompany, TypedError> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .expect("FakeCeidgClient.fetch_by_nip called more times than results were queued")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucr_schemas::{ErrorKind, UpstreamSource};

    #[tokio::test]
    async fn fake_krs_client_returns_queued_result_in_order() {
        let fake = FakeKrsClient::new();
        fake.push_result(Err(TypedError::new(
            UpstreamSource::Krs,
            ErrorKind::NotFound,
            "not found",
        )));
        let deadline = Instant::now() + std::time::Duration::from_secs(1);
        let result = fake.fetch("0000123456", KrsRegistry::P, "req-test", deadline).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[should_panic(expected = "called more times than results were queued")]
    async fn fake_client_panics_when_queue_exhausted() {
        let fake = FakeKrsClient::new();
        let deadline = Instant::now() + std::time::Duration::from_secs(1);
        let _ = fake.fetch("0000123456", KrsRegistry::P, "req-test", deadline).await;
    }
}
