//! Shared runtime state for ucr-daemon.
//!
//! All handlers receive `State<Arc<AppState>>` from Axum. The three upstream
//! clients are stored as trait objects so tests can substitute the
//! `ucr-clients` fakes behind the same field without touching routing code.

use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use ucr_clients::{CeidgClient, GusClient, KrsClient, ReqwestCeidgClient, ReqwestGusClient, ReqwestKrsClient};
use ucr_config::AppConfig;
use ucr_orchestrator::OrchestratorDeps;

/// Static build metadata included in health responses.
#[derive(Clone, Copy, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Incoming-request rate limiter (spec.md §6's `APP_INCOMING_RATE_LIMIT_PER_SECOND`).
///
/// Unlike the GUS outgoing limiter, callers here never block: a request that
/// cannot be admitted immediately is rejected with `RATE_LIMIT_EXCEEDED`
/// rather than queued, since the caller is an external HTTP client, not a
/// cooperative internal task.
pub struct IncomingRateLimiter {
    inner: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl IncomingRateLimiter {
    pub fn new(requests_per_second: u32) -> Self {
        let rate = NonZeroU32::new(requests_per_second.max(1)).expect("rate is clamped to >= 1");
        Self {
            inner: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    pub fn admit(&self) -> bool {
        self.inner.check().is_ok()
    }
}

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub build: BuildInfo,
    pub incoming_rate_limiter: Arc<IncomingRateLimiter>,
    pub orchestrator_deps: Arc<OrchestratorDeps>,
}

impl AppState {
    /// Wire the real `reqwest`-backed clients from a loaded configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let http = reqwest::Client::builder()
            .build()
            .expect("reqwest client builder never fails with default settings");

        let gus: Arc<dyn GusClient> = Arc::new(ReqwestGusClient::new(
            http.clone(),
            config.gus_base_url.clone(),
            config.gus_user_key.clone(),
            config.gus_max_requests_per_second,
        ));
        let krs: Arc<dyn KrsClient> = Arc::new(ReqwestKrsClient::new(http.clone(), config.krs_base_url.clone()));
        let ceidg: Arc<dyn CeidgClient> = Arc::new(ReqwestCeidgClient::new(
            http,
            config.ceidg_base_url.clone(),
            config.ceidg_jwt_token.clone(),
        ));

        Self::new(config, gus, krs, ceidg)
    }

    /// Construct from already-built clients, e.g. the `ucr-clients` fakes in
    /// scenario tests.
    pub fn new(
        config: Arc<AppConfig>,
        gus: Arc<dyn GusClient>,
        krs: Arc<dyn KrsClient>,
        ceidg: Arc<dyn CeidgClient>,
    ) -> Self {
        let incoming_rate_limiter = Arc::new(IncomingRateLimiter::new(config.incoming_rate_limit_per_second));
        let orchestrator_deps = Arc::new(OrchestratorDeps {
            gus,
            krs,
            ceidg,
            config: Arc::clone(&config),
        });

        Self {
            config,
            build: BuildInfo {
                service: "ucr-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            incoming_rate_limiter,
            orchestrator_deps,
        }
    }
}
