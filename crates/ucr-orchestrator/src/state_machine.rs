//! Orchestration state machine (C4): a closed set of states with
//! pattern-matched transitions over `TypedError`, mirroring the
//! enum-plus-pure-transition shape `ucr_retry::RetryState` itself follows.
//! The machine is strictly sequential per request — no state fans out
//! concurrently — and every `fetching*` state delegates its suspension to
//! `ucr_retry::run_with_retry` under the service-specific strategy.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use ucr_clients::{CeidgClient, GusClient, KrsClient};
use ucr_config::AppConfig;
use ucr_retry::{run_with_retry, CeidgStrategy, GusStrategy, KrsStrategy};
use ucr_schemas::{
    CeidgCompany, ClassificationResult, ErrorKind, GusDetailReport, GusLegalReport, KrsRegistry,
    KrsResponse, Nip, SilosId, TypedError,
};

use crate::mapper::{self, MappingError};

/// The clients and configuration one orchestration run is driven against.
/// Clients are trait objects so `ucr-daemon` can wire the real
/// `reqwest`-backed implementations while tests wire the `ucr-clients`
/// fakes behind the same `Arc`.
pub struct OrchestratorDeps {
    pub gus: Arc<dyn GusClient>,
    pub krs: Arc<dyn KrsClient>,
    pub ceidg: Arc<dyn CeidgClient>,
    pub config: Arc<AppConfig>,
}

/// Terminal orchestration outcomes other than success, already distinguishing
/// the cases C6 maps to distinct error codes.
#[derive(Debug)]
pub enum OrchestrationFailure {
    EntityNotFound,
    EntityDeregistered,
    /// GUS classification itself failed (not `NotFound`) — distinct from a
    /// downstream fetch exhausting retries, per spec.md §4.6's
    /// `CLASSIFICATION_FAILED` vs `*_SERVICE_UNAVAILABLE` split.
    ClassificationFailed(TypedError),
    /// A downstream fetch (GUS detail, KRS, or the GUS fallback path)
    /// exhausted its retries; `TypedError::source` picks the upstream.
    SystemFault(TypedError),
    Timeout,
    Mapping(MappingError),
}

/// Which registry's data is queued for the mapper, carrying exactly what
/// that registry's `map_from_*` needs and nothing else.
enum MappingSource {
    Krs(KrsResponse, Option<String>),
    Ceidg(CeidgCompany),
    Gus(GusDetailReport, String),
}

enum State {
    FetchingGusClassification,
    DecidingNextStep(ClassificationResult),
    FetchingGusFullReportForKrs(ClassificationResult),
    FetchingKrsFromP { classification: ClassificationResult, krs_number: String, gus_detail: GusLegalReport },
    FetchingKrsFromS { classification: ClassificationResult, krs_number: String, gus_detail: GusLegalReport },
    FetchingCeidgData(ClassificationResult),
    FetchingGusDetailedFallback(ClassificationResult),
    FetchingGusGenericData(ClassificationResult),
    MappingInactiveCompany(ClassificationResult),
    MappingToUnifiedFormat(MappingSource),
    Success(ucr_schemas::UnifiedCompanyRecord),
    EntityNotFoundFailure,
    DeregisteredFailure,
    ClassificationFailure(TypedError),
    SystemFaultFailure(TypedError),
    TimeoutFailure,
    MappingFailure(MappingError),
}

impl State {
    fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Success(_)
                | Self::EntityNotFoundFailure
                | Self::DeregisteredFailure
                | Self::ClassificationFailure(_)
                | Self::SystemFaultFailure(_)
                | Self::TimeoutFailure
                | Self::MappingFailure(_)
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::FetchingGusClassification => "fetchingGusClassification",
            Self::DecidingNextStep(_) => "decidingNextStep",
            Self::FetchingGusFullReportForKrs(_) => "fetchingGusFullReportForKrs",
            Self::FetchingKrsFromP { .. } => "fetchingKrsFromP",
            Self::FetchingKrsFromS { .. } => "fetchingKrsFromS",
            Self::FetchingCeidgData(_) => "fetchingCeidgData",
            Self::FetchingGusDetailedFallback(_) => "fetchingGusDetailedFallback",
            Self::FetchingGusGenericData(_) => "fetchingGusGenericData",
            Self::MappingInactiveCompany(_) => "mappingInactiveCompany",
            Self::MappingToUnifiedFormat(_) => "mappingToUnifiedFormat",
            Self::Success(_) => "success",
            Self::EntityNotFoundFailure => "entityNotFoundFailure",
            Self::DeregisteredFailure => "deregisteredFailure",
            Self::ClassificationFailure(_) => "systemFaultFailure",
            Self::SystemFaultFailure(_) => "systemFaultFailure",
            Self::TimeoutFailure => "timeoutFailure",
            Self::MappingFailure(_) => "mappingFailure",
        }
    }
}

fn end_of_activity_present(classification: &ClassificationResult) -> bool {
    matches!(&classification.end_of_activity_date, Some(d) if !d.trim().is_empty())
}

fn gus_registry_signature(deps: &OrchestratorDeps, regon: &str) -> String {
    deps.gus.current_session_id().unwrap_or_else(|| regon.to_string())
}

/// The deadline handed to a single upstream call: spec.md §6's per-call
/// `external_api_timeout_ms` bound, capped by whatever remains of the
/// request's total `request_timeout_ms` budget. Recomputed fresh at each
/// call site (not just once per request) so a call made after earlier
/// retries have already burned part of the budget still gets a sensible
/// window instead of reusing a stale `now`.
fn call_deadline(deps: &OrchestratorDeps, request_deadline: Instant) -> Instant {
    let per_call = Instant::now() + Duration::from_millis(deps.config.external_api_timeout_ms);
    per_call.min(request_deadline)
}

/// Per spec.md §4.4, the *only* trigger for `timeoutFailure` is the total
/// request deadline having elapsed — a per-call timeout well inside the
/// total budget is just an ordinary (retryable) upstream failure. Checked
/// right after a fetch returns, since a terminal state short-circuits the
/// top-of-loop deadline check on the next iteration.
fn deadline_exceeded(deadline: Instant) -> bool {
    Instant::now() >= deadline
}

pub async fn run(
    deps: &OrchestratorDeps,
    nip: &Nip,
    correlation_id: &str,
) -> Result<ucr_schemas::UnifiedCompanyRecord, OrchestrationFailure> {
    let deadline = Instant::now() + Duration::from_millis(deps.config.request_timeout_ms);
    let mut state = State::FetchingGusClassification;

    loop {
        if !state.is_terminal() && Instant::now() >= deadline {
            state = State::TimeoutFailure;
        }

        tracing::info!(correlation_id, state = state.name(), "orchestration.transition");

        state = match state {
            State::FetchingGusClassification => {
                let result = run_with_retry(
                    &GusStrategy,
                    deps.config.gus_retry.max_retries,
                    deps.config.gus_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.gus.classify_by_nip(nip.as_str(), correlation_id, call_deadline(deps, deadline))
                    },
                )
                .await;
                match result {
                    Ok(classification) => State::DecidingNextStep(classification),
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(e) if e.kind == ErrorKind::NotFound => State::EntityNotFoundFailure,
                    Err(e) => State::ClassificationFailure(e),
                }
            }

            // Pure, no I/O: routes on the classification already in hand.
            State::DecidingNextStep(classification) => {
                if end_of_activity_present(&classification) {
                    State::MappingInactiveCompany(classification)
                } else {
                    match classification.silos_id {
                        SilosId::SoleTrader => State::FetchingCeidgData(classification),
                        SilosId::Agriculture | SilosId::ProfessionalServices => {
                            State::FetchingGusGenericData(classification)
                        }
                        SilosId::Deregistered => State::DeregisteredFailure,
                        SilosId::LegalEntity => State::FetchingGusFullReportForKrs(classification),
                    }
                }
            }

            State::FetchingGusFullReportForKrs(classification) => {
                let regon = classification.regon.clone();
                let result = run_with_retry(
                    &GusStrategy,
                    deps.config.gus_retry.max_retries,
                    deps.config.gus_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.gus.detailed_report(
                            &regon,
                            SilosId::LegalEntity,
                            correlation_id,
                            call_deadline(deps, deadline),
                        )
                    },
                )
                .await;
                match result {
                    Ok(GusDetailReport::Legal(legal)) => match legal.extract_krs_number() {
                        Some(krs_number) => {
                            State::FetchingKrsFromP { classification, krs_number, gus_detail: legal }
                        }
                        None => {
                            let signature = gus_registry_signature(deps, &classification.regon);
                            State::MappingToUnifiedFormat(MappingSource::Gus(
                                GusDetailReport::Legal(legal),
                                signature,
                            ))
                        }
                    },
                    Ok(GusDetailReport::SoleTrader(_)) => State::SystemFaultFailure(TypedError::new(
                        ucr_schemas::UpstreamSource::Gus,
                        ErrorKind::MalformedResponse,
                        "GUS returned a sole-trader report for a legal-entity silosId",
                    )),
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(e) => State::SystemFaultFailure(e),
                }
            }

            State::FetchingKrsFromP { classification, krs_number, gus_detail } => {
                let result = run_with_retry(
                    &KrsStrategy,
                    deps.config.krs_retry.max_retries,
                    deps.config.krs_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.krs.fetch(&krs_number, KrsRegistry::P, correlation_id, call_deadline(deps, deadline))
                    },
                )
                .await;
                match result {
                    Ok(krs) => {
                        State::MappingToUnifiedFormat(MappingSource::Krs(krs, Some(classification.regon.clone())))
                    }
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(e) if e.kind == ErrorKind::NotFound => {
                        State::FetchingKrsFromS { classification, krs_number, gus_detail }
                    }
                    Err(_) => {
                        let signature = gus_registry_signature(deps, &classification.regon);
                        State::MappingToUnifiedFormat(MappingSource::Gus(
                            GusDetailReport::Legal(gus_detail),
                            signature,
                        ))
                    }
                }
            }

            State::FetchingKrsFromS { classification, krs_number, gus_detail } => {
                let result = run_with_retry(
                    &KrsStrategy,
                    deps.config.krs_retry.max_retries,
                    deps.config.krs_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.krs.fetch(&krs_number, KrsRegistry::S, correlation_id, call_deadline(deps, deadline))
                    },
                )
                .await;
                match result {
                    Ok(krs) => {
                        State::MappingToUnifiedFormat(MappingSource::Krs(krs, Some(classification.regon.clone())))
                    }
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(_) => {
                        let signature = gus_registry_signature(deps, &classification.regon);
                        State::MappingToUnifiedFormat(MappingSource::Gus(
                            GusDetailReport::Legal(gus_detail),
                            signature,
                        ))
                    }
                }
            }

            State::FetchingCeidgData(classification) => {
                let result = run_with_retry(
                    &CeidgStrategy,
                    deps.config.ceidg_retry.max_retries,
                    deps.config.ceidg_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| deps.ceidg.fetch_by_nip(nip, correlation_id, call_deadline(deps, deadline)),
                )
                .await;
                match result {
                    Ok(ceidg) => State::MappingToUnifiedFormat(MappingSource::Ceidg(ceidg)),
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(_) => State::FetchingGusDetailedFallback(classification),
                }
            }

            State::FetchingGusDetailedFallback(classification) => {
                let regon = classification.regon.clone();
                let result = run_with_retry(
                    &GusStrategy,
                    deps.config.gus_retry.max_retries,
                    deps.config.gus_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.gus.detailed_report(
                            &regon,
                            classification.silos_id,
                            correlation_id,
                            call_deadline(deps, deadline),
                        )
                    },
                )
                .await;
                match result {
                    Ok(detail) => {
                        let signature = gus_registry_signature(deps, &classification.regon);
                        State::MappingToUnifiedFormat(MappingSource::Gus(detail, signature))
                    }
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(e) => State::SystemFaultFailure(e),
                }
            }

            State::FetchingGusGenericData(classification) => {
                let regon = classification.regon.clone();
                let result = run_with_retry(
                    &GusStrategy,
                    deps.config.gus_retry.max_retries,
                    deps.config.gus_retry.initial_delay_ms,
                    correlation_id,
                    deadline,
                    |_attempt| {
                        deps.gus.detailed_report(
                            &regon,
                            classification.silos_id,
                            correlation_id,
                            call_deadline(deps, deadline),
                        )
                    },
                )
                .await;
                match result {
                    Ok(detail) => {
                        let signature = gus_registry_signature(deps, &classification.regon);
                        State::MappingToUnifiedFormat(MappingSource::Gus(detail, signature))
                    }
                    Err(_) if deadline_exceeded(deadline) => State::TimeoutFailure,
                    Err(e) => State::SystemFaultFailure(e),
                }
            }

            State::MappingInactiveCompany(classification) => {
                let now = chrono::Utc::now();
                match mapper::map_inactive_from_classification(nip.as_str(), &classification, now) {
                    Ok(record) => State::Success(record),
                    Err(e) => State::MappingFailure(e),
                }
            }

            State::MappingToUnifiedFormat(source) => {
                let now = chrono::Utc::now();
                let mapped = match source {
                    MappingSource::Krs(krs, regon) => {
                        mapper::map_from_krs(nip.as_str(), regon.as_deref(), &krs, now)
                    }
                    MappingSource::Ceidg(ceidg) => mapper::map_from_ceidg(nip.as_str(), &ceidg, now),
                    MappingSource::Gus(detail, signature) => {
                        mapper::map_from_gus(nip.as_str(), &detail, &signature, now)
                    }
                };
                match mapped {
                    Ok(record) => State::Success(record),
                    Err(e) => State::MappingFailure(e),
                }
            }

            terminal => {
                return match terminal {
                    State::Success(record) => Ok(record),
                    State::EntityNotFoundFailure => Err(OrchestrationFailure::EntityNotFound),
                    State::DeregisteredFailure => Err(OrchestrationFailure::EntityDeregistered),
                    State::ClassificationFailure(e) => Err(OrchestrationFailure::ClassificationFailed(e)),
                    State::SystemFaultFailure(e) => Err(OrchestrationFailure::SystemFault(e)),
                    State::TimeoutFailure => Err(OrchestrationFailure::Timeout),
                    State::MappingFailure(e) => Err(OrchestrationFailure::Mapping(e)),
                    _ => unreachable!("non-terminal states are all handled above"),
                };
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucr_clients::fakes::{FakeCeidgClient, FakeGusClient, FakeKrsClient};
    use ucr_config::RetryPolicy;
    use ucr_schemas::{AddressFragments, CeidgAddress, CeidgOwner, CeidgStatus, GusSoleTraderReport, UpstreamSource};

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            environment: ucr_config::Environment::Test,
            bind_addr: "127.0.0.1:0".to_string(),
            gus_user_key: "key".to_string(),
            gus_base_url: "https://gus.example".to_string(),
            gus_wsdl_url: "https://gus.example/wsdl".to_string(),
            gus_max_requests_per_second: 10,
            gus_retry: RetryPolicy { max_retries: 1, initial_delay_ms: 1 },
            krs_base_url: "https://krs.example".to_string(),
            krs_retry: RetryPolicy { max_retries: 1, initial_delay_ms: 1 },
            ceidg_base_url: "https://ceidg.example".to_string(),
            ceidg_jwt_token: "jwt".to_string(),
            ceidg_retry: RetryPolicy { max_retries: 1, initial_delay_ms: 1 },
            request_timeout_ms: 5_000,
            external_api_timeout_ms: 2_000,
            api_keys: Vec::new(),
            incoming_rate_limit_per_second: 20,
        })
    }

    fn classification(silos_id: SilosId, regon: &str) -> ClassificationResult {
        ClassificationResult {
            regon: regon.to_string(),
            silos_id,
            entity_name: "ACME".to_string(),
            address_fragments: AddressFragments::default(),
            end_of_activity_date: None,
        }
    }

    #[tokio::test]
    async fn legal_entity_routes_through_krs_p_to_success() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Ok(classification(SilosId::LegalEntity, "123456789")));
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("praw_krs".to_string(), "0000123456".to_string());
        gus.push_detail_result(Ok(GusDetailReport::Legal(GusLegalReport {
            regon: "123456789".to_string(),
            name: "ACME SA".to_string(),
            fields,
            ..Default::default()
        })));

        let krs = Arc::new(FakeKrsClient::new());
        krs.push_result(Ok(KrsResponse {
            krs_number: "0000123456".to_string(),
            name: "ACME SA".to_string(),
            state_as_of_date: Some("2026-07-01".to_string()),
            ..Default::default()
        }));

        let deps = OrchestratorDeps {
            gus,
            krs,
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let record = run(&deps, &nip, "req-test").await.unwrap();
        assert_eq!(record.data_source, ucr_schemas::DataSource::Krs);
        assert_eq!(record.krs.as_deref(), Some("0000123456"));
    }

    #[tokio::test]
    async fn krs_p_not_found_falls_through_to_krs_s() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Ok(classification(SilosId::LegalEntity, "123456789")));
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("praw_krs".to_string(), "0000999999".to_string());
        gus.push_detail_result(Ok(GusDetailReport::Legal(GusLegalReport {
            regon: "123456789".to_string(),
            name: "Fundacja Dobra".to_string(),
            fields,
            ..Default::default()
        })));

        let krs = Arc::new(FakeKrsClient::new());
        krs.push_result(Err(TypedError::new(UpstreamSource::Krs, ErrorKind::NotFound, "not in P")));
        krs.push_result(Ok(KrsResponse {
            krs_number: "0000999999".to_string(),
            name: "Fundacja Dobra".to_string(),
            state_as_of_date: Some("2026-06-15".to_string()),
            ..Default::default()
        }));

        let deps = OrchestratorDeps {
            gus,
            krs,
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let record = run(&deps, &nip, "req-test").await.unwrap();
        assert_eq!(record.name, "Fundacja Dobra");
    }

    #[tokio::test]
    async fn sole_trader_routes_through_ceidg_to_success() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Ok(classification(SilosId::SoleTrader, "123456789")));

        let ceidg = Arc::new(FakeCeidgClient::new());
        ceidg.push_result(Ok(CeidgCompany {
            nip: "5260250995".to_string(),
            regon: Some("123456789".to_string()),
            business_name: "Jan Kowalski".to_string(),
            owner: CeidgOwner::default(),
            address: CeidgAddress::default(),
            status: CeidgStatus::Aktywny,
            activity_start_date: None,
            activity_end_date: None,
            record_id: "rec-1".to_string(),
        }));

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg,
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let record = run(&deps, &nip, "req-test").await.unwrap();
        assert_eq!(record.data_source, ucr_schemas::DataSource::Ceidg);
    }

    #[tokio::test]
    async fn ceidg_failure_falls_back_to_gus_detail() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Ok(classification(SilosId::SoleTrader, "123456789")));
        gus.push_detail_result(Ok(GusDetailReport::SoleTrader(GusSoleTraderReport {
            regon: "123456789".to_string(),
            name: "Jan Kowalski".to_string(),
            ..Default::default()
        })));

        let ceidg = Arc::new(FakeCeidgClient::new());
        ceidg.push_result(Err(TypedError::new(UpstreamSource::Ceidg, ErrorKind::ServerError, "down")));
        ceidg.push_result(Err(TypedError::new(UpstreamSource::Ceidg, ErrorKind::ServerError, "down")));

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg,
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let record = run(&deps, &nip, "req-test").await.unwrap();
        assert_eq!(record.data_source, ucr_schemas::DataSource::Gus);
        assert_eq!(record.entity_type, ucr_schemas::EntityType::Natural);
    }

    #[tokio::test]
    async fn deregistered_classification_is_terminal_failure() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Ok(classification(SilosId::Deregistered, "123456789")));

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let err = run(&deps, &nip, "req-test").await.unwrap_err();
        assert!(matches!(err, OrchestrationFailure::EntityDeregistered));
    }

    #[tokio::test]
    async fn end_of_activity_date_short_circuits_to_inactive_mapping() {
        let gus = Arc::new(FakeGusClient::new());
        let mut c = classification(SilosId::LegalEntity, "123456789");
        c.end_of_activity_date = Some("01.01.2019".to_string());
        gus.push_classify_result(Ok(c));

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let record = run(&deps, &nip, "req-test").await.unwrap();
        assert_eq!(record.status, ucr_schemas::CompanyStatus::Wykreslony);
        assert!(!record.is_active);
    }

    #[tokio::test]
    async fn classification_stalled_past_deadline_is_timeout_failure() {
        let mut config = (*test_config()).clone();
        config.request_timeout_ms = 20;
        config.external_api_timeout_ms = 20;

        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result_after(
            Duration::from_millis(100),
            Ok(classification(SilosId::SoleTrader, "123456789")),
        );

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: Arc::new(config),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let err = run(&deps, &nip, "req-test").await.unwrap_err();
        assert!(matches!(err, OrchestrationFailure::Timeout));
    }

    #[tokio::test]
    async fn classification_not_found_is_terminal_failure() {
        let gus = Arc::new(FakeGusClient::new());
        gus.push_classify_result(Err(TypedError::new(UpstreamSource::Gus, ErrorKind::NotFound, "no hit")));

        let deps = OrchestratorDeps {
            gus,
            krs: Arc::new(FakeKrsClient::new()),
            ceidg: Arc::new(FakeCeidgClient::new()),
            config: test_config(),
        };

        let nip = Nip::parse("5260250995").unwrap();
        let err = run(&deps, &nip, "req-test").await.unwrap_err();
        assert!(matches!(err, OrchestrationFailure::EntityNotFound));
    }
}
