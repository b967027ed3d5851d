use async_trait::async_trait;
use tokio::time::Instant;
use ucr_schemas::{
    ClassificationResult, ErrorKind, GusDetailReport, GusLegalReport, GusSoleTraderReport, SilosId,
    TypedError, UpstreamSource,
};

use super::rate_limiter::GusRateLimiter;
use super::session::SessionStore;
use super::soap;
use super::GusClient;
use crate::error_mapping::map_transport_error;

pub struct ReqwestGusClient {
    http: reqwest::Client,
    base_url: String,
    user_key: String,
    session: SessionStore,
    rate_limiter: GusRateLimiter,
}

impl ReqwestGusClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        user_key: String,
        max_requests_per_second: u32,
    ) -> Self {
        Self {
            http,
            base_url,
            user_key,
            session: SessionStore::new(),
            rate_limiter: GusRateLimiter::new(max_requests_per_second),
        }
    }

    async fn login(&self, deadline: Instant) -> Result<String, TypedError> {
        let envelope = soap::build_zaloguj_envelope(&self.user_key);
        let body = self.post(envelope, "Zaloguj", deadline).await?;
        soap::parse_zaloguj_response(&body)
    }

    async fn session_token(&self, deadline: Instant) -> Result<String, TypedError> {
        self.session.get_or_renew(|| self.login(deadline)).await
    }

    async fn post(&self, envelope: String, action: &str, deadline: Instant) -> Result<String, TypedError> {
        self.rate_limiter.acquire().await;

        let remaining = deadline.saturating_duration_since(Instant::now());
        let response = self
            .http
            .post(&self.base_url)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("http://CIS/BIR/PUBL/2014/07/IUslugaBIRzewnPubl/{action}"))
            .body(envelope)
            .timeout(remaining)
            .send()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Gus, &e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Gus, &e))?;

        if let Some(fault_string) = soap::extract_soap_fault_string(&body) {
            let kind = if soap::fault_implies_session_expired(&fault_string) {
                ErrorKind::SessionExpired
            } else if status.is_server_error() {
                ErrorKind::ServerError
            } else {
                ErrorKind::Other
            };
            return Err(TypedError::new(UpstreamSource::Gus, kind, fault_string.clone())
                .with_http_status(status.as_u16())
                .with_upstream_code(fault_string));
        }

        if !status.is_success() {
            let kind = if status.is_server_error() {
                ErrorKind::ServerError
            } else {
                ErrorKind::Other
            };
            return Err(TypedError::new(
                UpstreamSource::Gus,
                kind,
                format!("GUS returned HTTP {status}"),
            )
            .with_http_status(status.as_u16()));
        }

        Ok(body)
    }

    fn report_name_for(silos_id: SilosId) -> &'static str {
        match silos_id {
            SilosId::LegalEntity => "BIR11OsPrawna",
            _ => "BIR11OsFizycznaDaneOgolne",
        }
    }
}

fn get(fields: &std::collections::BTreeMap<String, String>, key: &str) -> Option<String> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn legal_report_from_fields(fields: std::collections::BTreeMap<String, String>) -> GusLegalReport {
    GusLegalReport {
        regon: get(&fields, "praw_regon").unwrap_or_default(),
        name: get(&fields, "praw_nazwa").unwrap_or_default(),
        province: get(&fields, "praw_wojewodztwo"),
        district: get(&fields, "praw_powiat"),
        commune: get(&fields, "praw_gmina"),
        city: get(&fields, "praw_miejscowosc"),
        postal_code: get(&fields, "praw_kodPocztowy"),
        street: get(&fields, "praw_ulica"),
        building_number: get(&fields, "praw_nrNieruchomosci"),
        apartment_number: get(&fields, "praw_nrLokalu"),
        legal_form_code: get(&fields, "praw_podstawowaFormaPrawna_Symbol"),
        end_of_activity_date: get(&fields, "praw_dataZakonczeniaDzialalnosci"),
        fields,
    }
}

fn sole_trader_report_from_fields(
    fields: &std::collections::BTreeMap<String, String>,
) -> GusSoleTraderReport {
    GusSoleTraderReport {
        regon: get(fields, "fiz_regon").unwrap_or_default(),
        name: get(fields, "fiz_nazwa").unwrap_or_default(),
        province: get(fields, "fiz_wojewodztwo"),
        district: get(fields, "fiz_powiat"),
        commune: get(fields, "fiz_gmina"),
        city: get(fields, "fiz_miejscowosc"),
        postal_code: get(fields, "fiz_kodPocztowy"),
        street: get(fields, "fiz_ulica"),
        building_number: get(fields, "fiz_nrNieruchomosci"),
        apartment_number: get(fields, "fiz_nrLokalu"),
        end_of_activity_date: get(fields, "fiz_dataZakonczeniaDzialalnosci"),
    }
}

fn classification_from_fields(
    fields: &std::collections::BTreeMap<String, String>,
) -> Result<ClassificationResult, TypedError> {
    let regon = get(fields, "Regon").ok_or_else(|| {
        TypedError::new(
            UpstreamSource::Gus,
            ErrorKind::MalformedResponse,
            "GUS classification response is missing 'Regon'",
        )
    })?;
    let silos_code = get(fields, "SilosID").ok_or_else(|| {
        TypedError::new(
            UpstreamSource::Gus,
            ErrorKind::MalformedResponse,
            "GUS classification response is missing 'SilosID'",
        )
    })?;
    let silos_id = SilosId::from_code(&silos_code).ok_or_else(|| {
        TypedError::new(
            UpstreamSource::Gus,
            ErrorKind::MalformedResponse,
            format!("GUS classification returned unknown silosId '{silos_code}'"),
        )
    })?;

    Ok(ClassificationResult {
        regon,
        silos_id,
        entity_name: get(fields, "Nazwa").unwrap_or_default(),
        address_fragments: ucr_schemas::AddressFragments {
            province: get(fields, "Wojewodztwo"),
            district: get(fields, "Powiat"),
            commune: get(fields, "Gmina"),
            city: get(fields, "Miejscowosc"),
            postal_code: get(fields, "KodPocztowy"),
            street: get(fields, "Ulica"),
            building_number: get(fields, "NrNieruchomosci"),
            apartment_number: get(fields, "NrLokalu"),
        },
        end_of_activity_date: get(fields, "DataZakonczeniaDzialalnosci"),
    })
}

#[async_trait]
impl GusClient for ReqwestGusClient {
    async fn classify_by_nip(
        &self,
        nip: &str,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<ClassificationResult, TypedError> {
        tracing::info!(correlation_id, nip, "gus.classify_by_nip");

        let token = self.session_token(deadline).await?;
        let envelope = soap::build_dane_szukaj_podmioty_envelope(&token, nip);
        let body = match self.post(envelope, "DaneSzukajPodmioty", deadline).await {
            Err(e) if e.kind == ErrorKind::SessionExpired => {
                self.session.invalidate().await;
                let fresh_token = self.session_token(deadline).await?;
                let retry_envelope = soap::build_dane_szukaj_podmioty_envelope(&fresh_token, nip);
                self.post(retry_envelope, "DaneSzukajPodmioty", deadline).await?
            }
            other => other?,
        };
        let rows = soap::parse_dane_szukaj_podmioty_response(&body)?;

        let first = rows.first().ok_or_else(|| {
            TypedError::new(UpstreamSource::Gus, ErrorKind::NotFound, "GUS found no entity for NIP")
        })?;

        classification_from_fields(first)
    }

    async fn detailed_report(
        &self,
        regon: &str,
        silos_id: SilosId,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<GusDetailReport, TypedError> {
        tracing::info!(correlation_id, regon, silos = silos_id.as_code(), "gus.detailed_report");

        let report_name = Self::report_name_for(silos_id);

        let token = self.session_token(deadline).await?;
        let envelope = soap::build_dane_pobierz_pelny_raport_envelope(&token, regon, report_name);
        let body = match self.post(envelope, "DanePobierzPelnyRaport", deadline).await {
            Err(e) if e.kind == ErrorKind::SessionExpired => {
                self.session.invalidate().await;
                let fresh_token = self.session_token(deadline).await?;
                let retry_envelope =
                    soap::build_dane_pobierz_pelny_raport_envelope(&fresh_token, regon, report_name);
                self.post(retry_envelope, "DanePobierzPelnyRaport", deadline).await?
            }
            other => other?,
        };
        let rows = soap::parse_dane_pobierz_pelny_raport_response(&body)?;

        let first = rows.into_iter().next().ok_or_else(|| {
            TypedError::new(
                UpstreamSource::Gus,
                ErrorKind::NotFound,
                "GUS returned no detail rows for REGON",
            )
        })?;

        Ok(match silos_id {
            SilosId::LegalEntity => GusDetailReport::Legal(legal_report_from_fields(first)),
            _ => GusDetailReport::SoleTrader(sole_trader_report_from_fields(&first)),
        })
    }

    fn current_session_id(&self) -> Option<String> {
        self.session.try_peek()
    }
}
