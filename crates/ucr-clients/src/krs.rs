//! KRS (National Court Register) REST client.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Instant;
use ucr_schemas::{ErrorKind, KrsRegistry, KrsResponse, ProceedingKind, TypedError, UpstreamSource};

use crate::error_mapping::{map_krs_status, map_transport_error};

#[async_trait]
pub trait KrsClient: Send + Sync {
    async fn fetch(
        &self,
        krs_number: &str,
        registry: KrsRegistry,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<KrsResponse, TypedError>;
}

pub struct ReqwestKrsClient {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestKrsClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl KrsClient for ReqwestKrsClient {
    async fn fetch(
        &self,
        krs_number: &str,
        registry: KrsRegistry,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<KrsResponse, TypedError> {
        let url = format!(
            "{}/api/krs/{}/{}",
            self.base_url.trim_end_matches('/'),
            registry.as_path_segment(),
            krs_number
        );

        let remaining = deadline.saturating_duration_since(Instant::now());
        let send = self
            .http
            .get(&url)
            .header("x-correlation-id", correlation_id)
            .timeout(remaining);

        let response = send
            .send()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Krs, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TypedError::new(
                UpstreamSource::Krs,
                map_krs_status(status),
                format!("KRS returned HTTP {status}"),
            )
            .with_http_status(status.as_u16()));
        }

        let wire: KrsWireResponse = response
            .json()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Krs, &e))?;

        wire.into_domain(krs_number)
    }
}

#[derive(Debug, Deserialize)]
struct KrsWireResponse {
    #[serde(default)]
    nazwa: Option<String>,
    #[serde(default)]
    wojewodztwo: Option<String>,
    #[serde(default)]
    powiat: Option<String>,
    #[serde(default)]
    gmina: Option<String>,
    #[serde(default)]
    miejscowosc: Option<String>,
    #[serde(default)]
    kod_pocztowy: Option<String>,
    #[serde(default)]
    ulica: Option<String>,
    #[serde(default)]
    numer_budynku: Option<String>,
    #[serde(default)]
    numer_lokalu: Option<String>,
    #[serde(default)]
    forma_prawna: Option<String>,
    #[serde(default)]
    data_rejestracji: Option<String>,
    #[serde(default)]
    data_wykreslenia: Option<String>,
    #[serde(default)]
    stan_na_dzien: Option<String>,
    #[serde(default)]
    dzial6: Option<Dzial6>,
}

#[derive(Debug, Default, Deserialize)]
struct Dzial6 {
    #[serde(default)]
    upadlosc: bool,
    #[serde(default)]
    likwidacja: bool,
}

impl KrsWireResponse {
    fn into_domain(self, krs_number: &str) -> Result<KrsResponse, TypedError> {
        let name = self.nazwa.ok_or_else(|| {
            TypedError::new(
                UpstreamSource::Krs,
                ErrorKind::MalformedResponse,
                "KRS response is missing required field 'nazwa'",
            )
        })?;

        let mut proceedings = Vec::new();
        if let Some(d6) = &self.dzial6 {
            if d6.upadlosc {
                proceedings.push(ProceedingKind::Bankruptcy);
            }
            if d6.likwidacja {
                proceedings.push(ProceedingKind::Liquidation);
            }
        }

        Ok(KrsResponse {
            krs_number: krs_number.to_string(),
            name,
            province: self.wojewodztwo,
            district: self.powiat,
            commune: self.gmina,
            city: self.miejscowosc,
            postal_code: self.kod_pocztowy,
            street: self.ulica,
            building_number: self.numer_budynku,
            apartment_number: self.numer_lokalu,
            legal_form_name: self.forma_prawna,
            registration_date: self.data_rejestracji,
            deregistration_date: self.data_wykreslenia,
            state_as_of_date: self.stan_na_dzien,
            proceedings,
        })
    }
}
