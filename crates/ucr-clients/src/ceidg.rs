//! CEIDG (sole-trader registry) REST client. Bearer-token authenticated.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Instant;
use ucr_schemas::{
    CeidgAddress, CeidgCompany, CeidgOwner, CeidgStatus, ErrorKind, Nip, TypedError, UpstreamSource,
};

use crate::error_mapping::{map_ceidg_status, map_transport_error};

#[async_trait]
pub trait CeidgClient: Send + Sync {
    async fn fetch_by_nip(
        &self,
        nip: &Nip,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<CeidgCompany, TypedError>;
}

pub struct ReqwestCeidgClient {
    http: reqwest::Client,
    base_url: String,
    jwt_token: String,
}

impl ReqwestCeidgClient {
    pub fn new(http: reqwest::Client, base_url: String, jwt_token: String) -> Self {
        Self {
            http,
            base_url,
            jwt_token,
        }
    }
}

#[async_trait]
impl CeidgClient for ReqwestCeidgClient {
    async fn fetch_by_nip(
        &self,
        nip: &Nip,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<CeidgCompany, TypedError> {
        let url = format!("{}/firmy", self.base_url.trim_end_matches('/'));
        let remaining = deadline.saturating_duration_since(Instant::now());

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.jwt_token)
            .header("x-correlation-id", correlation_id)
            .query(&[("nip", nip.as_str())])
            .timeout(remaining)
            .send()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Ceidg, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TypedError::new(
                UpstreamSource::Ceidg,
                map_ceidg_status(status),
                format!("CEIDG returned HTTP {status}"),
            )
            .with_http_status(status.as_u16()));
        }

        let wire: CeidgWireEnvelope = response
            .json()
            .await
            .map_err(|e| map_transport_error(UpstreamSource::Ceidg, &e))?;

        let first = wire.firmy.into_iter().next().ok_or_else(|| {
            TypedError::new(
                UpstreamSource::Ceidg,
                ErrorKind::NotFound,
                "CEIDG returned no matching record for NIP",
            )
        })?;

        first.into_domain()
    }
}

#[derive(Debug, Deserialize)]
struct CeidgWireEnvelope {
    #[serde(default)]
    firmy: Vec<CeidgWireCompany>,
}

#[derive(Debug, Deserialize)]
struct CeidgWireCompany {
    id: Option<String>,
    nip: Option<String>,
    regon: Option<String>,
    nazwa: Option<String>,
    imie: Option<String>,
    nazwisko: Option<String>,
    status: Option<String>,
    #[serde(default)]
    data_rozpoczecia: Option<String>,
    #[serde(default)]
    data_zakonczenia: Option<String>,
    #[serde(default)]
    adres: CeidgWireAddress,
}

#[derive(Debug, Default, Deserialize)]
struct CeidgWireAddress {
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
}

impl CeidgWireCompany {
    fn into_domain(self) -> Result<CeidgCompany, TypedError> {
        let missing = |field: &str| {
            TypedError::new(
                UpstreamSource::Ceidg,
                ErrorKind::MalformedResponse,
                format!("CEIDG response is missing required field '{field}'"),
            )
        };
        let id = self.id.ok_or_else(|| missing("id"))?;
        let nip = self.nip.ok_or_else(|| missing("nip"))?;
        let nazwa = self.nazwa.ok_or_else(|| missing("nazwa"))?;
        let status_raw = self.status.ok_or_else(|| missing("status"))?;

        Ok(CeidgCompany {
            nip,
            regon: self.regon,
            business_name: nazwa,
            owner: CeidgOwner {
                first_name: self.imie.unwrap_or_default(),
                last_name: self.nazwisko.unwrap_or_default(),
            },
            address: CeidgAddress {
                province: self.adres.wojewodztwo,
                district: self.adres.powiat,
                commune: self.adres.gmina,
                city: self.adres.miejscowosc,
                postal_code: self.adres.kod_pocztowy,
                street: self.adres.ulica,
                building_number: self.adres.numer_budynku,
                apartment_number: self.adres.numer_lokalu,
            },
            status: CeidgStatus::from_wire(&status_raw),
            activity_start_date: self.data_rozpoczecia,
            activity_end_date: self.data_zakonczenia,
            record_id: id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_company() -> CeidgWireCompany {
        CeidgWireCompany {
            id: Some("rec-1".to_string()),
            nip: Some("5260250995".to_string()),
            regon: Some("123456789".to_string()),
            nazwa: Some("Jan Kowalski".to_string()),
            imie: Some("Jan".to_string()),
            nazwisko: Some("Kowalski".to_string()),
            status: Some("AKTYWNY".to_string()),
            data_rozpoczecia: Some("2020-01-01".to_string()),
            data_zakonczenia: None,
            adres: CeidgWireAddress::default(),
        }
    }

    #[test]
    fn maps_known_status_into_domain() {
        let domain = sample_company().into_domain().unwrap();
        assert_eq!(domain.status, CeidgStatus::Aktywny);
        assert_eq!(domain.record_id, "rec-1");
    }

    #[test]
    fn missing_required_field_is_malformed_response() {
        let mut wire = sample_company();
        wire.nazwa = None;
        let err = wire.into_domain().unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
    }
}
