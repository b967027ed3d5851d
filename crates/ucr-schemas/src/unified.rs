//! The unified, registry-agnostic output record and its supporting enums.

use serde::{Deserialize, Serialize};

use crate::ceidg::CeidgStatus;

/// Normalized postal address, present on every `UnifiedCompanyRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub province: String,
    pub district: String,
    pub commune: String,
    pub city: String,
    pub postal_code: String,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
}

/// Unified company lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyStatus {
    Aktywny,
    Nieaktywny,
    Zawieszony,
    Wyrejestrowany,
    #[serde(rename = "W_LIKWIDACJI")]
    WLikwidacji,
    #[serde(rename = "UPADŁOŚĆ")]
    Upadlosc,
    #[serde(rename = "WYKREŚLONY")]
    Wykreslony,
}

impl CompanyStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Aktywny)
    }

    /// Maps a CEIDG status per the closed table in spec.md §3. Unknown CEIDG
    /// statuses map to `NIEAKTYWNY`, same as the two named-but-inactive cases.
    pub fn from_ceidg(status: &CeidgStatus) -> Self {
        match status {
            CeidgStatus::Aktywny => Self::Aktywny,
            CeidgStatus::Wykreslony => Self::Wyrejestrowany,
            CeidgStatus::Zawieszony => Self::Zawieszony,
            CeidgStatus::OczekujeNaRozpoczecieDzialalnosci => Self::Nieaktywny,
            CeidgStatus::WylacznieWFormieSpolki => Self::Nieaktywny,
            CeidgStatus::Unknown(_) => Self::Nieaktywny,
        }
    }
}

/// Closed catalog of recognized legal forms; anything else normalizes to `Inna`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalForm {
    #[serde(rename = "SPÓŁKA_AKCYJNA")]
    SpolkaAkcyjna,
    #[serde(rename = "PROSTA_SPÓŁKA_AKCYJNA")]
    ProstaSpolkaAkcyjna,
    #[serde(rename = "SPÓŁKA_Z_OGRANICZONĄ_ODPOWIEDZIALNOŚCIĄ")]
    SpolkaZOo,
    #[serde(rename = "SPÓŁKA_KOMANDYTOWO_AKCYJNA")]
    SpolkaKomandytowoAkcyjna,
    #[serde(rename = "SPÓŁKA_KOMANDYTOWA")]
    SpolkaKomandytowa,
    #[serde(rename = "SPÓŁKA_JAWNA")]
    SpolkaJawna,
    #[serde(rename = "SPÓŁKA_PARTNERSKA")]
    SpolkaPartnerska,
    #[serde(rename = "SPÓŁKA_CYWILNA")]
    SpolkaCywilna,
    #[serde(rename = "FUNDACJA")]
    Fundacja,
    #[serde(rename = "STOWARZYSZENIE")]
    Stowarzyszenie,
    /// Sole-trader activity, always paired with `EntityType::Natural`.
    #[serde(rename = "DZIAŁALNOŚĆ_GOSPODARCZA")]
    DzialalnoscGospodarcza,
    /// Anything not matched by the ordered catalog.
    #[serde(rename = "INNA")]
    Inna,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Legal,
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataSource {
    Gus,
    Krs,
    Ceidg,
}

/// The service's single output shape, projected from whichever registry won.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedCompanyRecord {
    pub nip: String,
    pub name: String,
    pub address: Address,
    pub status: CompanyStatus,
    pub is_active: bool,
    pub activity_start_date: Option<String>,
    pub activity_end_date: Option<String>,
    pub regon: Option<String>,
    pub krs: Option<String>,
    pub legal_form: Option<LegalForm>,
    pub entity_type: EntityType,
    pub data_source: DataSource,
    /// ISO-8601 instant this record was assembled.
    pub updated_at: String,
    /// Source-qualified freshness receipt; see spec.md §4.5.
    pub registry_signature: String,
}
