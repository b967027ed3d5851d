//! CEIDG (sole-trader registry) domain types.

use serde::{Deserialize, Serialize};

/// CEIDG's own status enum, distinct from the unified `CompanyStatus`.
/// Mapped via [`crate::unified::CompanyStatus`]'s `from_ceidg` constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CeidgStatus {
    Aktywny,
    Wykreslony,
    Zawieszony,
    OczekujeNaRozpoczecieDzialalnosci,
    WylacznieWFormieSpolki,
    /// Any CEIDG status value this client does not recognize.
    Unknown(String),
}

impl CeidgStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "AKTYWNY" => Self::Aktywny,
            "WYKRESLONY" => Self::Wykreslony,
            "ZAWIESZONY" => Self::Zawieszony,
            "OCZEKUJE_NA_ROZPOCZECIE_DZIALALNOSCI" => Self::OczekujeNaRozpoczecieDzialalnosci,
            "WYLACZNIE_W_FORMIE_SPOLKI" => Self::WylacznieWFormieSpolki,
            other => Self::Unknown(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CeidgAddress {
    pub province: Option<String>,
    pub district: Option<String>,
    pub commune: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CeidgOwner {
    pub first_name: String,
    pub last_name: String,
}

/// A sole-trader record as returned by CEIDG's `fetchByNip` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeidgCompany {
    pub nip: String,
    pub regon: Option<String>,
    pub business_name: String,
    pub owner: CeidgOwner,
    pub address: CeidgAddress,
    pub status: CeidgStatus,
    pub activity_start_date: Option<String>,
    pub activity_end_date: Option<String>,
    /// CEIDG record id, used to compose `registrySignature`.
    pub record_id: String,
}
