//! GUS classification result — the routing discriminant for the whole request.

use serde::{Deserialize, Serialize};

/// `silosId` as returned by GUS classification. Selects the downstream branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SilosId {
    /// `1` — sole trader. Route: CEIDG, fallback GUS-detail.
    SoleTrader,
    /// `2` — agriculture. Route: GUS-detail only.
    Agriculture,
    /// `3` — professional services. Route: GUS-detail only.
    ProfessionalServices,
    /// `4` — deregistered. Terminal failure.
    Deregistered,
    /// `6` — legal entity. Route: GUS-detail to obtain KRS number, then KRS.
    LegalEntity,
}

impl SilosId {
    /// Parse the raw `silosId` string from GUS. Unknown codes are surfaced by
    /// the caller as a `systemFaultFailure` transition, not a panic.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::SoleTrader),
            "2" => Some(Self::Agriculture),
            "3" => Some(Self::ProfessionalServices),
            "4" => Some(Self::Deregistered),
            "6" => Some(Self::LegalEntity),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::SoleTrader => "1",
            Self::Agriculture => "2",
            Self::ProfessionalServices => "3",
            Self::Deregistered => "4",
            Self::LegalEntity => "6",
        }
    }
}

/// Classification result as returned by GUS's classification operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// REGON: 9- or 14-digit statistical identifier.
    pub regon: String,
    pub silos_id: SilosId,
    pub entity_name: String,
    pub address_fragments: AddressFragments,
    /// Presence forces a direct inactive mapping with no further upstream calls.
    pub end_of_activity_date: Option<String>,
}

/// Raw address fragments as supplied by GUS classification, before any
/// unified-record normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressFragments {
    pub province: Option<String>,
    pub district: Option<String>,
    pub commune: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
}
