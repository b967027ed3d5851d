//! KRS (National Court Register) domain types.

use serde::{Deserialize, Serialize};

/// Ten-digit KRS number, extracted from a GUS legal-entity report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KrsNumber(pub String);

impl std::fmt::Display for KrsNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// KRS sub-registry. Probed in order: `P` first, then `S` on `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KrsRegistry {
    /// Entrepreneurs register.
    P,
    /// Associations / foundations register.
    S,
}

impl KrsRegistry {
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::P => "P",
            Self::S => "S",
        }
    }
}

/// A single proceeding entry under dzial6 (bankruptcy / liquidation) of a KRS report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProceedingKind {
    Bankruptcy,
    Liquidation,
}

/// Parsed KRS report, reduced to the fields the status-derivation rules need.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KrsResponse {
    pub krs_number: String,
    pub name: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub commune: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
    pub legal_form_name: Option<String>,
    pub registration_date: Option<String>,
    /// `dataWykreslenia` — explicit deregistration date, if present and non-blank.
    pub deregistration_date: Option<String>,
    /// "state-as-of" date the registry reports data for; used in `registrySignature`.
    pub state_as_of_date: Option<String>,
    /// Proceedings under dzial6, in the order the registry reported them.
    pub proceedings: Vec<ProceedingKind>,
}

impl KrsResponse {
    pub fn has_bankruptcy_proceeding(&self) -> bool {
        self.proceedings.contains(&ProceedingKind::Bankruptcy)
    }

    pub fn has_liquidation_proceeding(&self) -> bool {
        self.proceedings.contains(&ProceedingKind::Liquidation)
    }

    pub fn is_explicitly_deregistered(&self) -> bool {
        matches!(&self.deregistration_date, Some(d) if !d.trim().is_empty())
    }
}
