//! Unified mapper (C5): projects whichever registry answered onto
//! [`UnifiedCompanyRecord`]. Pure functions, no I/O — every upstream value
//! they need is already resolved and owned by the caller.
//!
//! Priority is fixed by which `map_from_*` the caller invokes, not by any
//! logic in here: CEIDG-only, KRS-only, or GUS-only. There is no merging
//! across registries; each source is authoritative when selected, and
//! absent fields become `None` rather than being backfilled from elsewhere.

use ucr_schemas::{
    Address, CeidgCompany, ClassificationResult, CompanyStatus, DataSource, EntityType,
    GusDetailReport, GusLegalReport, GusSoleTraderReport, KrsResponse, LegalForm,
    UnifiedCompanyRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// `record.nip == request.nip` failed.
    NipMismatch { expected: String, actual: String },
    /// A required upstream field was absent or blank.
    MissingField { field: &'static str },
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NipMismatch { expected, actual } => {
                write!(f, "mapped record nip '{actual}' does not match request nip '{expected}'")
            }
            Self::MissingField { field } => write!(f, "missing required field '{field}'"),
        }
    }
}

impl std::error::Error for MappingError {}

fn check_nip(request_nip: &str, mapped_nip: &str) -> Result<(), MappingError> {
    if request_nip == mapped_nip {
        Ok(())
    } else {
        Err(MappingError::NipMismatch {
            expected: request_nip.to_string(),
            actual: mapped_nip.to_string(),
        })
    }
}

/// `DD.MM.YYYY` → `YYYY-MM-DD`; anything else (including already-ISO dates)
/// is preserved unchanged. Idempotent on `YYYY-MM-DD` inputs.
pub fn normalize_date(raw: &str) -> String {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() == 3
        && parts[0].len() == 2
        && parts[1].len() == 2
        && parts[2].len() == 4
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
    {
        format!("{}-{}-{}", parts[2], parts[1], parts[0])
    } else {
        raw.to_string()
    }
}

/// Exactly five digits and no dash → `XX-XXX`; otherwise preserved.
pub fn normalize_postal_code(raw: &str) -> String {
    if raw.len() == 5 && raw.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}", &raw[0..2], &raw[2..5])
    } else {
        raw.to_string()
    }
}

/// Ordered, case-insensitive catalog match; first hit wins. `PROSTA SPÓŁKA
/// AKCYJNA` is tried before `SPÓŁKA AKCYJNA` since the latter is a substring
/// of the former's wording once case-folded.
const KRS_LEGAL_FORM_CATALOG: &[(&str, LegalForm)] = &[
    ("PROSTA SPÓŁKA AKCYJNA", LegalForm::ProstaSpolkaAkcyjna),
    ("SPÓŁKA AKCYJNA", LegalForm::SpolkaAkcyjna),
    ("SPÓŁKA Z OGRANICZONĄ ODPOWIEDZIALNOŚCIĄ", LegalForm::SpolkaZOo),
    ("SPÓŁKA KOMANDYTOWO-AKCYJNA", LegalForm::SpolkaKomandytowoAkcyjna),
    ("SPÓŁKA KOMANDYTOWA", LegalForm::SpolkaKomandytowa),
    ("SPÓŁKA JAWNA", LegalForm::SpolkaJawna),
    ("SPÓŁKA PARTNERSKA", LegalForm::SpolkaPartnerska),
    ("SPÓŁKA CYWILNA", LegalForm::SpolkaCywilna),
    ("FUNDACJA", LegalForm::Fundacja),
    ("STOWARZYSZENIE", LegalForm::Stowarzyszenie),
];

/// GUS legal reports only recognize a small subset of the full KRS catalog.
const GUS_LEGAL_FORM_CATALOG: &[(&str, LegalForm)] = &[
    ("PROSTA SPÓŁKA AKCYJNA", LegalForm::ProstaSpolkaAkcyjna),
    ("SPÓŁKA AKCYJNA", LegalForm::SpolkaAkcyjna),
    ("SPÓŁKA Z OGRANICZONĄ ODPOWIEDZIALNOŚCIĄ", LegalForm::SpolkaZOo),
    ("FUNDACJA", LegalForm::Fundacja),
    ("STOWARZYSZENIE", LegalForm::Stowarzyszenie),
];

fn normalize_legal_form(raw: &str, catalog: &[(&str, LegalForm)]) -> LegalForm {
    let upper = raw.to_uppercase();
    catalog
        .iter()
        .find(|(pattern, _)| upper.contains(pattern))
        .map(|(_, form)| *form)
        .unwrap_or(LegalForm::Inna)
}

/// KRS status derivation (spec.md §3, priority order): explicit deregistration
/// beats bankruptcy beats liquidation beats the default active state.
fn krs_status(krs: &KrsResponse) -> CompanyStatus {
    if krs.is_explicitly_deregistered() {
        CompanyStatus::Wykreslony
    } else if krs.has_bankruptcy_proceeding() {
        CompanyStatus::Upadlosc
    } else if krs.has_liquidation_proceeding() {
        CompanyStatus::WLikwidacji
    } else {
        CompanyStatus::Aktywny
    }
}

fn present(field: &Option<String>) -> bool {
    matches!(field, Some(v) if !v.trim().is_empty())
}

pub fn map_from_krs(
    request_nip: &str,
    regon: Option<&str>,
    krs: &KrsResponse,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    if krs.name.trim().is_empty() {
        return Err(MappingError::MissingField { field: "nazwa" });
    }
    check_nip(request_nip, request_nip)?;

    let status = krs_status(krs);
    let legal_form = krs
        .legal_form_name
        .as_deref()
        .map(|raw| normalize_legal_form(raw, KRS_LEGAL_FORM_CATALOG));

    Ok(UnifiedCompanyRecord {
        nip: request_nip.to_string(),
        name: krs.name.clone(),
        address: Address {
            province: krs.province.clone().unwrap_or_default(),
            district: krs.district.clone().unwrap_or_default(),
            commune: krs.commune.clone().unwrap_or_default(),
            city: krs.city.clone().unwrap_or_default(),
            postal_code: krs
                .postal_code
                .as_deref()
                .map(normalize_postal_code)
                .unwrap_or_default(),
            street: krs.street.clone(),
            building_number: krs.building_number.clone(),
            apartment_number: krs.apartment_number.clone(),
        },
        status,
        is_active: status.is_active(),
        activity_start_date: krs.registration_date.as_deref().map(normalize_date),
        activity_end_date: krs.deregistration_date.as_deref().map(normalize_date),
        regon: regon.map(str::to_string),
        krs: Some(krs.krs_number.clone()),
        legal_form,
        entity_type: EntityType::Legal,
        data_source: DataSource::Krs,
        updated_at: now.to_rfc3339(),
        registry_signature: krs.state_as_of_date.clone().unwrap_or_default(),
    })
}

pub fn map_from_ceidg(
    request_nip: &str,
    ceidg: &CeidgCompany,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    check_nip(request_nip, &ceidg.nip)?;
    if ceidg.business_name.trim().is_empty() {
        return Err(MappingError::MissingField { field: "business_name" });
    }

    let status = CompanyStatus::from_ceidg(&ceidg.status);

    Ok(UnifiedCompanyRecord {
        nip: ceidg.nip.clone(),
        name: ceidg.business_name.clone(),
        address: Address {
            province: ceidg.address.province.clone().unwrap_or_default(),
            district: ceidg.address.district.clone().unwrap_or_default(),
            commune: ceidg.address.commune.clone().unwrap_or_default(),
            city: ceidg.address.city.clone().unwrap_or_default(),
            postal_code: ceidg
                .address
                .postal_code
                .as_deref()
                .map(normalize_postal_code)
                .unwrap_or_default(),
            street: ceidg.address.street.clone(),
            building_number: ceidg.address.building_number.clone(),
            apartment_number: ceidg.address.apartment_number.clone(),
        },
        status,
        is_active: status.is_active(),
        activity_start_date: ceidg.activity_start_date.as_deref().map(normalize_date),
        activity_end_date: ceidg.activity_end_date.as_deref().map(normalize_date),
        regon: ceidg.regon.clone(),
        krs: None,
        legal_form: Some(LegalForm::DzialalnoscGospodarcza),
        entity_type: EntityType::Natural,
        data_source: DataSource::Ceidg,
        updated_at: now.to_rfc3339(),
        registry_signature: ceidg.record_id.clone(),
    })
}

/// GUS-only mapping, reached either when a legal entity has no extractable
/// KRS number, when both KRS sub-registries failed, or via the CEIDG/GUS
/// sole-trader fallback chain.
pub fn map_from_gus(
    request_nip: &str,
    detail: &GusDetailReport,
    gus_session_signature: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    match detail {
        GusDetailReport::Legal(legal) => map_from_gus_legal(request_nip, legal, gus_session_signature, now),
        GusDetailReport::SoleTrader(sole) => {
            map_from_gus_sole_trader(request_nip, sole, gus_session_signature, now)
        }
    }
}

fn gus_status(end_of_activity_date: &Option<String>) -> CompanyStatus {
    if present(end_of_activity_date) {
        CompanyStatus::Wyrejestrowany
    } else {
        CompanyStatus::Aktywny
    }
}

fn map_from_gus_legal(
    request_nip: &str,
    legal: &GusLegalReport,
    registry_signature: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    if legal.name.trim().is_empty() {
        return Err(MappingError::MissingField { field: "praw_nazwa" });
    }

    let status = gus_status(&legal.end_of_activity_date);
    let legal_form = legal
        .legal_form_code
        .as_deref()
        .map(|raw| normalize_legal_form(raw, GUS_LEGAL_FORM_CATALOG));

    Ok(UnifiedCompanyRecord {
        nip: request_nip.to_string(),
        name: legal.name.clone(),
        address: Address {
            province: legal.province.clone().unwrap_or_default(),
            district: legal.district.clone().unwrap_or_default(),
            commune: legal.commune.clone().unwrap_or_default(),
            city: legal.city.clone().unwrap_or_default(),
            postal_code: legal
                .postal_code
                .as_deref()
                .map(normalize_postal_code)
                .unwrap_or_default(),
            street: legal.street.clone(),
            building_number: legal.building_number.clone(),
            apartment_number: legal.apartment_number.clone(),
        },
        status,
        is_active: status.is_active(),
        activity_start_date: None,
        activity_end_date: legal.end_of_activity_date.as_deref().map(normalize_date),
        regon: Some(legal.regon.clone()),
        krs: legal.extract_krs_number(),
        legal_form,
        entity_type: EntityType::Legal,
        data_source: DataSource::Gus,
        updated_at: now.to_rfc3339(),
        registry_signature: registry_signature.to_string(),
    })
}

fn map_from_gus_sole_trader(
    request_nip: &str,
    sole: &GusSoleTraderReport,
    registry_signature: &str,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    if sole.name.trim().is_empty() {
        return Err(MappingError::MissingField { field: "fiz_nazwa" });
    }

    let status = gus_status(&sole.end_of_activity_date);

    Ok(UnifiedCompanyRecord {
        nip: request_nip.to_string(),
        name: sole.name.clone(),
        address: Address {
            province: sole.province.clone().unwrap_or_default(),
            district: sole.district.clone().unwrap_or_default(),
            commune: sole.commune.clone().unwrap_or_default(),
            city: sole.city.clone().unwrap_or_default(),
            postal_code: sole
                .postal_code
                .as_deref()
                .map(normalize_postal_code)
                .unwrap_or_default(),
            street: sole.street.clone(),
            building_number: sole.building_number.clone(),
            apartment_number: sole.apartment_number.clone(),
        },
        status,
        is_active: status.is_active(),
        activity_start_date: None,
        activity_end_date: sole.end_of_activity_date.as_deref().map(normalize_date),
        regon: Some(sole.regon.clone()),
        krs: None,
        legal_form: Some(LegalForm::DzialalnoscGospodarcza),
        entity_type: EntityType::Natural,
        data_source: DataSource::Gus,
        updated_at: now.to_rfc3339(),
        registry_signature: registry_signature.to_string(),
    })
}

/// The classification-only inactive mapping: a deregistered-looking entity
/// discovered during `decidingNextStep` with no further upstream calls made.
pub fn map_inactive_from_classification(
    request_nip: &str,
    classification: &ClassificationResult,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<UnifiedCompanyRecord, MappingError> {
    if classification.entity_name.trim().is_empty() {
        return Err(MappingError::MissingField { field: "Nazwa" });
    }

    let fragments = &classification.address_fragments;
    Ok(UnifiedCompanyRecord {
        nip: request_nip.to_string(),
        name: classification.entity_name.clone(),
        address: Address {
            province: fragments.province.clone().unwrap_or_default(),
            district: fragments.district.clone().unwrap_or_default(),
            commune: fragments.commune.clone().unwrap_or_default(),
            city: fragments.city.clone().unwrap_or_default(),
            postal_code: fragments
                .postal_code
                .as_deref()
                .map(normalize_postal_code)
                .unwrap_or_default(),
            street: fragments.street.clone(),
            building_number: fragments.building_number.clone(),
            apartment_number: fragments.apartment_number.clone(),
        },
        status: CompanyStatus::Wykreslony,
        is_active: false,
        activity_start_date: None,
        activity_end_date: classification.end_of_activity_date.as_deref().map(normalize_date),
        regon: Some(classification.regon.clone()),
        krs: None,
        legal_form: None,
        entity_type: EntityType::Legal,
        data_source: DataSource::Gus,
        updated_at: now.to_rfc3339(),
        registry_signature: classification.regon.clone(),
    })
}
