//! GUS detailed report types (legal entity and sole trader variants).
//!
//! GUS returns different field-name prefixes per report variant; both are
//! represented here as discriminated structs rather than one loosely-typed
//! bag, so downstream mapping code cannot confuse the two shapes.

use serde::{Deserialize, Serialize};

/// The aliases under which a KRS number may appear in a GUS legal report,
/// tried in order; the first non-empty match wins.
///
/// Open question (spec.md §9): the precise union of field names GUS uses for
/// the KRS number is not documented by the source material. These three are
/// the ones observed in sample reports; see `DESIGN.md` for the resolution.
pub const KRS_NUMBER_ALIASES: [&str; 3] = ["praw_numerWRejestrzeEwidencji", "praw_krs", "numerKRS"];

/// GUS detailed report for a legal entity (`silosId == "6"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GusLegalReport {
    pub regon: String,
    pub name: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub commune: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
    pub legal_form_code: Option<String>,
    pub end_of_activity_date: Option<String>,
    /// Raw alias→value map as received, scanned by
    /// [`KRS_NUMBER_ALIASES`] to extract the KRS number.
    pub fields: std::collections::BTreeMap<String, String>,
}

impl GusLegalReport {
    /// Scan the known field aliases in order; return the first non-empty hit.
    pub fn extract_krs_number(&self) -> Option<String> {
        KRS_NUMBER_ALIASES.iter().find_map(|alias| {
            self.fields
                .get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }
}

/// GUS detailed report for a sole trader (`silosId == "1"`, GUS-detail fallback).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GusSoleTraderReport {
    pub regon: String,
    pub name: String,
    pub province: Option<String>,
    pub district: Option<String>,
    pub commune: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub street: Option<String>,
    pub building_number: Option<String>,
    pub apartment_number: Option<String>,
    pub end_of_activity_date: Option<String>,
}

/// Discriminated GUS detailed-report result, returned by `detailedReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GusDetailReport {
    Legal(GusLegalReport),
    SoleTrader(GusSoleTraderReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_non_empty_alias() {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("numerKRS".to_string(), "0000123456".to_string());
        let report = GusLegalReport {
            fields,
            ..Default::default()
        };
        assert_eq!(report.extract_krs_number().as_deref(), Some("0000123456"));
    }

    #[test]
    fn skips_blank_aliases() {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("praw_numerWRejestrzeEwidencji".to_string(), "   ".to_string());
        fields.insert("praw_krs".to_string(), "0000654321".to_string());
        let report = GusLegalReport {
            fields,
            ..Default::default()
        };
        assert_eq!(report.extract_krs_number().as_deref(), Some("0000654321"));
    }

    #[test]
    fn returns_none_when_no_alias_present() {
        let report = GusLegalReport::default();
        assert_eq!(report.extract_krs_number(), None);
    }
}
