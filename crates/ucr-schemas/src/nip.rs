//! Polish taxpayer identifier (NIP): parsing, formatting and checksum validation.
//!
//! This module does **not** know about GUS, KRS, or CEIDG — it is the pure,
//! dependency-free building block every upstream client and the orchestrator
//! validate against before making a single network call.

use std::fmt;

/// Official weighted-sum checksum weights for the ten NIP digits.
const CHECKSUM_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// A validated ten-digit Polish taxpayer identifier.
///
/// Construction is the only way to obtain a `Nip`; every `Nip` in the system
/// has already passed digit-count and checksum validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nip(String);

/// Why a candidate NIP string failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NipError {
    /// After stripping formatting characters, the string is not exactly 10 digits.
    WrongLength { stripped: String },
    /// The stripped string contains a non-digit character.
    NonDigit { stripped: String },
    /// The weighted checksum did not match the tenth digit.
    ChecksumMismatch { stripped: String, expected: u32, found: u32 },
}

impl fmt::Display for NipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NipError::WrongLength { stripped } => {
                write!(f, "NIP '{stripped}' must have exactly 10 digits")
            }
            NipError::NonDigit { stripped } => {
                write!(f, "NIP '{stripped}' contains a non-digit character")
            }
            NipError::ChecksumMismatch {
                stripped,
                expected,
                found,
            } => write!(
                f,
                "NIP '{stripped}' failed checksum: expected check digit {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for NipError {}

impl Nip {
    /// Parse and validate a NIP from arbitrary user input.
    ///
    /// Strips spaces, dashes, dots, slashes and parentheses before validating
    /// exact digit count (10) and the official weighted checksum.
    pub fn parse(input: &str) -> Result<Self, NipError> {
        let stripped: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '/' | '(' | ')'))
            .collect();

        if stripped.len() != 10 {
            return Err(NipError::WrongLength { stripped });
        }

        let digits: Vec<u32> = stripped
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<Vec<u32>>>()
            .ok_or(NipError::NonDigit {
                stripped: stripped.clone(),
            })?;

        let sum: u32 = CHECKSUM_WEIGHTS
            .iter()
            .zip(digits.iter())
            .map(|(w, d)| w * d)
            .sum();
        let remainder = sum % 11;
        let expected = if remainder == 10 { 0 } else { remainder };
        let found = digits[9];

        if expected != found {
            return Err(NipError::ChecksumMismatch {
                stripped,
                expected,
                found,
            });
        }

        Ok(Nip(stripped))
    }

    /// The ten-digit canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Nip {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Nip {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Nip::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_valid_nip() {
        assert!(Nip::parse("5260250995").is_ok());
        assert!(Nip::parse("7122854882").is_ok());
    }

    #[test]
    fn strips_separators() {
        let a = Nip::parse("526-025-09-95").unwrap();
        let b = Nip::parse("526 025 09 95").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "5260250995");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Nip::parse("123").unwrap_err();
        assert!(matches!(err, NipError::WrongLength { .. }));
    }

    #[test]
    fn rejects_non_digit() {
        let err = Nip::parse("123456789A").unwrap_err();
        assert!(matches!(err, NipError::NonDigit { .. }));
    }

    #[test]
    fn rejects_bad_checksum() {
        // Valid length/digits, wrong check digit.
        let err = Nip::parse("5260250996").unwrap_err();
        assert!(matches!(err, NipError::ChecksumMismatch { .. }));
    }

    #[test]
    fn remainder_ten_maps_to_zero() {
        // Construct a 9-digit prefix whose weighted sum mod 11 == 10, expect
        // check digit 0 to validate. 0000000000 sums to 0, remainder 0 != 10,
        // so instead verify the property generically over many prefixes.
        let mut covered_remainder_ten = false;
        for n in 0u64..1_000_000_000 {
            let prefix = format!("{n:09}");
            let digits: Vec<u32> = prefix.chars().map(|c| c.to_digit(10).unwrap()).collect();
            let sum: u32 = CHECKSUM_WEIGHTS
                .iter()
                .zip(digits.iter())
                .map(|(w, d)| w * d)
                .sum();
            if sum % 11 == 10 {
                let candidate = format!("{prefix}0");
                assert!(Nip::parse(&candidate).is_ok());
                covered_remainder_ten = true;
                break;
            }
        }
        assert!(covered_remainder_ten, "test setup must find a remainder-10 prefix");
    }

    #[test]
    fn serde_roundtrip() {
        let nip = Nip::parse("5260250995").unwrap();
        let json = serde_json::to_string(&nip).unwrap();
        assert_eq!(json, "\"5260250995\"");
        let back: Nip = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nip);
    }
}
