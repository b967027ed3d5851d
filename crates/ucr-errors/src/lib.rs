//! Canonical error taxonomy and HTTP response builder (C6).
//!
//! This crate knows nothing about GUS/KRS/CEIDG or the orchestration state
//! machine — it is the wire-facing tail end every terminal failure is
//! funneled through. Callers map their own failure types to an [`ErrorCode`]
//! and hand it to [`ErrorResponse::new`].

mod correlation;
mod redact;

pub use correlation::{generate_correlation_id, resolve_correlation_id, MAX_CORRELATION_ID_LEN};
pub use redact::redact_secret;

use serde::{Deserialize, Serialize};

/// Canonical error codes, with the HTTP status spec.md §4.6 assigns each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    InvalidNipFormat,
    InvalidRequestFormat,
    MissingRequiredFields,
    MissingApiKey,
    InvalidApiKey,
    EntityNotFound,
    EntityDeregistered,
    RateLimitExceeded,
    TimeoutError,
    ClassificationFailed,
    DataMappingFailed,
    GusServiceUnavailable,
    KrsServiceUnavailable,
    CeidgServiceUnavailable,
    InternalServerError,
}

impl ErrorCode {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidNipFormat
            | Self::InvalidRequestFormat
            | Self::MissingRequiredFields => 400,
            Self::MissingApiKey | Self::InvalidApiKey => 401,
            Self::EntityNotFound | Self::EntityDeregistered => 404,
            Self::RateLimitExceeded => 429,
            Self::TimeoutError => 504,
            Self::ClassificationFailed => 502,
            Self::DataMappingFailed => 500,
            Self::GusServiceUnavailable
            | Self::KrsServiceUnavailable
            | Self::CeidgServiceUnavailable => 502,
            Self::InternalServerError => 500,
        }
    }

    pub fn wire_code(&self) -> &'static str {
        match self {
            Self::InvalidNipFormat => "INVALID_NIP_FORMAT",
            Self::InvalidRequestFormat => "INVALID_REQUEST_FORMAT",
            Self::MissingRequiredFields => "MISSING_REQUIRED_FIELDS",
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::InvalidApiKey => "INVALID_API_KEY",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::EntityDeregistered => "ENTITY_DEREGISTERED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::TimeoutError => "TIMEOUT_ERROR",
            Self::ClassificationFailed => "CLASSIFICATION_FAILED",
            Self::DataMappingFailed => "DATA_MAPPING_FAILED",
            Self::GusServiceUnavailable => "GUS_SERVICE_UNAVAILABLE",
            Self::KrsServiceUnavailable => "KRS_SERVICE_UNAVAILABLE",
            Self::CeidgServiceUnavailable => "CEIDG_SERVICE_UNAVAILABLE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Reverse of [`Self::wire_code`]; lets a handler recover the HTTP status
    /// from an already-built [`ErrorResponse`] without holding onto the
    /// original `ErrorCode` value.
    pub fn from_wire_code(code: &str) -> Option<Self> {
        Some(match code {
            "INVALID_NIP_FORMAT" => Self::InvalidNipFormat,
            "INVALID_REQUEST_FORMAT" => Self::InvalidRequestFormat,
            "MISSING_REQUIRED_FIELDS" => Self::MissingRequiredFields,
            "MISSING_API_KEY" => Self::MissingApiKey,
            "INVALID_API_KEY" => Self::InvalidApiKey,
            "ENTITY_NOT_FOUND" => Self::EntityNotFound,
            "ENTITY_DEREGISTERED" => Self::EntityDeregistered,
            "RATE_LIMIT_EXCEEDED" => Self::RateLimitExceeded,
            "TIMEOUT_ERROR" => Self::TimeoutError,
            "CLASSIFICATION_FAILED" => Self::ClassificationFailed,
            "DATA_MAPPING_FAILED" => Self::DataMappingFailed,
            "GUS_SERVICE_UNAVAILABLE" => Self::GusServiceUnavailable,
            "KRS_SERVICE_UNAVAILABLE" => Self::KrsServiceUnavailable,
            "CEIDG_SERVICE_UNAVAILABLE" => Self::CeidgServiceUnavailable,
            "INTERNAL_SERVER_ERROR" => Self::InternalServerError,
            _ => return None,
        })
    }
}

/// Which upstream (if any) a failure is attributable to, for the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseSource {
    Gus,
    Krs,
    Ceidg,
    Internal,
}

/// The canonical response body for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: &'static str,
    pub message: String,
    pub correlation_id: String,
    pub source: ResponseSource,
    /// ISO-8601 timestamp, e.g. `2026-07-29T12:00:00Z`.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        correlation_id: impl Into<String>,
        source: ResponseSource,
    ) -> Self {
        Self {
            error_code: code.wire_code(),
            message: message.into(),
            correlation_id: correlation_id.into(),
            source,
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
