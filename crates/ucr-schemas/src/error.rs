//! `TypedError` — the normalized error shape every upstream client returns.
//!
//! Detection of `kind` happens at the client boundary from structured signals
//! (HTTP status, SOAP fault codes); by the time a `TypedError` exists, no
//! caller needs to inspect `message` to decide anything.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which upstream registry produced (or was being contacted for) an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpstreamSource {
    Gus,
    Krs,
    Ceidg,
}

impl fmt::Display for UpstreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gus => write!(f, "GUS"),
            Self::Krs => write!(f, "KRS"),
            Self::Ceidg => write!(f, "CEIDG"),
        }
    }
}

/// Structural classification of an upstream failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    RateLimited,
    Timeout,
    Network,
    ServerError,
    /// GUS-only: the session token expired mid-call.
    SessionExpired,
    MalformedResponse,
    Other,
}

/// A normalized error from an upstream client call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypedError {
    pub kind: ErrorKind,
    pub source: UpstreamSource,
    pub http_status: Option<u16>,
    pub upstream_code: Option<String>,
    pub retryable: bool,
    pub message: String,
    /// Rendered cause chain, if this error wraps another. Never includes
    /// credentials or raw upstream payload bytes.
    pub cause: Option<String>,
}

impl fmt::Display for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error ({:?}): {}",
            self.source, self.kind, self.message
        )
    }
}

impl std::error::Error for TypedError {}

impl TypedError {
    pub fn new(source: UpstreamSource, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            source,
            http_status: None,
            upstream_code: None,
            retryable: false,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_upstream_code(mut self, code: impl Into<String>) -> Self {
        self.upstream_code = Some(code.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_source_and_kind() {
        let err = TypedError::new(UpstreamSource::Krs, ErrorKind::NotFound, "no such entry");
        let rendered = err.to_string();
        assert!(rendered.contains("KRS"));
        assert!(rendered.contains("NotFound"));
        assert!(rendered.contains("no such entry"));
    }
}
