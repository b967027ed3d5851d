//! Request and response types for ucr-daemon HTTP endpoints.
//!
//! These are plain `Serialize + Deserialize` wire shapes; the orchestrator
//! and mapper never depend on them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyLookupRequest {
    pub nip: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}
