//! GUS (REGON registry) SOAP client.
//!
//! Three concerns are split into their own modules because each has a
//! distinct testing story: `soap` is pure parsing/building (unit-testable
//! with fixture strings, no network), `session` is the single-flight token
//! renewal critical section (testable with a fake inner client), and
//! `client` wires both together behind the `GusClient` trait plus the
//! process-wide rate limiter.

mod rate_limiter;
mod session;
mod soap;

pub use rate_limiter::GusRateLimiter;
pub use session::SessionStore;

use async_trait::async_trait;
use tokio::time::Instant;
use ucr_schemas::{ClassificationResult, GusDetailReport, SilosId, TypedError};

#[async_trait]
pub trait GusClient: Send + Sync {
    async fn classify_by_nip(
        &self,
        nip: &str,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<ClassificationResult, TypedError>;

    async fn detailed_report(
        &self,
        regon: &str,
        silos_id: SilosId,
        correlation_id: &str,
        deadline: Instant,
    ) -> Result<GusDetailReport, TypedError>;

    /// The currently cached session id, if a login has succeeded and not
    /// since been invalidated. Used by the mapper to build `registrySignature`
    /// for GUS-sourced records; falls back to the REGON when `None`.
    fn current_session_id(&self) -> Option<String>;
}

pub use client::ReqwestGusClient;

mod client;
