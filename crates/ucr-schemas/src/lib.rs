//! Domain types shared by every crate in the unified-company-record service:
//! NIP validation, the three upstream registries' wire-level shapes, the
//! unified output record, the normalized error type, and the per-request
//! orchestration scratchpad.
//!
//! No I/O, no `tracing`, no HTTP — this crate is the one every other crate
//! in the workspace depends on, and it depends on nothing beyond `serde` and
//! `chrono`.

pub mod ceidg;
pub mod classification;
pub mod context;
pub mod error;
pub mod gus;
pub mod krs;
pub mod nip;
pub mod unified;

pub use ceidg::{CeidgAddress, CeidgCompany, CeidgOwner, CeidgStatus};
pub use classification::{AddressFragments, ClassificationResult, SilosId};
pub use context::{OrchestrationContext, RetryCounters};
pub use error::{ErrorKind, TypedError, UpstreamSource};
pub use gus::{GusDetailReport, GusLegalReport, GusSoleTraderReport, KRS_NUMBER_ALIASES};
pub use krs::{KrsNumber, KrsRegistry, KrsResponse, ProceedingKind};
pub use nip::{Nip, NipError};
pub use unified::{Address, CompanyStatus, DataSource, EntityType, LegalForm, UnifiedCompanyRecord};
