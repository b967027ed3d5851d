//! Upstream registry clients (C1): GUS (SOAP), KRS and CEIDG (JSON REST).
//!
//! Every client is a narrow async trait plus a `reqwest`-backed production
//! implementation; errors are normalized into `ucr_schemas::TypedError` at
//! the client boundary from structured signals only.

pub mod ceidg;
pub mod error_mapping;
pub mod gus;
pub mod krs;

#[cfg(feature = "test-util")]
pub mod fakes;

pub use ceidg::{CeidgClient, ReqwestCeidgClient};
pub use gus::{GusClient, ReqwestGusClient};
pub use krs::{KrsClient, ReqwestKrsClient};
