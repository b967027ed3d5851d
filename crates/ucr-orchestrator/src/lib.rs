//! Orchestration engine: classification → routing → data fetch → mapping →
//! terminal state, for one NIP lookup request.
//!
//! Three concerns, three modules: `mapper` (C5) is pure projection with no
//! I/O, `state_machine` (C4) is the closed state enum driving the upstream
//! clients under retry, and `facade` (C7) is the single entry point
//! `ucr-daemon` calls, which also owns the C6 error-taxonomy mapping for
//! terminal failures.

pub mod facade;
pub mod mapper;
pub mod state_machine;

pub use facade::{handle_company_lookup, into_error_response};
pub use mapper::MappingError;
pub use state_machine::{OrchestrationFailure, OrchestratorDeps};
