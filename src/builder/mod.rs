//! Build orchestration and result accumulation.
//!
//! The orchestrator:
//! 1. Validates inputs (module, metadata, toolchain, platform list, output
//!    directory) — any failure here is fatal and happens before compilation
//! 2. Compiles each resolved target in request order
//! 3. Assembles a wheel for each successful compile
//! 4. Moves finished artifacts into the output directory
//! 5. Accumulates per-platform outcomes into a [`BuildSummary`]
//!
//! Per-platform failures never abort the run; the overall classification is
//! computed from the accumulated summary once every platform was attempted.

mod orchestrator;
mod summary;

pub use orchestrator::WheelBuilder;
pub use summary::{BuildSummary, Classification, PlatformOutcome};
