//! Build outcome accumulation and classification.
//!
//! Per-platform outcomes land in one [`BuildSummary`]; the overall
//! classification is a pure function of that accumulated list, so the
//! partial-failure policy is testable without running any toolchain.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Outcome of one attempted platform.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlatformOutcome {
    /// A wheel was produced and moved into the output directory
    Built {
        /// Platform specifier as requested
        specifier: String,
        /// Final wheel path in the output directory
        wheel: PathBuf,
        /// Wheel size in bytes
        size_bytes: u64,
    },
    /// Compilation, merging or packaging failed for this platform
    Failed {
        /// Platform specifier as requested
        specifier: String,
        /// Diagnostic text
        reason: String,
    },
}

impl PlatformOutcome {
    /// Platform specifier this outcome belongs to.
    pub fn specifier(&self) -> &str {
        match self {
            PlatformOutcome::Built { specifier, .. } | PlatformOutcome::Failed { specifier, .. } => {
                specifier
            }
        }
    }

    /// Whether this platform produced a wheel.
    pub fn is_built(&self) -> bool {
        matches!(self, PlatformOutcome::Built { .. })
    }
}

/// Overall result class of a run. Maps one-to-one onto process exit codes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Every platform produced a wheel
    FullSuccess,
    /// At least one wheel was produced, at least one platform failed
    PartialSuccess,
    /// No platform produced a wheel
    AllFailed,
}

/// Accumulated outcomes of one run, in attempt order.
#[derive(Debug, Default, Serialize)]
pub struct BuildSummary {
    outcomes: Vec<PlatformOutcome>,
}

impl BuildSummary {
    /// Records one platform outcome.
    pub fn record(&mut self, outcome: PlatformOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes, in attempt order.
    pub fn outcomes(&self) -> &[PlatformOutcome] {
        &self.outcomes
    }

    /// Number of platforms attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of wheels produced.
    pub fn built_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_built()).count()
    }

    /// Paths of the produced wheels, in attempt order.
    pub fn wheels(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PlatformOutcome::Built { wheel, .. } => Some(wheel.as_path()),
                PlatformOutcome::Failed { .. } => None,
            })
            .collect()
    }

    /// Overall classification: full success only when every platform built,
    /// all-failed when none did.
    pub fn classify(&self) -> Classification {
        let built = self.built_count();
        if built == 0 {
            Classification::AllFailed
        } else if built == self.attempted() {
            Classification::FullSuccess
        } else {
            Classification::PartialSuccess
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(specifier: &str) -> PlatformOutcome {
        PlatformOutcome::Built {
            specifier: specifier.to_string(),
            wheel: PathBuf::from(format!("dist/{specifier}.whl")),
            size_bytes: 1024,
        }
    }

    fn failed(specifier: &str) -> PlatformOutcome {
        PlatformOutcome::Failed {
            specifier: specifier.to_string(),
            reason: "compile error".to_string(),
        }
    }

    #[test]
    fn all_built_is_full_success() {
        let mut summary = BuildSummary::default();
        summary.record(built("linux-amd64"));
        summary.record(built("darwin-arm64"));
        assert_eq!(summary.classify(), Classification::FullSuccess);
        assert_eq!(summary.built_count(), 2);
        assert_eq!(summary.wheels().len(), 2);
    }

    #[test]
    fn one_failure_among_successes_is_partial() {
        let mut summary = BuildSummary::default();
        summary.record(built("linux-amd64"));
        summary.record(failed("windows-arm64"));
        summary.record(built("darwin-arm64"));
        assert_eq!(summary.classify(), Classification::PartialSuccess);
        assert_eq!(summary.attempted(), 3);
        assert_eq!(summary.built_count(), 2);
    }

    #[test]
    fn no_wheels_is_all_failed() {
        let mut summary = BuildSummary::default();
        summary.record(failed("linux-amd64"));
        summary.record(failed("darwin-arm64"));
        assert_eq!(summary.classify(), Classification::AllFailed);
        assert!(summary.wheels().is_empty());
    }
}
