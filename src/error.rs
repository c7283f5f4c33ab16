//! Error types for wheel-building operations.
//!
//! Failures split into two classes: [`FatalError`] inputs that abort the run
//! before any compilation starts, and per-platform build failures that are
//! accumulated into the final summary (see [`crate::builder::BuildSummary`])
//! and only affect the overall exit classification.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wheel-building operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all wheel-building operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input errors that stop the run before any compilation
    #[error("{0}")]
    Fatal(#[from] FatalError),

    /// Every requested platform was attempted and none produced a wheel
    #[error("all {attempted} platform build(s) failed, no wheels were built")]
    AllPlatformsFailed {
        /// Number of platforms attempted
        attempted: usize,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input errors detected during validation, before any toolchain is spawned
#[derive(Error, Debug)]
pub enum FatalError {
    /// Go toolchain could not be resolved
    #[error("Go toolchain not found: {reason}")]
    ToolchainNotFound {
        /// Why resolution failed (PATH lookup result or missing file)
        reason: String,
    },

    /// Module directory does not exist
    #[error("Go module directory not found: {dir}")]
    ModuleNotFound {
        /// Directory that was checked
        dir: PathBuf,
    },

    /// Directory exists but carries no go.mod
    #[error("not a Go module: {dir} (no go.mod file found)")]
    NotAGoModule {
        /// Directory that was checked
        dir: PathBuf,
    },

    /// Platform specifier matches no catalog entry and no composite alias
    #[error("unknown platform: {specifier}")]
    UnknownPlatform {
        /// The unrecognized specifier
        specifier: String,
    },

    /// Package name violates the naming rule
    #[error(
        "invalid package name: {name:?} (lowercase letters, digits, '-', '_' and '.' only, starting with a letter or digit)"
    )]
    InvalidPackageName {
        /// The rejected name
        name: String,
    },

    /// Version string would break the wheel filename grammar
    #[error("invalid version: {version:?} (letters, digits, '.', '_', '+' and '!' only)")]
    InvalidVersion {
        /// The rejected version
        version: String,
    },

    /// Output directory could not be created or written
    #[error("cannot write output directory {dir}: {source}")]
    OutputDir {
        /// The requested output directory
        dir: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// README file given on the command line does not exist
    #[error("README file not found: {path}")]
    ReadmeNotFound {
        /// Path that was checked
        path: PathBuf,
    },
}

impl Error {
    /// Process exit code for this error, distinguishable by automated callers.
    ///
    /// Fatal input errors map to [`crate::cli::EXIT_FATAL`]; the
    /// all-platforms-failed aggregate maps to [`crate::cli::EXIT_ALL_FAILED`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::AllPlatformsFailed { .. } => crate::cli::EXIT_ALL_FAILED,
            _ => crate::cli::EXIT_FATAL,
        }
    }
}
