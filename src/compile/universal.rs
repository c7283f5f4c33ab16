//! Universal macOS binary merging.
//!
//! The combined-architecture target compiles both slices separately; this
//! step joins them into one multi-architecture binary with the external
//! `lipo` utility. Merge problems of any kind (tool missing, incompatible
//! slices, non-zero exit) fail the composite target as a whole rather than
//! guessing at a merge policy.

use std::path::Path;

use super::BuildResult;

/// Binary-merge utility used when none is configured.
pub const DEFAULT_LIPO: &str = "lipo";

/// Merges compiled slices into one universal binary at `out_path`.
pub async fn merge_universal(
    specifier: &str,
    slices: &[&Path],
    out_path: &Path,
    lipo: &Path,
) -> BuildResult {
    log::info!("merging {} slice(s) for {specifier}", slices.len());

    let mut command = tokio::process::Command::new(lipo);
    command.arg("-create").arg("-output").arg(out_path);
    for slice in slices {
        command.arg(slice);
    }

    let output = match command.output().await {
        Ok(output) => output,
        Err(e) => {
            return BuildResult::Failure {
                specifier: specifier.to_string(),
                diagnostic: format!("failed to run {}: {e}", lipo.display()),
            };
        }
    };

    if !output.status.success() {
        return BuildResult::Failure {
            specifier: specifier.to_string(),
            diagnostic: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
    }

    match tokio::fs::metadata(out_path).await {
        Ok(meta) => BuildResult::Success {
            binary_path: out_path.to_path_buf(),
            size_bytes: meta.len(),
        },
        Err(e) => BuildResult::Failure {
            specifier: specifier.to_string(),
            diagnostic: format!(
                "merge exited successfully but produced no output at {}: {e}",
                out_path.display()
            ),
        },
    }
}
