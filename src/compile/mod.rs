//! Go cross-compilation.
//!
//! One [`build`] call spawns the external toolchain once for one target,
//! with static linkage forced (`CGO_ENABLED=0`) and debug info stripped
//! (`-s -w`). A failed compile is a value, not an error: the captured
//! diagnostic is returned in [`BuildResult::Failure`] and severity is the
//! caller's decision.

mod universal;

pub use universal::{DEFAULT_LIPO, merge_universal};

use std::path::{Path, PathBuf};

use crate::platform::PlatformSpec;

/// Outcome of one toolchain invocation for one target. Immutable once
/// created.
#[derive(Debug, Clone)]
pub enum BuildResult {
    /// The toolchain exited zero and produced an output file
    Success {
        /// Path to the compiled binary
        binary_path: PathBuf,
        /// Size of the compiled binary in bytes
        size_bytes: u64,
    },
    /// The toolchain failed; the run continues with the next platform
    Failure {
        /// Specifier of the failed target
        specifier: String,
        /// Captured diagnostic text, verbatim
        diagnostic: String,
    },
}

/// Linker flags for one run: the stripping defaults, then the version
/// variable injection, then user flags — so explicit flags can override the
/// injected variable.
pub fn combined_ldflags(set_version_var: Option<&str>, version: &str, extra: Option<&str>) -> String {
    let mut flags = String::from("-s -w");
    if let Some(var) = set_version_var {
        flags.push_str(" -X ");
        flags.push_str(var);
        flags.push('=');
        flags.push_str(version);
    }
    if let Some(extra) = extra {
        flags.push(' ');
        flags.push_str(extra);
    }
    flags
}

/// Scratch file name for one target's binary. Windows targets carry the
/// executable suffix; all other targets do not.
pub fn binary_file_name(entry_point: &str, specifier: &str, windows: bool) -> String {
    format!(
        "{entry_point}_{specifier}{}",
        if windows { ".exe" } else { "" }
    )
}

/// Cross-compiles the module for one target.
///
/// Spawns `<toolchain> build -ldflags=<flags> -o <out_path> <subpath>` in
/// `module_dir` with `GOOS`/`GOARCH` set for the target and `CGO_ENABLED=0`.
/// Never returns a process-fatal error: spawn failures and non-zero exits
/// both become [`BuildResult::Failure`] carrying the diagnostic.
pub async fn build(
    specifier: &str,
    module_dir: &Path,
    package_subpath: &str,
    spec: &PlatformSpec,
    toolchain: &Path,
    ldflags: &str,
    out_path: &Path,
) -> BuildResult {
    log::info!(
        "compiling {specifier} (GOOS={} GOARCH={})",
        spec.os.goos(),
        spec.arch.goarch()
    );

    let output = tokio::process::Command::new(toolchain)
        .arg("build")
        .arg(format!("-ldflags={ldflags}"))
        .arg("-o")
        .arg(out_path)
        .arg(package_subpath)
        .current_dir(module_dir)
        .env("GOOS", spec.os.goos())
        .env("GOARCH", spec.arch.goarch())
        .env("CGO_ENABLED", "0")
        .output()
        .await;

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            return BuildResult::Failure {
                specifier: specifier.to_string(),
                diagnostic: format!("failed to run {}: {e}", toolchain.display()),
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
                "toolchain exited successfully but produced no output at {}: {e}",
                out_path.display()
            ),
        },
    }
}
