//! Main build orchestration and coordination.
//!
//! [`WheelBuilder`] drives the pipeline: validate inputs fatally up front,
//! compile each resolved target, assemble a wheel for each success, move
//! finished artifacts into the output directory and accumulate everything
//! into a [`BuildSummary`].

use std::path::{Path, PathBuf};

use crate::compile::{self, BuildResult, DEFAULT_LIPO};
use crate::error::{FatalError, Result};
use crate::platform::{PlatformCatalog, PlatformSpec, Resolution};
use crate::settings::Settings;
use crate::wheel;

use super::{BuildSummary, PlatformOutcome};

/// Main build orchestrator.
///
/// Construction performs every fatal input check, so a constructed builder
/// is guaranteed to get past validation: all remaining failures are
/// per-platform and tolerated. Platforms are attempted strictly in request
/// order; one broken target never blocks delivery of the others.
///
/// # Examples
///
/// ```no_run
/// use gowheel::builder::WheelBuilder;
/// use gowheel::platform::PlatformCatalog;
/// use gowheel::settings::SettingsBuilder;
///
/// # async fn example() -> gowheel::Result<()> {
/// let settings = SettingsBuilder::new("./mytool")
///     .version("1.0.0")
///     .platforms(vec!["linux-amd64".into(), "darwin-arm64".into()])
///     .build()?;
///
/// let builder = WheelBuilder::new(settings, PlatformCatalog::builtin()).await?;
/// let summary = builder.build_all().await?;
/// println!("{} wheel(s) built", summary.built_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WheelBuilder {
    settings: Settings,
    toolchain: PathBuf,
    ldflags: String,
    targets: Vec<(String, Resolution)>,
}

impl WheelBuilder {
    /// Creates a builder, running every fatal input check.
    ///
    /// # Errors
    ///
    /// [`FatalError::ModuleNotFound`] / [`FatalError::NotAGoModule`] when the
    /// module directory is missing or carries no `go.mod`;
    /// [`FatalError::InvalidPackageName`] / [`FatalError::InvalidVersion`]
    /// for rejected metadata; [`FatalError::ToolchainNotFound`] when the Go
    /// toolchain cannot be resolved; [`FatalError::UnknownPlatform`] when any
    /// requested specifier fails to resolve (checked before any compilation
    /// starts); [`FatalError::OutputDir`] when the output directory cannot
    /// be created.
    pub async fn new(settings: Settings, catalog: PlatformCatalog) -> Result<Self> {
        let module_dir = settings.module_dir();
        match tokio::fs::metadata(module_dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(FatalError::ModuleNotFound {
                    dir: module_dir.to_path_buf(),
                }
                .into());
            }
        }
        if tokio::fs::metadata(module_dir.join("go.mod")).await.is_err() {
            return Err(FatalError::NotAGoModule {
                dir: module_dir.to_path_buf(),
            }
            .into());
        }

        let meta = settings.metadata();
        if !wheel::is_valid_name(&meta.name) {
            return Err(FatalError::InvalidPackageName {
                name: meta.name.clone(),
            }
            .into());
        }
        if !wheel::is_valid_version(&meta.version) {
            return Err(FatalError::InvalidVersion {
                version: meta.version.clone(),
            }
            .into());
        }

        let toolchain = resolve_toolchain(settings.go_binary())?;
        log::debug!("using Go toolchain at {}", toolchain.display());

        // Resolve the whole platform list before compiling anything: one
        // unresolvable entry fails the run rather than partially building.
        let specifiers: Vec<String> = if settings.platforms().is_empty() {
            catalog
                .default_specifiers()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            settings.platforms().to_vec()
        };
        let targets = specifiers
            .into_iter()
            .map(|specifier| {
                let resolution = catalog.resolve(&specifier)?;
                Ok((specifier, resolution))
            })
            .collect::<std::result::Result<Vec<_>, FatalError>>()?;

        if let Err(e) = tokio::fs::create_dir_all(settings.output_dir()).await {
            return Err(FatalError::OutputDir {
                dir: settings.output_dir().to_path_buf(),
                source: e,
            }
            .into());
        }

        let ldflags = compile::combined_ldflags(
            settings.set_version_var(),
            &settings.metadata().version,
            settings.ldflags(),
        );

        Ok(Self {
            settings,
            toolchain,
            ldflags,
            targets,
        })
    }

    /// Returns a reference to the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Attempts every resolved target and returns the accumulated summary.
    ///
    /// Prints one summary line per platform as it completes. Per-platform
    /// failures are recorded and the run continues; classifying the overall
    /// result is left to the caller via [`BuildSummary::classify`].
    ///
    /// All intermediate binaries live in one scratch directory, removed when
    /// the run ends, and wheels are assembled there before being moved into
    /// the output directory, so an aborted run leaves no partial archives
    /// behind.
    pub async fn build_all(&self) -> Result<BuildSummary> {
        let scratch = tempfile::tempdir()?;
        let mut summary = BuildSummary::default();

        for (specifier, resolution) in &self.targets {
            let outcome = self.build_target(specifier, resolution, scratch.path()).await;
            match &outcome {
                PlatformOutcome::Built {
                    wheel, size_bytes, ..
                } => {
                    println!(
                        "  ✓ {specifier}: {} ({size_bytes} bytes)",
                        wheel
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_else(|| wheel.display().to_string())
                    );
                }
                PlatformOutcome::Failed { reason, .. } => {
                    log::warn!("{specifier} failed:\n{reason}");
                    println!(
                        "  ✗ {specifier}: {}",
                        reason.lines().next().unwrap_or("build failed")
                    );
                }
            }
            summary.record(outcome);
        }

        Ok(summary)
    }

    /// Compiles (and, for the composite target, merges) one target, then
    /// packages the result.
    async fn build_target(
        &self,
        specifier: &str,
        resolution: &Resolution,
        scratch: &Path,
    ) -> PlatformOutcome {
        let entry_point = &self.settings.metadata().entry_point;
        let windows = resolution.is_windows();

        let result = match resolution {
            Resolution::Single { spec, .. } => {
                let out_path =
                    scratch.join(compile::binary_file_name(entry_point, specifier, windows));
                self.compile_one(specifier, spec, &out_path).await
            }
            Resolution::Universal {
                primary, secondary, ..
            } => {
                self.build_universal(specifier, &[*primary, *secondary], scratch)
                    .await
            }
        };

        match result {
            BuildResult::Failure {
                specifier,
                diagnostic,
            } => PlatformOutcome::Failed {
                specifier,
                reason: diagnostic,
            },
            BuildResult::Success { binary_path, .. } => {
                self.package(specifier, &binary_path, resolution.tag(), windows, scratch)
                    .await
            }
        }
    }

    async fn compile_one(
        &self,
        specifier: &str,
        spec: &PlatformSpec,
        out_path: &Path,
    ) -> BuildResult {
        compile::build(
            specifier,
            self.settings.module_dir(),
            self.settings.package_subpath(),
            spec,
            &self.toolchain,
            &self.ldflags,
            out_path,
        )
        .await
    }

    /// Builds both slices of the composite target and merges them. Either
    /// slice failing fails the composite as a whole.
    async fn build_universal(
        &self,
        specifier: &str,
        slices: &[PlatformSpec],
        scratch: &Path,
    ) -> BuildResult {
        let entry_point = &self.settings.metadata().entry_point;

        let mut slice_paths = Vec::with_capacity(slices.len());
        for spec in slices {
            let slice_specifier = format!("{specifier}-{}", spec.arch.goarch());
            let out_path =
                scratch.join(compile::binary_file_name(entry_point, &slice_specifier, false));
            match self.compile_one(&slice_specifier, spec, &out_path).await {
                BuildResult::Success { binary_path, .. } => slice_paths.push(binary_path),
                BuildResult::Failure { diagnostic, .. } => {
                    return BuildResult::Failure {
                        specifier: specifier.to_string(),
                        diagnostic,
                    };
                }
            }
        }

        let merged_path = scratch.join(compile::binary_file_name(entry_point, specifier, false));
        let lipo = self
            .settings
            .lipo_binary()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIPO));
        let slice_refs: Vec<&Path> = slice_paths.iter().map(PathBuf::as_path).collect();
        compile::merge_universal(specifier, &slice_refs, &merged_path, &lipo).await
    }

    /// Assembles the wheel in the scratch directory, then moves the finished
    /// artifact into the output directory.
    async fn package(
        &self,
        specifier: &str,
        binary_path: &Path,
        tag: &str,
        windows: bool,
        scratch: &Path,
    ) -> PlatformOutcome {
        let meta = self.settings.metadata();

        let wheel_path = match wheel::assemble(binary_path, meta, tag, windows, scratch).await {
            Ok(path) => path,
            Err(e) => {
                return PlatformOutcome::Failed {
                    specifier: specifier.to_string(),
                    reason: e.to_string(),
                };
            }
        };

        let file_name = wheel::wheel_file_name(&meta.name, &meta.version, tag);
        let dest = self.settings.output_dir().join(file_name);
        match move_artifact(&wheel_path, &dest).await {
            Ok(size_bytes) => PlatformOutcome::Built {
                specifier: specifier.to_string(),
                wheel: dest,
                size_bytes,
            },
            Err(e) => PlatformOutcome::Failed {
                specifier: specifier.to_string(),
                reason: format!("failed to move artifact to {}: {e}", dest.display()),
            },
        }
    }
}

/// Resolves the Go toolchain: an explicit path must exist, a bare name (or
/// no configuration at all, meaning `go`) is looked up on PATH.
fn resolve_toolchain(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) if path.components().count() > 1 => {
            if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(FatalError::ToolchainNotFound {
                    reason: format!("{} does not exist", path.display()),
                }
                .into())
            }
        }
        Some(name) => which::which(name).map_err(|e| {
            FatalError::ToolchainNotFound {
                reason: format!("{}: {e}", name.display()),
            }
            .into()
        }),
        None => which::which("go").map_err(|e| {
            FatalError::ToolchainNotFound {
                reason: format!("'go' not found on PATH: {e}"),
            }
            .into()
        }),
    }
}

/// Moves a finished artifact, falling back to copy-and-delete when the
/// scratch and output directories sit on different filesystems. Returns the
/// artifact size in bytes.
async fn move_artifact(from: &Path, to: &Path) -> std::io::Result<u64> {
    let size = tokio::fs::metadata(from).await?.len();
    if tokio::fs::rename(from, to).await.is_err() {
        tokio::fs::copy(from, to).await?;
        tokio::fs::remove_file(from).await?;
    }
    Ok(size)
}
