//! Core Settings struct and accessors.

use std::path::{Path, PathBuf};

use super::PackageMetadata;

/// Main settings for one wheel-building run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Contains the
/// module location, the requested platform list, output configuration and
/// package metadata.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Package metadata.
    metadata: PackageMetadata,

    /// Go module directory being compiled.
    module_dir: PathBuf,

    /// Package path within the module passed to the toolchain, e.g.
    /// `./cmd/mytool`. Defaults to the module root.
    package_subpath: String,

    /// Requested platform specifiers. Empty means the catalog default set.
    platforms: Vec<String>,

    /// Directory finished wheels are moved into.
    output_dir: PathBuf,

    /// Explicit Go toolchain. None means PATH lookup.
    go_binary: Option<PathBuf>,

    /// Explicit binary-merge utility for universal macOS builds. None means
    /// the system `lipo`.
    lipo_binary: Option<PathBuf>,

    /// Extra linker flags appended after the default `-s -w`.
    ldflags: Option<String>,

    /// Go variable to set to the package version via a `-X` linker flag.
    set_version_var: Option<String>,
}

impl Settings {
    pub(super) fn new(
        metadata: PackageMetadata,
        module_dir: PathBuf,
        package_subpath: String,
        platforms: Vec<String>,
        output_dir: PathBuf,
        go_binary: Option<PathBuf>,
        lipo_binary: Option<PathBuf>,
        ldflags: Option<String>,
        set_version_var: Option<String>,
    ) -> Self {
        Self {
            metadata,
            module_dir,
            package_subpath,
            platforms,
            output_dir,
            go_binary,
            lipo_binary,
            ldflags,
            set_version_var,
        }
    }

    /// Returns the package metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Returns the Go module directory.
    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    /// Returns the package path within the module.
    pub fn package_subpath(&self) -> &str {
        &self.package_subpath
    }

    /// Returns the requested platform specifiers (empty = catalog default).
    pub fn platforms(&self) -> &[String] {
        &self.platforms
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the explicit Go toolchain path, if any.
    pub fn go_binary(&self) -> Option<&Path> {
        self.go_binary.as_deref()
    }

    /// Returns the explicit binary-merge utility path, if any.
    pub fn lipo_binary(&self) -> Option<&Path> {
        self.lipo_binary.as_deref()
    }

    /// Returns the extra linker flags, if any.
    pub fn ldflags(&self) -> Option<&str> {
        self.ldflags.as_deref()
    }

    /// Returns the Go variable to receive the package version, if any.
    pub fn set_version_var(&self) -> Option<&str> {
        self.set_version_var.as_deref()
    }
}
