//! Target platform catalog.
//!
//! Maps user-facing platform specifiers (e.g. `linux-amd64`) to Go toolchain
//! target parameters and wheel platform tags. The catalog is an explicit
//! enumeration: adding a platform is a data edit in [`BUILTIN_ENTRIES`], not
//! a logic change, and a custom table can be swapped in for tests.

use crate::error::FatalError;

/// Target operating system, in `GOOS` terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Os {
    /// Linux (glibc or musl, see [`Variant`])
    Linux,
    /// macOS
    Darwin,
    /// Windows
    Windows,
}

impl Os {
    /// Value passed to the toolchain as `GOOS`.
    pub fn goos(self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }
}

/// Target CPU architecture, in `GOARCH` terms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    Amd64,
    /// AArch64 / ARM64 (64-bit)
    Arm64,
}

impl Arch {
    /// Value passed to the toolchain as `GOARCH`.
    pub fn goarch(self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
        }
    }
}

/// Platform variant beyond OS and architecture.
///
/// Variants never change the compiler invocation (binaries are statically
/// linked either way); they select a different wheel platform tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    /// musl-libc Linux, tagged `musllinux` instead of `manylinux`
    Musl,
}

/// One resolved build target. Immutable once resolved from the catalog.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlatformSpec {
    /// Target operating system
    pub os: Os,
    /// Target CPU architecture
    pub arch: Arch,
    /// Optional variant (e.g. musl libc)
    pub variant: Option<Variant>,
}

impl PlatformSpec {
    /// Whether the compiled binary needs the Windows executable suffix.
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }
}

/// One row of the platform table.
#[derive(Clone, Copy, Debug)]
pub struct CatalogEntry {
    /// User-facing specifier, e.g. `linux-amd64-musl`
    pub specifier: &'static str,
    /// Toolchain target parameters
    pub spec: PlatformSpec,
    /// Wheel platform tag for this target
    pub tag: &'static str,
}

/// Specifier for the combined-architecture macOS target.
///
/// Expands to the `darwin-amd64` and `darwin-arm64` catalog entries, whose
/// binaries are merged into one universal binary after compilation.
pub const UNIVERSAL_MACOS: &str = "darwin-universal";

/// Wheel platform tag of the merged universal artifact.
pub const UNIVERSAL_MACOS_TAG: &str = "macosx_11_0_universal2";

/// Built-in platform table.
pub const BUILTIN_ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        specifier: "linux-amd64",
        spec: PlatformSpec {
            os: Os::Linux,
            arch: Arch::Amd64,
            variant: None,
        },
        tag: "manylinux_2_17_x86_64",
    },
    CatalogEntry {
        specifier: "linux-arm64",
        spec: PlatformSpec {
            os: Os::Linux,
            arch: Arch::Arm64,
            variant: None,
        },
        tag: "manylinux_2_17_aarch64",
    },
    CatalogEntry {
        specifier: "linux-amd64-musl",
        spec: PlatformSpec {
            os: Os::Linux,
            arch: Arch::Amd64,
            variant: Some(Variant::Musl),
        },
        tag: "musllinux_1_2_x86_64",
    },
    CatalogEntry {
        specifier: "linux-arm64-musl",
        spec: PlatformSpec {
            os: Os::Linux,
            arch: Arch::Arm64,
            variant: Some(Variant::Musl),
        },
        tag: "musllinux_1_2_aarch64",
    },
    CatalogEntry {
        specifier: "darwin-amd64",
        spec: PlatformSpec {
            os: Os::Darwin,
            arch: Arch::Amd64,
            variant: None,
        },
        tag: "macosx_10_9_x86_64",
    },
    CatalogEntry {
        specifier: "darwin-arm64",
        spec: PlatformSpec {
            os: Os::Darwin,
            arch: Arch::Arm64,
            variant: None,
        },
        tag: "macosx_11_0_arm64",
    },
    CatalogEntry {
        specifier: "windows-amd64",
        spec: PlatformSpec {
            os: Os::Windows,
            arch: Arch::Amd64,
            variant: None,
        },
        tag: "win_amd64",
    },
    CatalogEntry {
        specifier: "windows-arm64",
        spec: PlatformSpec {
            os: Os::Windows,
            arch: Arch::Arm64,
            variant: None,
        },
        tag: "win_arm64",
    },
];

/// Result of resolving one platform specifier against the catalog.
#[derive(Clone, Copy, Debug)]
pub enum Resolution {
    /// A plain single-target build
    Single {
        /// Toolchain target parameters
        spec: PlatformSpec,
        /// Wheel platform tag of the artifact
        tag: &'static str,
    },
    /// The combined-architecture macOS target: both slices are compiled and
    /// merged into one universal binary
    Universal {
        /// First slice, compiled first (amd64)
        primary: PlatformSpec,
        /// Second slice (arm64)
        secondary: PlatformSpec,
        /// Wheel platform tag of the merged artifact
        tag: &'static str,
    },
}

impl Resolution {
    /// Wheel platform tag of the artifact this resolution produces.
    pub fn tag(&self) -> &'static str {
        match self {
            Resolution::Single { tag, .. } | Resolution::Universal { tag, .. } => tag,
        }
    }

    /// The underlying platform specs, primary architecture first.
    pub fn specs(&self) -> Vec<PlatformSpec> {
        match *self {
            Resolution::Single { spec, .. } => vec![spec],
            Resolution::Universal {
                primary, secondary, ..
            } => vec![primary, secondary],
        }
    }

    /// Whether the produced binary needs the Windows executable suffix.
    pub fn is_windows(&self) -> bool {
        match self {
            Resolution::Single { spec, .. } => spec.is_windows(),
            Resolution::Universal { .. } => false,
        }
    }
}

/// Immutable platform table, passed by reference into every component that
/// needs target parameters.
///
/// # Examples
///
/// ```
/// use gowheel::platform::PlatformCatalog;
///
/// let catalog = PlatformCatalog::builtin();
/// let resolution = catalog.resolve("linux-amd64")?;
/// assert_eq!(resolution.tag(), "manylinux_2_17_x86_64");
/// # Ok::<(), gowheel::FatalError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PlatformCatalog {
    entries: &'static [CatalogEntry],
}

impl PlatformCatalog {
    /// Catalog over [`BUILTIN_ENTRIES`].
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES,
        }
    }

    /// Catalog over a custom table (primarily for tests).
    pub fn new(entries: &'static [CatalogEntry]) -> Self {
        Self { entries }
    }

    /// Resolves a specifier to its build target(s).
    ///
    /// Returns one target for a table entry and two for the
    /// [`UNIVERSAL_MACOS`] composite alias (amd64 first). Anything else is
    /// [`FatalError::UnknownPlatform`].
    pub fn resolve(&self, specifier: &str) -> Result<Resolution, FatalError> {
        if specifier == UNIVERSAL_MACOS {
            let primary = self.entry("darwin-amd64")?;
            let secondary = self.entry("darwin-arm64")?;
            return Ok(Resolution::Universal {
                primary: primary.spec,
                secondary: secondary.spec,
                tag: UNIVERSAL_MACOS_TAG,
            });
        }

        let entry = self.entry(specifier)?;
        Ok(Resolution::Single {
            spec: entry.spec,
            tag: entry.tag,
        })
    }

    /// Wheel platform tag for a spec. Total over the catalog table.
    pub fn tag_for(&self, spec: &PlatformSpec) -> Result<&'static str, FatalError> {
        self.entries
            .iter()
            .find(|e| e.spec == *spec)
            .map(|e| e.tag)
            .ok_or_else(|| FatalError::UnknownPlatform {
                specifier: format!(
                    "{}-{}{}",
                    spec.os.goos(),
                    spec.arch.goarch(),
                    match spec.variant {
                        Some(Variant::Musl) => "-musl",
                        None => "",
                    }
                ),
            })
    }

    /// Default platform list: the full non-composite entry set, table order.
    pub fn default_specifiers(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.specifier).collect()
    }

    fn entry(&self, specifier: &str) -> Result<&CatalogEntry, FatalError> {
        self.entries
            .iter()
            .find(|e| e.specifier == specifier)
            .ok_or_else(|| FatalError::UnknownPlatform {
                specifier: specifier.to_string(),
            })
    }
}
