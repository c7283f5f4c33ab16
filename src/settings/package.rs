//! Package metadata.

/// User-supplied descriptive fields for the wheels being built.
///
/// Constructed once per invocation (usually via
/// [`SettingsBuilder`](super::SettingsBuilder)) and read-only thereafter.
/// `name` and `version` are validated before any compilation starts; all
/// other fields pass through into the wheel metadata unchanged. Optional
/// fields left as `None` are omitted from the generated `METADATA`, never
/// emitted as empty placeholders.
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// Package name.
    ///
    /// Lowercase letters, digits, `-`, `_` and `.`, starting with a letter
    /// or digit. Defaults to the module directory basename.
    pub name: String,

    /// Package version string.
    ///
    /// Example: "1.0.0", "2.3.4rc1"
    pub version: String,

    /// CLI command name mapped to the launcher, and the bundled binary's
    /// member name.
    ///
    /// Defaults to the package name.
    pub entry_point: String,

    /// Brief description, emitted as the metadata `Summary`.
    ///
    /// Default: None
    pub description: Option<String>,

    /// SPDX license identifier.
    ///
    /// Default: None
    pub license: Option<String>,

    /// Author name.
    ///
    /// Default: None
    pub author: Option<String>,

    /// Author email address.
    ///
    /// Default: None
    pub author_email: Option<String>,

    /// Project homepage URL.
    ///
    /// Default: None
    pub url: Option<String>,

    /// Minimum Python runtime requirement, e.g. `>=3.10`.
    pub requires_python: String,

    /// README markdown body, embedded as the long description.
    ///
    /// Default: None
    pub readme: Option<String>,
}
