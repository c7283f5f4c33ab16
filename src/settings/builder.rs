//! Builder for constructing Settings.

use std::path::{Path, PathBuf};

use crate::error::{FatalError, Result};

use super::{PackageMetadata, Settings};

/// Builder for [`Settings`].
///
/// Fills in the documented defaults: the package name falls back to the
/// module directory basename, the entry point to the package name, the
/// version to `0.1.0`, the output directory to `./dist` and the runtime
/// floor to `>=3.10`.
///
/// # Examples
///
/// ```no_run
/// use gowheel::settings::SettingsBuilder;
///
/// # fn example() -> gowheel::Result<()> {
/// let settings = SettingsBuilder::new("./mytool")
///     .name("mytool")
///     .version("1.0.0")
///     .platforms(vec!["linux-amd64".into(), "darwin-arm64".into()])
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    module_dir: PathBuf,
    name: Option<String>,
    version: Option<String>,
    entry_point: Option<String>,
    description: Option<String>,
    license: Option<String>,
    author: Option<String>,
    author_email: Option<String>,
    url: Option<String>,
    requires_python: Option<String>,
    readme: Option<String>,
    package_subpath: Option<String>,
    platforms: Vec<String>,
    output_dir: Option<PathBuf>,
    go_binary: Option<PathBuf>,
    lipo_binary: Option<PathBuf>,
    ldflags: Option<String>,
    set_version_var: Option<String>,
}

impl SettingsBuilder {
    /// Creates a builder for the given Go module directory.
    pub fn new<P: AsRef<Path>>(module_dir: P) -> Self {
        Self {
            module_dir: module_dir.as_ref().to_path_buf(),
            name: None,
            version: None,
            entry_point: None,
            description: None,
            license: None,
            author: None,
            author_email: None,
            url: None,
            requires_python: None,
            readme: None,
            package_subpath: None,
            platforms: Vec::new(),
            output_dir: None,
            go_binary: None,
            lipo_binary: None,
            ldflags: None,
            set_version_var: None,
        }
    }

    /// Sets the package name.
    ///
    /// Default: module directory basename
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the package version.
    ///
    /// Default: `0.1.0`
    pub fn version<S: Into<String>>(mut self, version: S) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the CLI command name.
    ///
    /// Default: package name
    pub fn entry_point<S: Into<String>>(mut self, entry_point: S) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    /// Sets the package description.
    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the license identifier.
    pub fn license(mut self, license: Option<String>) -> Self {
        self.license = license;
        self
    }

    /// Sets the author name.
    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Sets the author email.
    pub fn author_email(mut self, author_email: Option<String>) -> Self {
        self.author_email = author_email;
        self
    }

    /// Sets the project URL.
    pub fn url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    /// Sets the minimum Python runtime requirement.
    ///
    /// Default: `>=3.10`
    pub fn requires_python<S: Into<String>>(mut self, requires_python: S) -> Self {
        self.requires_python = Some(requires_python.into());
        self
    }

    /// Sets the README markdown body used as the long description.
    pub fn readme(mut self, readme: Option<String>) -> Self {
        self.readme = readme;
        self
    }

    /// Sets the package path within the module.
    ///
    /// Default: `.` (the module root)
    pub fn package_subpath<S: Into<String>>(mut self, subpath: S) -> Self {
        self.package_subpath = Some(subpath.into());
        self
    }

    /// Sets the requested platform specifiers.
    ///
    /// Default: empty, meaning the catalog's full non-composite set
    pub fn platforms(mut self, platforms: Vec<String>) -> Self {
        self.platforms = platforms;
        self
    }

    /// Sets the output directory.
    ///
    /// Default: `./dist`
    pub fn output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = Some(output_dir.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit Go toolchain path.
    ///
    /// Default: `go` resolved from PATH
    pub fn go_binary<P: AsRef<Path>>(mut self, go_binary: P) -> Self {
        self.go_binary = Some(go_binary.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit binary-merge utility for universal macOS builds.
    ///
    /// Default: the system `lipo`
    pub fn lipo_binary<P: AsRef<Path>>(mut self, lipo_binary: P) -> Self {
        self.lipo_binary = Some(lipo_binary.as_ref().to_path_buf());
        self
    }

    /// Sets extra Go linker flags, appended after the default `-s -w`.
    pub fn ldflags(mut self, ldflags: Option<String>) -> Self {
        self.ldflags = ldflags;
        self
    }

    /// Sets the Go variable that receives the package version via `-X`.
    pub fn set_version_var(mut self, var: Option<String>) -> Self {
        self.set_version_var = var;
        self
    }

    /// Builds the settings, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FatalError::InvalidPackageName`] when no name was given and
    /// none can be derived from the module directory path.
    pub fn build(self) -> Result<Settings> {
        let name = match self.name {
            Some(name) => name,
            None => derive_name(&self.module_dir)?,
        };
        let entry_point = self.entry_point.unwrap_or_else(|| name.clone());

        let metadata = PackageMetadata {
            name,
            version: self.version.unwrap_or_else(|| "0.1.0".to_string()),
            entry_point,
            description: self.description,
            license: self.license,
            author: self.author,
            author_email: self.author_email,
            url: self.url,
            requires_python: self.requires_python.unwrap_or_else(|| ">=3.10".to_string()),
            readme: self.readme,
        };

        Ok(Settings::new(
            metadata,
            self.module_dir,
            self.package_subpath.unwrap_or_else(|| ".".to_string()),
            self.platforms,
            self.output_dir.unwrap_or_else(|| PathBuf::from("./dist")),
            self.go_binary,
            self.lipo_binary,
            self.ldflags,
            self.set_version_var,
        ))
    }
}

/// Package name fallback: the module directory's last path segment, after
/// resolving `.`-style paths.
fn derive_name(module_dir: &Path) -> Result<String> {
    let resolved = std::fs::canonicalize(module_dir).unwrap_or_else(|_| module_dir.to_path_buf());
    resolved
        .file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            FatalError::InvalidPackageName {
                name: module_dir.display().to_string(),
            }
            .into()
        })
}
