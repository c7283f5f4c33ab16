//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Compile Go CLI programs into Python wheels
#[derive(Parser, Debug)]
#[command(
    name = "gowheel",
    about = "Compile Go CLI programs into Python wheels",
    long_about = "Cross-compiles a Go module for a list of target platforms and packages each
binary into an installable Python wheel with a generated launcher.

Usage:
  gowheel ./mytool --version 1.0.0
  gowheel ./mytool --platforms linux-amd64,darwin-arm64 --output-dir ./dist
  gowheel ./mytool --name my-tool --entry-point mt --set-version-var main.version

Exit codes: 0 = all platforms built, 1 = fatal input error,
2 = every platform failed, 3 = partial success."
)]
pub struct Args {
    /// Path to the Go module directory
    #[arg(value_name = "MODULE_DIR")]
    pub module_dir: PathBuf,

    /// Package name (defaults to the module directory basename)
    #[arg(long)]
    pub name: Option<String>,

    /// Package version
    #[arg(long, default_value = "0.1.0")]
    pub version: String,

    /// Directory for built wheels
    #[arg(long, default_value = "./dist", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// CLI command name (defaults to the package name)
    #[arg(long)]
    pub entry_point: Option<String>,

    /// Comma-separated list of target platforms (defaults to all supported)
    #[arg(long, value_name = "LIST")]
    pub platforms: Option<String>,

    /// Package path within the module passed to the toolchain
    #[arg(long, default_value = ".", value_name = "SUBPATH")]
    pub package: String,

    /// Path to the Go toolchain (defaults to `go` on PATH)
    #[arg(long, value_name = "PATH")]
    pub go_binary: Option<PathBuf>,

    /// Path to the binary-merge utility for darwin-universal builds
    /// (defaults to `lipo`)
    #[arg(long, value_name = "PATH")]
    pub lipo_binary: Option<PathBuf>,

    /// Package description
    #[arg(long)]
    pub description: Option<String>,

    /// Python version requirement
    #[arg(long, default_value = ">=3.10", value_name = "SPEC")]
    pub requires_python: String,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author email
    #[arg(long)]
    pub author_email: Option<String>,

    /// License identifier
    #[arg(long)]
    pub license: Option<String>,

    /// Project URL
    #[arg(long)]
    pub url: Option<String>,

    /// Path to a README markdown file used as the long description
    #[arg(long, value_name = "PATH")]
    pub readme: Option<PathBuf>,

    /// Additional Go linker flags appended to the default `-s -w`
    #[arg(long, value_name = "FLAGS")]
    pub ldflags: Option<String>,

    /// Go variable to set to the package version via a -X ldflag
    /// (e.g. `main.version`)
    #[arg(long, value_name = "VAR")]
    pub set_version_var: Option<String>,

    /// Write the final build summary as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
