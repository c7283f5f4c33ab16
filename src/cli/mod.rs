//! Command line interface.
//!
//! Thin collaborator layer over the orchestrator: parses arguments, reads
//! the optional README, assembles [`Settings`](crate::settings::Settings),
//! prints the final count and maps the run's classification onto the
//! process exit code.

mod args;

pub use args::Args;

use std::path::Path;

use crate::builder::{BuildSummary, Classification, WheelBuilder};
use crate::error::{Error, FatalError, Result};
use crate::platform::PlatformCatalog;
use crate::settings::SettingsBuilder;

/// Every platform produced a wheel.
pub const EXIT_SUCCESS: i32 = 0;
/// A fatal input error stopped the run before any compilation.
pub const EXIT_FATAL: i32 = 1;
/// Every platform was attempted and none produced a wheel.
pub const EXIT_ALL_FAILED: i32 = 2;
/// At least one wheel was produced, at least one platform failed.
pub const EXIT_PARTIAL: i32 = 3;

/// Main CLI entry point. Returns the process exit code for non-fatal runs;
/// fatal errors and the all-platforms-failed aggregate come back as `Err`
/// and map to their codes via [`Error::exit_code`].
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    run_with(args).await
}

async fn run_with(args: Args) -> Result<i32> {
    println!("gowheel v{}", env!("CARGO_PKG_VERSION"));
    println!("Building from {}", args.module_dir.display());
    println!();

    let readme = match &args.readme {
        Some(path) => match tokio::fs::read_to_string(path).await {
            Ok(content) => Some(content),
            Err(_) => {
                return Err(FatalError::ReadmeNotFound { path: path.clone() }.into());
            }
        },
        None => None,
    };

    let platforms = args
        .platforms
        .as_deref()
        .map(parse_platform_list)
        .unwrap_or_default();

    let mut settings = SettingsBuilder::new(&args.module_dir)
        .version(&args.version)
        .requires_python(&args.requires_python)
        .package_subpath(&args.package)
        .platforms(platforms)
        .output_dir(&args.output_dir)
        .description(args.description)
        .license(args.license)
        .author(args.author)
        .author_email(args.author_email)
        .url(args.url)
        .readme(readme)
        .ldflags(args.ldflags)
        .set_version_var(args.set_version_var);
    if let Some(name) = args.name {
        settings = settings.name(name);
    }
    if let Some(entry_point) = args.entry_point {
        settings = settings.entry_point(entry_point);
    }
    if let Some(go_binary) = args.go_binary {
        settings = settings.go_binary(go_binary);
    }
    if let Some(lipo_binary) = args.lipo_binary {
        settings = settings.lipo_binary(lipo_binary);
    }

    let builder = WheelBuilder::new(settings.build()?, PlatformCatalog::builtin()).await?;
    let summary = builder.build_all().await?;

    println!();
    println!(
        "{} wheel(s) built, {} platform(s) attempted",
        summary.built_count(),
        summary.attempted()
    );
    for wheel in summary.wheels() {
        println!("  {}", wheel.display());
    }

    if let Some(report_path) = &args.report {
        write_report(report_path, &summary).await?;
        log::info!("wrote build report to {}", report_path.display());
    }

    match summary.classify() {
        Classification::FullSuccess => Ok(EXIT_SUCCESS),
        Classification::PartialSuccess => Ok(EXIT_PARTIAL),
        Classification::AllFailed => Err(Error::AllPlatformsFailed {
            attempted: summary.attempted(),
        }),
    }
}

/// Splits a comma-joined platform list, trimming entries and dropping empty
/// segments.
fn parse_platform_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Writes the machine-readable build summary.
async fn write_report(path: &Path, summary: &BuildSummary) -> Result<()> {
    let report = serde_json::json!({
        "classification": summary.classify(),
        "wheels_built": summary.built_count(),
        "platforms_attempted": summary.attempted(),
        "outcomes": summary.outcomes(),
    });
    let body = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(path, body + "\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_list_is_trimmed_and_filtered() {
        assert_eq!(
            parse_platform_list("linux-amd64, darwin-arm64 ,"),
            vec!["linux-amd64".to_string(), "darwin-arm64".to_string()]
        );
        assert!(parse_platform_list("").is_empty());
    }
}
