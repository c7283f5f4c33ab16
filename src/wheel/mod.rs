//! Wheel assembly.
//!
//! Builds one installable wheel from one compiled binary plus package
//! metadata: the importable package directory with the generated launcher
//! and the binary under `bin/`, the `dist-info` metadata members, and the
//! RECORD manifest, all serialized into a single deflate-compressed archive.
//!
//! Assembly is deterministic: identical inputs produce byte-identical
//! archives. Member order is fixed, zip timestamps are pinned to the epoch
//! of the format, and permissions are constant (0755 for the binary, 0644
//! elsewhere).

mod launcher;
mod metadata;
mod naming;
mod record;

pub use metadata::{PYTHON_ABI_TAG, generate_entry_points, generate_metadata, generate_wheel_info};
pub use naming::{import_name, is_valid_name, is_valid_version, normalize_name};
pub use record::{content_hash, generate_record};

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::settings::PackageMetadata;

/// Wheel archive filename extension.
pub const WHEEL_EXTENSION: &str = "whl";

/// Errors from wheel assembly.
///
/// Only the two input checks are genuinely fallible; everything after them
/// formats data already validated upstream. IO and archive variants exist
/// for the final write.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// The input binary path does not exist or is not a file
    #[error("binary not found: {path}")]
    BinaryNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Metadata name rejected by the naming rule
    #[error("invalid package name: {name:?}")]
    InvalidPackageName {
        /// The rejected name
        name: String,
    },

    /// IO errors while reading the binary or writing the archive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive serialization errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Launcher template rendering failed
    #[error("launcher template error: {0}")]
    Template(String),
}

/// Deterministic wheel filename: `{normalized}-{version}-py3-none-{tag}.whl`.
pub fn wheel_file_name(name: &str, version: &str, platform_tag: &str) -> String {
    format!(
        "{}-{version}-{PYTHON_ABI_TAG}-{platform_tag}.{WHEEL_EXTENSION}",
        naming::normalize_name(name),
    )
}

/// Assembles one wheel from a compiled binary.
///
/// The archive is written into `out_dir` (the caller's scratch directory;
/// the orchestrator moves finished artifacts into the output directory) and
/// its full path is returned.
///
/// # Arguments
///
/// * `binary_path` - The compiled, statically-linked binary to bundle
/// * `meta` - Validated package metadata
/// * `platform_tag` - Wheel platform tag of the target
/// * `windows` - Whether the target needs the `.exe` member suffix and the
///   spawn-based launcher
/// * `out_dir` - Directory to write the archive into
///
/// # Errors
///
/// [`AssembleError::BinaryNotFound`] if `binary_path` does not point at a
/// file, [`AssembleError::InvalidPackageName`] if the metadata name fails
/// validation.
pub async fn assemble(
    binary_path: &Path,
    meta: &PackageMetadata,
    platform_tag: &str,
    windows: bool,
    out_dir: &Path,
) -> Result<PathBuf, AssembleError> {
    if !naming::is_valid_name(&meta.name) {
        return Err(AssembleError::InvalidPackageName {
            name: meta.name.clone(),
        });
    }

    match tokio::fs::metadata(binary_path).await {
        Ok(m) if m.is_file() => {}
        _ => {
            return Err(AssembleError::BinaryNotFound {
                path: binary_path.to_path_buf(),
            });
        }
    }
    let binary_content = tokio::fs::read(binary_path).await?;

    let import = naming::import_name(&meta.name);
    let dist_info = format!("{}-{}.dist-info", naming::normalize_name(&meta.name), meta.version);
    let binary_member = format!("{}{}", meta.entry_point, if windows { ".exe" } else { "" });

    // Member order is part of the determinism contract: package files first,
    // then dist-info, RECORD last.
    let mut members: Vec<(String, Vec<u8>)> = vec![
        (
            format!("{import}/__init__.py"),
            launcher::generate_init_py(&meta.version, &binary_member, !windows)?.into_bytes(),
        ),
        (
            format!("{import}/__main__.py"),
            launcher::generate_main_py().into_bytes(),
        ),
        (format!("{import}/bin/{binary_member}"), binary_content),
        (
            format!("{dist_info}/METADATA"),
            metadata::generate_metadata(meta).into_bytes(),
        ),
        (
            format!("{dist_info}/WHEEL"),
            metadata::generate_wheel_info(platform_tag).into_bytes(),
        ),
        (
            format!("{dist_info}/entry_points.txt"),
            metadata::generate_entry_points(&meta.entry_point, &import).into_bytes(),
        ),
    ];

    let record_path = format!("{dist_info}/RECORD");
    let record_content = record::generate_record(&members, &record_path).into_bytes();
    members.push((record_path, record_content));

    let wheel_path = out_dir.join(wheel_file_name(&meta.name, &meta.version, platform_tag));

    let path = wheel_path.clone();
    tokio::task::spawn_blocking(move || write_archive(&path, &members))
        .await
        .map_err(|e| AssembleError::Io(std::io::Error::other(format!("archive task panicked: {e}"))))??;

    log::debug!("assembled {}", wheel_path.display());
    Ok(wheel_path)
}

/// Serializes the member set into one deflate-compressed zip archive.
///
/// Timestamps are pinned to the zip format epoch so two runs over identical
/// inputs produce byte-identical files.
fn write_archive(path: &Path, members: &[(String, Vec<u8>)]) -> Result<(), AssembleError> {
    let file = std::fs::File::create(path)?;
    let mut writer = ZipWriter::new(file);

    for (name, content) in members {
        let mode = if name.contains("/bin/") { 0o755 } else { 0o644 };
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(mode);
        writer.start_file(name.as_str(), options)?;
        writer.write_all(content)?;
    }

    writer.finish()?;
    Ok(())
}
