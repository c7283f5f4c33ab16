//! Wheel metadata member generation.
//!
//! Renders the three `dist-info` text members: the package description
//! record (`METADATA`), the archive format record (`WHEEL`) and the
//! entry-point mapping (`entry_points.txt`). Omitted optional fields are
//! simply absent, never emitted as empty placeholders.

use crate::settings::PackageMetadata;

/// ABI portion of the wheel compatibility tag. The launcher is plain Python
/// and the payload is a native binary, so the tag is version- and
/// ABI-independent; only the platform portion varies.
pub const PYTHON_ABI_TAG: &str = "py3-none";

/// Renders the `METADATA` member.
pub fn generate_metadata(meta: &PackageMetadata) -> String {
    let mut lines = vec![
        "Metadata-Version: 2.1".to_string(),
        format!("Name: {}", meta.name),
        format!("Version: {}", meta.version),
    ];

    if let Some(description) = &meta.description {
        lines.push(format!("Summary: {description}"));
    }
    if let Some(author) = &meta.author {
        lines.push(format!("Author: {author}"));
    }
    if let Some(author_email) = &meta.author_email {
        lines.push(format!("Author-email: {author_email}"));
    }
    if let Some(license) = &meta.license {
        lines.push(format!("License: {license}"));
    }
    if let Some(url) = &meta.url {
        lines.push(format!("Home-page: {url}"));
    }

    lines.push(format!("Requires-Python: {}", meta.requires_python));

    if let Some(readme) = &meta.readme {
        lines.push("Description-Content-Type: text/markdown".to_string());
        // Blank line separates headers from the long-description body.
        lines.push(String::new());
        lines.push(readme.clone());
    }

    lines.join("\n") + "\n"
}

/// Renders the `WHEEL` format record for one platform tag.
pub fn generate_wheel_info(platform_tag: &str) -> String {
    format!(
        "Wheel-Version: 1.0\n\
         Generator: gowheel {}\n\
         Root-Is-Purelib: false\n\
         Tag: {PYTHON_ABI_TAG}-{platform_tag}\n",
        env!("CARGO_PKG_VERSION"),
    )
}

/// Renders `entry_points.txt`, mapping the command name to the launcher's
/// callable.
pub fn generate_entry_points(entry_point: &str, import_name: &str) -> String {
    format!("[console_scripts]\n{entry_point} = {import_name}:main\n")
}
