//! Package naming rules.
//!
//! Two distinct spellings of a package name appear inside a wheel: the
//! filename form (separator runs collapsed to `_`) and the importable
//! directory form (`-` and `.` mapped to `_`, runs preserved). Both are
//! derived from the validated user-supplied name.

/// Checks a package name against the naming rule: lowercase letters, digits,
/// `-`, `_` and `.`, starting with a letter or digit.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_lowercase() && !first.is_ascii_digit() {
        return false;
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

/// Checks a version string for characters that would break the wheel
/// filename grammar (the filename is `-`-separated, so `-` is rejected).
pub fn is_valid_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '!'))
}

/// Normalizes a package name for the wheel filename: lowercase, every run of
/// `-`, `_` or `.` collapsed to a single `_`. Idempotent.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('_');
                in_separator = true;
            }
        } else {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    out
}

/// Derives the importable package directory name: every `-` and `.` becomes
/// `_` so the result is a valid Python identifier segment.
pub fn import_name(name: &str) -> String {
    name.to_ascii_lowercase().replace(['-', '.'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["mytool", "my-tool", "my_tool", "my.tool", "0ad", "a"] {
            assert!(is_valid_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "-tool", ".tool", "My-Tool", "my tool", "tool!", "töl"] {
            assert!(!is_valid_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn version_rule_rejects_filename_separators() {
        assert!(is_valid_version("0.1.0"));
        assert!(is_valid_version("2.3.4rc1"));
        assert!(is_valid_version("1!2.0+local"));
        assert!(!is_valid_version(""));
        assert!(!is_valid_version("1.0-beta"));
        assert!(!is_valid_version("1.0 final"));
    }

    #[test]
    fn normalization_collapses_separator_runs() {
        assert_eq!(normalize_name("my-tool"), "my_tool");
        assert_eq!(normalize_name("my--tool"), "my_tool");
        assert_eq!(normalize_name("my-.tool"), "my_tool");
        assert_eq!(normalize_name("My-Tool"), "my_tool");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["my-tool", "my..tool", "a-b_c.d", "already_normal"] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn import_name_preserves_runs() {
        assert_eq!(import_name("my-tool"), "my_tool");
        assert_eq!(import_name("my.tool"), "my_tool");
        assert_eq!(import_name("my--tool"), "my__tool");
    }
}
