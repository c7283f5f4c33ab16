//! RECORD manifest generation and content hashing.
//!
//! Every wheel member gets one manifest row `path,sha256=<hash>,size`. The
//! hash is the URL-safe base64 (unpadded) SHA-256 of the member's bytes, so
//! identical content always yields an identical hash. The RECORD cannot hash
//! itself; its own row carries empty hash and size fields.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Content hash of a member in manifest format.
pub fn content_hash(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    format!("sha256={}", URL_SAFE_NO_PAD.encode(digest))
}

/// Renders the RECORD manifest for the given members, in member order, with
/// the self-referencing row last.
///
/// Member paths never need CSV quoting: names and versions are validated to
/// exclude commas and quotes before assembly starts.
pub fn generate_record(members: &[(String, Vec<u8>)], record_path: &str) -> String {
    let mut out = String::new();
    for (path, content) in members {
        out.push_str(path);
        out.push(',');
        out.push_str(&content_hash(content));
        out.push(',');
        out.push_str(&content.len().to_string());
        out.push('\n');
    }
    out.push_str(record_path);
    out.push_str(",,\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_known_vector() {
        // SHA-256("hello"), URL-safe base64 without padding.
        assert_eq!(
            content_hash(b"hello"),
            "sha256=LPJNul-wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ"
        );
    }

    #[test]
    fn identical_content_hashes_identically() {
        assert_eq!(content_hash(b"same bytes"), content_hash(b"same bytes"));
        assert_ne!(content_hash(b"same bytes"), content_hash(b"other bytes"));
    }

    #[test]
    fn record_lists_every_member_and_itself() {
        let members = vec![
            ("pkg/__init__.py".to_string(), b"x = 1\n".to_vec()),
            ("pkg/bin/tool".to_string(), vec![0u8, 1, 2]),
        ];
        let record = generate_record(&members, "pkg-1.0.dist-info/RECORD");

        let lines: Vec<&str> = record.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("pkg/__init__.py,sha256="));
        assert!(lines[0].ends_with(",6"));
        assert!(lines[1].starts_with("pkg/bin/tool,sha256="));
        assert!(lines[1].ends_with(",3"));
        assert_eq!(lines[2], "pkg-1.0.dist-info/RECORD,,");
    }
}
