//! Shared test utilities for the folio test suite.
//!
//! Builders for gallery records, temp-dir fixtures for the certificate and
//! document directories, and small extractors used by assertions.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = certificate_dir(&["a.png", "b.txt"]);
//! let records = scan_certificates(tmp.path(), "/certificates");
//! assert_eq!(record_files(&records), vec!["/certificates/a.png"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::ContentRecord;

// =========================================================================
// Record builders
// =========================================================================

/// A curated record with a title and nothing else.
pub fn curated(file: &str, title: &str) -> ContentRecord {
    ContentRecord {
        file: file.to_string(),
        title: Some(title.to_string()),
        issuer: None,
        date: None,
    }
}

/// All `file` keys in collection order.
pub fn record_files(records: &[ContentRecord]) -> Vec<&str> {
    records.iter().map(|r| r.file.as_str()).collect()
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// A temp directory holding empty files with the given names.
pub fn certificate_dir(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        std::fs::write(tmp.path().join(name), "fake image").unwrap();
    }
    tmp
}

/// Write `content` to `<dir>/<name>`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A site root with a journey document and a couple of certificate images.
///
/// ```text
/// <root>/
/// ├── config.toml
/// ├── public/certificates/{aws.png, rust.webp, notes.txt}
/// └── src/data/journey/journey.mdx
/// ```
pub fn site_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_file(
        root,
        "config.toml",
        r#"
[[certificate]]
file = "/certificates/aws.png"
title = "AWS Solutions Architect"
issuer = "Amazon Web Services"
date = "2024-03-15"
"#,
    );
    write_file(root, "public/certificates/aws.png", "fake image");
    write_file(root, "public/certificates/rust.webp", "fake image");
    write_file(root, "public/certificates/notes.txt", "not an image");
    write_file(
        root,
        "src/data/journey/journey.mdx",
        "---\ntitle: Journey\ndate: 2024-01-01\n---\n# Start\n\nFirst steps.\n\n```rust\nfn main() {}\n```\n",
    );
    tmp
}
