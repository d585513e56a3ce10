//! Certificate image discovery.
//!
//! Any image dropped into the certificates directory shows up in the gallery
//! without being declared in `config.toml`. The filename carries no metadata,
//! so discovered records are bare: only the public path is known.
//!
//! ```text
//! public/certificates/           # scanned directory
//! ├── aws-architect.png          # → /certificates/aws-architect.png
//! ├── Rust-Course.WEBP           # → /certificates/Rust-Course.WEBP
//! ├── notes.txt                  # ignored (not an image)
//! ├── .DS_Store                  # ignored (hidden)
//! └── drafts/                    # ignored (directories are not walked)
//! ```
//!
//! ## Failure policy
//!
//! Scanning never fails. A missing directory is the normal "nothing dropped
//! in yet" state and yields an empty list; an unreadable directory or entry is
//! logged and skipped. The gallery then shows whatever the curated list holds.

use crate::types::ContentRecord;
use std::path::Path;
use walkdir::WalkDir;

/// Extensions recognized as certificate images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "avif"];

/// Public mount point used when none is configured.
pub const DEFAULT_MOUNT: &str = "/certificates";

/// Discover certificate images in `dir`, publishing them under `mount`.
///
/// Records are returned in filename order so repeated scans of the same
/// directory are identical.
pub fn scan_certificates(dir: &Path, mount: &str) -> Vec<ContentRecord> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "certificate directory not found");
        return Vec::new();
    }

    let mount = mount.trim_end_matches('/');
    let mut records = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') || !is_image(&name) {
            continue;
        }
        records.push(ContentRecord::bare(format!("{mount}/{name}")));
    }

    tracing::debug!(dir = %dir.display(), count = records.len(), "scanned certificates");
    records
}

/// Whether a filename carries one of the recognized image extensions.
pub fn is_image(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}
