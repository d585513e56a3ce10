//! Shared types used across the gallery and document pipelines.
//!
//! [`ContentRecord`] is declared in `config.toml` (curated entries), produced
//! by [`crate::scan`] (discovered entries), and emitted as JSON by the CLI, so
//! its serialized shape must stay stable.

use serde::{Deserialize, Serialize};

/// One entry of the certificates gallery.
///
/// `file` is the identity key: a public path such as
/// `/certificates/aws-architect.png`. Curated records carry the optional
/// metadata; discovered records only ever have `file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentRecord {
    /// Public path of the image, unique within a collection
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    /// ISO-8601 date (`2024-03-01`), kept as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl ContentRecord {
    /// A bare record carrying identity only, as produced by discovery.
    pub fn bare(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            title: None,
            issuer: None,
            date: None,
        }
    }

    /// Title for display, falling back to a generic label.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Certificate")
    }
}
