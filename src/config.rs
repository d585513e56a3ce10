//! Site configuration module.
//!
//! Handles loading, validating, and merging the site's `config.toml`. Stock
//! defaults are serialized to a TOML table and the user file is merged on top,
//! so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! `config.toml` lives in the site root, next to the directories it points at:
//!
//! ```text
//! site/
//! ├── config.toml
//! ├── public/certificates/     # [certificates] directory
//! └── src/data/journey/        # [documents] directory
//!     └── journey.mdx
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [certificates]
//! directory = "public/certificates"  # Scanned for images, relative to the site root
//! mount = "/certificates"            # Public path prefix of discovered images
//!
//! [documents]
//! directory = "src/data/journey"     # Where named documents live
//! extension = "mdx"                  # <name>.<extension>
//! pages = ["journey"]                # Documents built into pages
//!
//! [highlight]
//! theme = "base16-ocean.dark"        # Any bundled syntect theme
//!
//! # The curated gallery, in display order. Entries win over discovered
//! # images with the same `file`.
//! [[certificate]]
//! file = "/certificates/aws.png"
//! title = "AWS Solutions Architect"
//! issuer = "Amazon Web Services"
//! date = "2024-03-15"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::ContentRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Certificate image discovery settings.
    pub certificates: CertificatesConfig,
    /// Long-form document settings.
    pub documents: DocumentsConfig,
    /// Code block highlighting settings.
    pub highlight: HighlightConfig,
    /// Curated certificates, in display order.
    #[serde(rename = "certificate")]
    pub curated: Vec<ContentRecord>,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.certificates.mount.starts_with('/') {
            return Err(ConfigError::Validation(
                "certificates.mount must start with '/'".into(),
            ));
        }
        let ext = &self.documents.extension;
        if ext.is_empty() || ext.starts_with('.') {
            return Err(ConfigError::Validation(
                "documents.extension must be non-empty, without a leading dot".into(),
            ));
        }
        if let Some(name) = self
            .documents
            .pages
            .iter()
            .find(|n| n.is_empty() || n.contains(['/', '\\']) || n.contains(".."))
        {
            return Err(ConfigError::Validation(format!(
                "documents.pages entry {name:?} must be a plain document name"
            )));
        }
        if self.highlight.theme.trim().is_empty() {
            return Err(ConfigError::Validation(
                "highlight.theme must not be empty".into(),
            ));
        }
        if let Some(pos) = self.curated.iter().position(|c| c.file.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "certificate #{} has an empty file",
                pos + 1
            )));
        }
        Ok(())
    }
}

/// Certificate image discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificatesConfig {
    /// Directory scanned for images, relative to the site root.
    pub directory: String,
    /// Public path prefix for discovered images.
    pub mount: String,
}

impl Default for CertificatesConfig {
    fn default() -> Self {
        Self {
            directory: "public/certificates".to_string(),
            mount: crate::scan::DEFAULT_MOUNT.to_string(),
        }
    }
}

/// Long-form document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentsConfig {
    /// Directory holding documents, relative to the site root.
    pub directory: String,
    /// File extension of document files.
    pub extension: String,
    /// Document names generated as pages.
    pub pages: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            directory: "src/data/journey".to_string(),
            extension: crate::document::DEFAULT_EXTENSION.to_string(),
            pages: vec!["journey".to_string()],
        }
    }
}

/// Code block highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// syntect theme name.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: crate::markup::highlight::DEFAULT_THEME.to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Certificates gallery
# ---------------------------------------------------------------------------
[certificates]
# Directory scanned for certificate images (png, jpg, jpeg, webp, avif),
# relative to the site root. A missing directory is fine.
directory = "public/certificates"

# Public path prefix of discovered images: a file `aws.png` in the
# directory becomes `/certificates/aws.png`.
mount = "/certificates"

# ---------------------------------------------------------------------------
# Documents
# ---------------------------------------------------------------------------
[documents]
# Directory holding documents (front matter + markdown body).
directory = "src/data/journey"

# Documents are looked up as <name>.<extension>.
extension = "mdx"

# Documents generated as pages by `folio build`.
pages = ["journey"]

# ---------------------------------------------------------------------------
# Code highlighting
# ---------------------------------------------------------------------------
[highlight]
# Bundled themes: base16-ocean.dark, base16-eighties.dark, base16-mocha.dark,
# base16-ocean.light, InspiredGitHub, Solarized (dark), Solarized (light).
theme = "base16-ocean.dark"

# ---------------------------------------------------------------------------
# Curated certificates
# ---------------------------------------------------------------------------
# Shown first, in this order. An entry replaces any discovered image with
# the same `file`; discovered images without an entry are appended.
#
# [[certificate]]
# file = "/certificates/aws.png"
# title = "AWS Solutions Architect"
# issuer = "Amazon Web Services"
# date = "2024-03-15"
"##
}
