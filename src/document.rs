//! Long-form documents: front matter plus markup body.
//!
//! A document is a single file under the documents directory, looked up by
//! logical name (`journey` → `src/data/journey/journey.mdx`):
//!
//! ```text
//! ---
//! title: My Journey
//! description: From first script to production systems
//! date: 2024-06-01
//! tags: [rust, web]
//! ---
//! # 2019
//!
//! Wrote my first program...
//! ```
//!
//! The header between the `---` lines is YAML; everything after the closing
//! delimiter is the body, kept verbatim. A file without a leading delimiter has
//! empty front matter and the whole file as its body.
//!
//! ## Absence
//!
//! [`DocumentStore::load`] returns `None` for a missing file, an unreadable
//! file, or a malformed header alike. Pages treat all three as "nothing to show
//! yet" and render a placeholder; the cause is only logged. Callers that need
//! the distinction can use [`parse_document`] directly.

use regex::Regex;
use serde_yaml::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("front matter key must be a scalar: {0:?}")]
    ComplexKey(Value),
}

/// Header metadata of a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter(BTreeMap<String, Value>);

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Scalar value for `key` as text: strings as-is, numbers and booleans
    /// as written (`title: 2024` reads as `"2024"`).
    pub fn get_text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.0.get(key).and_then(scalar_text)
    }

    pub fn title(&self) -> Option<Cow<'_, str>> {
        self.get_text("title")
    }

    pub fn description(&self) -> Option<Cow<'_, str>> {
        self.get_text("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.get_str("image")
    }

    pub fn date(&self) -> Option<Cow<'_, str>> {
        self.get_text("date")
    }

    /// Tags as a list. A single string is a one-element list; non-string
    /// entries are skipped.
    pub fn tags(&self) -> Vec<&str> {
        match self.0.get("tags") {
            Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(tag)) => vec![tag.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// A loaded document. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub frontmatter: Frontmatter,
    /// Raw markup body, verbatim
    pub content: String,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)\z")
            .expect("front matter pattern is valid")
    })
}

/// Split `text` into front matter and body.
pub fn parse_document(text: &str) -> Result<Document, DocumentError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(captures) = frontmatter_regex().captures(text) else {
        return Ok(Document {
            frontmatter: Frontmatter::default(),
            content: text.to_string(),
        });
    };

    let header = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    Ok(Document {
        frontmatter: parse_frontmatter(header)?,
        content: body.to_string(),
    })
}

fn parse_frontmatter(header: &str) -> Result<Frontmatter, DocumentError> {
    if header.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    let mapping = match serde_yaml::from_str::<Value>(header)? {
        Value::Null => return Ok(Frontmatter::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(DocumentError::NotAMapping),
    };

    let mut fields = BTreeMap::new();
    for (key, value) in mapping {
        // Scalar keys are read as their text (`2019: first job`).
        let text = match &key {
            Value::Null => Some("null".to_string()),
            other => scalar_text(other).map(Cow::into_owned),
        };
        let Some(name) = text else {
            return Err(DocumentError::ComplexKey(key));
        };
        fields.insert(name, value);
    }
    Ok(Frontmatter(fields))
}

/// Default file extension for documents.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Loads named documents from a fixed content root.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
    extension: String,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing the document `name`, or `None` for names that would
    /// escape the root.
    pub fn path_for(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return None;
        }
        Some(self.root.join(format!("{name}.{}", self.extension)))
    }

    /// Load the document `name`. Every failure reads as "no document".
    pub fn load(&self, name: &str) -> Option<Document> {
        let Some(path) = self.path_for(name) else {
            tracing::warn!(name, "rejected document name");
            return None;
        };
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "document not found");
            return None;
        }

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read document");
                return None;
            }
        };

        match parse_document(&text) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "malformed front matter");
                None
            }
        }
    }
}
