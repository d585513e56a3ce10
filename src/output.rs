//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity
//! (certificate, document) leads with its positional index and title; paths
//! and details follow as indented context lines. Untitled certificates show
//! their filename in parens since the filename is all they have.
//!
//! # Output Format
//!
//! ## Certificates
//!
//! ```text
//! Certificates (2)
//! 001 AWS Solutions Architect
//!     File: /certificates/aws.png
//!     Issuer: Amazon Web Services
//!     Date: March 15, 2024
//! 002 (rust.webp) [discovered]
//!     File: /certificates/rust.webp
//! ```
//!
//! ## Documents
//!
//! ```text
//! Documents
//! 001 Journey
//!     Source: src/data/journey/journey.mdx
//!     Front matter: date, title
//!     Nodes: 3 (1 code block)
//! 002 talks (missing)
//!     Expected: src/data/journey/talks.mdx
//! ```
//!
//! ## Build
//!
//! ```text
//! Certificates → certificates/index.html (2 certificates, 1 curated)
//! Journey → journey/index.html
//!
//! Generated 1 gallery, 1 document page
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::document::Document;
use crate::generate::{GenerateReport, format_date};
use crate::markup::{NodeKind, RenderedDocument};
use crate::types::ContentRecord;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format a certificate line: titled records show the title, untitled show
/// the filename in parens.
///
/// ```text
/// 001 AWS Solutions Architect   // titled
/// 002 (rust.webp)               // untitled — filename IS the identity
/// ```
fn certificate_line(index: usize, record: &ContentRecord) -> String {
    match record.title.as_deref() {
        Some(t) if !t.trim().is_empty() => format!("{} {}", format_index(index), t),
        _ => {
            let filename = record.file.rsplit('/').next().unwrap_or(&record.file);
            format!("{} ({})", format_index(index), filename)
        }
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Certificates
// ============================================================================

/// Format the merged certificate list.
///
/// Records not present in `curated` are tagged `[discovered]`.
pub fn format_certificates_output(
    records: &[ContentRecord],
    curated: &[ContentRecord],
) -> Vec<String> {
    let mut lines = vec![format!("Certificates ({})", records.len())];

    for (i, record) in records.iter().enumerate() {
        let is_curated = curated.iter().any(|c| c.file == record.file);
        let marker = if is_curated { "" } else { " [discovered]" };
        lines.push(format!("{}{}", certificate_line(i + 1, record), marker));
        lines.push(format!("    File: {}", record.file));
        if let Some(issuer) = &record.issuer {
            lines.push(format!("    Issuer: {}", issuer));
        }
        if let Some(date) = &record.date {
            lines.push(format!("    Date: {}", format_date(date)));
        }
    }

    lines
}

/// Print the certificate list to stdout.
pub fn print_certificates_output(records: &[ContentRecord], curated: &[ContentRecord]) {
    for line in format_certificates_output(records, curated) {
        println!("{}", line);
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A document as seen by `check`: where it should be and what loading gave.
pub struct DocumentStatus<'a> {
    pub name: &'a str,
    pub path: &'a Path,
    pub loaded: Option<(&'a Document, &'a RenderedDocument)>,
}

/// Format the status of each configured document.
pub fn format_documents_output(documents: &[DocumentStatus<'_>]) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];

    for (i, status) in documents.iter().enumerate() {
        let Some((doc, body)) = status.loaded else {
            lines.push(format!("{} {} (missing)", format_index(i + 1), status.name));
            lines.push(format!("    Expected: {}", status.path.display()));
            continue;
        };

        let title = doc.frontmatter.title();
        let title = title.as_deref().unwrap_or(status.name);
        lines.push(format!("{} {}", format_index(i + 1), title));
        lines.push(format!("    Source: {}", status.path.display()));

        if !doc.frontmatter.is_empty() {
            let keys: Vec<&str> = doc.frontmatter.keys().collect();
            lines.push(format!("    Front matter: {}", keys.join(", ")));
        }

        let code_blocks = body
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::CodeBlock)
            .count();
        if code_blocks > 0 {
            lines.push(format!(
                "    Nodes: {} ({})",
                body.nodes.len(),
                plural(code_blocks, "code block", "code blocks")
            ));
        } else {
            lines.push(format!("    Nodes: {}", body.nodes.len()));
        }
    }

    lines
}

/// Print document status to stdout.
pub fn print_documents_output(documents: &[DocumentStatus<'_>]) {
    for line in format_documents_output(documents) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format build output: one line per generated page, then a summary.
pub fn format_generate_output(report: &GenerateReport, output_dir: &Path) -> Vec<String> {
    let rel = |p: &Path| {
        p.strip_prefix(output_dir)
            .unwrap_or(p)
            .display()
            .to_string()
    };

    let mut lines = vec![format!(
        "Certificates \u{2192} certificates/index.html ({}, {} curated)",
        plural(report.certificates.len(), "certificate", "certificates"),
        report.curated_count
    )];

    let mut missing = 0;
    for doc in &report.documents {
        let title = doc.title.as_deref().unwrap_or(&doc.name);
        match doc.nodes {
            Some(_) => lines.push(format!("{} \u{2192} {}", title, rel(&doc.output))),
            None => {
                missing += 1;
                lines.push(format!(
                    "{} \u{2192} {} (placeholder)",
                    title,
                    rel(&doc.output)
                ));
            }
        }
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated 1 gallery, {}",
        plural(report.documents.len(), "document page", "document pages")
    );
    if missing > 0 {
        summary.push_str(&format!(" ({missing} missing)"));
    }
    lines.push(summary);

    lines
}

/// Print build output to stdout.
pub fn print_generate_output(report: &GenerateReport, output_dir: &Path) {
    for line in format_generate_output(report, output_dir) {
        println!("{}", line);
    }
}
