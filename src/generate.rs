//! HTML page generation.
//!
//! Renders the certificates gallery and one page per configured document into
//! the output directory.
//!
//! ## Generated Pages
//!
//! - **Certificates** (`/certificates/index.html`): card grid of the merged
//!   certificate list, or an empty state when there are none
//! - **Documents** (`/{name}/index.html`): article header from front matter,
//!   then the rendered body; a placeholder when the document is missing
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── style.css
//! ├── certificates/
//! │   └── index.html
//! └── journey/
//!     └── index.html
//! ```
//!
//! Image files are not copied: `file` paths point at wherever the site serves
//! its public directory from.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::SiteConfig;
use crate::document::{Document, DocumentStore};
use crate::markup::{self, Highlighter, MarkupRenderer, NodeOverrides, RenderedDocument};
use crate::merge::merge_records;
use crate::scan::scan_certificates;
use crate::types::ContentRecord;
use chrono::{DateTime, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/style.css");
/// Click handler for code block copy buttons, inlined on document pages.
const COPY_JS: &str = include_str!("../static/copy.js");

/// What a build produced, for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub certificates: Vec<ContentRecord>,
    /// Number of merged certificates that came from the curated list
    pub curated_count: usize,
    pub documents: Vec<DocumentReport>,
}

#[derive(Debug)]
pub struct DocumentReport {
    pub name: String,
    pub title: Option<String>,
    /// Rendered top-level node count; `None` when the document was absent
    pub nodes: Option<usize>,
    pub output: PathBuf,
}

/// Merge curated certificates with those discovered under the site root.
pub fn collect_certificates(root: &Path, config: &SiteConfig) -> Vec<ContentRecord> {
    let dir = root.join(&config.certificates.directory);
    let discovered = scan_certificates(&dir, &config.certificates.mount);
    merge_records(config.curated.iter().cloned(), discovered)
}

/// Document store for the configured documents directory.
pub fn document_store(root: &Path, config: &SiteConfig) -> DocumentStore {
    DocumentStore::new(
        root.join(&config.documents.directory),
        config.documents.extension.clone(),
    )
}

/// Renderer configured with the site's highlight theme.
pub fn markup_renderer(config: &SiteConfig) -> MarkupRenderer {
    MarkupRenderer::new(
        NodeOverrides::default(),
        Highlighter::new(config.highlight.theme.clone()),
    )
}

pub fn generate(
    root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join("style.css"), CSS)?;

    let certificates = collect_certificates(root, config);
    let curated_count = certificates
        .iter()
        .filter(|c| config.curated.iter().any(|cur| cur.file == c.file))
        .count();
    let gallery_dir = output_dir.join("certificates");
    fs::create_dir_all(&gallery_dir)?;
    fs::write(
        gallery_dir.join("index.html"),
        render_certificates_page(&certificates).into_string(),
    )?;

    let store = document_store(root, config);
    let renderer = markup_renderer(config);
    let mut documents = Vec::new();
    for name in &config.documents.pages {
        let doc = store.load(name);
        let body = doc.as_ref().map(|d| renderer.render_markup(&d.content));
        let expected = store
            .path_for(name)
            .map(|p| p.strip_prefix(root).unwrap_or(&p).display().to_string())
            .unwrap_or_else(|| name.clone());

        let page = render_document_page(name, doc.as_ref().zip(body.as_ref()), &expected);
        let page_dir = output_dir.join(name);
        fs::create_dir_all(&page_dir)?;
        let out = page_dir.join("index.html");
        fs::write(&out, page.into_string())?;

        documents.push(DocumentReport {
            name: name.clone(),
            title: doc
                .as_ref()
                .and_then(|d| d.frontmatter.title())
                .map(|t| t.into_owned()),
            nodes: body.as_ref().map(|b| b.nodes.len()),
            output: out,
        });
    }

    tracing::info!(
        certificates = certificates.len(),
        documents = documents.len(),
        output = %output_dir.display(),
        "site generated"
    );

    Ok(GenerateReport {
        certificates,
        curated_count,
        documents,
    })
}

// ============================================================================
// Formatting helpers
// ============================================================================

/// Format an ISO date as `Month D, YYYY`, keeping anything else as written.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|d| d.date_naive()));
    match parsed {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// `journey` → `Journey`
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('-', " "),
        None => String::new(),
    }
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "(1 certificate)".to_string()
    } else {
        format!("({n} certificates)")
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/style.css";
            }
            body {
                main class="container py-16" {
                    (content)
                }
            }
        }
    }
}

fn page_intro(heading: &str, tagline: &str) -> Markup {
    html! {
        div class="space-y-4 text-center" {
            h1 class="text-4xl font-bold tracking-tight" { (heading) }
            p class="text-muted-foreground mx-auto max-w-2xl text-lg" { (tagline) }
        }
        hr.separator;
    }
}

fn certificate_card(cert: &ContentRecord) -> Markup {
    let alt = cert.title.as_deref().unwrap_or("certificate");
    html! {
        figure.certificate-card {
            div.certificate-image {
                img src=(cert.file) alt=(alt) loading="lazy";
            }
            figcaption {
                h3 { (cert.display_title()) }
                @if let Some(issuer) = &cert.issuer {
                    p.issuer { (issuer) }
                }
                @if let Some(date) = &cert.date {
                    time datetime=(date) { (format_date(date)) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the certificates gallery
pub fn render_certificates_page(certificates: &[ContentRecord]) -> Markup {
    let content = html! {
        (page_intro(
            "Certificates & Achievements",
            "A curated list of my certificates and notable achievements.",
        ))
        section class="space-y-6" {
            h2 {
                "All Certificates"
                @if !certificates.is_empty() {
                    " "
                    span.certificate-count { (count_label(certificates.len())) }
                }
            }
            @if certificates.is_empty() {
                div.empty-state {
                    h2 { "No certificates found" }
                    p { "Check back later for certificates and achievements!" }
                }
            } @else {
                div.certificate-grid {
                    @for cert in certificates {
                        (certificate_card(cert))
                    }
                }
            }
        }
    };

    base_document("Certificates & Achievements", content)
}

/// Renders a document page, or a placeholder naming the file to add.
pub fn render_document_page(
    name: &str,
    document: Option<(&Document, &RenderedDocument)>,
    expected_path: &str,
) -> Markup {
    let heading = display_name(name);

    let Some((doc, body)) = document else {
        let content = html! {
            (page_intro(&heading, &format!(
                "No {name} content found. Add `{expected_path}` to display content here."
            )))
        };
        return base_document(&heading, content);
    };

    let fm = &doc.frontmatter;
    let title = fm.title();
    let title = title.as_deref().unwrap_or(heading.as_str());
    let tags = fm.tags();

    let content = html! {
        article class="mx-auto max-w-4xl" {
            header.article-header {
                @if let Some(image) = fm.image() {
                    div.hero {
                        img src=(image) alt=(title);
                    }
                }
                @if !tags.is_empty() {
                    div.tags {
                        @for tag in &tags {
                            span.badge { (tag) }
                        }
                    }
                }
                h1 { (title) }
                @if let Some(description) = fm.description() {
                    p class="text-muted-foreground text-xl" { (description.as_ref()) }
                }
                @if let Some(date) = fm.date() {
                    time datetime=(date.as_ref()) { (format_date(&date)) }
                }
                hr.separator;
            }
            div.prose {
                (markup::to_markup(body))
            }
        }
        script { (PreEscaped(COPY_JS)) }
    };

    base_document(title, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::document::parse_document;
    use crate::markup::render_markup;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn format_date_long_form() {
        assert_eq!(format_date("2024-01-01"), "January 1, 2024");
        assert_eq!(format_date("2025-10-10"), "October 10, 2025");
        assert_eq!(format_date("2024-03-15T10:00:00Z"), "March 15, 2024");
    }

    #[test]
    fn format_date_keeps_unparseable_input() {
        assert_eq!(format_date("Spring 2023"), "Spring 2023");
    }

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(display_name("journey"), "Journey");
        assert_eq!(display_name("side-quests"), "Side quests");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn empty_gallery_shows_empty_state() {
        let html = render_certificates_page(&[]).into_string();
        assert!(html.contains("No certificates found"));
        assert!(!html.contains("certificate-count"));
    }

    #[test]
    fn gallery_count_label() {
        let one = render_certificates_page(&[curated("/a.png", "A")]).into_string();
        assert!(one.contains("(1 certificate)"));

        let two = render_certificates_page(&[curated("/a.png", "A"), ContentRecord::bare("/b.png")])
            .into_string();
        assert!(two.contains("(2 certificates)"));
    }

    #[test]
    fn gallery_card_fallbacks() {
        let html = render_certificates_page(&[ContentRecord::bare("/b.png")]).into_string();
        assert!(html.contains(r#"alt="certificate""#));
        assert!(html.contains("<h3>Certificate</h3>"));
        assert!(!html.contains("<time"));
    }

    #[test]
    fn gallery_card_full_record() {
        let cert = ContentRecord {
            file: "/certificates/aws.png".into(),
            title: Some("AWS <Architect>".into()),
            issuer: Some("Amazon".into()),
            date: Some("2024-03-15".into()),
        };
        let html = render_certificates_page(&[cert]).into_string();
        assert!(html.contains("AWS &lt;Architect&gt;"));
        assert!(html.contains(r#"<p class="issuer">Amazon</p>"#));
        assert!(html.contains(r#"<time datetime="2024-03-15">March 15, 2024</time>"#));
    }

    #[test]
    fn missing_document_renders_placeholder() {
        let html = render_document_page("journey", None, "src/data/journey/journey.mdx").into_string();
        assert!(html.contains("<title>Journey</title>"));
        assert!(html.contains("Add `src/data/journey/journey.mdx`"));
    }

    #[test]
    fn document_page_uses_frontmatter() {
        let doc = parse_document(
            "---\ntitle: My Path\ndescription: How I got here\ndate: 2024-06-01\ntags: [rust, web]\nimage: /hero.png\n---\n# 2019\n",
        )
        .unwrap();
        let body = render_markup(&doc.content);
        let html = render_document_page("journey", Some((&doc, &body)), "unused").into_string();

        assert!(html.contains("<title>My Path</title>"));
        assert!(html.contains("How I got here"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains(r#"<span class="badge">rust</span>"#));
        assert!(html.contains(r#"src="/hero.png""#));
        assert!(html.contains(r#"<h1 class="mb-6 text-4xl font-bold">2019</h1>"#));
    }

    #[test]
    fn document_page_wires_copy_buttons() {
        let doc = parse_document("```rust\nfn main() {}\n```\n").unwrap();
        let body = render_markup(&doc.content);
        let html = render_document_page("journey", Some((&doc, &body)), "unused").into_string();

        assert!(html.contains("code-copy-button"));
        assert!(html.contains("navigator.clipboard.writeText(button.dataset.code"));

        let gallery = render_certificates_page(&[]).into_string();
        assert!(!gallery.contains("<script>"));
    }

    #[test]
    fn document_page_numeric_title() {
        let doc = parse_document("---\ntitle: 2024\n---\nBody\n").unwrap();
        let body = render_markup(&doc.content);
        let html = render_document_page("journey", Some((&doc, &body)), "unused").into_string();
        assert!(html.contains("<title>2024</title>"));
    }

    #[test]
    fn collect_certificates_merges_config_and_directory() {
        let site = site_fixture();
        let config = load_config(site.path()).unwrap();
        let certs = collect_certificates(site.path(), &config);

        assert_eq!(
            record_files(&certs),
            vec!["/certificates/aws.png", "/certificates/rust.webp"]
        );
        assert_eq!(certs[0].title.as_deref(), Some("AWS Solutions Architect"));
        assert_eq!(certs[1], ContentRecord::bare("/certificates/rust.webp"));
    }

    #[test]
    fn generate_writes_pages() {
        let site = site_fixture();
        let out = TempDir::new().unwrap();
        let config = load_config(site.path()).unwrap();

        let report = generate(site.path(), out.path(), &config).unwrap();

        assert_eq!(report.certificates.len(), 2);
        assert_eq!(report.curated_count, 1);
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].title.as_deref(), Some("Journey"));
        assert_eq!(report.documents[0].nodes, Some(3));

        assert!(out.path().join("style.css").exists());
        let gallery = fs::read_to_string(out.path().join("certificates/index.html")).unwrap();
        assert!(gallery.contains("AWS Solutions Architect"));
        let journey = fs::read_to_string(out.path().join("journey/index.html")).unwrap();
        assert!(journey.contains("First steps."));
        assert!(journey.contains("code-copy-button"));
    }

    #[test]
    fn generate_with_nothing_present() {
        let site = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = load_config(site.path()).unwrap();

        let report = generate(site.path(), out.path(), &config).unwrap();

        assert!(report.certificates.is_empty());
        assert_eq!(report.documents[0].nodes, None);
        let journey = fs::read_to_string(out.path().join("journey/index.html")).unwrap();
        assert!(journey.contains("No journey content found"));
    }
}
