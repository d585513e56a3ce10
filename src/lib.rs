//! # Folio
//!
//! The content core of a personal portfolio site. Two jobs:
//!
//! 1. **Certificates**: reconcile a curated, hand-authored list of records
//!    with the image files actually sitting in the certificates directory,
//!    producing one deduplicated, order-stable collection.
//! 2. **Documents**: load a long-form document (YAML front matter + markup
//!    body), parse the body into a node tree and render every node through a
//!    fixed per-kind rule table, with syntax highlighting and a copy button
//!    for code blocks.
//!
//! # Architecture
//!
//! ```text
//! config.toml ──▶ curated ─┐
//!                          ├─ merge ──▶ certificates gallery
//! public/certificates ─▶ scan
//!
//! src/data/journey/*.mdx ──▶ document ──▶ markup ──▶ document pages
//!                                          ├─ overrides (per-kind rules)
//!                                          └─ highlight (code blocks)
//! ```
//!
//! Every stage is a pure function of its inputs: nothing is cached between
//! builds and nothing is persisted apart from the generated pages. Missing
//! inputs degrade to empty results; only a broken `config.toml` stops a build.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists the certificates directory, keeps image files, emits bare records |
//! | [`merge`] | Curated-over-discovered merge keyed on `file`, order-stable |
//! | [`document`] | Front matter splitting and the named-document store |
//! | [`markup`] | Node tree, per-kind render rules, syntax highlighting |
//! | [`generate`] | Gallery and document pages rendered with Maud |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`types`] | `ContentRecord`, shared by config, scan, merge and output |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Curated Wins, Wholesale
//!
//! When a curated record and a discovered file share a path, the curated
//! record is kept exactly as written. Fields are never blended: a curated
//! entry with no issuer does not pick one up from anywhere else. Discovered
//! records carry nothing but their path, so there is nothing to blend anyway.
//!
//! ## Closed Node Kinds
//!
//! The renderer is not a template engine. Headings 1-3, paragraphs, lists,
//! blockquotes, images, and inline and block code have rules; everything else
//! (emphasis, links, tables, deeper headings) goes through one default rule
//! that emits plain HTML.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error, interpolation is escaped by default, and there is no
//! template directory to ship.

pub mod config;
pub mod document;
pub mod generate;
pub mod markup;
pub mod merge;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
