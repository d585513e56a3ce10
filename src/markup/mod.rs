//! Markup rendering pipeline.
//!
//! ```text
//! body text ──parse──▶ node tree ──walk──▶ RenderedDocument
//!                                   │
//!                                   ├─ NodeOverrides   (rule per node kind)
//!                                   └─ Highlighter     (code blocks only)
//! ```
//!
//! The walk is depth-first: a container's children are rendered, in order,
//! before its own rule runs. Code blocks are the one exception to "render
//! the children": their text is reassembled and handed to the highlighter
//! instead. Nothing is dropped or reordered, and the same body always renders
//! to the same output.

pub mod highlight;
pub mod node;
pub mod overrides;

use maud::{Markup, PreEscaped, Render};

pub use highlight::{HighlightedCode, Highlighter};
pub use node::{Node, NodeKind, parse, text_content};
pub use overrides::{NodeOverrides, RuleInput};

/// Rendered output of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub kind: NodeKind,
    pub html: String,
}

impl RenderedNode {
    pub fn new(kind: NodeKind, markup: Markup) -> Self {
        Self {
            kind,
            html: markup.into_string(),
        }
    }
}

impl Render for RenderedNode {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.html);
    }
}

/// Rendered top-level nodes of a document, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub nodes: Vec<RenderedNode>,
}

impl RenderedDocument {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_string(self) -> String {
        self.render().into_string()
    }
}

impl Render for RenderedDocument {
    fn render_to(&self, buffer: &mut String) {
        for node in &self.nodes {
            node.render_to(buffer);
        }
    }
}

/// Parses and renders document bodies.
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    overrides: NodeOverrides,
    highlighter: Highlighter,
}

impl MarkupRenderer {
    pub fn new(overrides: NodeOverrides, highlighter: Highlighter) -> Self {
        Self {
            overrides,
            highlighter,
        }
    }

    /// Parse and render a markup body.
    pub fn render_markup(&self, markup: &str) -> RenderedDocument {
        self.render_tree(&parse(markup))
    }

    /// Render an already-parsed tree.
    pub fn render_tree(&self, nodes: &[Node]) -> RenderedDocument {
        RenderedDocument {
            nodes: nodes.iter().map(|node| self.render_node(node)).collect(),
        }
    }

    fn render_node(&self, node: &Node) -> RenderedNode {
        let input = match node {
            Node::CodeBlock { .. } => RuleInput::Code(self.highlighter.highlight_node(node)),
            node => match node.leaf_text() {
                Some(text) => RuleInput::Text(text),
                None if node.children().is_empty() && !is_container(node) => RuleInput::Empty,
                None => RuleInput::Children(
                    node.children()
                        .iter()
                        .map(|child| self.render_node(child))
                        .collect(),
                ),
            },
        };
        self.overrides.render(node, input)
    }
}

/// Nodes that wrap children even when they happen to have none.
fn is_container(node: &Node) -> bool {
    match node {
        Node::Image { .. } => false,
        Node::Element { tag, .. } => !matches!(*tag, "br" | "hr" | "input"),
        _ => true,
    }
}

/// Convenience wrapper: render `markup` with default rules and theme.
pub fn render_markup(markup: &str) -> RenderedDocument {
    MarkupRenderer::default().render_markup(markup)
}

/// Splice a rendered document into a maud template.
pub fn to_markup(doc: &RenderedDocument) -> Markup {
    PreEscaped(doc.render().into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "# Journey\n\nStarted with `python`.\n\n> Keep going\n\n- one\n- two\n\n```js\nconst x = 1;\nconsole.log(x);\n```\n\n![Me](/me.png)\n";

    fn kinds(doc: &RenderedDocument) -> Vec<NodeKind> {
        doc.nodes.iter().map(|n| n.kind).collect()
    }

    #[test]
    fn top_level_order_preserved() {
        let doc = render_markup(BODY);
        assert_eq!(
            kinds(&doc),
            vec![
                NodeKind::Heading1,
                NodeKind::Paragraph,
                NodeKind::Blockquote,
                NodeKind::UnorderedList,
                NodeKind::CodeBlock,
                NodeKind::Paragraph,
            ]
        );
    }

    #[test]
    fn render_is_idempotent() {
        let renderer = MarkupRenderer::default();
        assert_eq!(renderer.render_markup(BODY), renderer.render_markup(BODY));
    }

    #[test]
    fn children_rendered_inside_parent() {
        let doc = render_markup("Started with `python`.\n");
        assert_eq!(
            doc.nodes[0].html,
            r#"<p class="text-muted-foreground mb-4 leading-7">Started with <code class="rounded px-2 py-1 font-mono text-sm">python</code>.</p>"#
        );
    }

    #[test]
    fn list_items_in_order() {
        let doc = render_markup("- one\n- two\n- three\n");
        let html = &doc.nodes[0].html;
        let one = html.find("one").unwrap();
        let two = html.find("two").unwrap();
        let three = html.find("three").unwrap();
        assert!(one < two && two < three);
        assert_eq!(html.matches("<li ").count(), 3);
    }

    #[test]
    fn code_block_copy_text_is_exact() {
        let doc = render_markup("```js\nconst x = 1;\nconsole.log(x);\n```\n");
        assert!(doc.nodes[0].html.contains("data-code=\"const x = 1;\nconsole.log(x);\n\""));
    }

    #[test]
    fn typescript_block_rendered_highlighted() {
        let doc = render_markup("```ts\nconst x: number = 1;\n```\n");
        let html = &doc.nodes[0].html;
        assert!(html.contains(r#"<code class="language-ts"><span"#));
        assert!(html.contains("data-code=\"const x: number = 1;\n\""));
    }

    #[test]
    fn unknown_language_block_is_kept() {
        let doc = render_markup("```klingon\nqapla'\n```\n");
        assert_eq!(doc.nodes.len(), 1);
        assert!(doc.nodes[0].html.contains("qapla"));
    }

    #[test]
    fn generic_kinds_use_default_rule() {
        let doc = render_markup("Some *emphasis* and [a link](https://example.com).\n\n---\n");
        assert!(doc.nodes[0].html.contains("<em>emphasis</em>"));
        assert!(doc.nodes[0].html.contains(r#"<a href="https://example.com">a link</a>"#));
        assert_eq!(doc.nodes[1].html, "<hr>");
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert!(render_markup("").is_empty());
    }

    #[test]
    fn document_concatenates_nodes() {
        let doc = render_markup("# A\n\nB\n");
        let joined: String = doc.nodes.iter().map(|n| n.html.as_str()).collect();
        assert_eq!(doc.into_string(), joined);
    }
}
