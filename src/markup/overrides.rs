//! Per-kind rendering rules.
//!
//! Each [`NodeKind`] with a dedicated rule gets the site's typography classes;
//! every other kind goes through the default rule, which emits the element's
//! natural HTML. Rules only read their input.
//!
//! | Kind | Output |
//! |------|--------|
//! | Heading 1–3 | `h1`–`h3` with size/spacing classes |
//! | Paragraph, list item | muted text, relaxed leading |
//! | Lists | `ul` disc / `ol` decimal, indented |
//! | Blockquote | left border, italic |
//! | Image | fixed intrinsic size, rounded |
//! | Inline code | pill styling, unless it belongs to a highlighted block |
//! | Code block | `pre` + copy button |

use super::RenderedNode;
use super::highlight::HighlightedCode;
use super::node::{Node, NodeKind};
use maud::{Markup, PreEscaped, Render, html};

/// What a rule gets to work with.
#[derive(Debug)]
pub enum RuleInput<'a> {
    /// Rendered children of a container node
    Children(Vec<RenderedNode>),
    /// Raw text of a leaf node
    Text(&'a str),
    /// Highlighted contents of a code block
    Code(HighlightedCode),
    /// Leaf without text (images, void elements)
    Empty,
}

/// Class marking a code element as the body of a highlighted block.
const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// The fixed override table.
#[derive(Debug, Clone)]
pub struct NodeOverrides {
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for NodeOverrides {
    fn default() -> Self {
        Self {
            image_width: 800,
            image_height: 400,
        }
    }
}

impl NodeOverrides {
    /// Whether `kind` has a dedicated rule (as opposed to the default rule).
    pub fn overrides(kind: NodeKind) -> bool {
        !matches!(kind, NodeKind::Text | NodeKind::Generic)
    }

    /// Render `node` from its prepared input.
    pub fn render(&self, node: &Node, input: RuleInput<'_>) -> RenderedNode {
        let kind = node.kind();
        let markup = match (node, input) {
            (Node::Heading { level, .. }, RuleInput::Children(children)) => {
                heading(*level, &children)
            }
            (Node::Paragraph(_), RuleInput::Children(children)) => html! {
                p class="text-muted-foreground mb-4 leading-7" { @for c in &children { (c) } }
            },
            (Node::List { start: None, .. }, RuleInput::Children(children)) => html! {
                ul class="mb-4 ml-6 list-disc space-y-2" { @for c in &children { (c) } }
            },
            (Node::List { start: Some(start), .. }, RuleInput::Children(children)) => {
                let start = (*start != 1).then_some(*start);
                html! {
                    ol class="mb-4 ml-6 list-decimal space-y-2" start=[start] {
                        @for c in &children { (c) }
                    }
                }
            }
            (Node::ListItem(_), RuleInput::Children(children)) => html! {
                li class="text-muted-foreground leading-7" { @for c in &children { (c) } }
            },
            (Node::Blockquote(_), RuleInput::Children(children)) => html! {
                blockquote class="border-primary text-muted-foreground mb-4 border-l-4 pl-4 italic" {
                    @for c in &children { (c) }
                }
            },
            (Node::Image { src, alt, title }, _) => html! {
                img src=(src) alt=(alt) title=[title.as_deref()]
                    width=(self.image_width) height=(self.image_height) class="rounded-lg";
            },
            (Node::InlineCode(_), RuleInput::Text(text)) => code_element(None, html! { (text) }),
            (Node::CodeBlock { .. }, RuleInput::Code(code)) => code_block(&code),
            (node, input) => default_rule(node, input),
        };
        RenderedNode::new(kind, markup)
    }
}

fn heading(level: u8, children: &[RenderedNode]) -> Markup {
    match level {
        1 => html! { h1 class="mb-6 text-4xl font-bold" { @for c in children { (c) } } },
        2 => html! { h2 class="mt-8 mb-4 text-3xl font-semibold" { @for c in children { (c) } } },
        _ => html! { h3 class="mt-6 mb-3 text-2xl font-medium" { @for c in children { (c) } } },
    }
}

/// A `code` element. Spans marked with a `language-*` class are the body of
/// a highlighted block and keep only that class; anything else gets the
/// inline pill styling.
pub fn code_element(class: Option<&str>, body: Markup) -> Markup {
    match class {
        Some(class) if class.contains(LANGUAGE_CLASS_PREFIX) => html! {
            code class=(class) { (body) }
        },
        _ => html! {
            code class="rounded px-2 py-1 font-mono text-sm" { (body) }
        },
    }
}

fn code_block(code: &HighlightedCode) -> Markup {
    let class = code
        .language
        .as_deref()
        .map(|lang| format!("{LANGUAGE_CLASS_PREFIX}{lang}"));
    html! {
        div class="group relative mb-4" {
            pre class="bg-muted/30 overflow-x-auto rounded-lg border p-4 text-sm [&>code]:bg-transparent [&>code]:p-0" {
                (code_element(class.as_deref(), code.markup()))
            }
            button class="code-copy-button" type="button" aria-label="Copy code" data-code=(code.copy_text) {
                "Copy"
            }
        }
    }
}

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// Natural HTML for any node, used for kinds without a dedicated rule.
fn default_rule(node: &Node, input: RuleInput<'_>) -> Markup {
    let inner = match input {
        RuleInput::Children(children) => html! { @for c in &children { (c) } },
        RuleInput::Text(text) => html! { (text) },
        RuleInput::Code(code) => code.markup(),
        RuleInput::Empty => PreEscaped(String::new()),
    };

    match node {
        Node::Text(_) => inner,
        Node::Html(raw) => PreEscaped(raw.clone()),
        Node::Element { tag, attrs, .. } => raw_element(tag, attrs, &inner),
        Node::Heading { level, .. } => match level {
            1 => html! { h1 { (inner) } },
            2 => html! { h2 { (inner) } },
            _ => html! { h3 { (inner) } },
        },
        Node::Paragraph(_) => html! { p { (inner) } },
        Node::List { start: None, .. } => html! { ul { (inner) } },
        Node::List { start: Some(start), .. } => html! { ol start=(start) { (inner) } },
        Node::ListItem(_) => html! { li { (inner) } },
        Node::Blockquote(_) => html! { blockquote { (inner) } },
        Node::Image { src, alt, title } => html! {
            img src=(src) alt=(alt) title=[title.as_deref()];
        },
        Node::InlineCode(_) => html! { code { (inner) } },
        Node::CodeBlock { language, .. } => html! {
            pre { code class=[language.as_deref().map(|l| format!("{LANGUAGE_CLASS_PREFIX}{l}"))] { (inner) } }
        },
    }
}

/// Element with a tag only known at runtime. Tags come from the closed set
/// the tree builder emits; attribute values are escaped.
fn raw_element(tag: &str, attrs: &[(&'static str, String)], inner: &Markup) -> Markup {
    let mut out = String::new();
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            value.as_str().render_to(&mut out);
            out.push('"');
        }
    }
    out.push('>');
    if !VOID_ELEMENTS.contains(&tag) {
        out.push_str(&inner.0);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    PreEscaped(out)
}
