//! Node tree built from the `pulldown-cmark` event stream.
//!
//! The parser emits a flat stream of start/end events; this module folds it
//! into an owned tree so rendering can be a plain recursive walk. The set of
//! node kinds is closed: anything without a dedicated variant becomes a generic
//! [`Node::Element`] carrying its natural HTML tag.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

/// A parsed markup node. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Heading level 1 to 3. Deeper levels are generic elements.
    Heading { level: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    /// `start` is `Some` for ordered lists
    List {
        start: Option<u64>,
        children: Vec<Node>,
    },
    ListItem(Vec<Node>),
    Blockquote(Vec<Node>),
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    InlineCode(String),
    /// Fenced or indented code block; children are the text chunks the
    /// parser split the block into.
    CodeBlock {
        language: Option<String>,
        children: Vec<Node>,
    },
    Text(String),
    /// Raw HTML passed through from the source.
    Html(String),
    /// Any other element: emphasis, links, tables, rules, breaks...
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
        children: Vec<Node>,
    },
}

/// Discriminant of a [`Node`], used as the key of the override table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Blockquote,
    Image,
    InlineCode,
    CodeBlock,
    Text,
    Generic,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Heading { level: 1, .. } => NodeKind::Heading1,
            Node::Heading { level: 2, .. } => NodeKind::Heading2,
            Node::Heading { .. } => NodeKind::Heading3,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::List { start: None, .. } => NodeKind::UnorderedList,
            Node::List { start: Some(_), .. } => NodeKind::OrderedList,
            Node::ListItem(_) => NodeKind::ListItem,
            Node::Blockquote(_) => NodeKind::Blockquote,
            Node::Image { .. } => NodeKind::Image,
            Node::InlineCode(_) => NodeKind::InlineCode,
            Node::CodeBlock { .. } => NodeKind::CodeBlock,
            Node::Text(_) => NodeKind::Text,
            Node::Html(_) | Node::Element { .. } => NodeKind::Generic,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::CodeBlock { children, .. }
            | Node::Element { children, .. } => children,
            Node::Paragraph(children) | Node::ListItem(children) | Node::Blockquote(children) => {
                children
            }
            Node::Image { .. } | Node::InlineCode(_) | Node::Text(_) | Node::Html(_) => &[],
        }
    }

    /// Leaf text, if this node is a leaf carrying text.
    pub fn leaf_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) | Node::InlineCode(text) | Node::Html(text) => Some(text),
            _ => None,
        }
    }
}

/// Concatenate all descendant text of `nodes` in document order.
///
/// No separators are inserted and whitespace is untouched, so a code block's
/// text comes back exactly as written however the parser chunked it.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    push_text(nodes, &mut out);
    out
}

fn push_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Image { alt, .. } => out.push_str(alt),
            node => match node.leaf_text() {
                Some(text) => out.push_str(text),
                None => push_text(node.children(), out),
            },
        }
    }
}

/// Markdown extensions enabled for documents.
pub fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Parse a markup body into its top-level nodes.
pub fn parse(markup: &str) -> Vec<Node> {
    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(markup, parser_options()) {
        builder.push(event);
    }
    builder.finish()
}

/// Element under construction: what to build once its end event arrives.
enum Open {
    Heading(HeadingLevel),
    Paragraph,
    List(Option<u64>),
    Item,
    Blockquote,
    CodeBlock(Option<String>),
    HtmlBlock,
    Image { src: String, title: String },
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, String)>,
    },
    /// Contents are kept, the wrapper is dropped.
    Transparent,
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<(Open, Vec<Node>)>,
}

impl TreeBuilder {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some((_, children)) => children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => {
                let open = open_for(tag);
                self.stack.push((open, Vec::new()));
            }
            Event::End(_) => {
                if let Some((open, children)) = self.stack.pop() {
                    let nodes = close(open, children);
                    self.current().extend(nodes);
                }
            }
            Event::Text(text) => self.current().push(Node::Text(text.into_string())),
            Event::Code(code) => self.current().push(Node::InlineCode(code.into_string())),
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.current().push(Node::Text(math.into_string()))
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.current().push(Node::Html(html.into_string()))
            }
            Event::FootnoteReference(label) => {
                let label = label.into_string();
                self.current().push(Node::Element {
                    tag: "sup",
                    attrs: vec![("class", "footnote-reference".to_string())],
                    children: vec![Node::Element {
                        tag: "a",
                        attrs: vec![("href", format!("#{label}"))],
                        children: vec![Node::Text(label)],
                    }],
                });
            }
            Event::SoftBreak => self.current().push(Node::Text("\n".to_string())),
            Event::HardBreak => self.current().push(void("br", Vec::new())),
            Event::Rule => self.current().push(void("hr", Vec::new())),
            Event::TaskListMarker(checked) => {
                let mut attrs = vec![("type", "checkbox".to_string()), ("disabled", String::new())];
                if checked {
                    attrs.push(("checked", String::new()));
                }
                self.current().push(void("input", attrs));
            }
        }
    }

    /// Close anything left open (only possible on a malformed stream).
    fn finish(mut self) -> Vec<Node> {
        while let Some((open, children)) = self.stack.pop() {
            let nodes = close(open, children);
            self.current().extend(nodes);
        }
        self.root
    }
}

fn void(tag: &'static str, attrs: Vec<(&'static str, String)>) -> Node {
    Node::Element {
        tag,
        attrs,
        children: Vec::new(),
    }
}

fn element(tag: &'static str) -> Open {
    Open::Element {
        tag,
        attrs: Vec::new(),
    }
}

fn open_for(tag: Tag<'_>) -> Open {
    match tag {
        Tag::Paragraph => Open::Paragraph,
        Tag::Heading { level, .. } => Open::Heading(level),
        Tag::BlockQuote(_) => Open::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            // Info strings like "rust,ignore" or "js title=x" declare the
            // language in their first word.
            let language = info
                .split(|c: char| c.is_whitespace() || c == ',')
                .next()
                .filter(|lang| !lang.is_empty())
                .map(str::to_string);
            Open::CodeBlock(language)
        }
        Tag::CodeBlock(CodeBlockKind::Indented) => Open::CodeBlock(None),
        Tag::HtmlBlock => Open::HtmlBlock,
        Tag::List(start) => Open::List(start),
        Tag::Item => Open::Item,
        Tag::FootnoteDefinition(label) => Open::Element {
            tag: "div",
            attrs: vec![
                ("class", "footnote-definition".to_string()),
                ("id", label.into_string()),
            ],
        },
        Tag::Table(_) => element("table"),
        Tag::TableHead => element("thead"),
        Tag::TableRow => element("tr"),
        Tag::TableCell => element("td"),
        Tag::Emphasis => element("em"),
        Tag::Strong => element("strong"),
        Tag::Strikethrough => element("del"),
        Tag::Superscript => element("sup"),
        Tag::Subscript => element("sub"),
        Tag::DefinitionList => element("dl"),
        Tag::DefinitionListTitle => element("dt"),
        Tag::DefinitionListDefinition => element("dd"),
        Tag::Link {
            dest_url, title, ..
        } => {
            let mut attrs = vec![("href", dest_url.into_string())];
            if !title.is_empty() {
                attrs.push(("title", title.into_string()));
            }
            Open::Element { tag: "a", attrs }
        }
        Tag::Image {
            dest_url, title, ..
        } => Open::Image {
            src: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::MetadataBlock(_) => Open::Transparent,
    }
}

fn close(open: Open, children: Vec<Node>) -> Vec<Node> {
    let node = match open {
        Open::Heading(level) => match level {
            HeadingLevel::H1 => Node::Heading { level: 1, children },
            HeadingLevel::H2 => Node::Heading { level: 2, children },
            HeadingLevel::H3 => Node::Heading { level: 3, children },
            HeadingLevel::H4 => generic("h4", children),
            HeadingLevel::H5 => generic("h5", children),
            HeadingLevel::H6 => generic("h6", children),
        },
        Open::Paragraph => Node::Paragraph(children),
        Open::List(start) => Node::List { start, children },
        Open::Item => Node::ListItem(children),
        Open::Blockquote => Node::Blockquote(children),
        Open::CodeBlock(language) => Node::CodeBlock { language, children },
        Open::HtmlBlock => Node::Html(text_content(&children)),
        Open::Image { src, title } => Node::Image {
            src,
            alt: text_content(&children),
            title: (!title.is_empty()).then_some(title),
        },
        Open::Element { tag: "thead", attrs } => Node::Element {
            tag: "thead",
            attrs,
            children: vec![generic("tr", header_cells(children))],
        },
        Open::Element { tag, attrs } => Node::Element {
            tag,
            attrs,
            children,
        },
        Open::Transparent => return children,
    };
    vec![node]
}

fn generic(tag: &'static str, children: Vec<Node>) -> Node {
    Node::Element {
        tag,
        attrs: Vec::new(),
        children,
    }
}

/// Cells of a table head row render as `th`.
fn header_cells(cells: Vec<Node>) -> Vec<Node> {
    cells
        .into_iter()
        .map(|cell| match cell {
            Node::Element {
                tag: "td",
                attrs,
                children,
            } => Node::Element {
                tag: "th",
                attrs,
                children,
            },
            other => other,
        })
        .collect()
}
