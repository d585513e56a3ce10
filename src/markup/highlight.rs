//! Code block highlighting using syntect.

use super::node::{Node, text_content};
use maud::{Markup, PreEscaped, html};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    THEME_SET.get_or_init(ThemeSet::load_defaults)
}

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// A code block ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// Declared language, as written in the fence
    pub language: Option<String>,
    /// Inner HTML of the `<code>` element: styled spans, or escaped text when
    /// highlighting was not possible
    pub html: String,
    /// The block's original text, for the copy button
    pub copy_text: String,
    pub highlighted: bool,
}

impl HighlightedCode {
    pub fn markup(&self) -> Markup {
        PreEscaped(self.html.clone())
    }
}

/// Highlights code blocks with a fixed theme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: String,
}

impl Highlighter {
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
        }
    }

    /// Highlight a code block node. Other nodes are treated as plain text
    /// with no declared language.
    pub fn highlight_node(&self, node: &Node) -> HighlightedCode {
        match node {
            Node::CodeBlock { language, children } => {
                self.highlight(&text_content(children), language.as_deref())
            }
            other => self.highlight(&text_content(std::slice::from_ref(other)), None),
        }
    }

    /// Highlight `code` as `language`, falling back to escaped plain text.
    pub fn highlight(&self, code: &str, language: Option<&str>) -> HighlightedCode {
        let styled = language.and_then(|lang| {
            let syntax = find_syntax(lang)?;
            let theme = self.resolve_theme()?;
            match highlight_lines(code, syntax, theme) {
                Ok(html) => Some(html),
                Err(err) => {
                    tracing::debug!(language = lang, error = %err, "highlighting failed");
                    None
                }
            }
        });

        if styled.is_none() {
            tracing::debug!(language = ?language, "rendering code block unhighlighted");
        }

        let highlighted = styled.is_some();
        HighlightedCode {
            language: language.map(str::to_string),
            html: styled.unwrap_or_else(|| html! { (code) }.into_string()),
            copy_text: code.to_string(),
            highlighted,
        }
    }

    fn resolve_theme(&self) -> Option<&'static Theme> {
        let themes = &theme_set().themes;
        themes.get(&self.theme).or_else(|| {
            tracing::warn!(theme = %self.theme, "unknown highlight theme, using default");
            themes.get(DEFAULT_THEME)
        })
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

/// Fence languages the bundled syntax set lacks, mapped to the closest
/// grammar it has. TypeScript is a superset of JavaScript, so the JavaScript
/// grammar highlights it reasonably.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("ts", "js"),
    ("tsx", "js"),
    ("mts", "js"),
    ("cts", "js"),
    ("typescript", "js"),
    ("jsx", "js"),
];

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let ss = syntax_set();
    ss.find_syntax_by_token(lang)
        .or_else(|| ss.find_syntax_by_extension(lang))
        .or_else(|| {
            let (_, alias) = LANGUAGE_ALIASES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(lang))?;
            ss.find_syntax_by_token(alias)
        })
}

fn highlight_lines(
    code: &str,
    syntax: &SyntaxReference,
    theme: &Theme,
) -> Result<String, syntect::Error> {
    let ss = syntax_set();
    let mut lines = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        let regions = lines.highlight_line(line, ss)?;
        out.push_str(&styled_line_to_highlighted_html(
            &regions[..],
            IncludeBackground::No,
        )?);
    }
    Ok(out)
}

/// Theme names bundled with the highlighter.
pub fn available_themes() -> Vec<&'static str> {
    theme_set().themes.keys().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "const x = 1;\nconsole.log(x);";

    #[test]
    fn copy_text_reconstructed_across_chunks() {
        let node = Node::CodeBlock {
            language: Some("js".into()),
            children: vec![
                Node::Text("const x".into()),
                Node::Text(" = 1;\n".into()),
                Node::Element {
                    tag: "span",
                    attrs: Vec::new(),
                    children: vec![Node::Text("console.log(x);".into())],
                },
            ],
        };

        let code = Highlighter::default().highlight_node(&node);
        assert_eq!(code.copy_text, SOURCE);
    }

    #[test]
    fn copy_text_same_for_any_split() {
        let highlighter = Highlighter::default();
        for split in 0..SOURCE.len() {
            let node = Node::CodeBlock {
                language: Some("js".into()),
                children: vec![
                    Node::Text(SOURCE[..split].into()),
                    Node::Text(SOURCE[split..].into()),
                ],
            };
            assert_eq!(highlighter.highlight_node(&node).copy_text, SOURCE);
        }
    }

    #[test]
    fn known_language_is_highlighted() {
        let code = Highlighter::default().highlight("fn main() {}\n", Some("rust"));
        assert!(code.highlighted);
        assert!(code.html.contains("<span"));
        assert_eq!(code.language.as_deref(), Some("rust"));
    }

    #[test]
    fn typescript_fences_are_highlighted() {
        let highlighter = Highlighter::default();
        for lang in ["ts", "tsx", "typescript", "TS"] {
            let code = highlighter.highlight("const x: number = 1;\n", Some(lang));
            assert!(code.highlighted, "{lang} should be highlighted");
            assert!(code.html.contains("<span"));
            assert_eq!(code.language.as_deref(), Some(lang));
        }
    }

    #[test]
    fn unknown_language_falls_back_to_escaped_text() {
        let code = Highlighter::default().highlight("a < b && c", Some("no-such-lang"));
        assert!(!code.highlighted);
        assert_eq!(code.html, "a &lt; b &amp;&amp; c");
        assert_eq!(code.copy_text, "a < b && c");
    }

    #[test]
    fn no_language_is_plain() {
        let code = Highlighter::default().highlight("plain", None);
        assert!(!code.highlighted);
        assert_eq!(code.html, "plain");
    }

    #[test]
    fn unknown_theme_uses_default() {
        let code = Highlighter::new("not-a-theme").highlight("let x = 1;\n", Some("rs"));
        assert!(code.highlighted);
    }

    #[test]
    fn default_theme_is_bundled() {
        assert!(available_themes().contains(&DEFAULT_THEME));
    }
}
