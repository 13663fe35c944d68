//! Markup helpers: tag stripping, attribute escaping, and a flat walk over
//! the text nodes of an HTML fragment.
//!
//! The walker is deliberately not a parser. It splits a fragment into tags
//! and text, keeps a stack of open element names, and hands each text node
//! to a callback together with that stack. Everything it does not rewrite is
//! emitted byte-for-byte.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::defaults::EXCLUDED_TAGS;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));
static UNTERMINATED_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*$").expect("static regex"));
// A tag ends at the first `>` outside a quoted attribute value.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<[A-Za-z/!?][^>"']*(?:"[^"]*"[^>"']*|'[^']*'[^>"']*)*>"#)
        .expect("static regex")
});
static OPEN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*([A-Za-z][A-Za-z0-9:-]*)").expect("static regex"));
static CLOSE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*/\s*([A-Za-z][A-Za-z0-9:-]*)").expect("static regex"));

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose content is raw text up to the matching closing tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

/// Remove markup from a candidate term.
///
/// Complete tags are dropped, an unterminated trailing tag is dropped, and any
/// stray angle bracket left behind is removed.
pub fn strip_tags(input: &str) -> String {
    let without_tags = TAG.replace_all(input, "");
    let without_open = UNTERMINATED_TAG.replace_all(&without_tags, "");
    without_open.replace(['<', '>'], "")
}

/// Escape a value for use inside a double-quoted attribute.
///
/// `'` is left as is; an entity such as `&#39;` would give later hashtag
/// patterns something to match.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// STRUCTURAL CONTEXT
// =============================================================================

/// Stack of element names enclosing the current position in a content tree.
///
/// Names are stored lowercase. Independent of any tree representation: a
/// DOM walker, a token stream, or a test can drive it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralContext {
    stack: Vec<String>,
}

impl StructuralContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from outermost to innermost element names.
    pub fn from_path(names: &[&str]) -> Self {
        Self {
            stack: names.iter().map(|n| n.to_ascii_lowercase()).collect(),
        }
    }

    pub fn push(&mut self, name: &str) {
        self.stack.push(name.to_ascii_lowercase());
    }

    /// Close the innermost open element called `name`, and anything opened
    /// inside it. A closing tag with no matching open element is ignored.
    pub fn pop(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(pos) = self.stack.iter().rposition(|open| *open == name) {
            self.stack.truncate(pos);
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(String::as_str)
    }
}

/// Set of element names whose descendant text must not be rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    tags: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// True when any ancestor in `context` is excluded.
    pub fn excludes(&self, context: &StructuralContext) -> bool {
        context.ancestors().any(|name| self.tags.contains(name))
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(EXCLUDED_TAGS.iter())
    }
}

// =============================================================================
// FRAGMENT WALK
// =============================================================================

/// Walk every text node of `html`, replacing those for which `rewrite`
/// returns `Some`.
///
/// Tags, comments and untouched text are copied through unchanged. Content of
/// raw-text elements (`script`, `style`, `textarea`) is passed as a single
/// text node with the element on the context stack.
pub fn rewrite_text_nodes<F>(html: &str, mut rewrite: F) -> String
where
    F: FnMut(&str, &StructuralContext) -> Option<String>,
{
    let mut out = String::with_capacity(html.len());
    let mut context = StructuralContext::new();
    let mut cursor = 0;

    let mut emit_text = |text: &str, context: &StructuralContext, out: &mut String| {
        if text.is_empty() {
            return;
        }
        match rewrite(text, context) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(text),
        }
    };

    while let Some(found) = TOKEN.find_at(html, cursor) {
        emit_text(&html[cursor..found.start()], &context, &mut out);
        let raw = found.as_str();
        out.push_str(raw);
        cursor = found.end();

        if raw.starts_with("<!") || raw.starts_with("<?") {
            continue;
        }
        if let Some(caps) = CLOSE_NAME.captures(raw) {
            context.pop(&caps[1]);
            continue;
        }
        let Some(caps) = OPEN_NAME.captures(raw) else {
            continue;
        };
        let name = caps[1].to_ascii_lowercase();
        if raw.ends_with("/>") || VOID_ELEMENTS.contains(&name.as_str()) {
            continue;
        }
        context.push(&name);

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            let closing = format!("</{}", name);
            let body_end = find_ascii_case_insensitive(&html[cursor..], &closing)
                .map(|i| cursor + i)
                .unwrap_or(html.len());
            emit_text(&html[cursor..body_end], &context, &mut out);
            cursor = body_end;
        }
    }
    emit_text(&html[cursor..], &context, &mut out);
    out
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
