//! In-place linking of term occurrences inside rendered text.
//!
//! Each pattern of a public taxonomy is applied in declared order to the
//! current text, so a later pattern scans the anchors produced by earlier
//! ones. Pattern order is therefore significant: an earlier substitution can
//! hide a later match or produce a new one.

use regex::Captures;
use tracing::trace;

use crate::defaults::TERM_GROUP;
use crate::extraction::normalize_term;
use crate::markup::{escape_attribute, rewrite_text_nodes, ExclusionSet, StructuralContext};
use crate::taxonomy::{Taxonomy, TermPattern};

/// Rewrite one text node for `taxonomy`.
///
/// `text` is HTML source text, entities still encoded, as found between two
/// tags. Link text is copied into the anchor verbatim, so a decoded text node
/// must be re-escaped by the caller before it is passed in.
///
/// Returns `None` when nothing changed, including when the taxonomy is not
/// public (no pattern is evaluated in that case).
pub fn rewrite_text(taxonomy: &Taxonomy, text: &str) -> Option<String> {
    if !taxonomy.is_public() {
        return None;
    }
    let mut current = text.to_string();
    for pattern in taxonomy.patterns() {
        let replaced = pattern
            .regex
            .replace_all(&current, |caps: &Captures| link_match(taxonomy, pattern, caps));
        if let std::borrow::Cow::Owned(next) = replaced {
            current = next;
        }
    }
    if current == text {
        None
    } else {
        trace!(
            subsystem = "core",
            component = "rewriter",
            taxonomy = taxonomy.name(),
            "Rewrote text node"
        );
        Some(current)
    }
}

/// Rewrite one text node unless its ancestor chain holds an excluded tag.
///
/// Takes HTML source text, as [`rewrite_text`] does.
pub fn rewrite_node(
    taxonomy: &Taxonomy,
    text: &str,
    context: &StructuralContext,
    exclusions: &ExclusionSet,
) -> Option<String> {
    if !taxonomy.is_public() || exclusions.excludes(context) {
        return None;
    }
    rewrite_text(taxonomy, text)
}

/// Rewrite every text node of an HTML fragment for each taxonomy in turn.
pub fn rewrite_fragment(taxonomies: &[&Taxonomy], exclusions: &ExclusionSet, html: &str) -> String {
    if !taxonomies.iter().any(|t| t.is_public()) {
        return html.to_string();
    }
    rewrite_text_nodes(html, |text, context| {
        if exclusions.excludes(context) {
            return None;
        }
        let mut current: Option<String> = None;
        for taxonomy in taxonomies {
            let input = current.as_deref().unwrap_or(text);
            if let Some(next) = rewrite_text(taxonomy, input) {
                current = Some(next);
            }
        }
        current
    })
}

fn link_match(taxonomy: &Taxonomy, pattern: &TermPattern, caps: &Captures) -> String {
    let full = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
    let Some(raw_term) = caps.name(TERM_GROUP).map(|m| m.as_str()) else {
        return full.to_string();
    };
    let Some(term) = normalize_term(raw_term) else {
        return full.to_string();
    };
    let visible = if pattern.keep { full } else { raw_term };
    format!(
        "<a href=\"{}\" data-{}=\"{}\">{}</a>",
        escape_attribute(&taxonomy.term_url(&term, 1)),
        data_attribute_name(taxonomy.name()),
        escape_attribute(&term),
        visible
    )
}

/// Taxonomy name made safe for a `data-*` attribute name.
fn data_attribute_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}
