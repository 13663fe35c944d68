//! Term extraction for one content item under one taxonomy.
//!
//! Terms come from two places: the item's explicit metadata for the taxonomy
//! and every match of the taxonomy's patterns against the rendered content.
//!
//! # Rules
//!
//! 1. Patterns are applied in declared order over the full rendered text
//! 2. Every match contributes its `name` capture
//! 3. Candidates have markup stripped, are trimmed and lowercased
//! 4. Empty candidates are dropped
//! 5. Duplicates are removed
//! 6. A taxonomy without patterns yields exactly its explicit terms

use std::collections::BTreeSet;

use crate::defaults::TERM_GROUP;
use crate::markup::strip_tags;
use crate::models::ContentSource;
use crate::taxonomy::Taxonomy;

/// Normalize a candidate term: strip markup, trim, lowercase.
///
/// Returns `None` when nothing is left.
pub fn normalize_term(raw: &str) -> Option<String> {
    let stripped = strip_tags(raw);
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Extract the normalized term set from explicit terms and content.
///
/// # Examples
///
/// ```
/// use taxon_core::config::TaxonomyConfig;
/// use taxon_core::extraction::extract_terms;
/// use taxon_core::taxonomy::Taxonomy;
///
/// let config = TaxonomyConfig::new("tags").pattern("hashtag", r"#(?P<name>\w+)", true);
/// let tags = Taxonomy::activate(&config, "/~taxonomy").unwrap();
///
/// let terms = extract_terms(&tags, &["Explicit".to_string()], "a #Test with #test");
/// assert!(terms.contains("explicit"));
/// assert!(terms.contains("test"));
/// assert_eq!(terms.len(), 2);
/// ```
pub fn extract_terms(taxonomy: &Taxonomy, explicit: &[String], content: &str) -> BTreeSet<String> {
    let mut candidates: Vec<&str> = explicit.iter().map(String::as_str).collect();

    for pattern in taxonomy.patterns() {
        for caps in pattern.regex.captures_iter(content) {
            if let Some(term) = caps.name(TERM_GROUP) {
                candidates.push(term.as_str());
            }
        }
    }

    candidates
        .into_iter()
        .filter_map(normalize_term)
        .collect()
}

/// Extract the normalized term set of `source` under `taxonomy`.
pub fn extract_for(taxonomy: &Taxonomy, source: &dyn ContentSource) -> BTreeSet<String> {
    let explicit = source.explicit_terms(taxonomy.name());
    extract_terms(taxonomy, &explicit, source.rendered_content())
}
