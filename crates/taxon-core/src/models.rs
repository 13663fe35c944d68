//! Core data models for the taxon engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::defaults::SORT_KEY_WIDTH;

// =============================================================================
// LOOKUP RESULT
// =============================================================================

/// Outcome of a lookup that can legitimately find nothing.
///
/// Used at every lookup boundary (page resolution, term resolution, page
/// bounds) in place of an error: an out-of-range page is `NotFound`, not a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

// =============================================================================
// SORT KEY
// =============================================================================

/// Ordering key of an index entry.
///
/// A Unix timestamp in seconds, zero-padded to a fixed width so that string
/// order and numeric order agree. Timestamps before the epoch clamp to zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(String);

impl SortKey {
    pub fn from_unix_seconds(seconds: i64) -> Self {
        let clamped = u64::try_from(seconds).unwrap_or(0);
        SortKey(format!("{:0width$}", clamped, width = SORT_KEY_WIDTH))
    }

    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self::from_unix_seconds(at.timestamp())
    }

    /// Pick the creation time, else the modification time, else `now`.
    pub fn for_times(
        created: Option<DateTime<Utc>>,
        modified: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self::from_timestamp(created.or(modified).unwrap_or(now))
    }

    /// Wrap a key read back from storage.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        SortKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// INDEX ENTRIES
// =============================================================================

/// One row of a taxonomy's inverted index.
///
/// Unique per `(index, term, location)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Name of the taxonomy the entry belongs to.
    pub index: String,
    /// Normalized term (lowercase, markup-free).
    pub term: String,
    /// Stable identifier (URL) of the content item carrying the term.
    pub location: String,
    pub sort_key: SortKey,
}

/// A distinct term and how many locations carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// A term as presented in a term list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermSummary {
    pub term: String,
    pub count: usize,
    pub url: String,
}

// =============================================================================
// CONTENT
// =============================================================================

/// Read access to a content item being indexed.
///
/// Implemented by whatever owns the content; the engine only needs a stable
/// identity, per-taxonomy explicit terms, timestamps, and the rendered text.
pub trait ContentSource {
    /// Stable URL identity of the item.
    fn location(&self) -> &str;

    /// Terms listed explicitly in the item's metadata for `taxonomy`.
    fn explicit_terms(&self, taxonomy: &str) -> Vec<String>;

    fn created(&self) -> Option<DateTime<Utc>>;

    fn modified(&self) -> Option<DateTime<Utc>>;

    /// Fully rendered content scanned by patterns.
    fn rendered_content(&self) -> &str;
}

/// A content item submitted for indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub location: String,
    /// Explicit terms keyed by taxonomy name.
    #[serde(default)]
    pub taxonomy: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: String,
}

impl ContentItem {
    pub fn new(location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_terms(mut self, taxonomy: &str, terms: &[&str]) -> Self {
        self.taxonomy.insert(
            taxonomy.to_string(),
            terms.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

impl ContentSource for ContentItem {
    fn location(&self) -> &str {
        &self.location
    }

    fn explicit_terms(&self, taxonomy: &str) -> Vec<String> {
        self.taxonomy.get(taxonomy).cloned().unwrap_or_default()
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    fn rendered_content(&self) -> &str {
        &self.content
    }
}

// =============================================================================
// PAGE VIEWS
// =============================================================================

/// A public taxonomy as listed on the namespace index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyLink {
    pub name: String,
    pub display_name: String,
    pub url: String,
}

/// One page of a taxonomy's term list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermListPage {
    pub taxonomy: String,
    pub display_name: String,
    pub title: String,
    pub url: String,
    pub page: usize,
    pub page_count: usize,
    pub per_page: usize,
    pub total: usize,
    pub terms: Vec<TermSummary>,
}

/// One page of the locations carrying a term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPage {
    pub taxonomy: String,
    pub term: String,
    pub title: String,
    pub url: String,
    pub page: usize,
    pub page_count: usize,
    pub per_page: usize,
    pub total: usize,
    pub entries: Vec<IndexEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sort_key_is_fixed_width() {
        let key = SortKey::from_unix_seconds(1_700_000_000);
        assert_eq!(key.as_str().len(), SORT_KEY_WIDTH);
        assert_eq!(key.as_str(), "00000000001700000000");
    }

    #[test]
    fn test_sort_key_string_order_matches_numeric_order() {
        let small = SortKey::from_unix_seconds(999);
        let large = SortKey::from_unix_seconds(1_000);
        assert!(small < large);
        assert!(small.as_str() < large.as_str());
    }

    #[test]
    fn test_sort_key_negative_clamps_to_zero() {
        let key = SortKey::from_unix_seconds(-5);
        assert_eq!(key.as_str(), "00000000000000000000");
    }

    #[test]
    fn test_sort_key_prefers_created() {
        let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let modified = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            SortKey::for_times(Some(created), Some(modified), now),
            SortKey::from_timestamp(created)
        );
        assert_eq!(
            SortKey::for_times(None, Some(modified), now),
            SortKey::from_timestamp(modified)
        );
        assert_eq!(
            SortKey::for_times(None, None, now),
            SortKey::from_timestamp(now)
        );
    }

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
        assert_eq!(Lookup::Found(2).map(|v| v * 2), Lookup::Found(4));
        assert!(!Lookup::<i32>::NotFound.is_found());
    }

    #[test]
    fn test_content_item_deserializes_with_defaults() {
        let item: ContentItem =
            serde_json::from_str(r#"{"location": "/posts/a.html"}"#).unwrap();
        assert_eq!(item.location(), "/posts/a.html");
        assert!(item.explicit_terms("tags").is_empty());
        assert_eq!(item.rendered_content(), "");
        assert!(item.created().is_none());
    }

    #[test]
    fn test_content_item_explicit_terms_per_taxonomy() {
        let item = ContentItem::new("/a", "")
            .with_terms("tags", &["Rust", "async"])
            .with_terms("categories", &["Programming"]);
        assert_eq!(item.explicit_terms("tags"), vec!["Rust", "async"]);
        assert_eq!(item.explicit_terms("categories"), vec!["Programming"]);
        assert!(item.explicit_terms("other").is_empty());
    }
}
