//! Core traits for taxon abstractions.
//!
//! These traits define the interfaces that storage implementations must
//! provide. The engine only ever talks to storage through them.

use async_trait::async_trait;

use crate::models::{IndexEntry, SortKey, TermCount};
use crate::Result;

// =============================================================================
// INDEX STORE
// =============================================================================

/// Ordered multi-map backing every taxonomy's inverted index.
///
/// Each method is scoped by `index`, the taxonomy name. Implementations are
/// responsible for per-entry concurrency safety; callers issue plain
/// sequences of calls with no transaction around them.
///
/// Default order everywhere is `sort_key` descending. Ties are broken by
/// `term` then `location`, both ascending by byte value, so listings are
/// deterministic.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Insert or update the entry for `(index, term, location)`.
    ///
    /// Saving an entry that already exists with the same sort key is a no-op.
    async fn save(&self, index: &str, location: &str, term: &str, sort_key: &SortKey)
        -> Result<()>;

    /// Remove one entry. Removing a missing entry is not an error.
    async fn delete(&self, entry: &IndexEntry) -> Result<()>;

    /// All entries for a content location.
    async fn entries_for_location(&self, index: &str, location: &str) -> Result<Vec<IndexEntry>>;

    /// All entries for a term.
    async fn entries_for_term(&self, index: &str, term: &str) -> Result<Vec<IndexEntry>>;

    /// Distinct terms with the number of locations carrying each, ordered by
    /// the newest entry of each term.
    async fn list_distinct_values(&self, index: &str) -> Result<Vec<TermCount>>;

    /// Remove every entry for a content location. Returns how many were
    /// removed.
    async fn delete_location(&self, index: &str, location: &str) -> Result<u64>;
}
