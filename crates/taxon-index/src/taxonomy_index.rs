//! One taxonomy's inverted index: maintenance and paginated queries.
//!
//! ## Reindexing
//!
//! `index_location` diffs the location's stored terms against the freshly
//! extracted set: stale entries are deleted, then every current term is
//! upserted. The sequence is not transactional. If a store call fails
//! midway the error is returned and the location may be left with a mix of
//! old and new entries until the next successful reindex.
//!
//! ## Sort keys
//!
//! The creation timestamp, else the modification timestamp. Items with
//! neither keep the sort key already stored for them, and only fall back to
//! the current time the first time they are indexed, so that reindexing
//! unchanged content never rewrites entries.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use taxon_core::{
    extract_for, normalize_term, ContentSource, IndexEntry, IndexStore, Lookup, PageWindow,
    Result, SortKey, Taxonomy, TermListPage, TermPage, TermSummary,
};

/// What a reindex changed for one taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOutcome {
    pub taxonomy: String,
    /// Terms now carried by the location.
    pub terms: Vec<String>,
    /// Entries that did not exist before.
    pub added: usize,
    /// Entries whose sort key changed.
    pub updated: usize,
    /// Stale entries deleted.
    pub removed: usize,
}

impl IndexOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.updated == 0 && self.removed == 0
    }
}

/// An active taxonomy bound to the store holding its entries.
#[derive(Clone)]
pub struct TaxonomyIndex {
    taxonomy: Taxonomy,
    store: Arc<dyn IndexStore>,
}

impl TaxonomyIndex {
    pub fn new(taxonomy: Taxonomy, store: Arc<dyn IndexStore>) -> Self {
        Self { taxonomy, store }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn name(&self) -> &str {
        self.taxonomy.name()
    }

    /// Normalized term set of `source` under this taxonomy.
    pub fn terms(&self, source: &dyn ContentSource) -> BTreeSet<String> {
        extract_for(&self.taxonomy, source)
    }

    /// Bring the stored entries of `source` in line with its current terms.
    pub async fn index_location(&self, source: &(dyn ContentSource + Sync)) -> Result<IndexOutcome> {
        let start = Instant::now();
        let index = self.taxonomy.name();
        let location = source.location();
        let terms = self.terms(source);

        let existing = self.store.entries_for_location(index, location).await?;
        let sort_key = match (source.created(), source.modified()) {
            (None, None) => existing
                .first()
                .map(|entry| entry.sort_key.clone())
                .unwrap_or_else(|| SortKey::from_timestamp(Utc::now())),
            (created, modified) => SortKey::for_times(created, modified, Utc::now()),
        };

        let mut outcome = IndexOutcome {
            taxonomy: index.to_string(),
            terms: terms.iter().cloned().collect(),
            ..Default::default()
        };

        for entry in &existing {
            if !terms.contains(&entry.term) {
                trace!(taxonomy = index, location, term = %entry.term, "Removing stale term");
                self.store.delete(entry).await?;
                outcome.removed += 1;
            }
        }

        for term in &terms {
            match existing.iter().find(|e| &e.term == term) {
                None => outcome.added += 1,
                Some(entry) if entry.sort_key != sort_key => outcome.updated += 1,
                Some(_) => {}
            }
            self.store.save(index, location, term, &sort_key).await?;
        }

        info!(
            subsystem = "index",
            component = "maintainer",
            op = "index_location",
            taxonomy = index,
            location,
            term_count = terms.len(),
            added = outcome.added,
            updated = outcome.updated,
            removed = outcome.removed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Indexed location"
        );
        Ok(outcome)
    }

    /// Remove every entry of `location` from this taxonomy.
    pub async fn deindex_location(&self, location: &str) -> Result<u64> {
        let removed = self
            .store
            .delete_location(self.taxonomy.name(), location)
            .await?;
        info!(
            subsystem = "index",
            component = "maintainer",
            op = "deindex_location",
            taxonomy = self.taxonomy.name(),
            location,
            removed,
            "Deindexed location"
        );
        Ok(removed)
    }

    /// All distinct terms with their counts and page URLs.
    pub async fn list_terms(&self) -> Result<Vec<TermSummary>> {
        let values = self.store.list_distinct_values(self.taxonomy.name()).await?;
        Ok(values
            .into_iter()
            .map(|value| TermSummary {
                url: self.taxonomy.term_url(&value.term, 1),
                term: value.term,
                count: value.count,
            })
            .collect())
    }

    /// Entries carrying `term`, newest first.
    pub async fn locations_for_term(&self, term: &str) -> Result<Vec<IndexEntry>> {
        match normalize_term(term) {
            Some(term) => self.store.entries_for_term(self.taxonomy.name(), &term).await,
            None => Ok(Vec::new()),
        }
    }

    /// One page of the term list, `terms_per_page` terms at a time.
    pub async fn term_list_page(&self, page: usize) -> Result<Lookup<TermListPage>> {
        let terms = self.list_terms().await?;
        let window = PageWindow::resolve(terms.len(), self.taxonomy.terms_per_page(), page);
        debug!(
            subsystem = "index",
            component = "query",
            op = "term_list_page",
            taxonomy = self.taxonomy.name(),
            page,
            total = terms.len(),
            found = window.is_found(),
            "Resolved term list page"
        );

        Ok(window.map(|window| TermListPage {
            taxonomy: self.taxonomy.name().to_string(),
            display_name: self.taxonomy.display_name().to_string(),
            title: format!("Page Taxonomy: {}", self.taxonomy.display_name()),
            url: self.taxonomy.list_url(window.page),
            page: window.page,
            page_count: window.page_count,
            per_page: window.per_page,
            total: window.total,
            terms: window.slice(&terms),
        }))
    }

    /// One page of the locations carrying `term`, `pages_per_page` at a time.
    ///
    /// A term that normalizes to nothing is not found.
    pub async fn term_page(&self, term: &str, page: usize) -> Result<Lookup<TermPage>> {
        let Some(term) = normalize_term(term) else {
            return Ok(Lookup::NotFound);
        };
        let entries = self.store.entries_for_term(self.taxonomy.name(), &term).await?;
        let window = PageWindow::resolve(entries.len(), self.taxonomy.pages_per_page(), page);
        debug!(
            subsystem = "index",
            component = "query",
            op = "term_page",
            taxonomy = self.taxonomy.name(),
            term = %term,
            page,
            total = entries.len(),
            found = window.is_found(),
            "Resolved term page"
        );

        Ok(window.map(|window| TermPage {
            taxonomy: self.taxonomy.name().to_string(),
            title: format!("{}: {}", self.taxonomy.display_name(), term),
            url: self.taxonomy.term_url(&term, window.page),
            page: window.page,
            page_count: window.page_count,
            per_page: window.per_page,
            total: window.total,
            entries: window.slice(&entries),
            term,
        }))
    }
}
