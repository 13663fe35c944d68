//! In-memory index store.
//!
//! An ordered multi-map keyed by `(index, term, location)`. Used when no
//! database is configured and as the store for engine tests. Ordering
//! matches [`PgIndexStore`](crate::PgIndexStore).

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use taxon_core::{IndexEntry, IndexStore, Result, SortKey, TermCount};

type EntryKey = (String, String, String);

/// In-memory implementation of IndexStore.
#[derive(Debug, Default)]
pub struct MemoryIndexStore {
    entries: RwLock<BTreeMap<EntryKey, SortKey>>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored entry across all indexes, in key order.
    pub async fn snapshot(&self) -> Vec<IndexEntry> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(key, sort_key)| to_entry(key, sort_key))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn to_entry((index, term, location): &EntryKey, sort_key: &SortKey) -> IndexEntry {
    IndexEntry {
        index: index.clone(),
        term: term.clone(),
        location: location.clone(),
        sort_key: sort_key.clone(),
    }
}

fn sort_default(entries: &mut [IndexEntry]) {
    entries.sort_by(|a, b| {
        b.sort_key
            .cmp(&a.sort_key)
            .then_with(|| a.term.cmp(&b.term))
            .then_with(|| a.location.cmp(&b.location))
    });
}

#[async_trait]
impl IndexStore for MemoryIndexStore {
    async fn save(
        &self,
        index: &str,
        location: &str,
        term: &str,
        sort_key: &SortKey,
    ) -> Result<()> {
        let key = (index.to_string(), term.to_string(), location.to_string());
        let mut entries = self.entries.write().await;
        if entries.get(&key) != Some(sort_key) {
            entries.insert(key, sort_key.clone());
        }
        Ok(())
    }

    async fn delete(&self, entry: &IndexEntry) -> Result<()> {
        let key = (
            entry.index.clone(),
            entry.term.clone(),
            entry.location.clone(),
        );
        self.entries.write().await.remove(&key);
        Ok(())
    }

    async fn entries_for_location(&self, index: &str, location: &str) -> Result<Vec<IndexEntry>> {
        let entries = self.entries.read().await;
        let mut found: Vec<IndexEntry> = entries
            .iter()
            .filter(|((i, _, l), _)| i == index && l == location)
            .map(|(key, sort_key)| to_entry(key, sort_key))
            .collect();
        sort_default(&mut found);
        Ok(found)
    }

    async fn entries_for_term(&self, index: &str, term: &str) -> Result<Vec<IndexEntry>> {
        let entries = self.entries.read().await;
        let mut found: Vec<IndexEntry> = entries
            .iter()
            .filter(|((i, t, _), _)| i == index && t == term)
            .map(|(key, sort_key)| to_entry(key, sort_key))
            .collect();
        sort_default(&mut found);
        Ok(found)
    }

    async fn list_distinct_values(&self, index: &str) -> Result<Vec<TermCount>> {
        let entries = self.entries.read().await;
        let mut grouped: HashMap<&str, (usize, &SortKey)> = HashMap::new();
        for ((i, term, _), sort_key) in entries.iter() {
            if i != index {
                continue;
            }
            let slot = grouped.entry(term.as_str()).or_insert((0, sort_key));
            slot.0 += 1;
            if sort_key > slot.1 {
                slot.1 = sort_key;
            }
        }

        let mut terms: Vec<(&str, usize, &SortKey)> = grouped
            .into_iter()
            .map(|(term, (count, newest))| (term, count, newest))
            .collect();
        terms.sort_by(|a, b| b.2.cmp(a.2).then_with(|| a.0.cmp(b.0)));

        Ok(terms
            .into_iter()
            .map(|(term, count, _)| TermCount {
                term: term.to_string(),
                count,
            })
            .collect())
    }

    async fn delete_location(&self, index: &str, location: &str) -> Result<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(i, _, l), _| !(i == index && l == location));
        Ok((before - entries.len()) as u64)
    }
}
