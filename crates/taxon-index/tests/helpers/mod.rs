//! Shared setup for taxonomy pipeline tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use taxon_db::MemoryIndexStore;
use taxon_index::{Settings, TaxonomyConfig, TaxonomyRegistry};

/// A public `tags` taxonomy scanning `#word` hashtags, plus a private one.
pub fn settings(terms_per_page: usize, pages_per_page: usize) -> Settings {
    Settings {
        taxonomies: vec![
            TaxonomyConfig::new("tags")
                .display_name("Tags")
                .public(true)
                .terms_per_page(terms_per_page)
                .pages_per_page(pages_per_page)
                .pattern("hashtag", r"#(?P<name>\w+)", true),
            TaxonomyConfig::new("drafts")
                .display_name("Drafts")
                .public(false)
                .pattern("draft", r"@draft\{(?P<name>[^\}]+)\}", false),
        ],
        ..Settings::default()
    }
}

pub fn registry_with(settings: &Settings) -> (TaxonomyRegistry, Arc<MemoryIndexStore>) {
    let store = Arc::new(MemoryIndexStore::new());
    let registry =
        TaxonomyRegistry::activate(settings, store.clone()).expect("settings should activate");
    (registry, store)
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}
