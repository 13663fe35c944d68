//! The set of active taxonomies, built once and shared by reference.

use std::sync::Arc;

use tracing::{info, warn};

use taxon_core::{
    rewrite_fragment, rewrite_node, ContentSource, Error, ExclusionSet, IndexStore, Result,
    Settings, StructuralContext, Taxonomy, TaxonomyLink,
};

use crate::taxonomy_index::{IndexOutcome, TaxonomyIndex};

/// Every active taxonomy, in declared order, over one shared store.
///
/// Construct it once at startup and pass it (typically in an `Arc`) to the
/// handlers that index, render or resolve taxonomy URLs.
#[derive(Clone)]
pub struct TaxonomyRegistry {
    indexes: Vec<TaxonomyIndex>,
    exclusions: ExclusionSet,
    base_path: String,
}

impl TaxonomyRegistry {
    /// Activate every enabled taxonomy in `settings`.
    ///
    /// Fails on the first invalid taxonomy; nothing is activated partially.
    pub fn activate(settings: &Settings, store: Arc<dyn IndexStore>) -> Result<Self> {
        settings.validate()?;
        let base_path = settings.normalized_base_path();

        let mut indexes = Vec::new();
        for config in &settings.taxonomies {
            if config.disabled {
                warn!(
                    subsystem = "index",
                    component = "registry",
                    taxonomy = %config.name,
                    "Taxonomy disabled, skipping"
                );
                continue;
            }
            let taxonomy = Taxonomy::activate(config, &base_path)?;
            info!(
                subsystem = "index",
                component = "registry",
                op = "activate",
                taxonomy = taxonomy.name(),
                public = taxonomy.is_public(),
                pattern_count = taxonomy.patterns().len(),
                "Activated taxonomy"
            );
            indexes.push(TaxonomyIndex::new(taxonomy, store.clone()));
        }

        Ok(Self {
            indexes,
            exclusions: ExclusionSet::new(&settings.excluded_tags),
            base_path,
        })
    }

    /// Namespace path prefix, without a trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn indexes(&self) -> &[TaxonomyIndex] {
        &self.indexes
    }

    pub fn get(&self, name: &str) -> Option<&TaxonomyIndex> {
        self.indexes.iter().find(|index| index.name() == name)
    }

    /// Look up a taxonomy that must exist.
    pub fn require(&self, name: &str) -> Result<&TaxonomyIndex> {
        self.get(name)
            .ok_or_else(|| Error::NotFound(format!("taxonomy '{}'", name)))
    }

    /// Public taxonomies, in declared order.
    pub fn public(&self) -> impl Iterator<Item = &TaxonomyIndex> {
        self.indexes.iter().filter(|index| index.taxonomy().is_public())
    }

    /// Links to every public taxonomy's term list.
    pub fn namespace_index(&self) -> Vec<TaxonomyLink> {
        self.public()
            .map(|index| TaxonomyLink {
                name: index.name().to_string(),
                display_name: index.taxonomy().display_name().to_string(),
                url: index.taxonomy().list_url(1),
            })
            .collect()
    }

    /// Reindex `source` under every taxonomy, in declared order.
    pub async fn index_location(&self, source: &(dyn ContentSource + Sync)) -> Result<Vec<IndexOutcome>> {
        let mut outcomes = Vec::with_capacity(self.indexes.len());
        for index in &self.indexes {
            outcomes.push(index.index_location(source).await?);
        }
        Ok(outcomes)
    }

    /// Remove `location` from every taxonomy. Returns the entries removed.
    pub async fn deindex_location(&self, location: &str) -> Result<u64> {
        let mut removed = 0;
        for index in &self.indexes {
            removed += index.deindex_location(location).await?;
        }
        Ok(removed)
    }

    /// Rewrite one text node for every public taxonomy in turn.
    ///
    /// `text` is HTML source text with entities still encoded; `context` is
    /// the stack of elements enclosing the node.
    pub fn rewrite_node(&self, text: &str, context: &StructuralContext) -> Option<String> {
        let mut current: Option<String> = None;
        for index in self.public() {
            let input = current.as_deref().unwrap_or(text);
            if let Some(next) = rewrite_node(index.taxonomy(), input, context, &self.exclusions) {
                current = Some(next);
            }
        }
        current
    }

    /// Rewrite every text node of an HTML fragment.
    pub fn rewrite_html(&self, html: &str) -> String {
        let taxonomies: Vec<&Taxonomy> = self.indexes.iter().map(|i| i.taxonomy()).collect();
        rewrite_fragment(&taxonomies, &self.exclusions, html)
    }
}
