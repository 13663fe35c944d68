use std::sync::Arc;

use taxon_index::TaxonomyRegistry;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TaxonomyRegistry>,
}

impl AppState {
    pub fn new(registry: TaxonomyRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
