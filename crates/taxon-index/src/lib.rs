//! # taxon-index
//!
//! Taxonomy indexing, paginated queries and namespace routing for taxon.
//!
//! This crate provides:
//! - Per-taxonomy index maintenance (extract, diff, upsert, delete)
//! - Paginated term lists and term pages
//! - A registry of active taxonomies sharing one [`IndexStore`]
//! - Resolution of `/~taxonomy/...` URLs to pages
//! - Inline term linking across every public taxonomy
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taxon_db::MemoryIndexStore;
//! use taxon_index::{ContentItem, Route, Settings, TaxonomyRegistry};
//!
//! let registry = TaxonomyRegistry::activate(&Settings::default(), Arc::new(MemoryIndexStore::new()))?;
//! registry.index_location(&ContentItem::new("/posts/a.html", "<p>#rust</p>")).await?;
//!
//! let html = registry.rewrite_html("<p>#rust</p>");
//! let route = registry.resolve("/~taxonomy/dGFncw/", None).await?;
//! ```

pub mod registry;
pub mod routing;
pub mod taxonomy_index;

// Re-export core types
pub use taxon_core::*;

pub use registry::TaxonomyRegistry;
pub use routing::Route;
pub use taxonomy_index::{IndexOutcome, TaxonomyIndex};
