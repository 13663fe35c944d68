//! # taxon-core
//!
//! Core types, traits, and text processing for the taxon indexing engine.
//!
//! This crate provides:
//! - Typed taxonomy configuration and activation
//! - The identifier codec used in taxonomy URLs
//! - Term extraction from explicit metadata and pattern matches
//! - The structurally-aware text rewriter that links term occurrences
//! - Shared pagination arithmetic
//! - The [`IndexStore`] contract implemented by `taxon-db`

pub mod codec;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod markup;
pub mod models;
pub mod pagination;
pub mod rewriter;
pub mod taxonomy;
pub mod traits;

// Re-export commonly used types at crate root
pub use codec::{decode_segment, encode_segment};
pub use config::{PatternConfig, Settings, TaxonomyConfig};
pub use error::{Error, Result};
pub use extraction::{extract_for, extract_terms, normalize_term};
pub use markup::{ExclusionSet, StructuralContext};
pub use models::*;
pub use pagination::{page_count, parse_page_param, PageWindow};
pub use rewriter::{rewrite_fragment, rewrite_node, rewrite_text};
pub use taxonomy::{Taxonomy, TermPattern};
pub use traits::*;
