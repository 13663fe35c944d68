//! Centralized default constants for the taxon engine.
//!
//! **This module is the single source of truth** for shared default values.
//! Configuration structs reference these constants in their serde default
//! functions instead of repeating magic numbers.

// =============================================================================
// TAXONOMY
// =============================================================================

/// Whether a taxonomy is public when the configuration does not say.
pub const TAXONOMY_PUBLIC: bool = false;

/// Terms shown per page of a taxonomy's term list.
pub const TERMS_PER_PAGE: usize = 10;

/// Content locations shown per page of a single term.
pub const PAGES_PER_PAGE: usize = 10;

/// Whether a pattern displays the full match when linking.
pub const PATTERN_KEEP: bool = false;

/// Name of the capture group every pattern must define for the term.
pub const TERM_GROUP: &str = "name";

/// Terms per page for the built-in `tags` and `categories` taxonomies.
pub const BUILTIN_TERMS_PER_PAGE: usize = 100;

// =============================================================================
// ROUTING
// =============================================================================

/// Path prefix of the taxonomy namespace.
pub const BASE_PATH: &str = "/~taxonomy";

/// Suffix appended to encoded term segments.
pub const TERM_SUFFIX: &str = ".html";

/// Query parameter carrying the page number.
pub const PAGE_PARAM: &str = "page";

// =============================================================================
// REWRITING
// =============================================================================

/// Elements whose descendant text is never rewritten.
pub const EXCLUDED_TAGS: &[&str] = &["head", "style", "script", "code", "pre", "textarea", "a"];

// =============================================================================
// INDEXING
// =============================================================================

/// Width sort keys are zero-padded to (digits in `u64::MAX`).
pub const SORT_KEY_WIDTH: usize = 20;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Maximum request body size in bytes for render/index requests (8 MB).
pub const MAX_BODY_SIZE_BYTES: usize = 8 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_width_fits_u64() {
        assert_eq!(u64::MAX.to_string().len(), SORT_KEY_WIDTH);
    }

    #[test]
    fn test_excluded_tags_are_lowercase() {
        for tag in EXCLUDED_TAGS {
            assert_eq!(*tag, tag.to_lowercase());
        }
    }

    #[test]
    fn test_base_path_has_no_trailing_slash() {
        assert!(BASE_PATH.starts_with('/'));
        assert!(!BASE_PATH.ends_with('/'));
    }
}
