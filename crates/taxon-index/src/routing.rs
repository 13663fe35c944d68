//! Resolution of taxonomy namespace URLs.
//!
//! ```text
//! <base>/                          -> Index
//! <base>/<enc(name)>/              -> TermList   (Found | NotFound by page)
//! <base>/<enc(name)>/<enc(term)>.html -> TermDetail (Found | NotFound by page)
//! anything else                    -> NoMatch
//! ```
//!
//! `NoMatch` means the path is not ours and the caller should try its next
//! handler. It covers paths outside the base, undecodable segments, unknown
//! or non-public taxonomies, and extra path segments.

use tracing::debug;

use taxon_core::defaults::TERM_SUFFIX;
use taxon_core::{
    decode_segment, parse_page_param, Lookup, Result, TaxonomyLink, TermListPage, TermPage,
};

use crate::registry::TaxonomyRegistry;
use crate::taxonomy_index::TaxonomyIndex;

/// Outcome of resolving a namespace URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    NoMatch,
    Index(Vec<TaxonomyLink>),
    TermList(Lookup<TermListPage>),
    TermDetail(Lookup<TermPage>),
}

/// Parsed form of a path, before any store lookup.
enum Target<'a> {
    Index,
    TermList(&'a TaxonomyIndex),
    TermDetail(&'a TaxonomyIndex, String),
}

impl TaxonomyRegistry {
    /// Resolve `path` with the raw `page` query value, if any.
    pub async fn resolve(&self, path: &str, page: Option<&str>) -> Result<Route> {
        let Some(target) = self.parse_target(path) else {
            debug!(
                subsystem = "index",
                component = "router",
                op = "resolve",
                path,
                "No taxonomy route"
            );
            return Ok(Route::NoMatch);
        };

        let page = parse_page_param(page);
        match target {
            Target::Index => Ok(Route::Index(self.namespace_index())),
            Target::TermList(index) => match page {
                Lookup::Found(page) => Ok(Route::TermList(index.term_list_page(page).await?)),
                Lookup::NotFound => Ok(Route::TermList(Lookup::NotFound)),
            },
            Target::TermDetail(index, term) => match page {
                Lookup::Found(page) => Ok(Route::TermDetail(index.term_page(&term, page).await?)),
                Lookup::NotFound => Ok(Route::TermDetail(Lookup::NotFound)),
            },
        }
    }

    fn parse_target(&self, path: &str) -> Option<Target<'_>> {
        let rest = path.strip_prefix(self.base_path())?;
        if !(rest.is_empty() || rest.starts_with('/')) {
            return None;
        }
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            return Some(Target::Index);
        }

        let segments: Vec<&str> = rest.split('/').collect();
        let (name_segment, term_segment) = match segments.as_slice() {
            [name] | [name, ""] => (*name, None),
            [name, term] => (*name, Some(*term)),
            _ => return None,
        };

        let name = decode_segment(name_segment)?;
        let index = self.public().find(|index| index.name() == name)?;

        match term_segment {
            None => Some(Target::TermList(index)),
            Some(segment) => {
                let encoded = segment.strip_suffix(TERM_SUFFIX).unwrap_or(segment);
                let term = decode_segment(encoded)?;
                Some(Target::TermDetail(index, term))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use taxon_core::{encode_segment, ContentItem, Settings, TaxonomyConfig};
    use taxon_db::MemoryIndexStore;

    fn registry() -> TaxonomyRegistry {
        let settings = Settings {
            taxonomies: vec![
                TaxonomyConfig::new("tags")
                    .display_name("Tags")
                    .public(true)
                    .terms_per_page(2)
                    .pages_per_page(1)
                    .pattern("hashtag", r"#(?P<name>\w+)", true),
                TaxonomyConfig::new("private")
                    .public(false)
                    .pattern("hashtag", r"#(?P<name>\w+)", true),
            ],
            ..Settings::default()
        };
        TaxonomyRegistry::activate(&settings, Arc::new(MemoryIndexStore::new())).unwrap()
    }

    fn list_path(name: &str) -> String {
        format!("/~taxonomy/{}/", encode_segment(name))
    }

    fn term_path(name: &str, term: &str) -> String {
        format!("/~taxonomy/{}/{}.html", encode_segment(name), encode_segment(term))
    }

    #[tokio::test]
    async fn test_base_path_is_index() {
        let registry = registry();
        for path in ["/~taxonomy", "/~taxonomy/"] {
            match registry.resolve(path, None).await.unwrap() {
                Route::Index(links) => assert_eq!(links.len(), 1),
                other => panic!("Expected Index, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_foreign_paths_do_not_match() {
        let registry = registry();
        for path in ["/", "/posts/a.html", "/~taxonomyx/", "/~taxonomy/!!!/"] {
            assert_eq!(registry.resolve(path, None).await.unwrap(), Route::NoMatch, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_unknown_and_private_taxonomies_do_not_match() {
        let registry = registry();
        assert_eq!(
            registry.resolve(&list_path("nope"), None).await.unwrap(),
            Route::NoMatch
        );
        assert_eq!(
            registry.resolve(&list_path("private"), None).await.unwrap(),
            Route::NoMatch
        );
    }

    #[tokio::test]
    async fn test_extra_segments_do_not_match() {
        let registry = registry();
        let path = format!("{}x/y", list_path("tags"));
        assert_eq!(registry.resolve(&path, None).await.unwrap(), Route::NoMatch);
    }

    #[tokio::test]
    async fn test_undecodable_term_does_not_match() {
        let registry = registry();
        let path = format!("{}%%%.html", list_path("tags"));
        assert_eq!(registry.resolve(&path, None).await.unwrap(), Route::NoMatch);
    }

    #[tokio::test]
    async fn test_term_list_pages() {
        let registry = registry();
        let tags = registry.get("tags").unwrap();
        tags.index_location(&ContentItem::new("/a", "#one #two #three"))
            .await
            .unwrap();

        match registry.resolve(&list_path("tags"), None).await.unwrap() {
            Route::TermList(Lookup::Found(page)) => {
                assert_eq!(page.page, 1);
                assert_eq!(page.page_count, 2);
                assert_eq!(page.terms.len(), 2);
            }
            other => panic!("Expected TermList page, got {:?}", other),
        }
        match registry.resolve(&list_path("tags"), Some("2")).await.unwrap() {
            Route::TermList(Lookup::Found(page)) => assert_eq!(page.terms.len(), 1),
            other => panic!("Expected TermList page, got {:?}", other),
        }
        assert_eq!(
            registry.resolve(&list_path("tags"), Some("3")).await.unwrap(),
            Route::TermList(Lookup::NotFound)
        );
        assert_eq!(
            registry.resolve(&list_path("tags"), Some("abc")).await.unwrap(),
            Route::TermList(Lookup::NotFound)
        );
    }

    #[tokio::test]
    async fn test_list_without_trailing_slash() {
        let registry = registry();
        let path = format!("/~taxonomy/{}", encode_segment("tags"));
        assert!(matches!(
            registry.resolve(&path, None).await.unwrap(),
            Route::TermList(Lookup::Found(_))
        ));
    }

    #[tokio::test]
    async fn test_term_detail_pages() {
        let registry = registry();
        let tags = registry.get("tags").unwrap();
        tags.index_location(&ContentItem::new("/a", "#rust")).await.unwrap();
        tags.index_location(&ContentItem::new("/b", "#rust")).await.unwrap();

        match registry.resolve(&term_path("tags", "rust"), Some("2")).await.unwrap() {
            Route::TermDetail(Lookup::Found(page)) => {
                assert_eq!(page.term, "rust");
                assert_eq!(page.page, 2);
                assert_eq!(page.page_count, 2);
                assert_eq!(page.entries.len(), 1);
            }
            other => panic!("Expected TermDetail page, got {:?}", other),
        }
        assert_eq!(
            registry.resolve(&term_path("tags", "rust"), Some("3")).await.unwrap(),
            Route::TermDetail(Lookup::NotFound)
        );
    }

    #[tokio::test]
    async fn test_term_with_spaces_and_punctuation_round_trips() {
        let registry = registry();
        let term = "big data, small / budget?";
        match registry.resolve(&term_path("tags", term), None).await.unwrap() {
            Route::TermDetail(Lookup::Found(page)) => {
                assert_eq!(page.term, term);
                assert_eq!(page.total, 0);
            }
            other => panic!("Expected TermDetail page, got {:?}", other),
        }
    }
}
