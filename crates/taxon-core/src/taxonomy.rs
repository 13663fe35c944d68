//! Activated taxonomies: configuration with compiled patterns.
//!
//! Activation compiles every pattern up front, so a malformed expression is
//! reported when the taxonomy is loaded rather than the first time content
//! is scanned. A taxonomy is immutable once activated.

use regex::Regex;

use crate::codec::encode_segment;
use crate::config::{PatternConfig, TaxonomyConfig};
use crate::defaults::{PAGE_PARAM, TERM_GROUP, TERM_SUFFIX};
use crate::error::{Error, Result};

/// A compiled pattern applied in declared order.
#[derive(Debug, Clone)]
pub struct TermPattern {
    pub name: String,
    pub regex: Regex,
    /// Link text is the full match when true, the captured term otherwise.
    pub keep: bool,
}

impl TermPattern {
    /// Compile a configured pattern for `taxonomy`.
    ///
    /// Fails if the expression does not compile or lacks the `name` group.
    pub fn compile(taxonomy: &str, config: &PatternConfig) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidPattern {
            taxonomy: taxonomy.to_string(),
            pattern: config.name.clone(),
            reason,
        };
        let regex = Regex::new(&config.pattern).map_err(|e| invalid(e.to_string()))?;
        if !regex.capture_names().any(|n| n == Some(TERM_GROUP)) {
            return Err(invalid(format!(
                "missing named capture group '{}'",
                TERM_GROUP
            )));
        }
        Ok(Self {
            name: config.name.clone(),
            regex,
            keep: config.keep,
        })
    }
}

/// An active taxonomy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    name: String,
    display_name: String,
    public: bool,
    terms_per_page: usize,
    pages_per_page: usize,
    patterns: Vec<TermPattern>,
    base_path: String,
}

impl Taxonomy {
    /// Activate `config` under the namespace `base_path` (no trailing slash).
    pub fn activate(config: &TaxonomyConfig, base_path: &str) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(Error::Config("taxonomy name cannot be empty".to_string()));
        }
        let patterns = config
            .patterns
            .iter()
            .map(|p| TermPattern::compile(&config.name, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: config.name.clone(),
            display_name: config.resolved_display_name().to_string(),
            public: config.public,
            terms_per_page: config.terms_per_page.max(1),
            pages_per_page: config.pages_per_page.max(1),
            patterns,
            base_path: base_path.trim_end_matches('/').to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn terms_per_page(&self) -> usize {
        self.terms_per_page
    }

    pub fn pages_per_page(&self) -> usize {
        self.pages_per_page
    }

    pub fn patterns(&self) -> &[TermPattern] {
        &self.patterns
    }

    /// URL of the term list, with `?page=N` for pages after the first.
    pub fn list_url(&self, page: usize) -> String {
        with_page(
            format!("{}/{}/", self.base_path, encode_segment(&self.name)),
            page,
        )
    }

    /// URL of a term's page, with `?page=N` for pages after the first.
    pub fn term_url(&self, term: &str, page: usize) -> String {
        with_page(
            format!(
                "{}/{}/{}{}",
                self.base_path,
                encode_segment(&self.name),
                encode_segment(term),
                TERM_SUFFIX
            ),
            page,
        )
    }
}

fn with_page(url: String, page: usize) -> String {
    if page > 1 {
        format!("{}?{}={}", url, PAGE_PARAM, page)
    } else {
        url
    }
}
