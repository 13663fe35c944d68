//! Typed configuration for taxonomies and the engine.
//!
//! Configuration is read from YAML. Every optional field has a documented
//! default taken from [`crate::defaults`]:
//!
//! | Field | Default |
//! |-------|---------|
//! | `display_name` | the taxonomy name |
//! | `public` | `false` |
//! | `terms_per_page` | 10 |
//! | `pages_per_page` | 10 |
//! | `disabled` | `false` |
//! | `patterns` | none (only explicit metadata terms are indexed) |
//! | pattern `keep` | `false` |
//! | `base_path` | `/~taxonomy` |
//! | `excluded_tags` | `head style script code pre textarea a` |
//!
//! ## Example
//!
//! ```yaml
//! taxonomies:
//!   - name: tags
//!     display_name: Tags
//!     public: true
//!     terms_per_page: 100
//!     patterns:
//!       - name: hashtag
//!         pattern: '#(?P<name>[a-zA-Z0-9_\-]+)'
//!         keep: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::defaults;
use crate::error::{Error, Result};

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "TAXON_CONFIG";

/// One configured pattern, before compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    /// Regular expression with a `name` capture group for the term.
    pub pattern: String,
    /// Link text is the full match when true, the captured term otherwise.
    #[serde(default = "default_keep")]
    pub keep: bool,
}

/// One configured taxonomy, before activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    pub name: String,
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default = "default_public")]
    pub public: bool,
    #[serde(default = "default_terms_per_page", alias = "termsPerPage")]
    pub terms_per_page: usize,
    #[serde(default = "default_pages_per_page", alias = "pagesPerPage")]
    pub pages_per_page: usize,
    #[serde(default)]
    pub disabled: bool,
    /// Applied in declared order.
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

impl TaxonomyConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            public: defaults::TAXONOMY_PUBLIC,
            terms_per_page: defaults::TERMS_PER_PAGE,
            pages_per_page: defaults::PAGES_PER_PAGE,
            disabled: false,
            patterns: Vec::new(),
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn terms_per_page(mut self, n: usize) -> Self {
        self.terms_per_page = n;
        self
    }

    pub fn pages_per_page(mut self, n: usize) -> Self {
        self.pages_per_page = n;
        self
    }

    pub fn pattern(mut self, name: &str, pattern: &str, keep: bool) -> Self {
        self.patterns.push(PatternConfig {
            name: name.to_string(),
            pattern: pattern.to_string(),
            keep,
        });
        self
    }

    pub fn resolved_display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path prefix of the taxonomy namespace.
    #[serde(default = "default_base_path", alias = "basePath")]
    pub base_path: String,
    /// Elements whose descendant text is never rewritten.
    #[serde(default = "default_excluded_tags", alias = "excludedTags")]
    pub excluded_tags: Vec<String>,
    /// Taxonomies in declared order.
    #[serde(default)]
    pub taxonomies: Vec<TaxonomyConfig>,
}

impl Default for Settings {
    /// Built-in `tags` and `categories` taxonomies.
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            excluded_tags: default_excluded_tags(),
            taxonomies: vec![
                TaxonomyConfig::new("tags")
                    .display_name("Tags")
                    .public(true)
                    .terms_per_page(defaults::BUILTIN_TERMS_PER_PAGE)
                    .pages_per_page(defaults::PAGES_PER_PAGE)
                    .pattern("hashtag", r"#(?P<name>[a-zA-Z0-9_\-]+)", true)
                    .pattern("explicit", r"#\{(?P<name>[^\}]+)\}", false),
                TaxonomyConfig::new("categories")
                    .display_name("Categories")
                    .public(true)
                    .terms_per_page(defaults::BUILTIN_TERMS_PER_PAGE)
                    .pages_per_page(defaults::PAGES_PER_PAGE)
                    .pattern("explicit", r"@category\{(?P<name>[^\}]+)\}", false),
            ],
        }
    }
}

impl Settings {
    /// Parse settings from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let settings = Self::from_yaml(&yaml)?;
        info!(
            subsystem = "core",
            component = "config",
            path = %path.display(),
            taxonomy_count = settings.taxonomies.len(),
            "Loaded taxonomy configuration"
        );
        Ok(settings)
    }

    /// Load from the file named by `TAXON_CONFIG`, or fall back to the
    /// built-in defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load(path),
            _ => {
                debug!(
                    subsystem = "core",
                    component = "config",
                    "{} not set, using built-in taxonomies",
                    CONFIG_ENV
                );
                Ok(Self::default())
            }
        }
    }

    /// Check structural rules that do not need regex compilation.
    pub fn validate(&self) -> Result<()> {
        if !self.base_path.starts_with('/') {
            return Err(Error::Config(format!(
                "base_path must start with '/': {}",
                self.base_path
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for taxonomy in &self.taxonomies {
            if taxonomy.name.trim().is_empty() {
                return Err(Error::Config("taxonomy name cannot be empty".to_string()));
            }
            if !seen.insert(taxonomy.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate taxonomy name: {}",
                    taxonomy.name
                )));
            }
        }
        Ok(())
    }

    /// Base path without a trailing slash.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim_end_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            trimmed.to_string()
        }
    }
}

fn default_keep() -> bool {
    defaults::PATTERN_KEEP
}

fn default_public() -> bool {
    defaults::TAXONOMY_PUBLIC
}

fn default_terms_per_page() -> usize {
    defaults::TERMS_PER_PAGE
}

fn default_pages_per_page() -> usize {
    defaults::PAGES_PER_PAGE
}

fn default_base_path() -> String {
    defaults::BASE_PATH.to_string()
}

fn default_excluded_tags() -> Vec<String> {
    defaults::EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect()
}
