use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::category::{self, CategoryRule, Resolved};

/// Where card excerpts come from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExcerptStrategy {
    /// Use the authored excerpt, derive one from the body when it is missing.
    #[default]
    Authored,
    /// Always derive from the body.
    Derived,
}

/// Element ids of the host markup the viewer writes into.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnchorIds {
    pub card_grid: String,
    pub no_results: String,
    pub overlay: String,
    pub backdrop: String,
    pub close: String,
    pub panel: String,
    pub content: String,
    pub filter_bar: String,
    pub body: String,
    pub filter_prefix: String,
}

impl Default for AnchorIds {
    fn default() -> Self {
        AnchorIds {
            card_grid: "cardGrid".into(),
            no_results: "noResults".into(),
            overlay: "readerOverlay".into(),
            backdrop: "readerBackdrop".into(),
            close: "readerClose".into(),
            panel: "readerPanel".into(),
            content: "readerContent".into(),
            filter_bar: "filterBar".into(),
            body: "body".into(),
            filter_prefix: "filter-".into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PortfolioConfig {
    /// File path or http(s) URL of the content document.
    pub content: String,
    pub output_dir: String,
    pub site_title: String,
    pub date_format: String,
    pub excerpt: ExcerptStrategy,
    pub excerpt_max_chars: usize,
    pub sort_by_date: bool,
    pub stagger_ms: u64,
    pub scroll_shadow_threshold: f64,
    pub http_timeout_secs: u64,
    pub default_accent: String,
    pub categories: Vec<CategoryRule>,
    pub anchors: AnchorIds,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        PortfolioConfig {
            content: "content/pieces.json".into(),
            output_dir: "dist".into(),
            site_title: "Writing Portfolio".into(),
            date_format: "%b %-d, %Y".into(),
            excerpt: ExcerptStrategy::Authored,
            excerpt_max_chars: 160,
            sort_by_date: true,
            stagger_ms: 80,
            scroll_shadow_threshold: 100.0,
            http_timeout_secs: 10,
            default_accent: "#f59e42".into(),
            categories: CategoryRule::defaults(),
            anchors: AnchorIds::default(),
        }
    }
}

impl PortfolioConfig {
    pub fn from_toml(raw: &str) -> Result<Self, String> {
        let config: PortfolioConfig =
            toml::from_str(raw).map_err(|e| format!("invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config file, or fall back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_toml(&raw)
    }

    fn validate(&self) -> Result<(), String> {
        if !crate::format::is_valid_date_pattern(&self.date_format) {
            return Err(format!("invalid date_format '{}'", self.date_format));
        }
        if self.excerpt_max_chars == 0 {
            return Err("excerpt_max_chars must be at least 1".into());
        }
        let mut seen: Vec<String> = Vec::new();
        for rule in &self.categories {
            if rule.name.trim().is_empty() {
                return Err("category rule with empty name".into());
            }
            let slug = rule.slug();
            if slug == "all" {
                return Err(format!("category '{}' collides with the 'all' filter", rule.name));
            }
            if seen.contains(&slug) {
                return Err(format!("duplicate category rule '{}'", rule.name));
            }
            seen.push(slug);
        }
        Ok(())
    }

    pub fn resolve_category<'a>(&'a self, category: &str) -> Resolved<'a> {
        category::resolve(&self.categories, &self.default_accent, category)
    }

    /// Anchor id of the filter control for `slug` ("all" or a category slug).
    pub fn filter_anchor(&self, slug: &str) -> String {
        format!("{}{}", self.anchors.filter_prefix, slug)
    }
}
