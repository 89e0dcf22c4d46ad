use log::{info, warn};

use crate::config::PortfolioConfig;
use crate::dom::Document;
use crate::feed::{self, CardBinding};
use crate::models::piece::Piece;

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Slug of the control that represents this filter.
    pub fn slug(&self) -> String {
        match self {
            Filter::All => "all".to_string(),
            Filter::Category(name) => slug::slugify(name),
        }
    }

    pub fn matches(&self, piece: &Piece) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(name) => piece.category == *name,
        }
    }
}

/// Resolve a requested filter against the configured categories.
/// Accepts "all" in any case, a category name, or a category slug.
pub fn parse_filter(requested: &str, config: &PortfolioConfig) -> Option<Filter> {
    let requested = requested.trim();
    if requested.eq_ignore_ascii_case("all") {
        return Some(Filter::All);
    }
    let wanted = slug::slugify(requested);
    config
        .categories
        .iter()
        .find(|r| r.name == requested || r.slug() == wanted)
        .map(|r| Filter::Category(r.name.clone()))
}

pub fn filter_pieces<'a>(pieces: &'a [Piece], filter: &Filter) -> Vec<&'a Piece> {
    pieces.iter().filter(|p| filter.matches(p)).collect()
}

#[derive(Debug, Default)]
pub struct FilterController {
    active: Filter,
}

impl FilterController {
    pub fn new() -> Self {
        FilterController { active: Filter::All }
    }

    pub fn active(&self) -> &Filter {
        &self.active
    }

    /// Work out the next filter. Re-selecting the active category toggles back to All.
    pub fn next(&self, requested: &Filter) -> Filter {
        match requested {
            Filter::Category(_) if *requested == self.active => Filter::All,
            other => other.clone(),
        }
    }

    /// Select a filter and redraw the feed. Returns the new card bindings,
    /// or `None` when the request names no known filter.
    pub fn set_filter(
        &mut self,
        requested: &str,
        pieces: &[Piece],
        config: &PortfolioConfig,
        doc: &mut dyn Document,
    ) -> Option<Vec<CardBinding>> {
        let Some(filter) = parse_filter(requested, config) else {
            warn!("Ignoring unknown filter '{}'", requested);
            return None;
        };
        self.active = self.next(&filter);
        info!("Filter set to '{}'", self.active.slug());
        Some(self.apply(pieces, config, doc))
    }

    /// Mark the active control and render the matching subset.
    pub fn apply(&self, pieces: &[Piece], config: &PortfolioConfig, doc: &mut dyn Document) -> Vec<CardBinding> {
        self.mark_controls(config, doc);
        let subset = filter_pieces(pieces, &self.active);
        feed::render(&subset, config, doc)
    }

    fn mark_controls(&self, config: &PortfolioConfig, doc: &mut dyn Document) {
        let active = self.active.slug();
        for slug in control_slugs(config) {
            let on = slug == active;
            doc.set_class(&config.filter_anchor(&slug), ACTIVE_CLASS, on);
        }
    }
}

/// Slugs of every filter control, "all" first then categories in rule order.
pub fn control_slugs(config: &PortfolioConfig) -> Vec<String> {
    std::iter::once("all".to_string())
        .chain(config.categories.iter().map(|r| r.slug()))
        .collect()
}
