//! View models for cards and the reader.
//!
//! Every text field is a [`SafeHtml`], so piece text has already gone
//! through [`escape_for_display`] by the time the templating layer sees it.

use crate::config::{ExcerptStrategy, PortfolioConfig};
use crate::format::{derive_excerpt, escape_for_display, format_date, segment_body, BodyPlan, SafeHtml};
use crate::models::piece::Piece;

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub piece_id: SafeHtml,
    pub category: SafeHtml,
    pub accent: SafeHtml,
    pub title: SafeHtml,
    pub subtitle: Option<SafeHtml>,
    pub excerpt: SafeHtml,
    pub tags: Vec<SafeHtml>,
    pub date: SafeHtml,
    /// Reveal delay in seconds.
    pub delay_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyView {
    Verse(SafeHtml),
    Paragraphs(Vec<SafeHtml>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderView {
    pub category: SafeHtml,
    pub accent: SafeHtml,
    pub title: SafeHtml,
    pub subtitle: Option<SafeHtml>,
    pub author_credit: Option<SafeHtml>,
    pub submitted_to: Option<SafeHtml>,
    pub tags: Vec<SafeHtml>,
    pub date: SafeHtml,
    pub body: BodyView,
}

fn escape_opt(value: &Option<String>) -> Option<SafeHtml> {
    value.as_deref().map(escape_for_display)
}

fn escape_all(values: &[String]) -> Vec<SafeHtml> {
    values.iter().map(|v| escape_for_display(v)).collect()
}

/// Authored excerpt when the strategy allows it, otherwise one derived from the body.
pub fn excerpt_for(piece: &Piece, config: &PortfolioConfig) -> String {
    match (&config.excerpt, &piece.excerpt) {
        (ExcerptStrategy::Authored, Some(authored)) => authored.clone(),
        _ => derive_excerpt(&piece.body, config.excerpt_max_chars),
    }
}

pub fn card_view(piece: &Piece, index: usize, config: &PortfolioConfig) -> CardView {
    let resolved = config.resolve_category(&piece.category);
    CardView {
        piece_id: escape_for_display(&piece.id),
        category: escape_for_display(&piece.category),
        accent: escape_for_display(resolved.accent),
        title: escape_for_display(&piece.title),
        subtitle: escape_opt(&piece.subtitle),
        excerpt: escape_for_display(&excerpt_for(piece, config)),
        tags: escape_all(&piece.tags),
        date: escape_for_display(&format_date(&piece.date, &config.date_format)),
        delay_secs: (index as u64 * config.stagger_ms) as f64 / 1000.0,
    }
}

pub fn reader_view(piece: &Piece, config: &PortfolioConfig) -> ReaderView {
    let resolved = config.resolve_category(&piece.category);
    let body = match segment_body(&piece.body, resolved.format) {
        BodyPlan::Verse(text) => BodyView::Verse(escape_for_display(&text)),
        BodyPlan::Paragraphs(paras) => BodyView::Paragraphs(escape_all(&paras)),
    };
    ReaderView {
        category: escape_for_display(&piece.category),
        accent: escape_for_display(resolved.accent),
        title: escape_for_display(&piece.title),
        subtitle: escape_opt(&piece.subtitle),
        author_credit: escape_opt(&piece.author_credit),
        submitted_to: escape_opt(&piece.submitted_to),
        tags: escape_all(&piece.tags),
        date: escape_for_display(&format_date(&piece.date, &config.date_format)),
        body,
    }
}
