use log::debug;

use crate::config::PortfolioConfig;
use crate::dom::Document;
use crate::format::SafeHtml;
use crate::models::piece::Piece;
use crate::render::render_cards;
use crate::view::card_view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Map a host key name (`KeyboardEvent.key` style) to a [`Key`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// How a card was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Pointer,
    Key(Key),
}

/// The activation handler bound to one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBinding {
    pub index: usize,
    pub piece_id: String,
}

impl CardBinding {
    /// Piece to open for this trigger. Pointer, Enter and Space are equivalent.
    pub fn target(&self, trigger: &Trigger) -> Option<&str> {
        match trigger {
            Trigger::Pointer | Trigger::Key(Key::Enter) | Trigger::Key(Key::Space) => {
                Some(&self.piece_id)
            }
            Trigger::Key(_) => None,
        }
    }
}

/// Newest first; undated pieces sink to the end, ties keep document order.
pub fn sort_newest_first(pieces: &mut [&Piece]) {
    pieces.sort_by(|a, b| b.calendar_date().cmp(&a.calendar_date()));
}

/// Draw the feed into the card grid and return one binding per card.
pub fn render(pieces: &[&Piece], config: &PortfolioConfig, doc: &mut dyn Document) -> Vec<CardBinding> {
    let anchors = &config.anchors;

    if pieces.is_empty() {
        doc.set_html(&anchors.card_grid, &SafeHtml::default());
        doc.set_visible(&anchors.no_results, true);
        return Vec::new();
    }
    doc.set_visible(&anchors.no_results, false);

    let mut ordered: Vec<&Piece> = pieces.to_vec();
    if config.sort_by_date {
        sort_newest_first(&mut ordered);
    }

    let cards: Vec<_> = ordered
        .iter()
        .enumerate()
        .map(|(i, piece)| card_view(piece, i, config))
        .collect();
    doc.set_html(&anchors.card_grid, &render_cards(&cards));

    debug!("Rendered {} cards", cards.len());

    ordered
        .iter()
        .enumerate()
        .map(|(index, piece)| CardBinding {
            index,
            piece_id: piece.id.clone(),
        })
        .collect()
}
