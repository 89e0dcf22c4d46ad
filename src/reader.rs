use log::debug;

use crate::config::PortfolioConfig;
use crate::dom::Document;
use crate::models::piece::Piece;
use crate::render::render_reader;
use crate::view::reader_view;

pub const OPEN_CLASS: &str = "open";
pub const BODY_OPEN_CLASS: &str = "reader-open";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReaderState {
    #[default]
    Closed,
    Open { piece_id: String },
}

#[derive(Debug, Default)]
pub struct ReaderController {
    state: ReaderState,
}

impl ReaderController {
    pub fn new() -> Self {
        ReaderController {
            state: ReaderState::Closed,
        }
    }

    pub fn state(&self) -> &ReaderState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ReaderState::Open { .. })
    }

    /// Show a piece. Unknown ids leave the reader as it was.
    /// Opening while already open swaps the content in place.
    pub fn open_reader(
        &mut self,
        id: &str,
        pieces: &[Piece],
        config: &PortfolioConfig,
        doc: &mut dyn Document,
    ) -> bool {
        let Some(piece) = pieces.iter().find(|p| p.id == id) else {
            debug!("open_reader: no piece with id '{}'", id);
            return false;
        };

        let anchors = &config.anchors;
        doc.set_html(&anchors.content, &render_reader(&reader_view(piece, config)));
        doc.scroll_to_top(&anchors.panel);

        if !self.is_open() {
            doc.set_class(&anchors.overlay, OPEN_CLASS, true);
            doc.set_attr(&anchors.overlay, "aria-hidden", "false");
            doc.set_class(&anchors.body, BODY_OPEN_CLASS, true);
        }
        self.state = ReaderState::Open {
            piece_id: piece.id.clone(),
        };
        true
    }

    /// Close the reader and give scrolling back to the page. No-op when closed.
    pub fn close_reader(&mut self, config: &PortfolioConfig, doc: &mut dyn Document) -> bool {
        if !self.is_open() {
            return false;
        }
        let anchors = &config.anchors;
        doc.set_class(&anchors.overlay, OPEN_CLASS, false);
        doc.set_attr(&anchors.overlay, "aria-hidden", "true");
        doc.set_class(&anchors.body, BODY_OPEN_CLASS, false);
        self.state = ReaderState::Closed;
        true
    }
}
