//! Application state and event dispatch.
//!
//! [`App`] owns the loaded collection and the two controllers. Hosts call
//! [`App::boot`] once, then feed events through [`App::dispatch`] one at a
//! time.

use log::{debug, error, info};
use std::time::Duration;

use crate::config::PortfolioConfig;
use crate::dom::Document;
use crate::feed::{CardBinding, Key, Trigger};
use crate::filter::{control_slugs, Filter, FilterController};
use crate::format::SafeHtml;
use crate::loader::{self, ContentSource, LoadState};
use crate::models::piece::Piece;
use crate::reader::{ReaderController, ReaderState};
use crate::render::render_load_failed;

pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    FilterSelected(String),
    CardActivated { index: usize, trigger: Trigger },
    KeyPressed(Key),
    BackdropClicked,
    CloseClicked,
    Scrolled(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Ready,
    LoadFailed(String),
}

pub struct App {
    config: PortfolioConfig,
    pieces: Vec<Piece>,
    phase: Phase,
    filter: FilterController,
    reader: ReaderController,
    bindings: Vec<CardBinding>,
    scrolled: bool,
}

/// Every anchor id the viewer writes to.
pub fn required_anchors(config: &PortfolioConfig) -> Vec<String> {
    let a = &config.anchors;
    let mut ids = vec![
        a.card_grid.clone(),
        a.no_results.clone(),
        a.overlay.clone(),
        a.backdrop.clone(),
        a.close.clone(),
        a.panel.clone(),
        a.content.clone(),
        a.filter_bar.clone(),
        a.body.clone(),
    ];
    ids.extend(control_slugs(config).iter().map(|s| config.filter_anchor(s)));
    ids
}

impl App {
    /// Load the content once, check the host markup, and draw the first feed.
    /// Only a configuration problem is an error; a failed load is rendered.
    pub fn boot(config: PortfolioConfig, doc: &mut dyn Document) -> Result<Self, String> {
        let source = ContentSource::parse(&config.content)?;
        let state = loader::load(&source, Duration::from_secs(config.http_timeout_secs));
        Self::start(config, state, doc)
    }

    /// Like [`App::boot`], for hosts that fetched the content themselves.
    pub fn start(config: PortfolioConfig, state: LoadState, doc: &mut dyn Document) -> Result<Self, String> {
        check_anchors(&config, doc)?;

        let mut app = App {
            config,
            pieces: Vec::new(),
            phase: Phase::Ready,
            filter: FilterController::new(),
            reader: ReaderController::new(),
            bindings: Vec::new(),
            scrolled: false,
        };
        doc.set_attr(&app.config.anchors.overlay, "aria-hidden", "true");

        match state {
            LoadState::Loaded(pieces) => {
                app.pieces = pieces;
                app.bindings = app.filter.apply(&app.pieces, &app.config, doc);
                info!("Viewer ready with {} pieces", app.pieces.len());
            }
            LoadState::Failed(reason) => {
                let anchors = &app.config.anchors;
                doc.set_visible(&anchors.no_results, false);
                doc.set_html(&anchors.card_grid, &render_load_failed());
                app.phase = Phase::LoadFailed(reason);
            }
        }
        Ok(app)
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn active_filter(&self) -> &Filter {
        self.filter.active()
    }

    pub fn reader_state(&self) -> &ReaderState {
        self.reader.state()
    }

    pub fn bindings(&self) -> &[CardBinding] {
        &self.bindings
    }

    fn ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn dispatch(&mut self, event: Event, doc: &mut dyn Document) {
        debug!("event: {:?}", event);
        match event {
            Event::FilterSelected(category) => self.set_filter(&category, doc),
            Event::CardActivated { index, trigger } => self.activate_card(index, &trigger, doc),
            Event::KeyPressed(Key::Escape) | Event::BackdropClicked | Event::CloseClicked => {
                self.close_reader(doc);
            }
            Event::KeyPressed(_) => {}
            Event::Scrolled(offset) => self.on_scroll(offset, doc),
        }
    }

    pub fn set_filter(&mut self, category: &str, doc: &mut dyn Document) {
        if !self.ready() {
            return;
        }
        if let Some(bindings) = self.filter.set_filter(category, &self.pieces, &self.config, doc) {
            self.bindings = bindings;
        }
    }

    /// Run the handler bound to the card at `index`.
    pub fn activate_card(&mut self, index: usize, trigger: &Trigger, doc: &mut dyn Document) {
        if !self.ready() {
            return;
        }
        let target = self
            .bindings
            .get(index)
            .and_then(|b| b.target(trigger))
            .map(str::to_string);
        if let Some(id) = target {
            self.open_reader(&id, doc);
        }
    }

    pub fn open_reader(&mut self, id: &str, doc: &mut dyn Document) -> bool {
        self.reader.open_reader(id, &self.pieces, &self.config, doc)
    }

    pub fn close_reader(&mut self, doc: &mut dyn Document) -> bool {
        self.reader.close_reader(&self.config, doc)
    }

    /// Shadow the filter bar once the page scrolls past the threshold.
    pub fn on_scroll(&mut self, offset: f64, doc: &mut dyn Document) {
        let scrolled = offset > self.config.scroll_shadow_threshold;
        if scrolled != self.scrolled {
            doc.set_class(&self.config.anchors.filter_bar, SCROLLED_CLASS, scrolled);
            self.scrolled = scrolled;
        }
    }

    /// Pre-rendered reader markup for one piece, without touching the overlay state.
    pub fn reader_fragment(&self, id: &str) -> Option<SafeHtml> {
        let piece = self.pieces.iter().find(|p| p.id == id)?;
        Some(crate::render::render_reader(&crate::view::reader_view(piece, &self.config)))
    }
}

fn check_anchors(config: &PortfolioConfig, doc: &dyn Document) -> Result<(), String> {
    let missing: Vec<String> = required_anchors(config)
        .into_iter()
        .filter(|id| !doc.has_anchor(id))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    let msg = format!("host markup is missing anchors: {}", missing.join(", "));
    error!("{}", msg);
    Err(msg)
}
