#![cfg(test)]

use std::io::Write;

use crate::app::{App, Event, Phase};
use crate::config::PortfolioConfig;
use crate::dom::{Document, MemoryDocument, Op};
use crate::export;
use crate::feed::{Key, Trigger};
use crate::filter::{Filter, ACTIVE_CLASS};
use crate::loader::{parse_document, LoadState};
use crate::models::piece::Piece;
use crate::page::blank_document;
use crate::reader::{ReaderState, BODY_OPEN_CLASS, OPEN_CLASS};
use crate::render::LOAD_FAILED_TEXT;

const PIECES: &str = r#"[
    {"id": "tide", "category": "Poetry", "title": "Tide", "body": "salt line\nsecond line",
     "tags": ["sea"], "date": "2024-03-05", "excerpt": "A short poem."},
    {"id": "quiet", "category": "Essays", "title": "On Quiet", "subtitle": "notes",
     "body": "First para.\n\n  Second para.  ", "tags": ["calm", "sound"], "date": "2023-11-20",
     "authorCredit": "with R. Lee", "submittedTo": "The Review"},
    {"id": "ember", "category": "Poetry", "title": "Ember", "body": "glow\n  and ash",
     "tags": [], "date": "2024-06-01"},
    {"id": "raw", "category": "Essays", "title": "<b>x</b>", "body": "<script>alert(1)</script>",
     "date": "2022-01-15"}
]"#;

fn pieces() -> Vec<Piece> {
    parse_document(PIECES).unwrap()
}

fn booted() -> (App, MemoryDocument) {
    let config = PortfolioConfig::default();
    let mut doc = blank_document(&config);
    let app = App::start(config, LoadState::Loaded(pieces()), &mut doc).unwrap();
    (app, doc)
}

fn grid(doc: &MemoryDocument) -> &str {
    doc.html("cardGrid")
}

fn card_count(doc: &MemoryDocument) -> usize {
    grid(doc).matches(r#"<article class="card""#).count()
}

fn open_id(app: &App) -> Option<&str> {
    match app.reader_state() {
        ReaderState::Open { piece_id } => Some(piece_id),
        ReaderState::Closed => None,
    }
}

// ═══════════════════════════════════════════════════════════
// Feed
// ═══════════════════════════════════════════════════════════

#[test]
fn feed_one_card_per_piece() {
    let (app, doc) = booted();
    assert_eq!(card_count(&doc), 4);
    assert_eq!(app.bindings().len(), 4);
    assert!(!doc.is_visible("noResults"));
}

#[test]
fn feed_every_binding_opens_its_piece() {
    let (mut app, mut doc) = booted();
    let bindings = app.bindings().to_vec();
    for binding in bindings {
        app.dispatch(
            Event::CardActivated { index: binding.index, trigger: Trigger::Pointer },
            &mut doc,
        );
        assert_eq!(open_id(&app), Some(binding.piece_id.as_str()));
        assert!(grid(&doc).contains(&format!(r#"data-piece-id="{}""#, binding.piece_id)));
    }
}

#[test]
fn feed_sorted_newest_first() {
    let (app, doc) = booted();
    let order: Vec<&str> = app.bindings().iter().map(|b| b.piece_id.as_str()).collect();
    assert_eq!(order, vec!["ember", "tide", "quiet", "raw"]);

    let html = grid(&doc);
    let ember = html.find("Ember").unwrap();
    let tide = html.find("Tide").unwrap();
    assert!(ember < tide);
    assert!(html.contains("animation-delay:0s"));
    assert!(html.contains("animation-delay:0.08s"));
}

#[test]
fn feed_keeps_document_order_when_sorting_disabled() {
    let config = PortfolioConfig { sort_by_date: false, ..PortfolioConfig::default() };
    let mut doc = blank_document(&config);
    let app = App::start(config, LoadState::Loaded(pieces()), &mut doc).unwrap();
    let order: Vec<&str> = app.bindings().iter().map(|b| b.piece_id.as_str()).collect();
    assert_eq!(order, vec!["tide", "quiet", "ember", "raw"]);
}

#[test]
fn feed_card_contents() {
    let (_, doc) = booted();
    let html = grid(&doc);
    assert!(html.contains("Mar 5, 2024"));
    assert!(html.contains("A short poem."));
    assert!(html.contains(r#"<p class="card-subtitle">notes</p>"#));
    assert!(html.contains(r#"<span class="card-tag">sound</span>"#));
    assert!(html.contains("--card-accent:#e6356f"));
    // derived excerpt for a piece without one
    assert!(html.contains("glow and ash"));
}

#[test]
fn feed_escapes_piece_text() {
    let (_, doc) = booted();
    let html = grid(&doc);
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(!html.contains("<b>x</b>"));
    assert!(!html.contains("<script>"));
}

#[test]
fn feed_piece_without_optional_fields() {
    let doc_json = r#"[{"id": 1, "category": "Opinion", "title": "Bare", "body": "Just text.", "date": "2021-05-09"}]"#;
    let config = PortfolioConfig::default();
    let mut doc = blank_document(&config);
    let mut app = App::start(config, LoadState::Loaded(parse_document(doc_json).unwrap()), &mut doc).unwrap();
    assert_eq!(card_count(&doc), 1);
    assert!(!grid(&doc).contains("card-subtitle"));
    assert!(!grid(&doc).contains("card-tag\""));

    assert!(app.open_reader("1", &mut doc));
    let reader = doc.html("readerContent");
    assert!(!reader.contains("reader-author"));
    assert!(!reader.contains("reader-submitted"));
    assert!(reader.contains("<p>Just text.</p>"));
}

#[test]
fn feed_empty_collection_shows_empty_state() {
    let config = PortfolioConfig::default();
    let mut doc = blank_document(&config);
    let app = App::start(config, LoadState::Loaded(vec![]), &mut doc).unwrap();
    assert!(doc.is_visible("noResults"));
    assert_eq!(card_count(&doc), 0);
    assert!(app.bindings().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Filters
// ═══════════════════════════════════════════════════════════

#[test]
fn filter_all_matches_unfiltered_render() {
    let (mut app, mut doc) = booted();
    let initial = grid(&doc).to_string();
    app.set_filter("Poetry", &mut doc);
    app.set_filter("all", &mut doc);
    assert_eq!(grid(&doc), initial);
    assert_eq!(app.active_filter(), &Filter::All);
}

#[test]
fn filter_category_only_shows_that_category() {
    let (mut app, mut doc) = booted();
    app.dispatch(Event::FilterSelected("Poetry".into()), &mut doc);
    assert_eq!(card_count(&doc), 2);
    assert_eq!(grid(&doc).matches(r#"<div class="card-category">Poetry</div>"#).count(), 2);
    for binding in app.bindings() {
        let piece = app.pieces().iter().find(|p| p.id == binding.piece_id).unwrap();
        assert_eq!(piece.category, "Poetry");
    }
}

#[test]
fn filter_reselect_toggles_back_to_all() {
    let (mut app, mut doc) = booted();
    app.set_filter("Essays", &mut doc);
    assert_eq!(card_count(&doc), 2);
    app.set_filter("Essays", &mut doc);
    assert_eq!(app.active_filter(), &Filter::All);
    assert_eq!(card_count(&doc), 4);
    assert!(doc.has_class("filter-all", ACTIVE_CLASS));
    assert!(!doc.has_class("filter-essays", ACTIVE_CLASS));
}

#[test]
fn filter_exactly_one_active_control() {
    let (mut app, mut doc) = booted();
    let controls = ["filter-all", "filter-poetry", "filter-opinion", "filter-essays"];
    let active = |doc: &MemoryDocument| controls.iter().filter(|c| doc.has_class(c, ACTIVE_CLASS)).count();

    assert_eq!(active(&doc), 1);
    assert!(doc.has_class("filter-all", ACTIVE_CLASS));
    app.set_filter("Poetry", &mut doc);
    assert_eq!(active(&doc), 1);
    assert!(doc.has_class("filter-poetry", ACTIVE_CLASS));
    app.set_filter("Opinion", &mut doc);
    assert_eq!(active(&doc), 1);
    assert!(doc.has_class("filter-opinion", ACTIVE_CLASS));
}

#[test]
fn filter_empty_result_shows_empty_state() {
    let (mut app, mut doc) = booted();
    app.set_filter("Opinion", &mut doc);
    assert!(doc.is_visible("noResults"));
    assert_eq!(card_count(&doc), 0);
    assert!(app.bindings().is_empty());

    app.set_filter("all", &mut doc);
    assert!(!doc.is_visible("noResults"));
}

#[test]
fn filter_unknown_category_ignored() {
    let (mut app, mut doc) = booted();
    app.set_filter("Poetry", &mut doc);
    doc.clear_journal();
    app.set_filter("Fiction", &mut doc);
    assert_eq!(app.active_filter(), &Filter::Category("Poetry".into()));
    assert!(doc.journal().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Reader overlay
// ═══════════════════════════════════════════════════════════

#[test]
fn reader_open_sets_overlay_state() {
    let (mut app, mut doc) = booted();
    doc.scroll("readerPanel", 480.0);
    assert_eq!(doc.attr("readerOverlay", "aria-hidden"), Some("true"));

    assert!(app.open_reader("quiet", &mut doc));
    assert!(doc.has_class("readerOverlay", OPEN_CLASS));
    assert!(doc.has_class("body", BODY_OPEN_CLASS));
    assert_eq!(doc.attr("readerOverlay", "aria-hidden"), Some("false"));
    assert_eq!(doc.node("readerPanel").unwrap().scroll_top, 0.0);

    let reader = doc.html("readerContent");
    assert!(reader.contains("<p>First para.</p><p>Second para.</p>"));
    assert!(reader.contains("Submitted to The Review"));
    assert!(reader.contains("with R. Lee"));
    assert!(reader.contains("Nov 20, 2023"));
    assert!(reader.contains("color:#2dd4bf"));
}

#[test]
fn reader_poetry_keeps_line_breaks() {
    let (mut app, mut doc) = booted();
    app.open_reader("ember", &mut doc);
    let reader = doc.html("readerContent");
    assert!(reader.contains("reader-body poetry"));
    assert!(reader.contains("glow\n  and ash"));
    assert!(reader.contains("white-space:pre-wrap"));
}

#[test]
fn reader_escapes_body() {
    let (mut app, mut doc) = booted();
    app.open_reader("raw", &mut doc);
    let reader = doc.html("readerContent");
    assert!(reader.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!reader.contains("<script>"));
}

#[test]
fn reader_unknown_id_stays_closed() {
    let (mut app, mut doc) = booted();
    doc.clear_journal();
    assert!(!app.open_reader("gone", &mut doc));
    assert_eq!(app.reader_state(), &ReaderState::Closed);
    assert!(doc.journal().is_empty());
}

#[test]
fn reader_switch_piece_without_closing() {
    let (mut app, mut doc) = booted();
    app.open_reader("tide", &mut doc);
    doc.clear_journal();
    app.open_reader("quiet", &mut doc);

    assert_eq!(open_id(&app), Some("quiet"));
    assert!(doc.has_class("readerOverlay", OPEN_CLASS));
    let reader = doc.html("readerContent");
    assert!(reader.contains("On Quiet"));
    assert!(!reader.contains("Tide"));
    assert!(!reader.contains("salt line"));
    assert!(!doc
        .journal()
        .iter()
        .any(|op| *op == Op::Class("readerOverlay".into(), OPEN_CLASS.into(), false)));
}

#[test]
fn reader_each_close_trigger_closes() {
    let triggers = [Event::BackdropClicked, Event::CloseClicked, Event::KeyPressed(Key::Escape)];
    for trigger in triggers {
        let (mut app, mut doc) = booted();
        app.open_reader("tide", &mut doc);
        app.dispatch(trigger.clone(), &mut doc);
        assert_eq!(app.reader_state(), &ReaderState::Closed, "{:?}", trigger);
        assert!(!doc.has_class("readerOverlay", OPEN_CLASS));
        assert!(!doc.has_class("body", BODY_OPEN_CLASS));
        assert_eq!(doc.attr("readerOverlay", "aria-hidden"), Some("true"));
    }
}

#[test]
fn reader_close_when_closed_is_noop() {
    let (mut app, mut doc) = booted();
    doc.clear_journal();
    app.dispatch(Event::KeyPressed(Key::Escape), &mut doc);
    assert!(doc.journal().is_empty());
}

#[test]
fn reader_keyboard_activation_matches_pointer() {
    for key in [Key::Enter, Key::Space] {
        let (mut app, mut doc) = booted();
        app.dispatch(Event::CardActivated { index: 1, trigger: Trigger::Key(key) }, &mut doc);
        assert_eq!(open_id(&app), Some("tide"));
    }

    let (mut app, mut doc) = booted();
    app.dispatch(
        Event::CardActivated { index: 1, trigger: Trigger::Key(Key::from_name("a")) },
        &mut doc,
    );
    assert_eq!(app.reader_state(), &ReaderState::Closed);
    app.dispatch(Event::CardActivated { index: 99, trigger: Trigger::Pointer }, &mut doc);
    assert_eq!(app.reader_state(), &ReaderState::Closed);
}

#[test]
fn reader_bindings_follow_filter() {
    let (mut app, mut doc) = booted();
    app.set_filter("Essays", &mut doc);
    app.activate_card(0, &Trigger::Pointer, &mut doc);
    assert_eq!(open_id(&app), Some("quiet"));
}

#[test]
fn key_names() {
    assert_eq!(Key::from_name(" "), Key::Space);
    assert_eq!(Key::from_name("Esc"), Key::Escape);
    assert_eq!(Key::from_name("Enter"), Key::Enter);
    assert_eq!(Key::from_name("Tab"), Key::Other("Tab".into()));
}

// ═══════════════════════════════════════════════════════════
// Boot, failures, scroll
// ═══════════════════════════════════════════════════════════

#[test]
fn boot_missing_anchor_is_error() {
    let config = PortfolioConfig::default();
    let mut doc = MemoryDocument::with_anchors(["cardGrid", "noResults"]);
    let err = App::start(config, LoadState::Loaded(pieces()), &mut doc).err().unwrap();
    assert!(err.contains("readerOverlay"));
    assert!(err.contains("filter-poetry"));
}

#[test]
fn boot_load_failure_renders_message_and_filters_inert() {
    let config = PortfolioConfig::default();
    let mut doc = blank_document(&config);
    let mut app = App::start(config, LoadState::Failed("offline".into()), &mut doc).unwrap();
    assert_eq!(app.phase(), &Phase::LoadFailed("offline".into()));
    assert!(grid(&doc).contains(LOAD_FAILED_TEXT));
    assert!(!doc.is_visible("noResults"));

    app.dispatch(Event::FilterSelected("Poetry".into()), &mut doc);
    assert_eq!(app.active_filter(), &Filter::All);
    assert!(grid(&doc).contains(LOAD_FAILED_TEXT));
    app.dispatch(Event::CardActivated { index: 0, trigger: Trigger::Pointer }, &mut doc);
    assert_eq!(app.reader_state(), &ReaderState::Closed);
}

#[test]
fn boot_reads_content_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PIECES.as_bytes()).unwrap();
    let config = PortfolioConfig {
        content: file.path().to_string_lossy().into_owned(),
        ..PortfolioConfig::default()
    };
    let mut doc = blank_document(&config);
    let app = App::boot(config, &mut doc).unwrap();
    assert_eq!(app.phase(), &Phase::Ready);
    assert_eq!(card_count(&doc), 4);
}

#[test]
fn boot_missing_content_file_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = PortfolioConfig {
        content: dir.path().join("pieces.json").to_string_lossy().into_owned(),
        ..PortfolioConfig::default()
    };
    let mut doc = blank_document(&config);
    let app = App::boot(config, &mut doc).unwrap();
    assert!(matches!(app.phase(), Phase::LoadFailed(_)));
    assert!(grid(&doc).contains(LOAD_FAILED_TEXT));
}

#[test]
fn scroll_shadow_threshold() {
    let (mut app, mut doc) = booted();
    app.dispatch(Event::Scrolled(40.0), &mut doc);
    assert!(!doc.has_class("filterBar", "scrolled"));
    app.dispatch(Event::Scrolled(101.0), &mut doc);
    assert!(doc.has_class("filterBar", "scrolled"));

    doc.clear_journal();
    app.dispatch(Event::Scrolled(300.0), &mut doc);
    assert!(doc.journal().is_empty());

    app.dispatch(Event::Scrolled(100.0), &mut doc);
    assert!(!doc.has_class("filterBar", "scrolled"));
}

#[test]
fn custom_anchor_ids() {
    let config = PortfolioConfig::from_toml(
        "[anchors]\ncard_grid = \"feed\"\nfilter_prefix = \"f-\"\n",
    )
    .unwrap();
    let mut doc = blank_document(&config);
    assert!(doc.has_anchor("f-all"));
    let mut app = App::start(config, LoadState::Loaded(pieces()), &mut doc).unwrap();
    app.set_filter("poetry", &mut doc);
    assert!(doc.has_class("f-poetry", ACTIVE_CLASS));
    assert_eq!(doc.html("feed").matches(r#"<article class="card""#).count(), 2);
}

// ═══════════════════════════════════════════════════════════
// Export
// ═══════════════════════════════════════════════════════════

#[test]
fn export_writes_page_fragments_and_collection() {
    let (app, doc) = booted();
    let dir = tempfile::tempdir().unwrap();
    let written = export::write_site(&app, &doc, dir.path()).unwrap();
    assert_eq!(written, 6);

    let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains(r#"data-piece-id="ember""#));
    assert!(index.contains(r#"id="filter-all" class="filter-btn active""#));
    assert!(index.contains(r#"<p id="noResults" hidden>"#));

    let fragment = std::fs::read_to_string(dir.path().join("reader/quiet.html")).unwrap();
    assert!(fragment.contains("On Quiet"));

    let json = std::fs::read_to_string(dir.path().join("pieces.json")).unwrap();
    assert_eq!(parse_document(&json).unwrap(), pieces());
}

#[test]
fn export_fragment_names() {
    assert_eq!(
        export::fragment_names(["On Quiet", "???", "tide"]),
        vec!["on-quiet.html", "piece-1.html", "tide.html"]
    );
}

#[test]
fn export_fragment_names_never_collide() {
    let names = export::fragment_names(["On Quiet", "on-quiet", "on quiet", "on-quiet-1"]);
    assert_eq!(names, vec!["on-quiet.html", "on-quiet-1.html", "on-quiet-2.html", "on-quiet-1-3.html"]);
}

#[test]
fn export_keeps_fragment_for_each_piece_with_similar_ids() {
    let doc_json = r#"[
        {"id": "On Quiet", "category": "Essays", "title": "First", "body": "one", "date": "2024-01-01"},
        {"id": "on-quiet", "category": "Essays", "title": "Second", "body": "two", "date": "2024-02-01"}
    ]"#;
    let config = PortfolioConfig::default();
    let mut doc = blank_document(&config);
    let app = App::start(config, LoadState::Loaded(parse_document(doc_json).unwrap()), &mut doc).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let written = export::write_site(&app, &doc, dir.path()).unwrap();
    assert_eq!(written, 4);

    let fragments = std::fs::read_dir(dir.path().join("reader")).unwrap().count();
    assert_eq!(fragments, 2);
    let first = std::fs::read_to_string(dir.path().join("reader/on-quiet.html")).unwrap();
    let second = std::fs::read_to_string(dir.path().join("reader/on-quiet-1.html")).unwrap();
    assert!(first.contains("First"));
    assert!(second.contains("Second"));
}
