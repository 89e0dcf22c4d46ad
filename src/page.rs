//! Host page markup: the anchors the viewer binds to, the filter bar,
//! and CSS custom properties for the category accents.

use crate::app::required_anchors;
use crate::config::PortfolioConfig;
use crate::dom::MemoryDocument;
use crate::format::escape_for_display;

/// Build CSS custom properties for the category accents.
pub fn build_css_variables(config: &PortfolioConfig) -> String {
    let mut vars = format!(
        "    --accent-default: {};\n",
        escape_for_display(&config.default_accent)
    );
    for rule in &config.categories {
        vars.push_str(&format!(
            "    --accent-{}: {};\n",
            rule.slug(),
            escape_for_display(&rule.accent)
        ));
    }
    format!(":root {{\n{}}}", vars)
}

fn class_attr(doc: &MemoryDocument, id: &str, base: &str) -> String {
    let mut classes: Vec<&str> = if base.is_empty() { vec![] } else { vec![base] };
    if let Some(node) = doc.node(id) {
        classes.extend(node.classes.iter().map(String::as_str));
    }
    if classes.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, classes.join(" "))
    }
}

fn hidden_attr(doc: &MemoryDocument, id: &str) -> &'static str {
    if doc.is_visible(id) { "" } else { " hidden" }
}

fn filter_bar(config: &PortfolioConfig, doc: &MemoryDocument) -> String {
    let mut html = String::new();
    let labels = std::iter::once(("all".to_string(), "All".to_string()))
        .chain(config.categories.iter().map(|r| (r.slug(), r.name.clone())));
    for (slug, label) in labels {
        let id = config.filter_anchor(&slug);
        html.push_str(&format!(
            "\n        <button type=\"button\" id=\"{id}\"{class} data-filter=\"{label}\">{label}</button>",
            id = escape_for_display(&id),
            class = class_attr(doc, &id, "filter-btn"),
            label = escape_for_display(&label),
        ));
    }
    html
}

/// A document with every anchor the viewer needs, all empty.
pub fn blank_document(config: &PortfolioConfig) -> MemoryDocument {
    MemoryDocument::with_anchors(required_anchors(config))
}

/// Render the host page around the current state of `doc`.
pub fn render_page(config: &PortfolioConfig, doc: &MemoryDocument) -> String {
    let a = &config.anchors;
    let id = |s: &str| escape_for_display(s);
    let overlay_hidden = doc.attr(&a.overlay, "aria-hidden").unwrap_or("true");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body id="{body}"{body_class}>
    <nav id="{filter_bar}"{bar_class}>{filters}
    </nav>
    <main>
        <section id="{grid}"{grid_class}>
{cards}
        </section>
        <p id="{no_results}"{no_results_hidden}>Nothing here yet.</p>
    </main>
    <div id="{overlay}"{overlay_class} aria-hidden="{overlay_hidden}">
        <div id="{backdrop}" class="reader-backdrop"></div>
        <div id="{panel}" class="reader-panel">
            <button type="button" id="{close}" class="reader-close" aria-label="Close">&times;</button>
            <div id="{content}" class="reader-content">{reader}</div>
        </div>
    </div>
</body>
</html>
"#,
        title = escape_for_display(&config.site_title),
        css = build_css_variables(config),
        body = id(&a.body),
        body_class = class_attr(doc, &a.body, ""),
        filter_bar = id(&a.filter_bar),
        bar_class = class_attr(doc, &a.filter_bar, "filter-bar"),
        filters = filter_bar(config, doc),
        grid = id(&a.card_grid),
        grid_class = class_attr(doc, &a.card_grid, "card-grid"),
        cards = doc.html(&a.card_grid),
        no_results = id(&a.no_results),
        no_results_hidden = hidden_attr(doc, &a.no_results),
        overlay = id(&a.overlay),
        overlay_class = class_attr(doc, &a.overlay, "reader-overlay"),
        overlay_hidden = escape_for_display(overlay_hidden),
        backdrop = id(&a.backdrop),
        panel = id(&a.panel),
        close = id(&a.close),
        content = id(&a.content),
        reader = doc.html(&a.content),
    )
}
