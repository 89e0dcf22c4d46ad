//! The templating layer: view models in, markup out.
//! Only [`SafeHtml`] values are interpolated here.

use crate::format::SafeHtml;
use crate::view::{BodyView, CardView, ReaderView};

pub const LOAD_FAILED_TEXT: &str = "Unable to load content.";

fn tag_list(tags: &[SafeHtml], class: &str) -> String {
    tags.iter()
        .map(|t| format!(r#"<span class="{}">{}</span>"#, class, t))
        .collect()
}

fn optional_line(value: &Option<SafeHtml>, class: &str, prefix: &str) -> String {
    match value {
        Some(v) => format!(r#"<p class="{}">{}{}</p>"#, class, prefix, v),
        None => String::new(),
    }
}

pub fn render_card(card: &CardView) -> SafeHtml {
    SafeHtml::trusted(format!(
        r#"<article class="card" role="button" tabindex="0" data-piece-id="{id}" style="--card-accent:{accent};animation-delay:{delay}s">
    <div class="card-inner">
        <div class="card-category">{category}</div>
        <h2 class="card-title">{title}</h2>
        {subtitle}
        <p class="card-excerpt">{excerpt}</p>
        <div class="card-meta">
            <div class="card-tags">{tags}</div>
            <span class="card-date">{date}</span>
        </div>
    </div>
</article>"#,
        id = card.piece_id,
        accent = card.accent,
        delay = card.delay_secs,
        category = card.category,
        title = card.title,
        subtitle = optional_line(&card.subtitle, "card-subtitle", ""),
        excerpt = card.excerpt,
        tags = tag_list(&card.tags, "card-tag"),
        date = card.date,
    ))
}

pub fn render_cards(cards: &[CardView]) -> SafeHtml {
    let html: Vec<String> = cards.iter().map(|c| render_card(c).into_string()).collect();
    SafeHtml::trusted(html.join("\n"))
}

fn render_body(body: &BodyView) -> String {
    match body {
        BodyView::Verse(text) => format!(
            r#"<div class="reader-body poetry" style="white-space:pre-wrap">{}</div>"#,
            text
        ),
        BodyView::Paragraphs(paras) => {
            let inner: String = paras.iter().map(|p| format!("<p>{}</p>", p)).collect();
            format!(r#"<div class="reader-body prose">{}</div>"#, inner)
        }
    }
}

pub fn render_reader(view: &ReaderView) -> SafeHtml {
    SafeHtml::trusted(format!(
        r#"<div class="reader-header">
    <div class="reader-category" style="color:{accent}">{category}</div>
    <h1 class="reader-title">{title}</h1>
    {subtitle}
    {author}
    {submitted}
    <div class="reader-tags">{tags}</div>
    <time class="reader-date">{date}</time>
</div>
{body}"#,
        accent = view.accent,
        category = view.category,
        title = view.title,
        subtitle = optional_line(&view.subtitle, "reader-subtitle-text", ""),
        author = optional_line(&view.author_credit, "reader-author", ""),
        submitted = optional_line(&view.submitted_to, "reader-submitted", "Submitted to "),
        tags = tag_list(&view.tags, "reader-tag"),
        date = view.date,
        body = render_body(&view.body),
    ))
}

pub fn render_load_failed() -> SafeHtml {
    SafeHtml::trusted(format!(r#"<p class="load-failed">{}</p>"#, LOAD_FAILED_TEXT))
}
