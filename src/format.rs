//! Pure text helpers shared by the card and reader views.

use std::fmt::{self, Write};

use crate::models::category::FormatMode;
use crate::models::piece::parse_calendar_date;

/// Markup that is safe to insert as-is: either escaped piece text or
/// static markup produced by the templating layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Static markup built by this crate. Never pass piece text through here.
    pub(crate) fn trusted(markup: impl Into<String>) -> Self {
        SafeHtml(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape markup-significant characters so arbitrary text displays literally.
pub fn escape_for_display(text: &str) -> SafeHtml {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    SafeHtml(out)
}

/// Format a calendar date with a strftime pattern.
/// The date is never converted through a timezone, so the day cannot shift.
/// Unparseable input is returned unchanged.
pub fn format_date(raw: &str, pattern: &str) -> String {
    let Some(date) = parse_calendar_date(raw) else {
        return raw.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

/// True when `pattern` is a strftime pattern chrono can render.
pub fn is_valid_date_pattern(pattern: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

/// Build a short excerpt from a body: line breaks collapse to single spaces,
/// then the text is clipped to `max_chars` characters with a trailing ellipsis.
pub fn derive_excerpt(body: &str, max_chars: usize) -> String {
    let flat = body
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if flat.chars().count() <= max_chars {
        return flat;
    }

    let mut clipped: String = flat.chars().take(max_chars).collect();
    let kept = clipped.trim_end().len();
    clipped.truncate(kept);
    clipped.push('…');
    clipped
}

/// How a body is laid out in the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPlan {
    /// One block whose line breaks must stay visible.
    Verse(String),
    /// Trimmed, non-empty paragraphs.
    Paragraphs(Vec<String>),
}

pub fn segment_body(body: &str, format: FormatMode) -> BodyPlan {
    let body = body.replace("\r\n", "\n");
    match format {
        FormatMode::Poetry => BodyPlan::Verse(body.trim_matches('\n').to_string()),
        FormatMode::Prose => {
            let mut paragraphs = Vec::new();
            let mut current: Vec<&str> = Vec::new();
            for line in body.split('\n') {
                if line.trim().is_empty() {
                    flush_paragraph(&mut current, &mut paragraphs);
                } else {
                    current.push(line);
                }
            }
            flush_paragraph(&mut current, &mut paragraphs);
            BodyPlan::Paragraphs(paragraphs)
        }
    }
}

fn flush_paragraph(lines: &mut Vec<&str>, out: &mut Vec<String>) {
    if lines.is_empty() {
        return;
    }
    let para = lines.join("\n").trim().to_string();
    if !para.is_empty() {
        out.push(para);
    }
    lines.clear();
}
