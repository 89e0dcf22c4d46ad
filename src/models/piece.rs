use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One writing sample as it appears in the content document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub category: String,
    pub title: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub author_credit: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub submitted_to: Option<String>,
}

impl Piece {
    /// Calendar date of the piece, if the date string parses.
    /// Only the `YYYY-MM-DD` prefix is considered, so full ISO timestamps work too.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

pub(crate) fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

/// Blank optional strings are treated as absent so the renderers can skip them.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
