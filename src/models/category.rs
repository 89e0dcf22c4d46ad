use serde::{Deserialize, Serialize};

/// How a category's body text is laid out in the reader.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatMode {
    /// Literal line breaks are kept.
    Poetry,
    /// Blank-line separated paragraphs.
    #[default]
    Prose,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryRule {
    pub name: String,
    pub accent: String,
    #[serde(default)]
    pub format: FormatMode,
}

impl CategoryRule {
    pub fn new(name: &str, accent: &str, format: FormatMode) -> Self {
        CategoryRule {
            name: name.to_string(),
            accent: accent.to_string(),
            format,
        }
    }

    /// Slug used for filter control ids and CSS variable names.
    pub fn slug(&self) -> String {
        slug::slugify(&self.name)
    }

    /// The rule set the portfolio ships with.
    pub fn defaults() -> Vec<Self> {
        vec![
            CategoryRule::new("Poetry", "#e6356f", FormatMode::Poetry),
            CategoryRule::new("Opinion", "#f59e42", FormatMode::Prose),
            CategoryRule::new("Essays", "#2dd4bf", FormatMode::Prose),
        ]
    }
}

/// Accent + formatting resolved for one piece's category.
/// Unknown categories get the default accent and prose formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub accent: &'a str,
    pub format: FormatMode,
}

pub fn resolve<'a>(rules: &'a [CategoryRule], default_accent: &'a str, category: &str) -> Resolved<'a> {
    match rules.iter().find(|r| r.name == category) {
        Some(rule) => Resolved {
            accent: &rule.accent,
            format: rule.format,
        },
        None => Resolved {
            accent: default_accent,
            format: FormatMode::Prose,
        },
    }
}
