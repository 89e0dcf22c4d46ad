use log::{error, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::piece::Piece;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    File(PathBuf),
    Url(url::Url),
}

impl ContentSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("content source is empty".into());
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = url::Url::parse(raw).map_err(|e| format!("invalid content url {}: {}", raw, e))?;
            return Ok(ContentSource::Url(url));
        }
        Ok(ContentSource::File(PathBuf::from(raw)))
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::File(p) => write!(f, "{}", p.display()),
            ContentSource::Url(u) => write!(f, "{}", u),
        }
    }
}

/// Outcome of the one content load a page performs.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loaded(Vec<Piece>),
    Failed(String),
}

/// Parse the content document. Repeated ids keep their first piece.
pub fn parse_document(raw: &str) -> Result<Vec<Piece>, String> {
    let pieces: Vec<Piece> =
        serde_json::from_str(raw).map_err(|e| format!("invalid content document: {}", e))?;

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if seen.insert(piece.id.clone()) {
            unique.push(piece);
        } else {
            warn!("Duplicate piece id '{}' dropped", piece.id);
        }
    }
    Ok(unique)
}

fn fetch(source: &ContentSource, timeout: Duration) -> Result<String, String> {
    match source {
        ContentSource::File(path) => {
            fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))
        }
        ContentSource::Url(url) => {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| e.to_string())?;
            client
                .get(url.as_str())
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
                .map_err(|e| format!("fetch {} failed: {}", url, e))
        }
    }
}

/// Retrieve and parse the collection. Failures are reported, never raised.
pub fn load(source: &ContentSource, timeout: Duration) -> LoadState {
    match fetch(source, timeout).and_then(|raw| parse_document(&raw)) {
        Ok(pieces) => {
            info!("Loaded {} pieces from {}", pieces.len(), source);
            LoadState::Loaded(pieces)
        }
        Err(e) => {
            error!("Failed to load pieces: {}", e);
            LoadState::Failed(e)
        }
    }
}
