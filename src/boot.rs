use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::PortfolioConfig;
use crate::loader::ContentSource;

/// Subdirectories of the output directory that are created if missing
const OUTPUT_SUBDIRS: &[&str] = &["reader"];

/// Run the export boot checks.
/// Creates missing output directories and warns about a missing local content
/// document. Returns an error when the output tree cannot be created or the
/// content source is unusable.
pub fn run(config: &PortfolioConfig) -> Result<(), String> {
    info!("Folio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Output directories ──────────────────────────
    let out = Path::new(&config.output_dir);
    let dirs = std::iter::once(out.to_path_buf()).chain(OUTPUT_SUBDIRS.iter().map(|d| out.join(d)));
    for dir in dirs {
        if !dir.exists() {
            match fs::create_dir_all(&dir) {
                Ok(_) => info!("  Created directory: {}", dir.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir.display(), e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Content source ──────────────────────────────
    match ContentSource::parse(&config.content) {
        Ok(ContentSource::File(path)) => {
            if !path.exists() {
                warn!("  Missing content document: {} (page will show the load failure)", path.display());
                warnings += 1;
            }
        }
        Ok(ContentSource::Url(url)) => info!("  Content will be fetched from {}", url),
        Err(e) => {
            error!("  Bad content source: {}", e);
            errors += 1;
        }
    }

    // ── 3. Category rules ──────────────────────────────
    if config.categories.is_empty() {
        warn!("  No category rules configured (only the All filter will be shown)");
        warnings += 1;
    }

    if errors > 0 {
        error!("Boot check failed with {} error(s), {} warning(s)", errors, warnings);
        return Err(format!("boot check failed with {} error(s)", errors));
    }
    info!("Boot check passed ({} warning(s))", warnings);
    Ok(())
}
