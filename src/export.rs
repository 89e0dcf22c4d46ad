use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::app::App;
use crate::dom::MemoryDocument;
use crate::page::render_page;

/// File names for each piece's reader fragment, in input order.
/// Ids that slugify to an empty or already used name get the index appended.
pub fn fragment_names<'a, I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used = HashSet::new();
    let mut names = Vec::new();
    for (index, id) in ids.into_iter().enumerate() {
        let slug = slug::slugify(id);
        let mut stem = if slug.is_empty() { format!("piece-{}", index) } else { slug };
        while used.contains(&stem) {
            stem = format!("{}-{}", stem, index);
        }
        names.push(format!("{}.html", stem));
        used.insert(stem);
    }
    names
}

fn write(path: &Path, contents: &str) -> Result<(), String> {
    fs::write(path, contents).map_err(|e| format!("cannot write {}: {}", path.display(), e))
}

/// Write the booted page, one reader fragment per piece, and the collection.
/// Returns the number of files written.
pub fn write_site(app: &App, doc: &MemoryDocument, out_dir: &Path) -> Result<usize, String> {
    let reader_dir = out_dir.join("reader");
    fs::create_dir_all(&reader_dir)
        .map_err(|e| format!("cannot create {}: {}", reader_dir.display(), e))?;

    write(&out_dir.join("index.html"), &render_page(app.config(), doc))?;
    let mut written = 1;

    let names = fragment_names(app.pieces().iter().map(|p| p.id.as_str()));
    for (piece, name) in app.pieces().iter().zip(&names) {
        if let Some(fragment) = app.reader_fragment(&piece.id) {
            write(&reader_dir.join(name), fragment.as_str())?;
            written += 1;
        }
    }

    let json = serde_json::to_string_pretty(app.pieces()).map_err(|e| e.to_string())?;
    write(&out_dir.join("pieces.json"), &json)?;
    written += 1;

    info!("Exported {} files to {}", written, out_dir.display());
    Ok(written)
}
