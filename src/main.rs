use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

use folio::app::App;
use folio::config::PortfolioConfig;
use folio::{boot, export, page};

fn config_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("FOLIO_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("folio.toml"))
}

fn run() -> Result<(), String> {
    let config = PortfolioConfig::load(&config_path())?;
    boot::run(&config)?;

    let mut doc = page::blank_document(&config);
    let app = App::boot(config, &mut doc)?;

    let out = Path::new(&app.config().output_dir).to_path_buf();
    let files = export::write_site(&app, &doc, &out)?;
    info!("Done: {} files in {}", files, out.display());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("folio: {}", e);
        process::exit(1);
    }
}
