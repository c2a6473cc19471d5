use std::process;

use anyhow::Result;
use tracing::warn;

use critical::{
    config::GameConfig, context::AppContext, logging, presentation::font::BitmapFont,
    shell::AppShell,
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let loaded = GameConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_path());
    if let Err(e) = &loaded {
        warn!("invalid config ({e}), using defaults");
    }

    let font = BitmapFont::load(&config.font_path);
    let mut shell = AppShell::new(AppContext::new(config, font));
    shell.run()
}
