//! Startup: configuration and press data.

use std::path::Path;

use anyhow::{Context, Result};
use folio_types::config::TerminalConfig;
use folio_vfs::{PressArticle, default_press_articles};

use crate::cli::Cli;

/// Load the config file, then apply command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<TerminalConfig> {
    let mut config = TerminalConfig::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    if let Some(storage) = &cli.storage {
        config.storage_path = storage.clone();
    }
    if let Some(press) = &cli.press {
        config.press_file = Some(press.clone());
    }
    Ok(config)
}

/// Press articles from `path`, or the built-in list when none is given.
pub fn load_press(path: Option<&Path>) -> Result<Vec<PressArticle>> {
    let Some(path) = path else {
        return Ok(default_press_articles());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading press file {}", path.display()))?;
    let articles: Vec<PressArticle> = serde_json::from_str(&text)
        .with_context(|| format!("parsing press file {}", path.display()))?;
    log::info!("Loaded {} press articles from {}", articles.len(), path.display());
    Ok(articles)
}
