//! Terminal configuration loaded from `folio.toml`.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working terminal.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{FolioError, Result};

/// One scripted step of the login sequence.
///
/// `{name}` in the message is replaced with the username being logged in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginStep {
    pub delay_ms: u64,
    pub message: String,
}

impl LoginStep {
    pub fn new(delay_ms: u64, message: &str) -> Self {
        Self {
            delay_ms,
            message: message.to_string(),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Top-level terminal configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Domain part of `whoami` and of the prompt.
    pub hostname: String,
    /// Delayed status messages shown between name entry and the shell.
    pub login_steps: Vec<LoginStep>,
    /// Delay between `reset` and the reload that follows it.
    pub reset_delay_ms: u64,
    /// Sentence pool for `typing-test`.
    pub typing_sentences: Vec<String>,
    /// Location of the JSON key-value store standing in for browser storage.
    pub storage_path: PathBuf,
    /// Optional JSON array of press articles seeded into `presse/`.
    pub press_file: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            hostname: "portfolio".to_string(),
            login_steps: default_login_steps(),
            reset_delay_ms: 1500,
            typing_sentences: default_typing_sentences(),
            storage_path: PathBuf::from("folio-storage.json"),
            press_file: None,
        }
    }
}

fn default_login_steps() -> Vec<LoginStep> {
    vec![
        LoginStep::new(600, "Authenticating {name}..."),
        LoginStep::new(800, "Loading user profile..."),
        LoginStep::new(500, "Access granted. Welcome, {name}! Type 'help' to get started."),
    ]
}

fn default_typing_sentences() -> Vec<String> {
    [
        "The quick brown fox jumps over the lazy dog.",
        "Rust makes systems programming safe and productive.",
        "A small terminal can still hide a few surprises.",
        "Practice every day and your typing will improve.",
        "Portfolios are stories told through finished projects.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl TerminalConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.hostname.trim().is_empty() {
            return Err(FolioError::Config("hostname must not be empty".to_string()));
        }
        if self.typing_sentences.is_empty() {
            return Err(FolioError::Config(
                "typing_sentences must contain at least one sentence".to_string(),
            ));
        }
        if self.typing_sentences.iter().any(|s| s.trim().is_empty()) {
            return Err(FolioError::Config(
                "typing_sentences must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }
}
