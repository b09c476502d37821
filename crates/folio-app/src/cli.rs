//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "The portfolio site's terminal, in your shell")]
pub struct Cli {
    /// Terminal configuration file; a missing file means defaults
    #[arg(long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// JSON key-value file standing in for browser storage
    #[arg(long, env = "FOLIO_STORAGE")]
    pub storage: Option<PathBuf>,

    /// JSON array of press articles to seed into presse/
    #[arg(long)]
    pub press: Option<PathBuf>,

    /// Run login and reset timers instantly
    #[arg(long)]
    pub no_delay: bool,

    /// Print a stored file through the view route (e.g. /view/README.md) and exit
    #[arg(long)]
    pub view: Option<String>,
}
