//! folio desktop entry point.
//!
//! Runs the portfolio terminal as a line-based shell: stdin lines are
//! submitted to the terminal, new history is printed, and login and reset
//! timers are waited out in real time (or skipped with `--no-delay`).
//! Storage is a JSON file standing in for browser storage.

mod cli;
mod render;
mod setup;

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use folio_platform::{JsonFileStorage, ThreadRandom};
use folio_terminal::{HistoryKind, Services, Terminal, TerminalEvent, render_view, route_segments};
use folio_vfs::path;
use render::{MatrixRain, Painter, view_frame};

const RAIN_WIDTH: usize = 48;
const RAIN_HEIGHT: usize = 10;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = setup::resolve_config(&cli)?;
    let storage = JsonFileStorage::open(&config.storage_path);
    log::info!("Using storage {}", storage.path().display());

    if let Some(route) = &cli.view {
        return print_view(&storage, route);
    }

    let press = setup::load_press(config.press_file.as_deref())?;
    let mut terminal = Terminal::new(config, press, Services::desktop(Box::new(storage)));

    let ansi = io::stdout().is_terminal();
    let mut shell = Shell {
        painter: Painter::new(terminal.preferences(), ansi),
        rain: MatrixRain::new(RAIN_WIDTH, RAIN_HEIGHT),
        rng: ThreadRandom,
        shown: 0,
        ansi,
        echo_input: !io::stdin().is_terminal(),
        no_delay: cli.no_delay,
    };

    let mut out = io::stdout().lock();
    shell.settle(&mut terminal, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        terminal.submit(&line);
        shell.settle(&mut terminal, &mut out)?;
    }
    log::info!("Input closed, exiting");
    Ok(())
}

/// Serve one file through the view route and exit.
fn print_view(storage: &JsonFileStorage, route: &str) -> Result<()> {
    let segments = route_segments(route);
    match render_view(storage, segments.as_slice()) {
        Some(content) => {
            println!("{}", view_frame(&path::display(&segments), &content));
            Ok(())
        },
        None => anyhow::bail!("not found: {}", path::display(&segments)),
    }
}

/// Printing state of the host shell.
struct Shell {
    painter: Painter,
    rain: MatrixRain,
    rng: ThreadRandom,
    /// History items already printed.
    shown: usize,
    ansi: bool,
    /// Print typed lines too, for piped input that the tty does not echo.
    echo_input: bool,
    no_delay: bool,
}

impl Shell {
    /// Print everything new, then run pending timers until none is left.
    fn settle(&mut self, terminal: &mut Terminal, out: &mut impl Write) -> Result<()> {
        loop {
            self.flush(terminal, out)?;
            let Some(wait) = terminal.next_deadline() else {
                break;
            };
            if !self.no_delay {
                std::thread::sleep(wait);
            }
            terminal.advance(wait);
        }
        if !self.echo_input {
            write!(out, "{}", self.painter.accent(&terminal.prompt()))?;
        }
        out.flush()?;
        Ok(())
    }

    fn flush(&mut self, terminal: &mut Terminal, out: &mut impl Write) -> Result<()> {
        let history = terminal.history();
        if history.len() < self.shown {
            // History was cleared or rebuilt.
            if self.ansi {
                write!(out, "\x1b[2J\x1b[H")?;
            }
            self.shown = 0;
        }
        for item in history.since(self.shown) {
            if item.kind == HistoryKind::Input && !self.echo_input {
                continue;
            }
            writeln!(out, "{}", self.painter.item(item))?;
        }
        self.shown = history.len();

        for event in terminal.drain_events() {
            self.handle(event, terminal, out)?;
        }
        Ok(())
    }

    fn handle(
        &mut self,
        event: TerminalEvent,
        terminal: &Terminal,
        out: &mut impl Write,
    ) -> Result<()> {
        match event {
            TerminalEvent::ViewRequested { path: segments } => {
                let title = path::display(&segments);
                match render_view(terminal.storage(), segments.as_slice()) {
                    Some(content) => writeln!(out, "{}", view_frame(&title, &content))?,
                    None => writeln!(out, "view: not found: {title}")?,
                }
            },
            TerminalEvent::MatrixStarted => {
                writeln!(out, "{}", self.painter.accent(&self.rain.frame(&mut self.rng)))?;
            },
            TerminalEvent::MatrixStopped => log::debug!("Matrix stopped"),
            TerminalEvent::AchievementUnlocked { id } => log::debug!("Unlocked {id}"),
            TerminalEvent::PreferencesChanged(prefs) => {
                log::info!("Preferences now {} / {}", prefs.color_scheme, prefs.accent);
                self.painter.set_preferences(prefs);
            },
            TerminalEvent::Reloaded => log::info!("Terminal reloaded"),
        }
        Ok(())
    }
}
