//! Command evaluation against injected session state.
//!
//! `evaluate` touches nothing but what the `Environment` hands it. Effects on
//! the wider terminal (screen, games, editor, preferences) come back as
//! `CommandOutput` signals for the caller to apply.

use folio_platform::{Clock, RandomSource};
use folio_types::config::TerminalConfig;
use folio_types::error::{FolioError, Result};
use folio_vfs::{FsNode, FsTree, path};

use crate::command::{self, Command};
use crate::games::{GameState, NumberGuesser, SECRET_MAX, SECRET_MIN, TypingTest};
use crate::preferences::{Accent, ColorScheme};
use crate::session::Session;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Text to append to the history.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the history.
    Clear,
    /// Signal to wipe storage and schedule a reload.
    Reset,
    /// Signal to forget the user and return to the login prompt.
    Logout,
    SetColorScheme(ColorScheme),
    SetAccent(Accent),
    StartGame(GameState),
    /// Signal to open the line editor on `path` with `content` loaded.
    OpenEditor { path: Vec<String>, content: String },
    /// Signal to open the read-only view of the file at `path`.
    View { path: Vec<String> },
    ListAchievements,
}

/// Everything a command may read or change.
pub struct Environment<'a> {
    pub session: &'a mut Session,
    pub fs: &'a mut FsTree,
    pub clock: &'a dyn Clock,
    pub rng: &'a mut dyn RandomSource,
    pub config: &'a TerminalConfig,
}

const DATE_FORMAT: &str = "%A, %-d %B %Y, %H:%M:%S";

/// One history line for a failed command.
pub fn format_error(command: &Command, err: &FolioError) -> String {
    match err {
        FolioError::UnknownCommand(_) => err.to_string(),
        _ => format!("{}: {err}", command.name()),
    }
}

fn required<'s>(arg: &'s Option<String>, name: &str) -> Result<&'s str> {
    arg.as_deref()
        .ok_or_else(|| FolioError::Usage(command::usage(name).to_string()))
}

pub fn evaluate(cmd: &Command, env: &mut Environment<'_>) -> Result<CommandOutput> {
    log::debug!("Evaluating {cmd:?} in {}", path::display(&env.session.cwd));
    match cmd {
        Command::Help => Ok(CommandOutput::Text(command::help_text())),
        Command::Clear => Ok(CommandOutput::Clear),
        Command::Reset => Ok(CommandOutput::Reset),
        Command::Logout => Ok(CommandOutput::Logout),
        Command::Whoami => Ok(CommandOutput::Text(format!(
            "{}@{}",
            env.session.username(),
            env.config.hostname
        ))),
        Command::Mode(arg) => {
            let scheme = required(arg, "mode")?.parse::<ColorScheme>()?;
            Ok(CommandOutput::SetColorScheme(scheme))
        },
        Command::Theme(arg) => {
            let accent = required(arg, "theme")?.parse::<Accent>()?;
            Ok(CommandOutput::SetAccent(accent))
        },
        Command::Date => Ok(CommandOutput::Text(
            env.clock.now().format(DATE_FORMAT).to_string(),
        )),
        Command::Echo(text) => Ok(CommandOutput::Text(text.clone())),
        Command::Matrix => Ok(CommandOutput::StartGame(GameState::Matrix)),
        Command::Game => {
            let secret = env.rng.range_inclusive(SECRET_MIN, SECRET_MAX);
            Ok(CommandOutput::StartGame(GameState::NumberGuesser(
                NumberGuesser::new(secret),
            )))
        },
        Command::TypingTest => {
            let pool = &env.config.typing_sentences;
            let target = pool
                .get(env.rng.pick(pool.len()))
                .ok_or_else(|| FolioError::Config("no typing sentences configured".to_string()))?;
            Ok(CommandOutput::StartGame(GameState::TypingTest(
                TypingTest::new(target, env.clock.now()),
            )))
        },
        Command::Ls(arg) => cmd_ls(arg.as_deref(), env),
        Command::Cd(arg) => cmd_cd(arg.as_deref(), env),
        Command::Pwd => Ok(CommandOutput::Text(path::display(&env.session.cwd))),
        Command::Cat(arg) => {
            let target = resolve(required(arg, "cat")?, env);
            Ok(CommandOutput::Text(env.fs.read(&target)?.to_string()))
        },
        Command::Touch(arg) => {
            let target = resolve(required(arg, "touch")?, env);
            env.fs.create_file(&target)?;
            Ok(CommandOutput::None)
        },
        Command::Mkdir(arg) => {
            let target = resolve(required(arg, "mkdir")?, env);
            env.fs.create_dir(&target)?;
            Ok(CommandOutput::None)
        },
        Command::Rm(arg) => {
            let target = resolve(required(arg, "rm")?, env);
            // The root is rejected by the tree itself.
            if !target.is_empty() && env.session.cwd.starts_with(&target) {
                return Err(FolioError::InvalidArgument(format!(
                    "cannot remove the current folder or its parent: {}",
                    path::display(&target)
                )));
            }
            env.fs.remove(&target)?;
            Ok(CommandOutput::None)
        },
        Command::Nano(arg) => {
            let target = resolve(required(arg, "nano")?, env);
            let content = match env.fs.lookup(&target) {
                Some(FsNode::Directory(_)) => {
                    return Err(FolioError::IsADirectory(path::display(&target)));
                },
                Some(FsNode::File(content)) => content.clone(),
                None => String::new(),
            };
            Ok(CommandOutput::OpenEditor {
                path: target,
                content,
            })
        },
        Command::View(arg) => {
            let target = resolve(required(arg, "view")?, env);
            env.fs.read(&target)?;
            Ok(CommandOutput::View { path: target })
        },
        Command::Achievements => Ok(CommandOutput::ListAchievements),
        Command::Exit => Ok(CommandOutput::Text("No game is running.".to_string())),
        Command::Unknown(raw) => Err(FolioError::UnknownCommand(raw.clone())),
    }
}

fn resolve(input: &str, env: &Environment<'_>) -> Vec<String> {
    path::resolve(input, &env.session.cwd)
}

fn cmd_ls(arg: Option<&str>, env: &mut Environment<'_>) -> Result<CommandOutput> {
    let target = match arg {
        Some(input) => resolve(input, env),
        None => env.session.cwd.clone(),
    };
    let entries = env.fs.list(&target).map_err(|e| match e {
        FolioError::NotFound(p) | FolioError::NotADirectory(p) => FolioError::NoSuchFolder(p),
        other => other,
    })?;
    if entries.is_empty() {
        return Ok(CommandOutput::Text("(empty)".to_string()));
    }
    let names: Vec<String> = entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            }
        })
        .collect();
    Ok(CommandOutput::Text(names.join("  ")))
}

fn cmd_cd(arg: Option<&str>, env: &mut Environment<'_>) -> Result<CommandOutput> {
    let target = match arg {
        None | Some("~") => Vec::new(),
        Some(input) => resolve(input, env),
    };
    match env.fs.lookup(&target) {
        Some(FsNode::Directory(_)) => {
            env.session.cwd = target;
            Ok(CommandOutput::None)
        },
        Some(FsNode::File(_)) => Err(FolioError::NotADirectory(path::display(&target))),
        None => Err(FolioError::NoSuchFolder(path::display(&target))),
    }
}
