//! Terminal emulator core.
//!
//! Lines are parsed into a closed [`Command`] enum and evaluated by
//! [`dispatch::evaluate`] against an explicit [`Environment`]. The
//! [`Terminal`] state machine sits in front of the dispatcher and decides how
//! each line is read: as a login name, as editor text, as game input, or as a
//! command.

pub mod achievements;
mod command;
pub mod dispatch;
pub mod editor;
pub mod games;
pub mod history;
pub mod persist;
pub mod preferences;
pub mod session;
mod terminal;
pub mod view;

/// A parsed command line.
pub use command::Command;
/// Static help text listing every command.
pub use command::help_text;
/// Output of a command (text or a signal for the terminal).
pub use dispatch::CommandOutput;
/// State handed to every command.
pub use dispatch::Environment;
/// Append-only history log.
pub use history::{History, HistoryItem, HistoryKind};
/// Injected services, host events and the terminal itself.
pub use terminal::{Services, Terminal, TerminalEvent};
/// Read-only file rendering.
pub use view::{render_view, route_segments};
