//! The closed set of terminal commands and line parsing.

/// One parsed command line.
///
/// Arguments stay raw strings; paths are resolved at evaluation time against
/// the session's current folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Reset,
    Whoami,
    Logout,
    Mode(Option<String>),
    Theme(Option<String>),
    Date,
    Echo(String),
    Matrix,
    Game,
    TypingTest,
    Ls(Option<String>),
    Cd(Option<String>),
    Pwd,
    Cat(Option<String>),
    Touch(Option<String>),
    Mkdir(Option<String>),
    Rm(Option<String>),
    Nano(Option<String>),
    View(Option<String>),
    Achievements,
    Exit,
    /// Raw input of a line whose first word is not a command.
    Unknown(String),
}

/// Name, usage and description of every command, in `help` order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("help", "help", "Show this list"),
    ("clear", "clear", "Clear the screen"),
    ("reset", "reset", "Wipe all saved data and reload"),
    ("whoami", "whoami", "Show the current user"),
    ("logout", "logout", "Log out and forget the username"),
    ("mode", "mode <dark|light>", "Switch the color scheme"),
    ("theme", "theme <red|blue|green>", "Switch the accent color"),
    ("date", "date", "Show the current date and time"),
    ("echo", "echo <text>", "Print text"),
    ("matrix", "matrix", "Enter the matrix"),
    ("game", "game", "Play the number guessing game"),
    ("typing-test", "typing-test", "Measure your typing speed"),
    ("ls", "ls [path]", "List a folder"),
    ("cd", "cd [path]", "Change folder (no path: home)"),
    ("pwd", "pwd", "Show the current folder"),
    ("cat", "cat <path>", "Print a file"),
    ("touch", "touch <path>", "Create an empty file"),
    ("mkdir", "mkdir <path>", "Create a folder"),
    ("rm", "rm <path>", "Remove a file or an empty folder"),
    ("nano", "nano <path>", "Edit a file (:save, :clear, :cancel)"),
    ("view", "view <path>", "Open a file in a read-only view"),
    ("achievements", "achievements", "List your achievements"),
    ("exit", "exit", "Leave the running game"),
];

/// Usage string for a command name.
pub fn usage(name: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|(_, usage, _)| *usage)
        .unwrap_or("")
}

/// Static `help` text.
pub fn help_text() -> String {
    let mut out = String::from("Available commands:");
    for (_, usage, description) in COMMANDS {
        out.push_str(&format!("\n  {usage:24} {description}"));
    }
    out
}

/// `rest` with its first character (the separator) removed.
fn after_separator(rest: &str) -> &str {
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

impl Command {
    /// Parse a submitted line. Returns `None` for a blank line.
    ///
    /// Words are split on whitespace; the first selects the command
    /// case-insensitively. Quotes carry no meaning. `echo` keeps the rest of
    /// the line after one separator, so runs of spaces survive.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let word = words.next()?;
        let name = word.to_lowercase();
        let args: Vec<&str> = words.collect();
        let first = || args.first().map(|s| s.to_string());

        let command = match name.as_str() {
            "help" => Self::Help,
            "clear" => Self::Clear,
            "reset" => Self::Reset,
            "whoami" => Self::Whoami,
            "logout" => Self::Logout,
            "mode" => Self::Mode(first()),
            "theme" => Self::Theme(first()),
            "date" => Self::Date,
            "echo" => Self::Echo(after_separator(&line[word.len()..]).to_string()),
            "matrix" => Self::Matrix,
            "game" => Self::Game,
            "typing-test" => Self::TypingTest,
            "ls" => Self::Ls(first()),
            "cd" => Self::Cd(first()),
            "pwd" => Self::Pwd,
            "cat" => Self::Cat(first()),
            "touch" => Self::Touch(first()),
            "mkdir" => Self::Mkdir(first()),
            "rm" => Self::Rm(first()),
            "nano" => Self::Nano(first()),
            "view" => Self::View(first()),
            "achievements" => Self::Achievements,
            "exit" => Self::Exit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }

    /// The command word, as used in error prefixes.
    pub fn name(&self) -> &str {
        match self {
            Self::Help => "help",
            Self::Clear => "clear",
            Self::Reset => "reset",
            Self::Whoami => "whoami",
            Self::Logout => "logout",
            Self::Mode(_) => "mode",
            Self::Theme(_) => "theme",
            Self::Date => "date",
            Self::Echo(_) => "echo",
            Self::Matrix => "matrix",
            Self::Game => "game",
            Self::TypingTest => "typing-test",
            Self::Ls(_) => "ls",
            Self::Cd(_) => "cd",
            Self::Pwd => "pwd",
            Self::Cat(_) => "cat",
            Self::Touch(_) => "touch",
            Self::Mkdir(_) => "mkdir",
            Self::Rm(_) => "rm",
            Self::Nano(_) => "nano",
            Self::View(_) => "view",
            Self::Achievements => "achievements",
            Self::Exit => "exit",
            Self::Unknown(raw) => raw,
        }
    }

    /// Whether a successful run changes the filesystem tree.
    pub fn mutates_filesystem(&self) -> bool {
        matches!(self, Self::Touch(_) | Self::Mkdir(_) | Self::Rm(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_none() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn name_is_case_insensitive() {
        assert_eq!(Command::parse("LS"), Some(Command::Ls(None)));
        assert_eq!(Command::parse("Help"), Some(Command::Help));
    }

    #[test]
    fn first_argument_taken() {
        assert_eq!(
            Command::parse("cd  projekte  extra"),
            Some(Command::Cd(Some("projekte".to_string())))
        );
    }

    #[test]
    fn arguments_keep_case() {
        assert_eq!(
            Command::parse("cat README.md"),
            Some(Command::Cat(Some("README.md".to_string())))
        );
    }

    #[test]
    fn echo_keeps_inner_spacing() {
        assert_eq!(
            Command::parse("echo a   b"),
            Some(Command::Echo("a   b".to_string()))
        );
        assert_eq!(
            Command::parse("  ECHO  indented "),
            Some(Command::Echo(" indented".to_string()))
        );
        assert_eq!(Command::parse("echo"), Some(Command::Echo(String::new())));
    }

    #[test]
    fn quotes_are_literal() {
        assert_eq!(
            Command::parse("touch \"my file\""),
            Some(Command::Touch(Some("\"my".to_string())))
        );
    }

    #[test]
    fn unknown_keeps_raw_input() {
        let cmd = Command::parse("  frobnicate --now ").unwrap();
        assert_eq!(cmd, Command::Unknown("frobnicate --now".to_string()));
        assert_eq!(cmd.name(), "frobnicate --now");
    }

    #[test]
    fn typing_test_name() {
        assert_eq!(Command::parse("typing-test"), Some(Command::TypingTest));
        assert_eq!(Command::TypingTest.name(), "typing-test");
    }

    #[test]
    fn every_listed_command_parses() {
        for (name, ..) in COMMANDS {
            let cmd = Command::parse(name).unwrap();
            assert_eq!(cmd.name(), *name, "{name} parsed as {cmd:?}");
        }
    }

    #[test]
    fn help_lists_every_usage() {
        let help = help_text();
        for (_, usage, _) in COMMANDS {
            assert!(help.contains(usage), "missing {usage}");
        }
    }

    #[test]
    fn usage_lookup() {
        assert_eq!(usage("mode"), "mode <dark|light>");
        assert_eq!(usage("nope"), "");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn blank_iff_no_command(line in "[ a-zA-Z\t-]{0,30}") {
                prop_assert_eq!(Command::parse(&line).is_none(), line.trim().is_empty());
            }

            #[test]
            fn unknown_echoes_trimmed_input(word in "[xyz]{3,8}", rest in "( [a-z]{1,4}){0,3}") {
                let line = format!("  {word}{rest} ");
                prop_assert_eq!(
                    Command::parse(&line),
                    Some(Command::Unknown(line.trim().to_string()))
                );
            }
        }
    }

    #[test]
    fn mutating_commands() {
        assert!(Command::Rm(None).mutates_filesystem());
        assert!(!Command::Cat(None).mutates_filesystem());
        assert!(!Command::Nano(None).mutates_filesystem());
    }
}
