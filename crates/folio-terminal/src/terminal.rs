//! The terminal state machine: routes each submitted line by login state,
//! editor and game, applies command effects, and persists as it goes.

use std::time::Duration;

use folio_platform::{Clock, RandomSource, Storage, SystemClock, ThreadRandom};
use folio_types::config::TerminalConfig;
use folio_vfs::{FsTree, PressArticle, path, seed_tree};

use crate::achievements::{self, AchievementBook};
use crate::command::Command;
use crate::dispatch::{self, CommandOutput, Environment};
use crate::editor::{Editor, EditorInput};
use crate::games::{GameState, GuessOutcome};
use crate::history::History;
use crate::persist::Persistence;
use crate::preferences::Preferences;
use crate::session::{LoginSequence, LoginState, Session};

/// Injected platform services.
pub struct Services {
    pub storage: Box<dyn Storage>,
    pub clock: Box<dyn Clock>,
    pub rng: Box<dyn RandomSource>,
}

impl Services {
    /// Wall clock and thread RNG over the given storage.
    pub fn desktop(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            clock: Box::new(SystemClock),
            rng: Box::new(ThreadRandom),
        }
    }
}

/// Notifications for the host UI, drained with [`Terminal::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// Open the read-only view of a file.
    ViewRequested { path: Vec<String> },
    MatrixStarted,
    MatrixStopped,
    AchievementUnlocked { id: String },
    PreferencesChanged(Preferences),
    /// State was rebuilt from storage after a reset.
    Reloaded,
}

pub struct Terminal {
    config: TerminalConfig,
    press: Vec<PressArticle>,
    persistence: Persistence,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    fs: FsTree,
    session: Session,
    history: History,
    game: GameState,
    editor: Option<Editor>,
    login: Option<LoginSequence>,
    achievements: AchievementBook,
    preferences: Preferences,
    /// Time left until the reload scheduled by `reset`.
    pending_reload: Option<Duration>,
    events: Vec<TerminalEvent>,
}

impl Terminal {
    pub fn new(config: TerminalConfig, press: Vec<PressArticle>, services: Services) -> Self {
        let Services {
            storage,
            clock,
            rng,
        } = services;
        let mut terminal = Self {
            config,
            press,
            persistence: Persistence::new(storage),
            clock,
            rng,
            fs: FsTree::new(),
            session: Session::default(),
            history: History::new(),
            game: GameState::None,
            editor: None,
            login: None,
            achievements: AchievementBook::new(),
            preferences: Preferences::default(),
            pending_reload: None,
            events: Vec::new(),
        };
        terminal.load_state();
        terminal
    }

    /// Rebuild everything from storage, as a fresh page load does.
    fn load_state(&mut self) {
        self.fs = match self.persistence.load_filesystem() {
            Some(tree) => tree,
            None => {
                log::info!("Seeding filesystem with {} press articles", self.press.len());
                let tree = seed_tree(&self.press);
                self.persistence.save_filesystem(&tree);
                tree
            },
        };
        self.session = Session::restored(self.persistence.load_username());
        self.achievements = self.persistence.load_achievements();
        self.preferences = self.persistence.load_preferences();
        self.history.clear();
        self.game = GameState::None;
        self.editor = None;
        self.login = None;
        self.pending_reload = None;

        match self.session.username.clone() {
            Some(name) => {
                log::info!("Restored session for {name}");
                self.output(&format!("Welcome back, {name}! Type 'help' to get started."));
            },
            None => self.output("Welcome! Please enter your name to log in."),
        }
    }

    // -- Input -------------------------------------------------------------

    /// Handle one submitted line.
    pub fn submit(&mut self, line: &str) {
        if self.pending_reload.is_some() {
            log::debug!("Ignoring input while a reload is pending");
            return;
        }
        match self.session.login {
            LoginState::Prompting => self.submit_username(line),
            LoginState::LoggingIn => log::debug!("Ignoring input while logging in"),
            LoginState::LoggedIn => self.submit_logged_in(line),
        }
    }

    fn submit_username(&mut self, line: &str) {
        self.record_input(line);
        let name = line.trim();
        if name.is_empty() {
            self.output("Please enter a name.");
            return;
        }
        log::info!("Logging in {name}");
        self.persistence.save_username(name);
        self.session.username = Some(name.to_string());
        self.session.login = LoginState::LoggingIn;
        self.login = Some(LoginSequence::new(&self.config.login_steps, name));
        // A sequence without steps completes at once.
        self.advance(Duration::ZERO);
    }

    fn submit_logged_in(&mut self, line: &str) {
        if self.editor.is_some() {
            match EditorInput::parse(line) {
                EditorInput::Save => self.editor_save(),
                EditorInput::Cancel => self.editor_cancel(),
                EditorInput::Clear => {
                    self.editor_set_buffer("");
                    self.output("Buffer cleared.");
                },
                EditorInput::Line(text) => {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.push_line(text);
                    }
                },
            }
            return;
        }

        let command = Command::parse(line);
        if command == Some(Command::Clear) {
            self.history.clear();
            return;
        }
        if command == Some(Command::Exit) && self.game.is_active() {
            self.record_input(line);
            self.exit_game();
            return;
        }

        match std::mem::take(&mut self.game) {
            GameState::None => self.run_command(line, command),
            GameState::Matrix => self.game = GameState::Matrix,
            GameState::NumberGuesser(mut game) => {
                self.record_input(line);
                let outcome = game.guess(line);
                self.output(&outcome.message());
                if matches!(outcome, GuessOutcome::Correct { .. }) {
                    self.unlock(achievements::NUMBER_GUESSER);
                } else {
                    self.game = GameState::NumberGuesser(game);
                }
            },
            GameState::TypingTest(test) => {
                self.record_input(line);
                let score = test.finish(line, self.clock.now());
                self.output(&score.message());
                if score.is_success() {
                    self.unlock(achievements::TYPING_MASTER);
                }
            },
        }
    }

    fn exit_game(&mut self) {
        match std::mem::take(&mut self.game) {
            GameState::None => {},
            GameState::NumberGuesser(game) => {
                self.output(&format!("Game over. The number was {}.", game.secret()));
            },
            GameState::TypingTest(_) => self.output("Typing test cancelled."),
            GameState::Matrix => {
                self.events.push(TerminalEvent::MatrixStopped);
                self.output("You have left the matrix.");
            },
        }
    }

    fn run_command(&mut self, line: &str, command: Option<Command>) {
        self.record_input(line);
        let Some(command) = command else {
            return;
        };
        let result = {
            let mut env = Environment {
                session: &mut self.session,
                fs: &mut self.fs,
                clock: self.clock.as_ref(),
                rng: self.rng.as_mut(),
                config: &self.config,
            };
            dispatch::evaluate(&command, &mut env)
        };
        match result {
            Ok(output) => {
                if command.mutates_filesystem() {
                    self.persistence.save_filesystem(&self.fs);
                }
                self.apply(output);
            },
            Err(e) => self.output(&dispatch::format_error(&command, &e)),
        }
    }

    fn apply(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Text(text) => self.output(&text),
            CommandOutput::None => {},
            CommandOutput::Clear => self.history.clear(),
            CommandOutput::Reset => {
                log::info!("Resetting terminal storage");
                self.persistence.clear_all();
                self.output("Resetting terminal...");
                self.pending_reload = Some(self.config.reset_delay());
            },
            CommandOutput::Logout => {
                log::info!("Logging out {}", self.session.username());
                self.persistence.clear_username();
                self.session.logout();
                self.output("Logged out. Please enter your name to log in.");
            },
            CommandOutput::SetColorScheme(scheme) => {
                self.preferences.color_scheme = scheme;
                self.preferences_changed();
                self.output(&format!("Color scheme set to {scheme}."));
            },
            CommandOutput::SetAccent(accent) => {
                self.preferences.accent = accent;
                self.preferences_changed();
                self.output(&format!("Accent color set to {accent}."));
            },
            CommandOutput::StartGame(game) => {
                log::debug!("Starting {}", game.name());
                self.output(&game.intro());
                let matrix = game == GameState::Matrix;
                self.game = game;
                if matrix {
                    self.events.push(TerminalEvent::MatrixStarted);
                    self.unlock(achievements::RED_PILL);
                }
            },
            CommandOutput::OpenEditor { path, content } => {
                self.output(&format!(
                    "Editing {}. Type :save to save, :cancel to discard, :clear to start over.",
                    path::display(&path)
                ));
                self.editor = Some(Editor::open(path, &content));
            },
            CommandOutput::View { path } => {
                self.output(&format!("Opening {} in the viewer.", path::display(&path)));
                self.events.push(TerminalEvent::ViewRequested { path });
            },
            CommandOutput::ListAchievements => {
                let summary = self.achievements.summary();
                self.output(&summary);
            },
        }
    }

    fn preferences_changed(&mut self) {
        self.persistence.save_preferences(&self.preferences);
        self.events
            .push(TerminalEvent::PreferencesChanged(self.preferences));
    }

    fn unlock(&mut self, id: &str) {
        if !self.achievements.unlock(id) {
            return;
        }
        self.persistence.save_achievements(&self.achievements);
        if let Some(achievement) = achievements::find(id) {
            log::info!("Achievement unlocked: {}", achievement.id);
            self.output(&format!("Achievement unlocked: {}", achievement.title));
        }
        self.events
            .push(TerminalEvent::AchievementUnlocked { id: id.to_string() });
    }

    fn record_input(&mut self, line: &str) {
        let at = path::prompt_path(&self.session.cwd);
        self.history.push_input(line, &at);
    }

    fn output(&mut self, text: &str) {
        let at = path::prompt_path(&self.session.cwd);
        self.history.push_output(text, &at);
    }

    // -- Editor ------------------------------------------------------------

    /// Write the buffer to its path and close the editor. If the write fails
    /// the error is reported and the editor stays open.
    pub fn editor_save(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        match self.fs.write_file(&editor.path, editor.buffer()) {
            Ok(()) => {
                self.persistence.save_filesystem(&self.fs);
                self.output(&format!("Saved {}.", path::display(&editor.path)));
                self.unlock(achievements::EDITOR);
            },
            Err(e) => {
                self.output(&format!("nano: {e}"));
                self.editor = Some(editor);
            },
        }
    }

    pub fn editor_cancel(&mut self) {
        if let Some(editor) = self.editor.take() {
            self.output(&format!(
                "Discarded changes to {}.",
                path::display(&editor.path)
            ));
        }
    }

    /// Replace the open buffer wholesale.
    pub fn editor_set_buffer(&mut self, content: &str) {
        if let Some(editor) = self.editor.as_mut() {
            editor.set_buffer(content);
        }
    }

    // -- Time --------------------------------------------------------------

    /// Let `dt` pass: fires due login steps and a due reload.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(remaining) = self.pending_reload {
            if dt >= remaining {
                log::info!("Reloading terminal");
                self.load_state();
                self.events.push(TerminalEvent::Reloaded);
            } else {
                self.pending_reload = Some(remaining - dt);
            }
            return;
        }

        let Some(sequence) = self.login.as_mut() else {
            return;
        };
        let messages = sequence.advance(dt);
        let finished = sequence.is_finished();
        for message in messages {
            self.output(&message);
        }
        if finished {
            self.login = None;
            self.session.login = LoginState::LoggedIn;
            self.unlock(achievements::LOGIN);
        }
    }

    /// Time until the next timed step, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending_reload
            .or_else(|| self.login.as_ref().and_then(LoginSequence::next_deadline))
    }

    // -- Accessors ---------------------------------------------------------

    pub fn prompt(&self) -> String {
        if let Some(editor) = &self.editor {
            return format!("[nano {}] ", path::display(&editor.path));
        }
        match self.session.login {
            LoginState::Prompting => "login: ".to_string(),
            LoginState::LoggingIn => String::new(),
            LoginState::LoggedIn => format!(
                "{}@{}:{}$ ",
                self.session.username(),
                self.config.hostname,
                path::prompt_path(&self.session.cwd)
            ),
        }
    }

    /// `false` while logging in or before a reload.
    pub fn accepts_input(&self) -> bool {
        self.pending_reload.is_none() && self.session.login != LoginState::LoggingIn
    }

    pub fn drain_events(&mut self) -> Vec<TerminalEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn fs(&self) -> &FsTree {
        &self.fs
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn storage(&self) -> &dyn Storage {
        self.persistence.storage()
    }

    pub fn reload_pending(&self) -> bool {
        self.pending_reload.is_some()
    }
}

#[cfg(test)]
mod tests {
    use folio_platform::{FixedRandom, ManualClock, MemoryStorage};
    use folio_types::config::LoginStep;

    use super::*;
    use crate::persist::{ACHIEVEMENTS_KEY, USERNAME_KEY};

    fn config() -> TerminalConfig {
        TerminalConfig {
            login_steps: vec![
                LoginStep::new(10, "Authenticating {name}..."),
                LoginStep::new(10, "Welcome, {name}!"),
            ],
            reset_delay_ms: 100,
            ..TerminalConfig::default()
        }
    }

    fn terminal(store: &MemoryStorage, rng: FixedRandom) -> Terminal {
        let services = Services {
            storage: Box::new(store.clone()),
            clock: Box::new(ManualClock::default()),
            rng: Box::new(rng),
        };
        Terminal::new(config(), Vec::new(), services)
    }

    fn logged_in(store: &MemoryStorage) -> Terminal {
        let mut t = terminal(store, FixedRandom::new([42]));
        t.submit("ada");
        t.advance(Duration::from_secs(1));
        t
    }

    fn last(t: &Terminal) -> &str {
        t.history().last_output().unwrap_or("")
    }

    #[test]
    fn fresh_load_prompts_and_persists_seed() {
        let store = MemoryStorage::new();
        let t = terminal(&store, FixedRandom::default());
        assert_eq!(t.session().login, LoginState::Prompting);
        assert_eq!(t.prompt(), "login: ");
        assert!(store.keys().contains(&crate::persist::FILESYSTEM_KEY.to_string()));
    }

    #[test]
    fn login_sequence_runs_in_order() {
        let store = MemoryStorage::new();
        let mut t = terminal(&store, FixedRandom::default());
        t.submit("  ada  ");
        assert_eq!(t.session().login, LoginState::LoggingIn);
        assert_eq!(store.get(USERNAME_KEY).unwrap().as_deref(), Some("ada"));
        assert!(!t.accepts_input());
        assert_eq!(t.next_deadline(), Some(Duration::from_millis(10)));

        t.submit("ls");
        let before = t.history().len();
        t.advance(Duration::from_millis(10));
        assert_eq!(t.history().since(before)[0].text, "Authenticating ada...");
        assert_eq!(t.session().login, LoginState::LoggingIn);

        t.advance(Duration::from_millis(10));
        assert!(t.session().is_logged_in());
        assert!(t.achievements().is_unlocked(achievements::LOGIN));
        assert_eq!(last(&t), "Achievement unlocked: Hello, Operator");
        assert!(!t.history().items().iter().any(|item| item.text == "ls"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let store = MemoryStorage::new();
        let mut t = terminal(&store, FixedRandom::default());
        t.submit("   ");
        assert_eq!(t.session().login, LoginState::Prompting);
        assert_eq!(last(&t), "Please enter a name.");
        assert!(store.get(USERNAME_KEY).unwrap().is_none());
    }

    #[test]
    fn stored_username_skips_login() {
        let store = MemoryStorage::new();
        logged_in(&store);
        let t = terminal(&store, FixedRandom::default());
        assert!(t.session().is_logged_in());
        assert_eq!(last(&t), "Welcome back, ada! Type 'help' to get started.");
        assert_eq!(t.prompt(), "ada@portfolio:~$ ");
    }

    #[test]
    fn clear_empties_history_even_in_game() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("game");
        t.submit("clear");
        assert!(t.history().is_empty());
        assert!(matches!(t.game(), GameState::NumberGuesser(_)));
    }

    #[test]
    fn number_guesser_flow() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("game");
        t.submit("10");
        assert_eq!(last(&t), "Higher!");
        t.submit("abc");
        assert_eq!(last(&t), "Please enter a whole number.");
        t.submit("42");
        assert!(!t.game().is_active());
        assert!(t.achievements().is_unlocked(achievements::NUMBER_GUESSER));
        assert!(
            t.history()
                .items()
                .iter()
                .any(|item| item.text == "Correct! You found 42 in 2 attempts.")
        );
        assert!(store.get(ACHIEVEMENTS_KEY).unwrap().unwrap().contains("number-guesser"));
    }

    #[test]
    fn exit_leaves_game() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("game");
        t.submit("exit");
        assert!(!t.game().is_active());
        assert_eq!(last(&t), "Game over. The number was 42.");
        t.submit("exit");
        assert_eq!(last(&t), "No game is running.");
    }

    #[test]
    fn matrix_ignores_input_until_exit() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.drain_events();
        t.submit("matrix");
        assert!(t.achievements().is_unlocked(achievements::RED_PILL));
        let len = t.history().len();
        t.submit("ls");
        assert_eq!(t.history().len(), len);
        t.submit("exit");
        assert_eq!(*t.game(), GameState::None);
        let events = t.drain_events();
        assert_eq!(events.first(), Some(&TerminalEvent::MatrixStarted));
        assert_eq!(events.last(), Some(&TerminalEvent::MatrixStopped));
    }

    #[test]
    fn nano_save_and_cancel() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("nano notes.txt");
        assert!(t.editor().is_some());
        t.submit("line one");
        t.submit("line two");
        t.submit(":save");
        assert!(t.editor().is_none());
        t.submit("cat notes.txt");
        assert_eq!(last(&t), "line one\nline two");
        assert!(t.achievements().is_unlocked(achievements::EDITOR));

        t.submit("nano notes.txt");
        t.submit("scratch");
        t.submit(":cancel");
        t.submit("cat notes.txt");
        assert_eq!(last(&t), "line one\nline two");
    }

    #[test]
    fn nano_save_with_missing_parent_keeps_editor() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("nano ghost/notes.txt");
        t.submit("text");
        t.editor_save();
        assert_eq!(last(&t), "nano: no such folder: /ghost");
        assert_eq!(t.editor().map(Editor::buffer), Some("text"));
        t.submit("mkdir ghost");
        assert!(t.editor().is_some());
        t.editor_cancel();
        t.submit("mkdir ghost");
        assert!(t.fs().is_dir(&["ghost"]));
    }

    #[test]
    fn nano_clear_replaces_preloaded_content() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("nano README.md");
        assert!(t.editor().is_some_and(|e| !e.buffer().is_empty()));
        t.submit(":clear");
        assert_eq!(last(&t), "Buffer cleared.");
        assert_eq!(t.editor().map(Editor::buffer), Some(""));
        t.submit("new body");
        t.submit(":save");
        t.submit("cat README.md");
        assert_eq!(last(&t), "new body");
    }

    #[test]
    fn set_buffer_replaces_open_editor() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("nano README.md");
        t.editor_set_buffer("first\nsecond");
        t.submit("third");
        t.submit(":save");
        t.submit("cat README.md");
        assert_eq!(last(&t), "first\nsecond\nthird");

        // No editor open: nothing to replace.
        t.editor_set_buffer("ignored");
        t.submit("cat README.md");
        assert_eq!(last(&t), "first\nsecond\nthird");
    }

    #[test]
    fn mutations_persist_immediately() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("mkdir drafts");
        let reloaded = terminal(&store, FixedRandom::default());
        assert!(reloaded.fs().is_dir(&["drafts"]));
    }

    #[test]
    fn preferences_change_and_persist() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.drain_events();
        t.submit("theme red");
        t.submit("mode purple");
        assert_eq!(last(&t), "mode: unknown mode: purple (use dark or light)");
        assert_eq!(
            t.drain_events(),
            vec![TerminalEvent::PreferencesChanged(t.preferences())]
        );
        let reloaded = terminal(&store, FixedRandom::default());
        assert_eq!(reloaded.preferences().accent, crate::preferences::Accent::Red);
    }

    #[test]
    fn reset_reloads_from_empty_storage() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("touch mine.txt");
        t.submit("reset");
        assert!(store.is_empty());
        assert!(t.reload_pending());
        t.submit("ls");
        assert_eq!(last(&t), "Resetting terminal...");
        t.advance(Duration::from_millis(50));
        assert!(t.reload_pending());
        t.advance(Duration::from_millis(50));
        assert!(!t.reload_pending());
        assert_eq!(t.session().login, LoginState::Prompting);
        assert!(t.fs().lookup(&["mine.txt"]).is_none());
        assert!(t.achievements().is_empty());
        assert_eq!(t.drain_events().last(), Some(&TerminalEvent::Reloaded));
    }

    #[test]
    fn logout_returns_to_prompt() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("cd projekte");
        t.submit("logout");
        assert_eq!(t.session().login, LoginState::Prompting);
        assert!(t.session().cwd.is_empty());
        assert!(store.get(USERNAME_KEY).unwrap().is_none());
    }

    #[test]
    fn view_emits_event() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.drain_events();
        t.submit("view README.md");
        assert_eq!(
            t.drain_events(),
            vec![TerminalEvent::ViewRequested {
                path: vec!["README.md".to_string()]
            }]
        );
    }

    #[test]
    fn history_records_path_at_time() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        t.submit("cd presse");
        t.submit("pwd");
        let items = t.history().items();
        let last_item = &items[items.len() - 1];
        assert_eq!(last_item.text, "/presse");
        assert_eq!(last_item.path_at_time, "~/presse");
    }

    #[test]
    fn unavailable_storage_keeps_session_working() {
        let store = MemoryStorage::new();
        let mut t = logged_in(&store);
        store.set_unavailable(true);
        t.submit("mkdir offline");
        t.submit("ls offline");
        assert_eq!(last(&t), "(empty)");
    }
}
