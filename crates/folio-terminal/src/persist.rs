//! Best-effort persistence of terminal state to client storage.
//!
//! Failures are logged and swallowed: the in-memory state stays
//! authoritative for the rest of the session.

use folio_platform::Storage;
use folio_types::error::Result;
use folio_vfs::FsTree;

use crate::achievements::AchievementBook;
use crate::preferences::{Accent, ColorScheme, Preferences};

pub const FILESYSTEM_KEY: &str = "terminalFileSystem";
pub const USERNAME_KEY: &str = "terminalUsername";
pub const ACHIEVEMENTS_KEY: &str = "unlockedAchievements";
pub const COLOR_SCHEME_KEY: &str = "colorScheme";
pub const ACCENT_KEY: &str = "accentTheme";

/// Read the persisted filesystem. `None` when absent, unreadable or corrupt.
pub fn load_filesystem_from(storage: &dyn Storage) -> Option<FsTree> {
    let text = read(storage, FILESYSTEM_KEY)?;
    match FsTree::from_json(&text) {
        Ok(tree) => Some(tree),
        Err(e) => {
            log::warn!("Discarding persisted filesystem: {e}");
            None
        },
    }
}

fn read(storage: &dyn Storage, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            None
        },
    }
}

fn report(key: &str, result: Result<()>) {
    if let Err(e) = result {
        log::warn!("Failed to write {key}: {e}");
    }
}

pub struct Persistence {
    storage: Box<dyn Storage>,
}

impl Persistence {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn load_filesystem(&self) -> Option<FsTree> {
        load_filesystem_from(self.storage.as_ref())
    }

    pub fn save_filesystem(&mut self, tree: &FsTree) {
        match tree.to_json() {
            Ok(text) => report(FILESYSTEM_KEY, self.storage.set(FILESYSTEM_KEY, &text)),
            Err(e) => log::warn!("Failed to serialize filesystem: {e}"),
        }
    }

    /// A stored blank name counts as no name.
    pub fn load_username(&self) -> Option<String> {
        read(self.storage.as_ref(), USERNAME_KEY).filter(|name| !name.trim().is_empty())
    }

    pub fn save_username(&mut self, username: &str) {
        report(USERNAME_KEY, self.storage.set(USERNAME_KEY, username));
    }

    pub fn clear_username(&mut self) {
        report(USERNAME_KEY, self.storage.remove(USERNAME_KEY));
    }

    pub fn load_achievements(&self) -> AchievementBook {
        let Some(text) = read(self.storage.as_ref(), ACHIEVEMENTS_KEY) else {
            return AchievementBook::new();
        };
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(ids) => AchievementBook::from_ids(ids),
            Err(e) => {
                log::warn!("Discarding persisted achievements: {e}");
                AchievementBook::new()
            },
        }
    }

    pub fn save_achievements(&mut self, book: &AchievementBook) {
        match serde_json::to_string(&book.ids()) {
            Ok(text) => report(ACHIEVEMENTS_KEY, self.storage.set(ACHIEVEMENTS_KEY, &text)),
            Err(e) => log::warn!("Failed to serialize achievements: {e}"),
        }
    }

    /// Unknown stored values fall back to the defaults.
    pub fn load_preferences(&self) -> Preferences {
        let storage = self.storage.as_ref();
        let color_scheme = read(storage, COLOR_SCHEME_KEY)
            .and_then(|v| v.parse::<ColorScheme>().ok())
            .unwrap_or_default();
        let accent = read(storage, ACCENT_KEY)
            .and_then(|v| v.parse::<Accent>().ok())
            .unwrap_or_default();
        Preferences {
            color_scheme,
            accent,
        }
    }

    pub fn save_preferences(&mut self, prefs: &Preferences) {
        report(
            COLOR_SCHEME_KEY,
            self.storage.set(COLOR_SCHEME_KEY, prefs.color_scheme.as_str()),
        );
        report(ACCENT_KEY, self.storage.set(ACCENT_KEY, prefs.accent.as_str()));
    }

    /// Wipe every key, including ones this terminal does not own.
    pub fn clear_all(&mut self) {
        report("storage", self.storage.clear());
    }
}
