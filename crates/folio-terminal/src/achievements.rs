//! Achievement catalogue and the set of unlocked achievements.

use std::collections::BTreeSet;

pub const LOGIN: &str = "terminal-login";
pub const NUMBER_GUESSER: &str = "number-guesser";
pub const TYPING_MASTER: &str = "typing-master";
pub const RED_PILL: &str = "red-pill";
pub const EDITOR: &str = "editor";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CATALOGUE: [Achievement; 5] = [
    Achievement {
        id: LOGIN,
        title: "Hello, Operator",
        description: "Log in to the terminal.",
    },
    Achievement {
        id: NUMBER_GUESSER,
        title: "Mind Reader",
        description: "Win the number guessing game.",
    },
    Achievement {
        id: TYPING_MASTER,
        title: "Typing Master",
        description: "Finish the typing test with over 90% accuracy and 30 WPM.",
    },
    Achievement {
        id: RED_PILL,
        title: "Red Pill",
        description: "Enter the matrix.",
    },
    Achievement {
        id: EDITOR,
        title: "Author",
        description: "Save a file with nano.",
    },
];

pub fn find(id: &str) -> Option<&'static Achievement> {
    CATALOGUE.iter().find(|a| a.id == id)
}

/// Unlocked achievement ids. Unlocking is idempotent.
///
/// The persisted set is shared with the rest of the site, so ids outside
/// [`CATALOGUE`] are kept and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementBook {
    unlocked: BTreeSet<String>,
}

impl AchievementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted ids, including ids unknown to the terminal.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unlocked = ids
            .into_iter()
            .filter(|id| !id.as_ref().is_empty())
            .map(|id| id.as_ref().to_string())
            .collect();
        Self { unlocked }
    }

    /// Returns `true` only when `id` is known and was not yet unlocked.
    pub fn unlock(&mut self, id: &str) -> bool {
        if find(id).is_none() {
            log::warn!("Ignoring unknown achievement {id}");
            return false;
        }
        self.unlocked.insert(id.to_string())
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.unlocked.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Human-readable listing for the `achievements` command.
    pub fn summary(&self) -> String {
        let earned = CATALOGUE
            .iter()
            .filter(|a| self.is_unlocked(a.id))
            .count();
        let mut out = format!("Achievements ({earned}/{}):", CATALOGUE.len());
        for achievement in &CATALOGUE {
            let mark = if self.is_unlocked(achievement.id) {
                "[x]"
            } else {
                "[ ]"
            };
            out.push_str(&format!(
                "\n  {mark} {:16} {}",
                achievement.title, achievement.description
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut book = AchievementBook::new();
        assert!(book.unlock(RED_PILL));
        assert!(!book.unlock(RED_PILL));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn unknown_ids_ignored() {
        let mut book = AchievementBook::new();
        assert!(!book.unlock("made-up"));
        assert!(book.is_empty());
    }

    #[test]
    fn from_ids_keeps_foreign_ids() {
        let book = AchievementBook::from_ids(["editor", "blog-reader", "editor", ""]);
        assert_eq!(
            book.ids(),
            vec!["blog-reader".to_string(), "editor".to_string()]
        );
        assert!(book.is_unlocked("blog-reader"));
    }

    #[test]
    fn summary_counts_only_catalogue() {
        let book = AchievementBook::from_ids(["blog-reader", RED_PILL]);
        let summary = book.summary();
        assert!(summary.starts_with("Achievements (1/5):"));
        assert!(!summary.contains("blog-reader"));
    }

    #[test]
    fn catalogue_ids_unique() {
        let ids: BTreeSet<&str> = CATALOGUE.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), CATALOGUE.len());
    }

    #[test]
    fn summary_marks_unlocked() {
        let mut book = AchievementBook::new();
        book.unlock(LOGIN);
        let summary = book.summary();
        assert!(summary.starts_with("Achievements (1/5):"));
        assert!(summary.contains("[x] Hello, Operator"));
        assert!(summary.contains("[ ] Red Pill"));
    }
}
