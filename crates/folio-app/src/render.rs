//! Text rendering for the shell host: history lines, the file viewer, and
//! the matrix rain.

use folio_platform::RandomSource;
use folio_terminal::preferences::{Accent, ColorScheme, Preferences};
use folio_terminal::{HistoryItem, HistoryKind};

const RESET: &str = "\x1b[0m";

/// ANSI color for the accent preference.
fn accent_code(accent: Accent) -> &'static str {
    match accent {
        Accent::Red => "\x1b[31m",
        Accent::Blue => "\x1b[34m",
        Accent::Green => "\x1b[32m",
    }
}

/// Wraps text in the accent color when `enabled`. Light mode adds bold.
pub struct Painter {
    prefs: Preferences,
    enabled: bool,
}

impl Painter {
    pub fn new(prefs: Preferences, enabled: bool) -> Self {
        Self { prefs, enabled }
    }

    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    pub fn accent(&self, text: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        let bold = match self.prefs.color_scheme {
            ColorScheme::Light => "\x1b[1m",
            ColorScheme::Dark => "",
        };
        format!("{bold}{}{text}{RESET}", accent_code(self.prefs.accent))
    }

    /// One history item as printed to the shell.
    pub fn item(&self, item: &HistoryItem) -> String {
        match item.kind {
            HistoryKind::Input => {
                let prompt = self.accent(&format!("{}$", item.path_at_time));
                format!("{prompt} {}", item.text)
            },
            HistoryKind::Output => item.text.clone(),
        }
    }
}

/// A file shown in the read-only viewer.
pub fn view_frame(title: &str, content: &str) -> String {
    let width = content
        .lines()
        .map(|line| line.chars().count())
        .chain(std::iter::once(title.chars().count() + 4))
        .max()
        .unwrap_or(0);
    let rule = "-".repeat(width);
    let fill = width.saturating_sub(title.chars().count() + 4);
    let header = format!("-- {title} {}", "-".repeat(fill));
    format!("{header}\n{content}\n{rule}")
}

// ---------------------------------------------------------------------------
// Matrix rain
// ---------------------------------------------------------------------------

const RAIN_CHARS: &str = "01アイウエオカキクケコ日月火水木金土";

/// Falling-glyph frames drawn from a [`RandomSource`].
pub struct MatrixRain {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl MatrixRain {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: RAIN_CHARS.chars().collect(),
        }
    }

    /// One frame: `height` lines of `width` glyphs or spaces.
    pub fn frame(&self, rng: &mut dyn RandomSource) -> String {
        let mut lines = Vec::with_capacity(self.height);
        for _ in 0..self.height {
            let line: String = (0..self.width)
                .map(|_| {
                    let idx = rng.pick(self.glyphs.len() + 2);
                    self.glyphs.get(idx).copied().unwrap_or(' ')
                })
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }
}
