//! Append-only terminal history.

/// Whether a line was typed by the user or printed by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Input,
    Output,
}

/// One rendered line (or block) of the terminal screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    pub kind: HistoryKind,
    pub text: String,
    /// Prompt path (`~/...`) current when the item was recorded.
    pub path_at_time: String,
}

/// Items are never edited after being pushed; the log is only ever cleared
/// or replaced as a whole.
#[derive(Debug, Clone, Default)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, text: &str, path_at_time: &str) {
        self.push(HistoryKind::Input, text, path_at_time);
    }

    pub fn push_output(&mut self, text: &str, path_at_time: &str) {
        self.push(HistoryKind::Output, text, path_at_time);
    }

    fn push(&mut self, kind: HistoryKind, text: &str, path_at_time: &str) {
        self.items.push(HistoryItem {
            kind,
            text: text.to_string(),
            path_at_time: path_at_time.to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Items recorded at or after `start`; lets a host render only what is new.
    pub fn since(&self, start: usize) -> &[HistoryItem] {
        self.items.get(start..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text of the most recent output item.
    pub fn last_output(&self) -> Option<&str> {
        self.items
            .iter()
            .rev()
            .find(|item| item.kind == HistoryKind::Output)
            .map(|item| item.text.as_str())
    }
}
