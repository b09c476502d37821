//! Line editor opened by `nano`.

/// Commands recognised inside the editor; every other line is text.
pub const SAVE: &str = ":save";
pub const CANCEL: &str = ":cancel";
pub const CLEAR: &str = ":clear";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorInput<'a> {
    Save,
    Cancel,
    /// Empty the buffer, dropping the pre-loaded content.
    Clear,
    Line(&'a str),
}

impl<'a> EditorInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            SAVE => Self::Save,
            CANCEL => Self::Cancel,
            CLEAR => Self::Clear,
            _ => Self::Line(line),
        }
    }
}

/// An open buffer bound to a resolved target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    pub path: Vec<String>,
    buffer: String,
    /// Whether the buffer has received any text; distinguishes an empty
    /// buffer from one holding a single empty line.
    touched: bool,
}

impl Editor {
    pub fn open(path: Vec<String>, content: &str) -> Self {
        Self {
            path,
            buffer: content.to_string(),
            touched: !content.is_empty(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn push_line(&mut self, line: &str) {
        if self.touched {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
        self.touched = true;
    }

    /// Replace the whole buffer, as a multi-line editing surface would.
    pub fn set_buffer(&mut self, content: &str) {
        self.buffer = content.to_string();
        self.touched = !content.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(EditorInput::parse(":save"), EditorInput::Save);
        assert_eq!(EditorInput::parse("  :cancel "), EditorInput::Cancel);
        assert_eq!(EditorInput::parse(":clear"), EditorInput::Clear);
        assert_eq!(EditorInput::parse("text :save"), EditorInput::Line("text :save"));
    }

    #[test]
    fn lines_join_with_newlines() {
        let mut editor = Editor::open(vec!["a.txt".to_string()], "");
        editor.push_line("first");
        editor.push_line("");
        editor.push_line("third");
        assert_eq!(editor.buffer(), "first\n\nthird");
    }

    #[test]
    fn existing_content_is_extended() {
        let mut editor = Editor::open(vec!["a.txt".to_string()], "old");
        editor.push_line("new");
        assert_eq!(editor.buffer(), "old\nnew");
    }

    #[test]
    fn set_buffer_replaces() {
        let mut editor = Editor::open(vec![], "old");
        editor.set_buffer("");
        editor.push_line("x");
        assert_eq!(editor.buffer(), "x");
    }
}
