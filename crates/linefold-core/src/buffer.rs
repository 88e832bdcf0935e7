/// Text buffer wrapping `ropey::Rope`.
use std::fmt;

use anyhow::Result;
use ropey::Rope;

/// A text buffer backed by a rope data structure.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl TextBuffer {
    /// Returns the number of lines in the buffer (always at least 1).
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Returns the text of a line (0-indexed) without its trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_text(&self, line_idx: usize) -> Result<String> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        let line = self.rope.line(line_idx).to_string();
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Returns the length of a line in chars, excluding the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of bounds.
    pub fn line_len_chars(&self, line_idx: usize) -> Result<usize> {
        if line_idx >= self.rope.len_lines() {
            anyhow::bail!(
                "line index {} out of bounds (buffer has {} lines)",
                line_idx,
                self.rope.len_lines()
            );
        }
        let line = self.rope.line(line_idx);
        let mut len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len -= 1;
        }
        if len > 0 && line.char(len - 1) == '\r' {
            len -= 1;
        }
        Ok(len)
    }
}
