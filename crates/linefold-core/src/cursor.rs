/// Caret and line-selection model.
use crate::buffer::TextBuffer;

/// A position in the text as line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Position {
    /// 1-based logical line.
    pub line: usize,
    /// 0-based column (char offset within the line).
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Start of the first line.
    pub fn start() -> Self {
        Self::new(1, 0)
    }
}

/// A selection covering whole lines `start_line..=end_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSelection {
    pub start_line: usize,
    pub end_line: usize,
}

impl LineSelection {
    /// Creates a selection, ordering the bounds.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start_line: a.min(b),
            end_line: a.max(b),
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        (self.start_line..=self.end_line).contains(&line)
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Clamps a position into the buffer.
///
/// Lines clamp to `1..=len_lines`; columns clamp to the line's length.
pub fn clamp_position(buffer: &TextBuffer, pos: Position) -> Position {
    let line = pos.line.clamp(1, buffer.len_lines());
    let max_col = buffer.line_len_chars(line - 1).unwrap_or(0);
    Position::new(line, pos.col.min(max_col))
}
