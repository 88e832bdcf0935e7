//! In-memory document the sidebar annotates.
//!
//! A `Document` ties together a `TextBuffer`, a caret, a whole-line
//! selection, the folded (hidden) line ranges and pixel scroll state. It
//! implements [`TextView`] so the sidebar can drive it directly; the egui
//! text pane renders from the same state. File I/O is in the `io` submodule.

mod io;

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::buffer::TextBuffer;
use crate::cursor::{clamp_position, LineSelection, Position};
use crate::view::TextView;

/// Default height of one text row in pixels.
pub const DEFAULT_LINE_HEIGHT: f32 = 16.0;

/// A single document with its buffer, caret, fold visibility and scroll state.
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer.
    pub buffer: TextBuffer,
    /// Caret position.
    pub caret: Position,
    /// Current whole-line selection, if any.
    pub selection: Option<LineSelection>,
    /// File path on disk, if any.
    pub file_path: Option<PathBuf>,
    /// Display name.
    pub title: String,
    /// Vertical scroll offset in pixels, measured over display rows.
    pub scroll_y: f32,
    /// Whether live file monitoring is active (auto-reload on external changes).
    pub live_monitoring: bool,
    /// Last known file modification time, for change detection.
    pub last_known_mtime: Option<std::time::SystemTime>,
    line_height: f32,
    viewport_height: f32,
    /// Sorted, disjoint runs of hidden logical lines.
    hidden: Vec<RangeInclusive<usize>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Creates an unsaved document holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from(text),
            caret: Position::start(),
            selection: None,
            file_path: None,
            title: "Untitled".to_string(),
            scroll_y: 0.0,
            live_monitoring: false,
            last_known_mtime: None,
            line_height: DEFAULT_LINE_HEIGHT,
            viewport_height: DEFAULT_LINE_HEIGHT * 40.0,
            hidden: Vec::new(),
        }
    }

    /// Sets the row height and viewport height used for pixel mapping.
    pub fn set_metrics(&mut self, line_height: f32, viewport_height: f32) {
        self.line_height = line_height.max(1.0);
        self.viewport_height = viewport_height.max(0.0);
        self.clamp_scroll();
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Replaces the whole content, keeping the caret where it still fits.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = TextBuffer::from(text);
        self.after_content_change();
    }

    fn after_content_change(&mut self) {
        self.caret = clamp_position(&self.buffer, self.caret);
        self.selection = None;
        let line_count = self.buffer.len_lines();
        let ranges = std::mem::take(&mut self.hidden);
        self.hidden = normalize_ranges(ranges, line_count);
        self.clamp_scroll();
    }

    /// Returns the full content.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    /// Runs of logical lines currently hidden by folds.
    pub fn hidden_ranges(&self) -> &[RangeInclusive<usize>] {
        &self.hidden
    }

    /// Returns true if `line` lies inside a hidden run.
    pub fn is_hidden(&self, line: usize) -> bool {
        let idx = self.hidden.partition_point(|r| *r.end() < line);
        self.hidden.get(idx).is_some_and(|r| r.contains(&line))
    }

    /// Number of display rows (logical lines minus hidden lines).
    pub fn row_count(&self) -> usize {
        let hidden: usize = self.hidden.iter().map(|r| r.end() - r.start() + 1).sum();
        self.buffer.len_lines() - hidden
    }

    /// 0-based display row of `line`, or `None` if hidden or out of range.
    pub fn row_of_line(&self, line: usize) -> Option<usize> {
        if line == 0 || line > self.buffer.len_lines() || self.is_hidden(line) {
            return None;
        }
        let hidden_before: usize = self
            .hidden
            .iter()
            .take_while(|r| *r.end() < line)
            .map(|r| r.end() - r.start() + 1)
            .sum();
        Some(line - 1 - hidden_before)
    }

    /// Logical line shown on 0-based display row `row`.
    pub fn line_at_row(&self, row: usize) -> Option<usize> {
        if row >= self.row_count() {
            return None;
        }
        let mut line = row + 1;
        for range in &self.hidden {
            if *range.start() <= line {
                line += range.end() - range.start() + 1;
            } else {
                break;
            }
        }
        Some(line)
    }

    /// Viewport-relative y of the top of `line`'s row, if the line is shown.
    pub fn line_top(&self, line: usize) -> Option<f32> {
        self.row_of_line(line)
            .map(|row| row as f32 * self.line_height - self.scroll_y)
    }

    /// Largest scroll offset: the last row may scroll up to the top.
    pub fn max_scroll(&self) -> f32 {
        (self.row_count().saturating_sub(1) as f32 * self.line_height).max(0.0)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }
}

/// Sorts, clamps to `2..=line_count` and merges overlapping or adjacent ranges.
fn normalize_ranges(
    mut ranges: Vec<RangeInclusive<usize>>,
    line_count: usize,
) -> Vec<RangeInclusive<usize>> {
    ranges.sort_by_key(|r| *r.start());
    let mut merged: Vec<RangeInclusive<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        let start = (*range.start()).max(2);
        let end = (*range.end()).min(line_count);
        if start > end {
            continue;
        }
        match merged.last_mut() {
            Some(last) if start <= last.end() + 1 => {
                if end > *last.end() {
                    *last = *last.start()..=end;
                }
            }
            _ => merged.push(start..=end),
        }
    }
    merged
}

impl TextView for Document {
    fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn read_content(&self) -> String {
        self.content()
    }

    fn pixel_to_line(&self, y: f32) -> Option<usize> {
        let content_y = y + self.scroll_y;
        if content_y < 0.0 {
            return None;
        }
        self.line_at_row((content_y / self.line_height) as usize)
    }

    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_y
    }

    fn row_height(&self) -> f32 {
        self.line_height
    }

    fn is_line_visible(&self, line: usize) -> bool {
        self.line_top(line)
            .is_some_and(|top| top + self.line_height > 0.0 && top < self.viewport_height)
    }

    fn set_selection(&mut self, start_line: usize, end_line: usize) {
        let last = self.buffer.len_lines();
        self.selection = Some(LineSelection::new(
            start_line.clamp(1, last),
            end_line.clamp(1, last),
        ));
    }

    fn set_caret(&mut self, line: usize, col: usize) {
        self.caret = clamp_position(&self.buffer, Position::new(line, col));
    }

    fn scroll_by(&mut self, delta_pixels: f32) {
        self.scroll_y += delta_pixels;
        self.clamp_scroll();
    }

    fn set_hidden_ranges(&mut self, ranges: &[RangeInclusive<usize>]) {
        self.hidden = normalize_ranges(ranges.to_vec(), self.buffer.len_lines());
        self.clamp_scroll();
    }
}
