/// The text widget the sidebar is attached to.
use std::ops::RangeInclusive;

/// Operations the sidebar needs from the text buffer/widget it annotates.
///
/// Lines are 1-based logical lines. The buffer content and line count are
/// read-only from the sidebar's point of view; the only writes are caret,
/// selection, scroll and hidden-range updates.
pub trait TextView {
    /// Number of logical lines in the buffer.
    fn line_count(&self) -> usize;

    /// Full buffer content.
    fn read_content(&self) -> String;

    /// Logical line under viewport-relative pixel row `y`.
    ///
    /// `y` may lie outside the viewport; returns `None` when it falls above
    /// the first or below the last line of content.
    fn pixel_to_line(&self, y: f32) -> Option<usize>;

    /// Height of the visible viewport in pixels.
    fn viewport_height(&self) -> f32;

    /// Pixels scrolled past the top of the first display row.
    fn scroll_offset(&self) -> f32;

    /// Height of one display row in pixels.
    fn row_height(&self) -> f32;

    /// Returns true if `line` is currently drawn on screen.
    fn is_line_visible(&self, line: usize) -> bool;

    /// Selects full lines `start_line..=end_line`.
    fn set_selection(&mut self, start_line: usize, end_line: usize);

    /// Moves the caret; out-of-range positions are clamped by the view.
    fn set_caret(&mut self, line: usize, col: usize);

    /// Scrolls vertically by `delta_pixels` (negative scrolls up).
    fn scroll_by(&mut self, delta_pixels: f32);

    /// Replaces the set of logical line ranges hidden by folds.
    fn set_hidden_ranges(&mut self, ranges: &[RangeInclusive<usize>]);
}
