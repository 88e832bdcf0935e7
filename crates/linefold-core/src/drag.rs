//! Drag-selection controller for the line-number gutter.
//!
//! Pressing on a line number selects that line; dragging extends a
//! whole-line selection from the anchor. While the pointer is held above or
//! below the viewport the controller runs an auto-scroll loop on an owned
//! timer: every tick scrolls the view toward the pointer and re-resolves the
//! selection, until the pointer comes back or the button is released.

use std::time::{Duration, Instant};

use crate::sync_map::DisplaySyncMap;
use crate::timer::{TimerId, TimerKind, TimerQueue};
use crate::view::TextView;

/// Default interval between auto-scroll ticks.
pub const DEFAULT_AUTO_SCROLL_TICK: Duration = Duration::from_millis(50);

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// Dragging with the pointer outside the viewport.
    AutoScrolling,
}

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SelectionDrag {
    /// Line the drag started on.
    anchor_line: usize,
    /// Last pointer y, relative to the top of the viewport.
    last_pointer_y: Option<f32>,
    auto_scroll_active: bool,
}

/// Timer-driven drag state machine.
///
/// The controller owns the [`TimerId`] of its pending tick and cancels it on
/// release, on re-entry and in [`cancel`](Self::cancel).
#[derive(Debug)]
pub struct DragSelectionController {
    drag: Option<SelectionDrag>,
    tick: Option<TimerId>,
    tick_interval: Duration,
}

impl Default for DragSelectionController {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_SCROLL_TICK)
    }
}

impl DragSelectionController {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            drag: None,
            tick: None,
            tick_interval,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.drag {
            None => DragPhase::Idle,
            Some(d) if d.auto_scroll_active => DragPhase::AutoScrolling,
            Some(_) => DragPhase::Dragging,
        }
    }

    /// Starts a drag at viewport-relative `y`.
    pub fn pointer_down(
        &mut self,
        y: f32,
        view: &mut dyn TextView,
        map: &DisplaySyncMap,
        timers: &mut TimerQueue,
    ) {
        self.stop_ticking(timers);
        let Some(line) = resolve_line(y, view, map) else {
            self.drag = None;
            return;
        };
        self.drag = Some(SelectionDrag {
            anchor_line: line,
            last_pointer_y: Some(y),
            auto_scroll_active: false,
        });
        apply_selection(line, line, view, map);
        tracing::debug!("Drag started at line {line}");
    }

    /// Extends the selection to the line under `y` and enters or leaves
    /// auto-scroll depending on whether `y` lies outside the viewport.
    pub fn pointer_move(
        &mut self,
        y: f32,
        now: Instant,
        view: &mut dyn TextView,
        map: &DisplaySyncMap,
        timers: &mut TimerQueue,
    ) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.last_pointer_y = Some(y);
        let anchor = drag.anchor_line;
        let outside = y < 0.0 || y > view.viewport_height();

        if let Some(line) = resolve_line(y, view, map) {
            apply_selection(anchor, line, view, map);
        }

        match (outside, drag.auto_scroll_active) {
            (true, false) => {
                drag.auto_scroll_active = true;
                self.tick = Some(timers.schedule(TimerKind::AutoScroll, now));
                tracing::debug!("Auto-scroll started at y={y}");
            }
            (false, true) => {
                drag.auto_scroll_active = false;
                self.stop_ticking(timers);
                tracing::debug!("Auto-scroll stopped, pointer back in viewport");
            }
            _ => {}
        }
    }

    /// Pointer left the gutter vertically while held.
    pub fn pointer_left(
        &mut self,
        y: f32,
        now: Instant,
        view: &mut dyn TextView,
        map: &DisplaySyncMap,
        timers: &mut TimerQueue,
    ) {
        self.pointer_move(y, now, view, map, timers);
    }

    /// Pointer came back into the gutter while held.
    pub fn pointer_entered(
        &mut self,
        y: f32,
        now: Instant,
        view: &mut dyn TextView,
        map: &DisplaySyncMap,
        timers: &mut TimerQueue,
    ) {
        self.pointer_move(y, now, view, map, timers);
    }

    /// Ends the drag. Returns the anchor line of the finished drag, if any.
    pub fn pointer_up(&mut self, timers: &mut TimerQueue) -> Option<usize> {
        self.stop_ticking(timers);
        let finished = self.drag.take().map(|d| d.anchor_line);
        if let Some(anchor) = finished {
            tracing::debug!("Drag from line {anchor} released");
        }
        finished
    }

    /// Handles a fired auto-scroll timer.
    ///
    /// Ticks that are not the pending one (already cancelled or replaced)
    /// are ignored.
    pub fn on_tick(
        &mut self,
        id: TimerId,
        now: Instant,
        view: &mut dyn TextView,
        map: &DisplaySyncMap,
        timers: &mut TimerQueue,
    ) {
        if self.tick != Some(id) {
            return;
        }
        self.tick = None;
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let (true, Some(y)) = (drag.auto_scroll_active, drag.last_pointer_y) else {
            return;
        };

        let height = view.viewport_height();
        if y < 0.0 {
            view.scroll_by(y - 1.0);
        } else if y > height {
            view.scroll_by(1.0 + y - height);
        } else {
            drag.auto_scroll_active = false;
            return;
        }

        let anchor = drag.anchor_line;
        if let Some(line) = resolve_line(y, view, map) {
            apply_selection(anchor, line, view, map);
        }
        self.tick = Some(timers.schedule(TimerKind::AutoScroll, now + self.tick_interval));
    }

    /// Abandons any drag and cancels the pending tick.
    pub fn cancel(&mut self, timers: &mut TimerQueue) {
        self.stop_ticking(timers);
        self.drag = None;
    }

    fn stop_ticking(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.tick.take() {
            timers.cancel(id);
        }
    }
}

/// Resolves viewport-relative `y` to a visible logical line.
///
/// The pixel offset picks a display row, which the sync map turns into the
/// logical line it shows. Positions above content clamp to the first row and
/// below content to the last one.
fn resolve_line(y: f32, view: &dyn TextView, map: &DisplaySyncMap) -> Option<usize> {
    let last_row = map.len();
    if last_row == 0 {
        return None;
    }
    let content_y = y + view.scroll_offset();
    let row = if content_y < 0.0 {
        1
    } else {
        ((content_y / view.row_height().max(1.0)) as usize + 1).min(last_row)
    };
    map.logical_line(row)
}

/// Selects full lines between `anchor` and `current` and places the caret.
fn apply_selection(anchor: usize, current: usize, view: &mut dyn TextView, map: &DisplaySyncMap) {
    let top = anchor.min(current);
    let bottom = anchor.max(current);
    let bottom_end = map.span_end(bottom).unwrap_or(bottom);
    view.set_selection(top, bottom_end);
    if current == top {
        view.set_caret(top, 0);
    } else {
        view.set_caret(bottom_end + 1, 0);
    }
}
