//! The line-number sidebar: folding, display rows and drag selection.
//!
//! [`LineNumbers`] owns the region catalog, the fold state, the display sync
//! map, the drag controller and every timer they need. The host feeds it
//! pointer events, content-change notifications and clock ticks
//! ([`LineNumbers::advance`]); it writes back only selection, caret, scroll
//! and hidden ranges through [`TextView`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::catalog::{RebuildOutcome, RegionCatalog};
use crate::debounce::{content_hash, RebuildScheduler, DEFAULT_REBUILD_INTERVAL};
use crate::drag::{DragPhase, DragSelectionController, DEFAULT_AUTO_SCROLL_TICK};
use crate::fold::{FoldState, ToggleOutcome};
use crate::parser::FoldParser;
use crate::region::{RegionId, RegionKind};
use crate::sync_map::DisplaySyncMap;
use crate::timer::{TimerId, TimerKind, TimerQueue};
use crate::view::TextView;

/// Default period of the rebuild poll timer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shortest interval any sidebar timer may use.
const MIN_TIMER_INTERVAL: Duration = Duration::from_millis(1);

/// Timing knobs for the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarSettings {
    /// Minimum time between two region rebuilds.
    pub rebuild_interval: Duration,
    /// How often to check whether a rebuild is due.
    pub poll_interval: Duration,
    /// Interval between drag auto-scroll ticks.
    pub auto_scroll_tick: Duration,
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            rebuild_interval: DEFAULT_REBUILD_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            auto_scroll_tick: DEFAULT_AUTO_SCROLL_TICK,
        }
    }
}

/// One row of the gutter as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub logical_line: usize,
    /// 1-based row on screen (before scrolling).
    pub display_row: usize,
    /// Whether a foldable region starts on this line.
    pub is_fold_anchor: bool,
    pub is_folded: bool,
    pub region_kind: Option<RegionKind>,
    /// The region a click on this row toggles.
    pub region: Option<RegionId>,
}

/// The line-number sidebar.
pub struct LineNumbers {
    parser: Box<dyn FoldParser>,
    settings: SidebarSettings,
    catalog: RegionCatalog,
    folds: FoldState,
    map: DisplaySyncMap,
    /// Click dispatch table: anchor line to the region it toggles.
    anchors: HashMap<usize, RegionId>,
    scheduler: RebuildScheduler,
    drag: DragSelectionController,
    timers: TimerQueue,
    poll: Option<TimerId>,
    shown: bool,
}

impl std::fmt::Debug for LineNumbers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineNumbers")
            .field("settings", &self.settings)
            .field("regions", &self.catalog.len())
            .field("folded", &self.folds.len())
            .field("rows", &self.map.len())
            .field("drag", &self.drag.phase())
            .field("pending_timers", &self.timers.len())
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl LineNumbers {
    /// Attaches a sidebar to `view`, parsing its content right away.
    pub fn new(
        parser: Box<dyn FoldParser>,
        settings: SidebarSettings,
        view: &mut dyn TextView,
        now: Instant,
    ) -> Self {
        let settings = SidebarSettings {
            rebuild_interval: settings.rebuild_interval,
            poll_interval: settings.poll_interval.max(MIN_TIMER_INTERVAL),
            auto_scroll_tick: settings.auto_scroll_tick.max(MIN_TIMER_INTERVAL),
        };
        let mut sidebar = Self {
            parser,
            settings,
            catalog: RegionCatalog::new(),
            folds: FoldState::new(),
            map: DisplaySyncMap::identity(view.line_count()),
            anchors: HashMap::new(),
            scheduler: RebuildScheduler::new(settings.rebuild_interval),
            drag: DragSelectionController::new(settings.auto_scroll_tick),
            timers: TimerQueue::new(),
            poll: None,
            shown: true,
        };
        sidebar.rebuild_now(now, view);
        sidebar.schedule_poll(now + settings.poll_interval);
        sidebar
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn folds(&self) -> &FoldState {
        &self.folds
    }

    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Records a buffer mutation.
    ///
    /// The display map is refreshed immediately so it always covers the
    /// current line count; the region catalog is rebuilt later by the poll.
    pub fn on_content_changed(&mut self, view: &mut dyn TextView) {
        self.scheduler.notify_changed();
        if self.map.line_count() != view.line_count() {
            self.recompute(view);
        }
    }

    /// Fires every timer due at `now`, in deadline order.
    pub fn advance(&mut self, now: Instant, view: &mut dyn TextView) {
        while let Some((id, kind)) = self.timers.pop_due(now) {
            match kind {
                TimerKind::AutoScroll => {
                    self.drag
                        .on_tick(id, now, view, &self.map, &mut self.timers);
                }
                TimerKind::RebuildPoll => {
                    if self.poll != Some(id) {
                        continue;
                    }
                    self.poll = None;
                    if self.scheduler.is_due(now) {
                        self.rebuild_now(now, view);
                    }
                    self.schedule_poll(now + self.settings.poll_interval);
                }
            }
        }
    }

    /// Re-parses the view's content unless it is unchanged since the last parse.
    fn rebuild_now(&mut self, now: Instant, view: &mut dyn TextView) {
        let content = view.read_content();
        let hash = content_hash(&content);
        if self.scheduler.begin(hash) {
            match self.catalog.rebuild(self.parser.as_ref(), &content) {
                RebuildOutcome::Replaced { regions } => {
                    tracing::debug!("Rebuilt fold regions: {regions} found");
                }
                RebuildOutcome::SkippedBlank => {
                    tracing::debug!("Skipped fold rebuild for blank content");
                }
                RebuildOutcome::KeptPrevious { .. } => {}
            }
            self.scheduler.finish(now, hash);
            for id in self.folds.reconcile(&self.catalog) {
                tracing::debug!("Dropped fold {id}: region no longer present");
            }
        }
        self.recompute(view);
    }

    /// Rebuilds the display map and click table, then pushes hidden ranges to the view.
    fn recompute(&mut self, view: &mut dyn TextView) {
        let line_count = view.line_count();
        self.map = DisplaySyncMap::build(line_count, &self.catalog, &self.folds);

        self.anchors.clear();
        let mut line = 0;
        for region in self.catalog.regions() {
            if region.start == line || region.start > line_count {
                continue;
            }
            line = region.start;
            let starting = self.catalog.starting_at(line);
            let chosen = starting
                .iter()
                .rev()
                .find(|r| self.folds.is_folded(r.id()))
                .or_else(|| starting.last());
            if let Some(r) = chosen {
                self.anchors.insert(line, r.id());
            }
        }

        view.set_hidden_ranges(&self.map.hidden_ranges());
    }

    /// Toggles a region and refreshes the display if anything changed.
    pub fn toggle_fold(&mut self, id: RegionId, view: &mut dyn TextView) -> ToggleOutcome {
        let outcome = self.folds.toggle(id, &self.catalog);
        if outcome.changed() {
            self.recompute(view);
        }
        outcome
    }

    /// Handles a click on the fold indicator shown on `line`.
    pub fn on_fold_anchor_clicked(&mut self, line: usize, view: &mut dyn TextView) -> ToggleOutcome {
        match self.anchors.get(&line).copied() {
            Some(id) => self.toggle_fold(id, view),
            None => ToggleOutcome::Ignored,
        }
    }

    /// Folds every known region. Returns how many were newly folded.
    pub fn fold_all(&mut self, view: &mut dyn TextView) -> usize {
        let count = self.folds.fold_all(&self.catalog);
        if count > 0 {
            self.recompute(view);
        }
        count
    }

    /// Unfolds everything. Returns how many regions were unfolded.
    pub fn unfold_all(&mut self, view: &mut dyn TextView) -> usize {
        let count = self.folds.unfold_all();
        if count > 0 {
            self.recompute(view);
        }
        count
    }

    fn display_row_for(&self, line: usize, row: usize) -> DisplayRow {
        let region = self.anchors.get(&line).copied();
        DisplayRow {
            logical_line: line,
            display_row: row,
            is_fold_anchor: region.is_some(),
            is_folded: region.is_some_and(|id| self.folds.is_folded(id)),
            region_kind: region.and_then(|id| self.catalog.get(id)).map(|r| r.kind),
            region,
        }
    }

    /// Every display row, in order.
    pub fn current_display_rows(&self) -> Vec<DisplayRow> {
        self.map
            .iter()
            .map(|(line, row)| self.display_row_for(line, row))
            .collect()
    }

    /// The display row showing `line`, if the line is visible.
    pub fn row_for_line(&self, line: usize) -> Option<DisplayRow> {
        let row = self.map.display_row(line).ok().flatten()?;
        Some(self.display_row_for(line, row))
    }

    pub fn pointer_down(&mut self, y: f32, view: &mut dyn TextView) {
        if !self.shown {
            return;
        }
        self.drag.pointer_down(y, view, &self.map, &mut self.timers);
    }

    pub fn pointer_move(&mut self, y: f32, now: Instant, view: &mut dyn TextView) {
        self.drag
            .pointer_move(y, now, view, &self.map, &mut self.timers);
    }

    pub fn pointer_left(&mut self, y: f32, now: Instant, view: &mut dyn TextView) {
        self.drag
            .pointer_left(y, now, view, &self.map, &mut self.timers);
    }

    pub fn pointer_entered(&mut self, y: f32, now: Instant, view: &mut dyn TextView) {
        self.drag
            .pointer_entered(y, now, view, &self.map, &mut self.timers);
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up(&mut self.timers);
    }

    /// Abandons a drag whose release will never arrive, keeping the selection
    /// made so far. The poll timer is left running.
    pub fn cancel_drag(&mut self) {
        if self.drag.phase() == DragPhase::Idle {
            return;
        }
        self.drag.cancel(&mut self.timers);
        tracing::debug!("Drag cancelled, pointer input lost");
    }

    /// Hides the sidebar, ending any drag and cancelling every timer.
    pub fn hide(&mut self) {
        if !self.shown {
            return;
        }
        self.drag.cancel(&mut self.timers);
        let cancelled = self.timers.cancel_all();
        self.poll = None;
        self.shown = false;
        tracing::debug!("Sidebar hidden, {cancelled} timers cancelled");
    }

    /// Shows the sidebar again and checks for a rebuild right away.
    pub fn show(&mut self, now: Instant, view: &mut dyn TextView) {
        if self.shown {
            return;
        }
        self.shown = true;
        self.scheduler.notify_changed();
        self.recompute(view);
        self.schedule_poll(now);
    }

    fn schedule_poll(&mut self, at: Instant) {
        if let Some(old) = self.poll.take() {
            self.timers.cancel(old);
        }
        self.poll = Some(self.timers.schedule(TimerKind::RebuildPoll, at));
    }
}

impl Drop for LineNumbers {
    fn drop(&mut self) {
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            tracing::debug!("Sidebar dropped, {cancelled} timers cancelled");
        }
    }
}
