//! Owned, cancellable timers for a single-threaded event loop.
//!
//! Nothing here sleeps or spawns: the host asks for [`TimerQueue::next_deadline`],
//! wakes up when it passes, and drains due timers with [`TimerQueue::pop_due`].
//! Whoever schedules a timer keeps its [`TimerId`] and is responsible for
//! cancelling it.

use std::time::Instant;

/// Identity of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer is for, so the owner can dispatch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Drag auto-scroll tick.
    AutoScroll,
    /// Periodic check for a debounced region rebuild.
    RebuildPoll,
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    kind: TimerKind,
    deadline: Instant,
}

/// Pending one-shot timers ordered by deadline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a one-shot timer firing at `deadline`.
    pub fn schedule(&mut self, kind: TimerKind, deadline: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let pos = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(pos, Entry { id, kind, deadline });
        id
    }

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Cancels every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerId, TimerKind)> {
        if self.entries.first().is_some_and(|e| e.deadline <= now) {
            let entry = self.entries.remove(0);
            Some((entry.id, entry.kind))
        } else {
            None
        }
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|e| e.deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
