/// Debounce policy for region catalog rebuilds.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Default minimum time between two rebuilds.
pub const DEFAULT_REBUILD_INTERVAL: Duration = Duration::from_secs(2);

/// Hashes buffer content for change detection.
pub fn content_hash(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Decides when the region catalog may be rebuilt.
///
/// Content changes only mark the scheduler dirty. A rebuild is allowed at
/// most once per `interval`, and only for content whose hash differs from
/// the last rebuilt content, so bursts of keystrokes cost one parse.
#[derive(Debug, Clone)]
pub struct RebuildScheduler {
    interval: Duration,
    last_rebuild: Option<Instant>,
    last_hash: Option<u64>,
    dirty: bool,
}

impl Default for RebuildScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REBUILD_INTERVAL)
    }
}

impl RebuildScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_rebuild: None,
            last_hash: None,
            dirty: true,
        }
    }

    /// Records that the buffer content changed.
    pub fn notify_changed(&mut self) {
        self.dirty = true;
    }

    /// Returns true if the rate limit allows a rebuild check at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.dirty
            && self
                .last_rebuild
                .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Consumes the dirty flag and reports whether content with `hash` needs parsing.
    ///
    /// Call only when [`is_due`](Self::is_due) is true. Unchanged content
    /// clears the dirty flag without spending the interval.
    pub fn begin(&mut self, hash: u64) -> bool {
        self.dirty = false;
        self.last_hash != Some(hash)
    }

    /// Records a parse of content with `hash` at `now`.
    pub fn finish(&mut self, now: Instant, hash: u64) {
        self.last_rebuild = Some(now);
        self.last_hash = Some(hash);
    }
}
