//! Logical line ↔ display row correspondence under folding.
//!
//! A line `l` is hidden iff some folded region `(s, e)` has `s < l <= e`.
//! Every other line gets the next display row, starting at 1, so the map is
//! strictly increasing in both directions. Overlapping and nested folds are
//! resolved by coverage: a line covered by any folded region is hidden once.

use std::ops::RangeInclusive;

use crate::catalog::RegionCatalog;
use crate::fold::FoldState;

/// Errors from display sync map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyncMapError {
    #[error("line {line} out of range (buffer has {line_count} lines)")]
    OutOfRange { line: usize, line_count: usize },
}

/// Precomputed mapping between logical lines and display rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySyncMap {
    line_count: usize,
    /// `display_of[l - 1]` is the display row of logical line `l`, if visible.
    display_of: Vec<Option<usize>>,
    /// `rows[r - 1]` is the logical line shown on display row `r`.
    rows: Vec<usize>,
}

impl DisplaySyncMap {
    /// Identity map for `line_count` lines (nothing folded).
    pub fn identity(line_count: usize) -> Self {
        Self {
            line_count,
            display_of: (1..=line_count).map(Some).collect(),
            rows: (1..=line_count).collect(),
        }
    }

    /// Builds the map in O(N + F) with a coverage sweep.
    ///
    /// Folded ids that are not in `catalog` own no renderable region and are
    /// ignored.
    pub fn build(line_count: usize, catalog: &RegionCatalog, folds: &FoldState) -> Self {
        // coverage[l] changes by +1 where a hidden run starts and -1 after it ends.
        let mut coverage = vec![0i32; line_count + 2];
        for id in folds.iter().filter(|id| catalog.contains(*id)) {
            let end = id.end.min(line_count);
            if id.start < end {
                coverage[id.start + 1] += 1;
                coverage[end + 1] -= 1;
            }
        }

        let mut display_of = Vec::with_capacity(line_count);
        let mut rows = Vec::with_capacity(line_count);
        let mut covered = 0;
        for (line, delta) in coverage.iter().enumerate().take(line_count + 1).skip(1) {
            covered += delta;
            if covered > 0 {
                display_of.push(None);
            } else {
                rows.push(line);
                display_of.push(Some(rows.len()));
            }
        }

        Self {
            line_count,
            display_of,
            rows,
        }
    }

    /// Logical line count the map was built for.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of display rows (visible lines).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self, line: usize) -> Result<usize, SyncMapError> {
        if line == 0 || line > self.line_count {
            return Err(SyncMapError::OutOfRange {
                line,
                line_count: self.line_count,
            });
        }
        Ok(line - 1)
    }

    /// Display row of `line`, or `None` if the line is folded away.
    ///
    /// # Errors
    ///
    /// Returns [`SyncMapError::OutOfRange`] for line 0 or lines past the end.
    pub fn display_row(&self, line: usize) -> Result<Option<usize>, SyncMapError> {
        let idx = self.check(line)?;
        Ok(self.display_of[idx])
    }

    /// Returns true if `line` is hidden inside a folded region.
    ///
    /// # Errors
    ///
    /// Returns [`SyncMapError::OutOfRange`] for line 0 or lines past the end.
    pub fn is_hidden(&self, line: usize) -> Result<bool, SyncMapError> {
        Ok(self.display_row(line)?.is_none())
    }

    /// Logical line shown on display row `row` (1-based).
    pub fn logical_line(&self, row: usize) -> Option<usize> {
        row.checked_sub(1).and_then(|idx| self.rows.get(idx).copied())
    }

    /// The line itself if visible, otherwise the fold anchor that hides it.
    ///
    /// # Errors
    ///
    /// Returns [`SyncMapError::OutOfRange`] for line 0 or lines past the end.
    pub fn nearest_visible(&self, line: usize) -> Result<usize, SyncMapError> {
        let idx = self.check(line)?;
        if self.display_of[idx].is_some() {
            return Ok(line);
        }
        // Line 1 can never be hidden, so a visible predecessor always exists.
        let pos = self.rows.partition_point(|&l| l < line);
        Ok(self.rows[pos.saturating_sub(1)])
    }

    /// Last logical line represented by the display row showing `line`.
    ///
    /// For a folded anchor that is the end of everything hidden under it;
    /// for an ordinary visible line it is the line itself.
    ///
    /// # Errors
    ///
    /// Returns [`SyncMapError::OutOfRange`] for line 0 or lines past the end.
    pub fn span_end(&self, line: usize) -> Result<usize, SyncMapError> {
        let visible = self.nearest_visible(line)?;
        let row = self.display_of[visible - 1].unwrap_or(1);
        Ok(self
            .rows
            .get(row)
            .map_or(self.line_count, |&next| next - 1))
    }

    /// Maximal runs of hidden lines, in order.
    pub fn hidden_ranges(&self) -> Vec<RangeInclusive<usize>> {
        let mut ranges = Vec::new();
        let mut run_start = None;
        for (idx, row) in self.display_of.iter().enumerate() {
            let line = idx + 1;
            match (row, run_start) {
                (None, None) => run_start = Some(line),
                (Some(_), Some(start)) => {
                    ranges.push(start..=line - 1);
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(start..=self.line_count);
        }
        ranges
    }

    /// `(logical_line, display_row)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, &line)| (line, idx + 1))
    }
}
