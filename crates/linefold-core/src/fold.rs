/// Fold state and the toggle controller that mutates it.
use std::collections::BTreeSet;

use crate::catalog::RegionCatalog;
use crate::region::RegionId;

/// Result of a fold toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The region is now folded; its hidden range is `(start, end]`.
    Folded(RegionId),
    /// The region is now unfolded.
    Unfolded(RegionId),
    /// The region is not in the current catalog; nothing changed.
    Ignored,
}

impl ToggleOutcome {
    /// Returns true if the toggle changed fold state (and the sync map must be rebuilt).
    pub fn changed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Set of folded regions. Absence means unfolded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    folded: BTreeSet<RegionId>,
}

impl FoldState {
    /// Creates an empty fold state (everything unfolded).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_folded(&self, id: RegionId) -> bool {
        self.folded.contains(&id)
    }

    /// Toggles `id`.
    ///
    /// Unfolding always succeeds. Folding requires the region to exist in
    /// `catalog`; a region that vanished under an edit is a no-op.
    pub fn toggle(&mut self, id: RegionId, catalog: &RegionCatalog) -> ToggleOutcome {
        if self.folded.remove(&id) {
            tracing::debug!("Unfolded region {id}");
            return ToggleOutcome::Unfolded(id);
        }
        if !catalog.contains(id) {
            tracing::debug!("Ignoring fold of unknown region {id}");
            return ToggleOutcome::Ignored;
        }
        self.folded.insert(id);
        tracing::debug!("Folded region {id}");
        ToggleOutcome::Folded(id)
    }

    /// Folds every region in the catalog. Returns how many were newly folded.
    pub fn fold_all(&mut self, catalog: &RegionCatalog) -> usize {
        let before = self.folded.len();
        self.folded.extend(catalog.regions().iter().map(|r| r.id()));
        self.folded.len() - before
    }

    /// Unfolds everything. Returns how many regions were unfolded.
    pub fn unfold_all(&mut self) -> usize {
        let count = self.folded.len();
        self.folded.clear();
        count
    }

    /// Drops folds whose region no longer exists in `catalog`.
    ///
    /// Returns the dropped ids so callers can log them.
    pub fn reconcile(&mut self, catalog: &RegionCatalog) -> Vec<RegionId> {
        let orphaned: Vec<RegionId> = self
            .folded
            .iter()
            .copied()
            .filter(|id| !catalog.contains(*id))
            .collect();
        for id in &orphaned {
            self.folded.remove(id);
        }
        orphaned
    }

    /// Folded region ids in `(start, end)` order.
    pub fn iter(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.folded.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}
