/// Catalog of foldable regions discovered in the current buffer content.
use std::collections::HashMap;

use crate::parser::{FoldParser, ParseOutcome};
use crate::region::{Region, RegionId};

/// What happened when the catalog was asked to rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// The catalog now holds the freshly parsed regions.
    Replaced { regions: usize },
    /// The content was blank; the previous regions were kept.
    SkippedBlank,
    /// The parser failed or returned malformed regions; the previous regions were kept.
    KeptPrevious { reason: String },
}

/// The set of foldable regions for the current content.
///
/// Regions are kept sorted by `(start, end)` and unique by [`RegionId`], so
/// the catalog's contents never depend on the order the parser reported them.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
    by_id: HashMap<RegionId, usize>,
}

impl RegionCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-parses `content` and replaces the catalog on success.
    ///
    /// A failed parse never blanks existing fold information.
    pub fn rebuild(&mut self, parser: &dyn FoldParser, content: &str) -> RebuildOutcome {
        if content.trim().is_empty() {
            return RebuildOutcome::SkippedBlank;
        }
        self.apply(parser.find_foldable_regions(content))
    }

    /// Applies a parser result, keeping the previous regions on failure.
    pub fn apply(&mut self, outcome: ParseOutcome) -> RebuildOutcome {
        let regions = match outcome {
            ParseOutcome::Regions(regions) => regions,
            ParseOutcome::Failure(reason) => {
                tracing::warn!("Fold region parse failed, keeping previous regions: {reason}");
                return RebuildOutcome::KeptPrevious { reason };
            }
        };

        if let Some(bad) = regions.iter().find(|r| !r.is_well_formed()) {
            let reason = format!("malformed region {}..{}", bad.start, bad.end);
            tracing::warn!("Parser returned {reason}, keeping previous regions");
            return RebuildOutcome::KeptPrevious { reason };
        }

        self.replace(regions);
        tracing::debug!("Region catalog rebuilt with {} regions", self.regions.len());
        RebuildOutcome::Replaced {
            regions: self.regions.len(),
        }
    }

    fn replace(&mut self, mut regions: Vec<Region>) {
        regions.sort_by_key(|r| (r.start, r.end));
        regions.dedup_by_key(|r| r.id());
        self.by_id = regions
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id(), idx))
            .collect();
        self.regions = regions;
    }

    /// Looks up a region by identity.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.by_id.get(&id).map(|&idx| &self.regions[idx])
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All regions, sorted by `(start, end)`.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions whose start line is `line`, outermost (largest end) last.
    pub fn starting_at(&self, line: usize) -> &[Region] {
        let lo = self.regions.partition_point(|r| r.start < line);
        let hi = self.regions.partition_point(|r| r.start <= line);
        &self.regions[lo..hi]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionKind;

    fn ok(regions: Vec<Region>) -> ParseOutcome {
        ParseOutcome::Regions(regions)
    }

    #[test]
    fn test_apply_sorts_and_dedups() {
        let mut catalog = RegionCatalog::new();
        let outcome = catalog.apply(ok(vec![
            Region::new(5, 9, RegionKind::Function),
            Region::new(1, 20, RegionKind::Class),
            Region::new(5, 9, RegionKind::Function),
        ]));
        assert_eq!(outcome, RebuildOutcome::Replaced { regions: 2 });
        assert_eq!(catalog.regions()[0].start, 1);
        assert_eq!(catalog.regions()[1].start, 5);
    }

    #[test]
    fn test_failure_keeps_previous() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![Region::new(2, 4, RegionKind::Block)]));
        let outcome = catalog.apply(ParseOutcome::Failure("syntax".to_string()));
        assert!(matches!(outcome, RebuildOutcome::KeptPrevious { .. }));
        assert!(catalog.contains(RegionId::new(2, 4)));
    }

    #[test]
    fn test_malformed_region_keeps_previous() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![Region::new(2, 4, RegionKind::Block)]));
        let outcome = catalog.apply(ok(vec![
            Region::new(1, 3, RegionKind::Block),
            Region::new(9, 3, RegionKind::Block),
        ]));
        assert!(matches!(outcome, RebuildOutcome::KeptPrevious { .. }));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains(RegionId::new(2, 4)));
    }

    #[test]
    fn test_blank_content_is_not_parsed() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![Region::new(2, 4, RegionKind::Block)]));
        let parser = |_: &str| -> ParseOutcome { panic!("parser must not run") };
        assert_eq!(catalog.rebuild(&parser, "  \n\n"), RebuildOutcome::SkippedBlank);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_empty_result_clears_catalog() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![Region::new(2, 4, RegionKind::Block)]));
        catalog.apply(ok(Vec::new()));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![Region::new(3, 8, RegionKind::Class)]));
        assert_eq!(
            catalog.get(RegionId::new(3, 8)).map(|r| r.kind),
            Some(RegionKind::Class)
        );
        assert!(catalog.get(RegionId::new(3, 9)).is_none());
    }

    #[test]
    fn test_starting_at() {
        let mut catalog = RegionCatalog::new();
        catalog.apply(ok(vec![
            Region::new(3, 8, RegionKind::Block),
            Region::new(3, 5, RegionKind::Block),
            Region::new(4, 5, RegionKind::Block),
        ]));
        let at3 = catalog.starting_at(3);
        assert_eq!(at3.len(), 2);
        assert_eq!(at3.last().map(|r| r.end), Some(8));
        assert!(catalog.starting_at(2).is_empty());
    }

    #[test]
    fn test_discovery_order_does_not_matter() {
        let a = vec![
            Region::new(1, 10, RegionKind::Class),
            Region::new(3, 5, RegionKind::Function),
        ];
        let mut b = a.clone();
        b.reverse();
        let mut ca = RegionCatalog::new();
        let mut cb = RegionCatalog::new();
        ca.apply(ok(a));
        cb.apply(ok(b));
        assert_eq!(ca.regions(), cb.regions());
    }
}
