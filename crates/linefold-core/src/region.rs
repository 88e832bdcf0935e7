/// Foldable regions and their stable identities.
use std::fmt;

use serde::Serialize;

/// What kind of construct a foldable region spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    /// A function or method body (`def`, `async def`).
    Function,
    /// A class body.
    Class,
    /// Any other compound statement body (`if`, `for`, `with`, ...).
    Block,
}

impl RegionKind {
    /// Returns the lowercase label used in logs and renderer tooltips.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a region, derived from its bounds only.
///
/// Two regions with the same `(start, end)` are the same region even across
/// catalog rebuilds, which is what lets fold state survive a re-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RegionId {
    pub start: usize,
    pub end: usize,
}

impl RegionId {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A contiguous, 1-based, inclusive range of logical lines that can be folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    /// First line of the region; stays visible as the fold anchor.
    pub start: usize,
    /// Last line of the region (inclusive).
    pub end: usize,
    pub kind: RegionKind,
}

impl Region {
    pub fn new(start: usize, end: usize, kind: RegionKind) -> Self {
        Self { start, end, kind }
    }

    pub fn id(&self) -> RegionId {
        RegionId::new(self.start, self.end)
    }

    /// Returns true if the bounds are usable: 1-based and `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }

    /// Number of lines hidden when this region is folded.
    pub fn hidden_len(&self) -> usize {
        self.end - self.start
    }
}
