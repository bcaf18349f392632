//! Recursion guard
//!
//! Visit counts are forked on every descent: a child branch gets its own copy
//! with the entered type bumped, the parent's counts are never touched. Two
//! sibling fields of the same composite type therefore see identical counts.

use ahash::AHashMap;
use nestmap_core::TypeName;

/// Per-path visit counts of structured types, scoped to one mapping request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitCounts {
    counts: AHashMap<TypeName, u32>,
}

impl VisitCounts {
    /// Counts for a mapping rooted at `root`, recorded at 0
    pub fn seeded(root: &TypeName) -> Self {
        let mut counts = AHashMap::new();
        counts.insert(root.clone(), 0);
        Self { counts }
    }

    /// Recorded count, `None` when the type has not been entered on this path
    pub fn get(&self, name: &TypeName) -> Option<u32> {
        self.counts.get(name).copied()
    }

    /// Fork with `name` entered: recorded at 0 on first entry, incremented afterwards
    pub fn enter(&self, name: &TypeName) -> VisitCounts {
        let mut forked = self.clone();
        forked
            .counts
            .entry(name.clone())
            .and_modify(|count| *count += 1)
            .or_insert(0);
        forked
    }

    /// Whether `name` may be expanded further under a budget of `max_recursion`.
    /// Absent types count as 0 and are always expandable.
    pub fn should_expand(&self, name: &TypeName, max_recursion: u32) -> bool {
        self.get(name).map_or(true, |count| count <= max_recursion)
    }
}
