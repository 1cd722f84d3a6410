use std::collections::BTreeSet;

use super::model::{EnrichedRecord, EnrichedTable, Tier};

// ---------------------------------------------------------------------------
// MasteryRange – closed interval over mastery level
// ---------------------------------------------------------------------------

/// Closed interval `[lo, hi]` over mastery level, always with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MasteryRange {
    lo: u32,
    hi: u32,
}

impl MasteryRange {
    /// Build a range from two slider handles in either order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// The full observed range of a table, `[0, 0]` when it is empty.
    pub fn full(table: &EnrichedTable) -> Self {
        let (lo, hi) = table.mastery_bounds.unwrap_or((0, 0));
        Self::new(lo, hi)
    }

    /// Clamp both ends into `bounds` (inclusive).
    pub fn clamped(self, bounds: (u32, u32)) -> Self {
        let (min, max) = (bounds.0.min(bounds.1), bounds.0.max(bounds.1));
        Self::new(self.lo.clamp(min, max), self.hi.clamp(min, max))
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    pub fn contains(&self, level: u32) -> bool {
        self.lo <= level && level <= self.hi
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – the user-driven predicate set
// ---------------------------------------------------------------------------

/// The active filters. Every predicate present must hold for a row to pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSelection {
    Mastery(MasteryRange),
    /// An empty set matches nothing.
    Tiers(BTreeSet<Tier>),
    Both {
        mastery: MasteryRange,
        tiers: BTreeSet<Tier>,
    },
}

impl FilterSelection {
    pub fn mastery_range(&self) -> Option<MasteryRange> {
        match self {
            FilterSelection::Mastery(r) | FilterSelection::Both { mastery: r, .. } => Some(*r),
            FilterSelection::Tiers(_) => None,
        }
    }

    pub fn tiers(&self) -> Option<&BTreeSet<Tier>> {
        match self {
            FilterSelection::Tiers(t) | FilterSelection::Both { tiers: t, .. } => Some(t),
            FilterSelection::Mastery(_) => None,
        }
    }

    /// Whether a record passes all active predicates.
    ///
    /// Records with an unknown tier never pass a tier predicate.
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        let in_range = self
            .mastery_range()
            .map_or(true, |r| r.contains(record.mastery_level()));
        let in_tiers = self
            .tiers()
            .map_or(true, |set| record.tier.is_some_and(|t| set.contains(&t)));
        in_range && in_tiers
    }
}

/// Return indices of records that pass the selection, in table order.
pub fn filtered_indices(table: &EnrichedTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r))
        .map(|(i, _)| i)
        .collect()
}
