//! Read-only result views over a frozen violation snapshot
//!
//! Two variants share the [`ResultSet`] interface:
//! - [`RawResultSet`]: every recorded violation, in collector order
//! - [`DeduplicatedResultSet`]: first occurrence per equivalence key
//!
//! The threshold gate and the report dispatcher only see `&dyn ResultSet`.

mod dedup;
mod raw;

pub use dedup::DeduplicatedResultSet;
pub use raw::RawResultSet;

use crate::violation::{Priority, Violation, ViolationSnapshot};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Read-only view of a run's violations
pub trait ResultSet: Send + Sync {
    /// Violations in traversal order
    fn violations(&self) -> &[Violation];

    /// Per-priority counts, computed once at construction
    fn counts(&self) -> PriorityCounts;

    /// Number of violations with the given priority
    fn count_by_priority(&self, priority: Priority) -> usize {
        self.counts().get(priority)
    }

    fn total(&self) -> usize {
        self.violations().len()
    }

    /// True iff some source could not be compiled or analyzed
    fn has_errors(&self) -> bool;

    fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations().iter()
    }

    /// Distinct files that carry at least one violation
    fn files_with_violations(&self) -> usize {
        self.violations()
            .iter()
            .map(|v| v.path())
            .collect::<BTreeSet<&Path>>()
            .len()
    }
}

/// Violation counts per priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
}

impl PriorityCounts {
    /// Count a sequence of violations
    pub fn tally<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Self {
        violations
            .into_iter()
            .fold(Self::default(), |mut counts, v| {
                match v.priority {
                    Priority::P1 => counts.p1 += 1,
                    Priority::P2 => counts.p2 += 1,
                    Priority::P3 => counts.p3 += 1,
                }
                counts
            })
    }

    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::P1 => self.p1,
            Priority::P2 => self.p2,
            Priority::P3 => self.p3,
        }
    }

    pub fn total(&self) -> usize {
        self.p1 + self.p2 + self.p3
    }
}

/// Which result view a run reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultMode {
    /// Keep every recorded violation
    Raw,
    /// Collapse duplicates by equivalence key
    #[default]
    Deduplicated,
}

impl ResultMode {
    /// Map the `allow_duplicated_violations` switch to a mode
    pub fn from_allow_duplicates(allow_duplicates: bool) -> Self {
        if allow_duplicates {
            ResultMode::Raw
        } else {
            ResultMode::Deduplicated
        }
    }

    /// Build the selected view over a snapshot
    pub fn build(self, snapshot: ViolationSnapshot) -> Box<dyn ResultSet> {
        match self {
            ResultMode::Raw => Box::new(RawResultSet::new(snapshot)),
            ResultMode::Deduplicated => Box::new(DeduplicatedResultSet::new(snapshot)),
        }
    }
}
