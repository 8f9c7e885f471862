//! First-occurrence-preserving reduction by equivalence key

use super::{PriorityCounts, ResultSet};
use crate::violation::{Violation, ViolationSnapshot};
use std::collections::HashSet;

/// Violations with duplicates removed.
///
/// Compilation-error markers are reduced the same way as rule findings, and
/// `has_errors` reflects the reduced set.
#[derive(Debug, Clone)]
pub struct DeduplicatedResultSet {
    violations: Vec<Violation>,
    counts: PriorityCounts,
    has_errors: bool,
}

impl DeduplicatedResultSet {
    pub fn new(snapshot: ViolationSnapshot) -> Self {
        Self::from_violations(snapshot.violations())
    }

    /// Reduce any sequence of violations
    pub fn from_violations(source: &[Violation]) -> Self {
        let mut seen = HashSet::with_capacity(source.len());
        let mut violations = Vec::new();
        for violation in source {
            if seen.insert(violation.equivalence_key()) {
                violations.push(violation.clone());
            }
        }

        tracing::debug!(
            recorded = source.len(),
            kept = violations.len(),
            "deduplicated violations"
        );

        let counts = PriorityCounts::tally(&violations);
        let has_errors = violations.iter().any(|v| v.is_compilation_error);
        Self {
            violations,
            counts,
            has_errors,
        }
    }
}

impl ResultSet for DeduplicatedResultSet {
    fn violations(&self) -> &[Violation] {
        &self.violations
    }

    fn counts(&self) -> PriorityCounts {
        self.counts
    }

    fn has_errors(&self) -> bool {
        self.has_errors
    }
}
