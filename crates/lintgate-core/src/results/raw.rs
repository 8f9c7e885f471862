//! Identity view over a snapshot

use super::{PriorityCounts, ResultSet};
use crate::violation::{Violation, ViolationSnapshot};

/// Every recorded violation, in collector order
#[derive(Debug, Clone)]
pub struct RawResultSet {
    snapshot: ViolationSnapshot,
    counts: PriorityCounts,
    has_errors: bool,
}

impl RawResultSet {
    pub fn new(snapshot: ViolationSnapshot) -> Self {
        let counts = PriorityCounts::tally(snapshot.violations());
        let has_errors = snapshot.violations().iter().any(|v| v.is_compilation_error);
        Self {
            snapshot,
            counts,
            has_errors,
        }
    }
}

impl ResultSet for RawResultSet {
    fn violations(&self) -> &[Violation] {
        self.snapshot.violations()
    }

    fn counts(&self) -> PriorityCounts {
        self.counts
    }

    fn has_errors(&self) -> bool {
        self.has_errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::test_support::finding;
    use crate::violation::Priority;

    #[test]
    fn test_raw_counts() {
        let results = RawResultSet::new(ViolationSnapshot::from(vec![
            finding("a", Priority::P1, "x.c", 1),
            finding("a", Priority::P1, "x.c", 1),
            finding("b", Priority::P3, "x.c", 2),
        ]));

        assert_eq!(results.total(), 3);
        assert_eq!(results.count_by_priority(Priority::P1), 2);
        assert_eq!(results.count_by_priority(Priority::P2), 0);
        assert_eq!(results.count_by_priority(Priority::P3), 1);
        assert!(!results.has_errors());
    }

    #[test]
    fn test_raw_has_errors() {
        let results = RawResultSet::new(ViolationSnapshot::from(vec![
            finding("a", Priority::P3, "x.c", 1),
            Violation::compilation_error("broken.c", "cannot decode"),
        ]));
        assert!(results.has_errors());
    }

    #[test]
    fn test_raw_empty() {
        let results = RawResultSet::new(ViolationSnapshot::default());
        assert_eq!(results.total(), 0);
        assert!(!results.has_errors());
        assert_eq!(results.iter().count(), 0);
    }
}
