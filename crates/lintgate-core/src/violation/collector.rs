//! Thread-safe, append-only violation storage for a single run.

use super::types::Violation;
use parking_lot::Mutex;
use std::sync::Arc;

/// Collector handle shared between the driver and analyzer tasks
pub type SharedCollector = Arc<ViolationCollector>;

/// Append-only store written by concurrent producers during analysis
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Mutex<Vec<Violation>>,
}

impl ViolationCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared (Arc-wrapped) collector
    pub fn shared() -> SharedCollector {
        Arc::new(Self::new())
    }

    /// Append one violation
    pub fn record(&self, violation: Violation) {
        self.violations.lock().push(violation);
    }

    /// Append a producer's batch under a single lock so it stays contiguous
    pub fn record_batch(&self, batch: impl IntoIterator<Item = Violation>) {
        let mut violations = self.violations.lock();
        violations.extend(batch);
    }

    /// Number of violations recorded so far
    pub fn len(&self) -> usize {
        self.violations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out the recorded violations.
    ///
    /// Only meaningful once every producer has finished; taken earlier the
    /// snapshot is consistent but its ordering relative to in-flight producers
    /// is unspecified.
    pub fn snapshot(&self) -> ViolationSnapshot {
        ViolationSnapshot {
            violations: Arc::from(self.violations.lock().as_slice()),
        }
    }

    /// Freeze the collector, consuming it
    pub fn into_snapshot(self) -> ViolationSnapshot {
        ViolationSnapshot {
            violations: Arc::from(self.violations.into_inner()),
        }
    }
}

/// Immutable, order-preserving view of a frozen collector
#[derive(Debug, Clone, Default)]
pub struct ViolationSnapshot {
    violations: Arc<[Violation]>,
}

impl ViolationSnapshot {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl From<Vec<Violation>> for ViolationSnapshot {
    fn from(violations: Vec<Violation>) -> Self {
        Self {
            violations: Arc::from(violations),
        }
    }
}
