//! Threshold gate: per-priority counts against configured ceilings

use crate::results::ResultSet;
use crate::violation::Priority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum allowed violations per priority. Ceilings are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub max_p1: u64,
    pub max_p2: u64,
    pub max_p3: u64,
}

impl ThresholdConfig {
    /// Ceiling used when nothing is configured
    pub const UNBOUNDED: u64 = u64::MAX;

    pub fn new(max_p1: u64, max_p2: u64, max_p3: u64) -> Self {
        Self {
            max_p1,
            max_p2,
            max_p3,
        }
    }

    pub fn max_for(&self, priority: Priority) -> u64 {
        match priority {
            Priority::P1 => self.max_p1,
            Priority::P2 => self.max_p2,
            Priority::P3 => self.max_p3,
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new(Self::UNBOUNDED, Self::UNBOUNDED, Self::UNBOUNDED)
    }
}

/// Actual count against its ceiling for one priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityCheck {
    pub priority: Priority,
    pub actual: u64,
    pub max: u64,
}

impl PriorityCheck {
    pub fn exceeded(&self) -> bool {
        self.actual > self.max
    }
}

/// Outcome of evaluating the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateReport {
    pub passed: bool,
    pub checks: [PriorityCheck; 3],
}

impl GateReport {
    /// Priorities whose count is over the ceiling
    pub fn exceeded(&self) -> impl Iterator<Item = &PriorityCheck> {
        self.checks.iter().filter(|c| c.exceeded())
    }

    /// `P1=<actual>[<max>] P2=<actual>[<max>] P3=<actual>[<max>]`, with
    /// `unlimited` in place of an unbounded ceiling
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, check) in self.checks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if check.max == ThresholdConfig::UNBOUNDED {
                write!(f, "{}={}[unlimited]", check.priority, check.actual)?;
            } else {
                write!(f, "{}={}[{}]", check.priority, check.actual, check.max)?;
            }
        }
        Ok(())
    }
}

/// Pure evaluator over final counts
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdGate {
    config: ThresholdConfig,
}

impl ThresholdGate {
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    pub fn evaluate(&self, results: &dyn ResultSet) -> GateReport {
        let checks = Priority::ALL.map(|priority| PriorityCheck {
            priority,
            actual: results.count_by_priority(priority) as u64,
            max: self.config.max_for(priority),
        });
        let passed = !checks.iter().any(PriorityCheck::exceeded);

        GateReport { passed, checks }
    }
}
