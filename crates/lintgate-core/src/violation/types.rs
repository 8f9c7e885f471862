//! Violation records produced by rules and the analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Rule id attached to markers for sources that could not be analyzed
pub const COMPILER_ERROR_RULE: &str = "compiler error";

/// Severity ordinal of a violation. `P1` is the most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    P1,
    P2,
    P3,
}

impl Priority {
    /// All priorities, most severe first
    pub const ALL: [Priority; 3] = [Priority::P1, Priority::P2, Priority::P3];

    /// Numeric level (1..=3)
    pub fn level(self) -> u8 {
        match self {
            Priority::P1 => 1,
            Priority::P2 => 2,
            Priority::P3 => 3,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::P1),
            2 => Ok(Priority::P2),
            3 => Ok(Priority::P3),
            other => Err(InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.level()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.level())
    }
}

/// Priority outside of 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority {0}, expected 1, 2 or 3")]
pub struct InvalidPriority(pub u8);

/// Position of a violation in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: PathBuf,
    pub start_line: u32,
    pub start_column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, start_line: u32, start_column: u32) -> Self {
        Self {
            path: path.into(),
            start_line,
            start_column,
            end_line: None,
            end_column: None,
        }
    }

    /// Attach an end position
    pub fn with_end(mut self, end_line: u32, end_column: u32) -> Self {
        self.end_line = Some(end_line);
        self.end_column = Some(end_column);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.start_line,
            self.start_column
        )
    }
}

/// A single rule finding or compilation-error marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the rule that produced the finding
    pub rule_id: String,
    pub priority: Priority,
    pub location: Location,
    pub message: String,
    /// True when the record marks a source that could not be analyzed
    #[serde(default)]
    pub is_compilation_error: bool,
}

impl Violation {
    /// Create a rule finding
    pub fn new(
        rule_id: impl Into<String>,
        priority: Priority,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            priority,
            location,
            message: message.into(),
            is_compilation_error: false,
        }
    }

    /// Create a marker for a source that could not be compiled or analyzed.
    ///
    /// Markers carry `P1` so that priority counts always sum to the total.
    pub fn compilation_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            rule_id: COMPILER_ERROR_RULE.to_string(),
            priority: Priority::P1,
            location: Location::new(path, 1, 1),
            message: message.into(),
            is_compilation_error: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.location.path
    }

    /// Key deciding whether two violations are duplicates
    pub fn equivalence_key(&self) -> EquivalenceKey<'_> {
        EquivalenceKey {
            rule_id: &self.rule_id,
            path: &self.location.path,
            start_line: self.location.start_line,
            start_column: self.location.start_column,
            message: &self.message,
        }
    }
}

/// Identity of a violation for deduplication.
///
/// Priority, end position and the compilation-error flag are not part of
/// the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EquivalenceKey<'a> {
    pub rule_id: &'a str,
    pub path: &'a Path,
    pub start_line: u32,
    pub start_column: u32,
    pub message: &'a str,
}
