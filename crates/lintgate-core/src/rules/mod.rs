//! Rules and the statically linked rule registry
//!
//! Rules are compiled into the binary and registered from a built-in
//! manifest; a [`RulesetFilter`] then narrows the registry down to the rules
//! enabled for a run.

mod builtin;
mod registry;

pub use builtin::{
    LongFileRule, LongLineRule, MergeConflictMarkerRule, TodoCommentRule, TrailingWhitespaceRule,
};
pub use registry::{EnabledRules, RuleRegistry, RulesetFilter};

use crate::violation::{Priority, Violation};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Rule loading errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("no rule loaded")]
    NoRulesLoaded,

    #[error("unknown rule '{name}'")]
    UnknownRule { name: String },
}

/// A decoded source file handed to rules
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Lines with their 1-based line numbers, line terminators stripped
    pub fn numbered_lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.content
            .lines()
            .enumerate()
            .map(|(i, line)| (i as u32 + 1, line))
    }
}

/// Per-run rule options, keyed by option name
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    configurations: BTreeMap<String, i64>,
}

impl RuleContext {
    pub fn new(configurations: BTreeMap<String, i64>) -> Self {
        Self { configurations }
    }

    /// Integer option, falling back to the rule's default
    pub fn int_option(&self, name: &str, default: i64) -> i64 {
        self.configurations.get(name).copied().unwrap_or(default)
    }
}

/// A check run over every analyzed source file
pub trait Rule: Send + Sync {
    /// Stable rule name, used for enabling and disabling
    fn name(&self) -> &'static str;

    fn priority(&self) -> Priority;

    fn check(&self, source: &SourceFile, context: &RuleContext) -> Vec<Violation>;
}
