//! Analyzer interface
//!
//! An analyzer walks the inputs of a run, applies the enabled rules and writes
//! every finding into the run's collector. Files that cannot be analyzed are
//! recorded as compilation-error violations; problems with the environment
//! itself abort the run with an [`AnalysisError`].

mod ruleset;

pub use ruleset::RulesetAnalyzer;

use crate::rules::EnabledRules;
use crate::violation::SharedCollector;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level analysis failures
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no source files to analyze")]
    NoSources,

    #[error("cannot find source {0}")]
    SourceNotFound(PathBuf),

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis task failed: {0}")]
    Task(String),
}

/// What an analysis run covered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub files_analyzed: usize,
    /// Files recorded as compilation errors
    pub files_failed: usize,
}

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze every input, recording findings into `collector`
    async fn analyze(
        &self,
        rules: &EnabledRules,
        collector: SharedCollector,
    ) -> Result<AnalysisSummary, AnalysisError>;
}
