//! Lintgate Core Library
//!
//! This crate provides the orchestration core of a static-analysis run:
//! violation collection, raw and deduplicated result views, threshold
//! gating, multi-format report dispatch and exit-code resolution.

pub mod analysis;
pub mod config;
pub mod driver;
pub mod error;
pub mod exit_code;
pub mod report;
pub mod results;
pub mod rules;
pub mod threshold;
pub mod violation;

// Re-export commonly used types
pub use analysis::{AnalysisError, AnalysisSummary, Analyzer, RulesetAnalyzer};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, DriverConfig, load_from_file};
pub use driver::{Driver, PreparedRun, RunReport, write_rule_listing};
pub use error::{DriverError, DriverResult, Stage};
pub use exit_code::{ExitCodeResolver, ExitOutcome, RunOutcome};
pub use report::{
    DispatchSummary, FileSinks, ReportDispatcher, ReportError, Reporter, ReporterError,
    ReporterRegistry, ReportingError, SharedStream, SinkError, SinkProvider,
};
pub use results::{
    DeduplicatedResultSet, PriorityCounts, RawResultSet, ResultMode, ResultSet,
};
pub use rules::{EnabledRules, Rule, RuleContext, RuleError, RuleRegistry, RulesetFilter, SourceFile};
pub use threshold::{GateReport, PriorityCheck, ThresholdConfig, ThresholdGate};
pub use violation::{
    COMPILER_ERROR_RULE, Location, Priority, SharedCollector, Violation, ViolationCollector,
    ViolationSnapshot,
};
