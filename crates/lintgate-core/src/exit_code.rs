//! # Exit Codes
//!
//! Process exit codes for a lintgate run and the resolver that picks one.
//!
//! The codes are the only contract a run exposes to scripts and CI
//! pipelines at exit time, so their values never change.

use crate::error::{DriverError, Stage};
use crate::threshold::GateReport;
use std::io::{self, Write};

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// No rule could be loaded
pub const EXIT_RULE_NOT_FOUND: i32 = 1;

/// A requested reporter is not registered
pub const EXIT_REPORTER_NOT_FOUND: i32 = 2;

/// Run-level analysis failure (unreadable inputs, failed tasks)
pub const EXIT_ERROR_WHILE_PROCESSING: i32 = 3;

/// Opening a sink or rendering a report failed
pub const EXIT_ERROR_WHILE_REPORTING: i32 = 4;

/// Violation counts exceed the configured thresholds
pub const EXIT_VIOLATIONS_EXCEED_THRESHOLD: i32 = 5;

/// Some source could not be compiled or analyzed
pub const EXIT_COMPILATION_ERRORS: i32 = 6;

/// Invalid arguments or configuration
pub const EXIT_CONFIGURATION_ERROR: i32 = 7;

/// Terminal outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    ConfigurationError,
    RuleNotFound,
    ReporterNotFound,
    ErrorWhileProcessing,
    ErrorWhileReporting,
    CompilationErrors,
    ViolationsExceedThreshold,
}

impl ExitOutcome {
    pub fn code(self) -> i32 {
        match self {
            ExitOutcome::Success => EXIT_SUCCESS,
            ExitOutcome::ConfigurationError => EXIT_CONFIGURATION_ERROR,
            ExitOutcome::RuleNotFound => EXIT_RULE_NOT_FOUND,
            ExitOutcome::ReporterNotFound => EXIT_REPORTER_NOT_FOUND,
            ExitOutcome::ErrorWhileProcessing => EXIT_ERROR_WHILE_PROCESSING,
            ExitOutcome::ErrorWhileReporting => EXIT_ERROR_WHILE_REPORTING,
            ExitOutcome::CompilationErrors => EXIT_COMPILATION_ERRORS,
            ExitOutcome::ViolationsExceedThreshold => EXIT_VIOLATIONS_EXCEED_THRESHOLD,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitOutcome::Success
    }
}

impl From<Stage> for ExitOutcome {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Configuration => ExitOutcome::ConfigurationError,
            Stage::RuleLoad => ExitOutcome::RuleNotFound,
            Stage::ReporterResolution => ExitOutcome::ReporterNotFound,
            Stage::Analysis => ExitOutcome::ErrorWhileProcessing,
            Stage::Reporting => ExitOutcome::ErrorWhileReporting,
        }
    }
}

/// Everything the resolver needs to know about a finished run
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Fatal stage failures; normally at most one
    pub failures: Vec<DriverError>,
    /// Whether the reported result set contains compilation errors
    pub has_errors: bool,
    /// Gate evaluation, absent when the run stopped before results existed
    pub gate: Option<GateReport>,
}

impl RunOutcome {
    /// Outcome of a run that stopped at `error`
    pub fn failed(error: DriverError) -> Self {
        Self {
            failures: vec![error],
            ..Default::default()
        }
    }

    /// The failure that decides the exit code: the one from the earliest stage
    pub fn decisive_failure(&self) -> Option<&DriverError> {
        self.failures.iter().min_by_key(|e| e.stage())
    }
}

/// Total, deterministic mapping from a run outcome to an exit outcome
pub struct ExitCodeResolver;

impl ExitCodeResolver {
    /// Conditions are checked in a fixed order; the first match wins.
    pub fn resolve(outcome: &RunOutcome) -> ExitOutcome {
        for stage in [
            Stage::Configuration,
            Stage::RuleLoad,
            Stage::ReporterResolution,
            Stage::Analysis,
            Stage::Reporting,
        ] {
            if outcome.failures.iter().any(|e| e.stage() == stage) {
                return ExitOutcome::from(stage);
            }
        }

        if outcome.has_errors {
            return ExitOutcome::CompilationErrors;
        }

        match &outcome.gate {
            Some(gate) if !gate.passed => ExitOutcome::ViolationsExceedThreshold,
            _ => ExitOutcome::Success,
        }
    }

    /// Write the user-facing diagnostics for `outcome` to `err`.
    ///
    /// Fatal failures produce one line; a failed gate adds the per-priority
    /// summary.
    pub fn write_diagnostics(outcome: &RunOutcome, err: &mut dyn Write) -> io::Result<ExitOutcome> {
        let exit = Self::resolve(outcome);

        match exit {
            ExitOutcome::Success => {}
            ExitOutcome::CompilationErrors => {
                writeln!(err, "lintgate: error: some source files could not be analyzed")?;
            }
            ExitOutcome::ViolationsExceedThreshold => {
                writeln!(err, "lintgate: error: violations exceed threshold")?;
                if let Some(gate) = &outcome.gate {
                    writeln!(err, "{}", gate.summary())?;
                }
            }
            _ => {
                if let Some(failure) = outcome.decisive_failure() {
                    writeln!(err, "lintgate: error: {}", failure)?;
                }
            }
        }

        Ok(exit)
    }
}
