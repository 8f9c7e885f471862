//! Stage-tagged errors for a driver run
//!
//! Every fatal failure of the pipeline is a [`DriverError`]. The variant
//! records which stage failed; [`DriverError::stage`] exposes it as an
//! ordered [`Stage`] so exit resolution can give earlier stages precedence.

use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::report::{ReporterError, ReportingError};
use crate::rules::RuleError;
use thiserror::Error;

/// Result type alias for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Configuration,
    RuleLoad,
    ReporterResolution,
    Analysis,
    Reporting,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::RuleLoad => "rule loading",
            Stage::ReporterResolution => "reporter resolution",
            Stage::Analysis => "analysis",
            Stage::Reporting => "reporting",
        }
    }
}

/// Fatal failure of one pipeline stage
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    RuleLoad(#[from] RuleError),

    #[error(transparent)]
    ReporterResolution(#[from] ReporterError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Reporting(#[from] ReportingError),
}

impl DriverError {
    /// Stage that raised the error
    pub fn stage(&self) -> Stage {
        match self {
            DriverError::Configuration(_) => Stage::Configuration,
            DriverError::RuleLoad(_) => Stage::RuleLoad,
            DriverError::ReporterResolution(_) => Stage::ReporterResolution,
            DriverError::Analysis(_) => Stage::Analysis,
            DriverError::Reporting(_) => Stage::Reporting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_matches_pipeline() {
        assert!(Stage::Configuration < Stage::RuleLoad);
        assert!(Stage::RuleLoad < Stage::ReporterResolution);
        assert!(Stage::ReporterResolution < Stage::Analysis);
        assert!(Stage::Analysis < Stage::Reporting);
    }

    #[test]
    fn test_error_stage_and_message() {
        let err = DriverError::from(RuleError::NoRulesLoaded);
        assert_eq!(err.stage(), Stage::RuleLoad);
        assert_eq!(err.to_string(), "no rule loaded");

        let err = DriverError::from(ConfigError::NoReporters);
        assert_eq!(err.stage(), Stage::Configuration);
    }
}
