//! Run configuration
//!
//! A [`DriverConfig`] is loaded from an optional file (TOML, YAML or JSON) and
//! then overridden by command-line flags. It is validated once, before any
//! rule is loaded, and is immutable for the rest of the run.

mod file_loader;

pub use file_loader::{DEFAULT_CONFIG_FILE, load_from_file};

use crate::results::ResultMode;
use crate::threshold::ThresholdConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors. All of them stop the run before analysis.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("no report type configured")]
    NoReporters,

    #[error("output path {0} has no file name")]
    InvalidOutputTemplate(PathBuf),

    #[error("invalid rule configuration '{0}', expected NAME=VALUE")]
    InvalidRuleConfiguration(String),

    #[error("max concurrency must be at least 1")]
    InvalidConcurrency,
}

/// Default source extensions scanned when a directory is given
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "m", "mm"];

/// Configuration for one driver run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Reporter names, rendered in this order
    pub report_types: Vec<String>,
    /// Output path template; each reporter swaps in its own extension
    pub output: Option<PathBuf>,
    pub max_priority_1: Option<u64>,
    pub max_priority_2: Option<u64>,
    pub max_priority_3: Option<u64>,
    /// Report every recorded violation instead of deduplicating
    pub allow_duplicated_violations: bool,
    /// When non-empty, only these rules are enabled
    pub enable_rules: Vec<String>,
    pub disable_rules: Vec<String>,
    /// Per-rule integer options, e.g. `LONG_LINE = 120`
    pub rule_configurations: BTreeMap<String, i64>,
    /// Extensions picked up when a source argument is a directory
    pub extensions: Vec<String>,
    /// Upper bound on files analyzed at once
    pub max_concurrency: usize,
    /// Print the enabled rule names before analysis
    pub list_enabled_rules: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            report_types: vec!["text".to_string()],
            output: None,
            max_priority_1: None,
            max_priority_2: None,
            max_priority_3: None,
            allow_duplicated_violations: false,
            enable_rules: Vec::new(),
            disable_rules: Vec::new(),
            rule_configurations: BTreeMap::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_concurrency: default_concurrency(),
            list_enabled_rules: false,
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl DriverConfig {
    /// Threshold ceilings; unset priorities are unbounded
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig::new(
            self.max_priority_1.unwrap_or(ThresholdConfig::UNBOUNDED),
            self.max_priority_2.unwrap_or(ThresholdConfig::UNBOUNDED),
            self.max_priority_3.unwrap_or(ThresholdConfig::UNBOUNDED),
        )
    }

    pub fn result_mode(&self) -> ResultMode {
        ResultMode::from_allow_duplicates(self.allow_duplicated_violations)
    }

    /// Append report types from a comma separated list, skipping blanks
    pub fn add_report_types(&mut self, list: &str) {
        self.report_types.extend(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }

    /// Parse and store a `NAME=VALUE` rule option
    pub fn add_rule_configuration(&mut self, pair: &str) -> Result<(), ConfigError> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidRuleConfiguration(pair.to_string()))?;
        let name = name.trim();
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidRuleConfiguration(pair.to_string()))?;
        if name.is_empty() {
            return Err(ConfigError::InvalidRuleConfiguration(pair.to_string()));
        }
        self.rule_configurations.insert(name.to_string(), value);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_types.iter().all(|r| r.trim().is_empty()) {
            return Err(ConfigError::NoReporters);
        }
        if let Some(output) = &self.output {
            if output.file_name().is_none() {
                return Err(ConfigError::InvalidOutputTemplate(output.clone()));
            }
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        Ok(())
    }
}
