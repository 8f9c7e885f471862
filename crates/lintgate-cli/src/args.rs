//! CLI argument definitions using clap
//!
//! - lintgate src/                         # Analyze a directory, text report on stdout
//! - lintgate -r xml,html -o out/report src # One report file per format
//! - lintgate --max-priority-1 0 src/      # Fail the run on any P1 violation

use clap::Parser;
use lintgate_core::config::{ConfigError, DEFAULT_CONFIG_FILE, DriverConfig, load_from_file};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "lintgate")]
#[command(about = "Run line-based lint rules, gate on priority thresholds and write reports")]
#[command(version)]
pub struct Cli {
    /// Source files or directories to analyze
    #[arg(required_unless_present = "list_enabled_rules")]
    pub sources: Vec<PathBuf>,

    /// Path to configuration file (defaults to .lintgate.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report types to generate, comma separated or repeated
    #[arg(short = 'r', long = "report-type", value_name = "TYPES")]
    pub report_types: Vec<String>,

    /// Output path template; the extension is replaced by each report type
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum allowed number of priority 1 violations
    #[arg(long = "max-priority-1", value_name = "N")]
    pub max_priority_1: Option<u64>,

    /// Maximum allowed number of priority 2 violations
    #[arg(long = "max-priority-2", value_name = "N")]
    pub max_priority_2: Option<u64>,

    /// Maximum allowed number of priority 3 violations
    #[arg(long = "max-priority-3", value_name = "N")]
    pub max_priority_3: Option<u64>,

    /// Report every recorded violation, including duplicates
    #[arg(long)]
    pub allow_duplicated_violations: bool,

    /// Only run these rules
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Skip these rules
    #[arg(long = "disable-rule", value_name = "NAME")]
    pub disabled_rules: Vec<String>,

    /// Rule option as NAME=VALUE, e.g. LONG_LINE=120
    #[arg(long = "rule-configuration", value_name = "NAME=VALUE")]
    pub rule_configurations: Vec<String>,

    /// Print the enabled rules before analyzing
    #[arg(long)]
    pub list_enabled_rules: bool,

    /// Maximum number of files analyzed in parallel
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// File extension scanned in directories (repeatable)
    #[arg(long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Load the configuration file and apply the command-line overrides
    pub fn resolve_config(&self) -> Result<DriverConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_from_file(path, true)?,
            None => load_from_file(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Flags given on the command line win over file values
    pub fn apply_overrides(&self, config: &mut DriverConfig) -> Result<(), ConfigError> {
        if !self.report_types.is_empty() {
            config.report_types.clear();
            for list in &self.report_types {
                config.add_report_types(list);
            }
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if self.max_priority_1.is_some() {
            config.max_priority_1 = self.max_priority_1;
        }
        if self.max_priority_2.is_some() {
            config.max_priority_2 = self.max_priority_2;
        }
        if self.max_priority_3.is_some() {
            config.max_priority_3 = self.max_priority_3;
        }
        if self.allow_duplicated_violations {
            config.allow_duplicated_violations = true;
        }
        if !self.rules.is_empty() {
            config.enable_rules = self.rules.clone();
        }
        config.disable_rules.extend(self.disabled_rules.iter().cloned());
        for pair in &self.rule_configurations {
            config.add_rule_configuration(pair)?;
        }
        if self.list_enabled_rules {
            config.list_enabled_rules = true;
        }
        if let Some(max_concurrency) = self.max_concurrency {
            config.max_concurrency = max_concurrency;
        }
        if !self.extensions.is_empty() {
            config.extensions = self
                .extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();
        }
        Ok(())
    }
}
