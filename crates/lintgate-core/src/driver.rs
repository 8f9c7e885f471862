//! Run orchestration
//!
//! A run goes through configuration, rule loading, reporter resolution,
//! analysis, freezing, reporting and the threshold gate, in that order. The
//! first fatal stage failure ends the run; everything the exit resolver needs
//! is collected in a [`RunOutcome`].

use crate::analysis::{AnalysisSummary, Analyzer};
use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};
use crate::exit_code::RunOutcome;
use crate::report::{
    DispatchSummary, FileSinks, ReportDispatcher, ReporterRegistry, SharedStream, SinkProvider,
};
use crate::results::ResultMode;
use crate::rules::{EnabledRules, RuleRegistry, RulesetFilter};
use crate::threshold::ThresholdGate;
use crate::violation::ViolationCollector;
use parking_lot::Mutex;
use std::io::{self, Write};
use tracing::{debug, info};

/// Everything resolved before analysis starts
pub struct PreparedRun {
    pub rules: EnabledRules,
    pub dispatcher: ReportDispatcher,
    pub gate: ThresholdGate,
    pub mode: ResultMode,
}

/// Details of a finished run beyond its exit outcome
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub analysis: Option<AnalysisSummary>,
    pub dispatch: Option<DispatchSummary>,
}

/// Drives one analysis run from configuration to exit outcome
pub struct Driver {
    config: DriverConfig,
    rules: RuleRegistry,
    reporters: ReporterRegistry,
    listing: Mutex<Box<dyn Write + Send>>,
}

impl Driver {
    /// Driver over the built-in rules and reporters
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            rules: RuleRegistry::builtin(),
            reporters: ReporterRegistry::builtin(),
            listing: Mutex::new(Box::new(io::stdout())),
        }
    }

    pub fn with_rule_registry(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_reporter_registry(mut self, reporters: ReporterRegistry) -> Self {
        self.reporters = reporters;
        self
    }

    /// Where the enabled-rule listing goes; stdout by default
    pub fn with_listing_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.listing = Mutex::new(Box::new(out));
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Sinks implied by the configuration: one file per reporter when an
    /// output template is set, stdout otherwise
    pub fn sink_provider(&self) -> Box<dyn SinkProvider> {
        match &self.config.output {
            Some(template) => Box::new(FileSinks::new(template)),
            None => Box::new(SharedStream::stdout()),
        }
    }

    /// Stages before analysis: validate, load rules, resolve reporters
    pub fn prepare(&self) -> DriverResult<PreparedRun> {
        self.config.validate()?;

        let filter = RulesetFilter {
            enabled: self.config.enable_rules.clone(),
            disabled: self.config.disable_rules.clone(),
            configurations: self.config.rule_configurations.clone(),
        };
        let rules = self.rules.select(&filter)?;

        let reporters = self.reporters.resolve(&self.config.report_types)?;
        let dispatcher = ReportDispatcher::new(reporters);
        info!(reporters = ?dispatcher.reporter_names(), "reporters resolved");

        Ok(PreparedRun {
            rules,
            dispatcher,
            gate: ThresholdGate::new(self.config.thresholds()),
            mode: self.config.result_mode(),
        })
    }

    /// Run with the sinks implied by the configuration
    pub async fn run(&self, analyzer: &dyn Analyzer) -> RunReport {
        let sinks = self.sink_provider();
        self.run_with(analyzer, sinks.as_ref()).await
    }

    /// Run, writing reports to `sinks`
    pub async fn run_with(&self, analyzer: &dyn Analyzer, sinks: &dyn SinkProvider) -> RunReport {
        let prepared = match self.prepare() {
            Ok(prepared) => prepared,
            Err(err) => return RunReport::failed(err),
        };

        if self.config.list_enabled_rules {
            self.list_rules(&prepared.rules);
        }

        let collector = ViolationCollector::shared();
        let analysis = match analyzer.analyze(&prepared.rules, collector.clone()).await {
            Ok(summary) => summary,
            Err(err) => return RunReport::failed(err.into()),
        };

        let snapshot = collector.snapshot();
        debug!(violations = snapshot.len(), mode = ?prepared.mode, "collector frozen");
        let results = prepared.mode.build(snapshot);

        let dispatch = match prepared.dispatcher.dispatch(results.as_ref(), sinks) {
            Ok(summary) => summary,
            Err(err) => {
                let mut report = RunReport::failed(DriverError::from(err));
                report.analysis = Some(analysis);
                report.outcome.has_errors = results.has_errors();
                return report;
            }
        };

        let gate = prepared.gate.evaluate(results.as_ref());
        info!(passed = gate.passed, summary = %gate, "threshold gate evaluated");

        RunReport {
            outcome: RunOutcome {
                failures: Vec::new(),
                has_errors: results.has_errors(),
                gate: Some(gate),
            },
            analysis: Some(analysis),
            dispatch: Some(dispatch),
        }
    }

    /// Write the enabled-rule listing to the listing output.
    ///
    /// A write failure loses the listing but never changes the run outcome.
    pub fn list_rules(&self, rules: &EnabledRules) {
        let mut out = self.listing.lock();
        let written = write_rule_listing(rules, &mut **out).and_then(|()| out.flush());
        if let Err(err) = written {
            debug!(error = %err, "rule listing not written");
        }
    }
}

impl RunReport {
    fn failed(error: DriverError) -> Self {
        debug!(stage = error.stage().as_str(), error = %error, "run stopped");
        Self {
            outcome: RunOutcome::failed(error),
            ..Default::default()
        }
    }
}

/// `Enabled rules:` followed by one `- <name>` line per rule
pub fn write_rule_listing(rules: &EnabledRules, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Enabled rules:")?;
    for name in rules.names() {
        writeln!(out, "- {}", name)?;
    }
    Ok(())
}
