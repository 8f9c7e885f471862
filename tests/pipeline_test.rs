//! End-to-end runs of the driver with scripted analyzers and reporters

use async_trait::async_trait;
use lintgate::report::ReportError;
use lintgate::{
    AnalysisError, AnalysisSummary, Analyzer, Driver, DriverConfig, DriverError, EnabledRules,
    ExitCodeResolver, ExitOutcome, FileSinks, Location, Priority, Reporter, ReporterRegistry,
    ResultSet, RulesetAnalyzer, SharedCollector, SharedStream, Violation,
};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

/// Records a fixed list of violations, or fails
struct ScriptedAnalyzer {
    violations: Vec<Violation>,
    fail: bool,
    called: AtomicBool,
}

impl ScriptedAnalyzer {
    fn recording(violations: Vec<Violation>) -> Self {
        Self {
            violations,
            fail: false,
            called: AtomicBool::new(false),
        }
    }

    fn failing() -> Self {
        Self {
            violations: Vec::new(),
            fail: true,
            called: AtomicBool::new(false),
        }
    }

    fn was_called(&self) -> bool {
        self.called.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn analyze(
        &self,
        _rules: &EnabledRules,
        collector: SharedCollector,
    ) -> Result<AnalysisSummary, AnalysisError> {
        self.called.store(true, Ordering::SeqCst);
        if self.fail {
            return Err(AnalysisError::Task("worker panicked".to_string()));
        }
        collector.record_batch(self.violations.clone());
        Ok(AnalysisSummary {
            files_analyzed: 1,
            files_failed: 0,
        })
    }
}

/// Writes `<name>:<total>` so tests can see what each reporter received
struct CountingReporter {
    name: &'static str,
}

impl Reporter for CountingReporter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(sink, "{}:{}", self.name, results.total())?;
        Ok(())
    }
}

struct BrokenReporter;

impl Reporter for BrokenReporter {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn render(&self, _results: &dyn ResultSet, _sink: &mut dyn Write) -> Result<(), ReportError> {
        Err(std::io::Error::other("disk full").into())
    }
}

fn counting_registry() -> ReporterRegistry {
    let mut registry = ReporterRegistry::new();
    for name in ["text", "html", "xml"] {
        registry.register(Arc::new(CountingReporter { name }));
    }
    registry.register(Arc::new(BrokenReporter));
    registry
}

fn finding(priority: Priority, line: u32) -> Violation {
    Violation::new(
        format!("rule-p{}", priority.level()),
        priority,
        Location::new("src/main.c", line, 1),
        "finding",
    )
}

fn counts(p1: u32, p2: u32, p3: u32) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (priority, count) in [(Priority::P1, p1), (Priority::P2, p2), (Priority::P3, p3)] {
        for line in 1..=count {
            violations.push(finding(priority, line));
        }
    }
    violations
}

fn config(report_types: &[&str]) -> DriverConfig {
    DriverConfig {
        report_types: report_types.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_run_succeeds_with_empty_report() {
    let driver = Driver::new(config(&["text"]));
    let analyzer = ScriptedAnalyzer::recording(Vec::new());
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 0);
    let output = String::from_utf8(sinks.into_inner()).unwrap();
    assert!(output.contains("TotalViolations=0"));
    assert!(output.contains("[lintgate v"));
}

#[tokio::test]
async fn unknown_reporter_stops_before_analysis() {
    let driver = Driver::new(config(&["text", "sarif"]));
    let analyzer = ScriptedAnalyzer::recording(counts(1, 0, 0));
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert_eq!(
        ExitCodeResolver::resolve(&report.outcome),
        ExitOutcome::ReporterNotFound
    );
    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 2);
    assert!(!analyzer.was_called());
    assert!(sinks.into_inner().is_empty());
}

#[tokio::test]
async fn output_template_writes_one_file_per_reporter() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("report.txt");

    let driver =
        Driver::new(config(&["html", "xml"])).with_reporter_registry(counting_registry());
    let analyzer = ScriptedAnalyzer::recording(counts(0, 1, 2));
    let sinks = FileSinks::new(&template);

    let report = driver.run_with(&analyzer, &sinks).await;
    assert!(ExitCodeResolver::resolve(&report.outcome).is_success());

    let mut names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["report.html", "report.xml"]);

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("report.html")).unwrap(),
        "html:3\n"
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("report.xml")).unwrap(),
        "xml:3\n"
    );
}

#[tokio::test]
async fn shared_stream_receives_reports_in_order() {
    let driver =
        Driver::new(config(&["xml", "text", "html"])).with_reporter_registry(counting_registry());
    let analyzer = ScriptedAnalyzer::recording(counts(0, 0, 1));
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert!(ExitCodeResolver::resolve(&report.outcome).is_success());
    assert_eq!(
        String::from_utf8(sinks.into_inner()).unwrap(),
        "xml:1\ntext:1\nhtml:1\n"
    );
}

#[tokio::test]
async fn threshold_exceeded_after_reporting() {
    let driver = Driver::new(DriverConfig {
        max_priority_1: Some(0),
        max_priority_2: Some(5),
        max_priority_3: Some(100),
        ..config(&["text"])
    })
    .with_reporter_registry(counting_registry());
    let analyzer = ScriptedAnalyzer::recording(counts(1, 3, 10));
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 5);
    let gate = report.outcome.gate.as_ref().unwrap();
    assert!(!gate.passed);
    assert!(gate.summary().contains("P1=1[0]"));
    // Reports are written even though the gate fails
    assert_eq!(String::from_utf8(sinks.into_inner()).unwrap(), "text:14\n");

    let mut stderr = Vec::new();
    ExitCodeResolver::write_diagnostics(&report.outcome, &mut stderr).unwrap();
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.contains("violations exceed threshold"));
    assert!(stderr.contains("P1=1[0] P2=3[5] P3=10[100]"));
}

#[tokio::test]
async fn thresholds_are_inclusive() {
    let driver = Driver::new(DriverConfig {
        max_priority_1: Some(1),
        max_priority_2: Some(3),
        max_priority_3: Some(10),
        ..config(&["text"])
    });
    let analyzer = ScriptedAnalyzer::recording(counts(1, 3, 10));

    let report = driver
        .run_with(&analyzer, &SharedStream::new(Vec::new()))
        .await;

    assert_eq!(ExitCodeResolver::resolve(&report.outcome), ExitOutcome::Success);
}

#[tokio::test]
async fn compilation_errors_win_over_passing_gate() {
    let mut violations = counts(0, 0, 1);
    violations.push(Violation::compilation_error("src/broken.c", "invalid UTF-8"));

    let driver = Driver::new(config(&["text"]));
    let analyzer = ScriptedAnalyzer::recording(violations);
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert!(report.outcome.gate.as_ref().unwrap().passed);
    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 6);
    let output = String::from_utf8(sinks.into_inner()).unwrap();
    assert!(output.contains("Compiler Errors:"));
    assert!(output.contains("src/broken.c"));
}

#[tokio::test]
async fn analysis_failure_skips_reporting() {
    let driver = Driver::new(config(&["text"]));
    let analyzer = ScriptedAnalyzer::failing();
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert!(analyzer.was_called());
    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 3);
    assert!(report.outcome.gate.is_none());
    assert!(sinks.into_inner().is_empty());
}

#[tokio::test]
async fn configuration_error_exits_seven() {
    let driver = Driver::new(config(&[]));
    let analyzer = ScriptedAnalyzer::recording(Vec::new());

    let report = driver
        .run_with(&analyzer, &SharedStream::new(Vec::new()))
        .await;

    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 7);
    // Rejected before the reporter registry is consulted
    assert!(matches!(
        report.outcome.failures[..],
        [DriverError::Configuration(_)]
    ));
    assert!(!analyzer.was_called());
}

#[tokio::test]
async fn no_rule_loaded_exits_one() {
    let mut config = config(&["text"]);
    config.enable_rules = vec!["long line".to_string()];
    config.disable_rules = vec!["long line".to_string()];
    let driver = Driver::new(config);

    let report = driver
        .run_with(
            &ScriptedAnalyzer::recording(Vec::new()),
            &SharedStream::new(Vec::new()),
        )
        .await;

    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 1);
    let mut stderr = Vec::new();
    ExitCodeResolver::write_diagnostics(&report.outcome, &mut stderr).unwrap();
    assert_eq!(
        String::from_utf8(stderr).unwrap(),
        "lintgate: error: no rule loaded\n"
    );
}

#[tokio::test]
async fn reporting_failure_stops_later_reporters() {
    let driver = Driver::new(DriverConfig {
        max_priority_1: Some(0),
        ..config(&["text", "broken", "xml"])
    })
    .with_reporter_registry(counting_registry());
    let analyzer = ScriptedAnalyzer::recording(counts(2, 0, 0));
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    // Reporting failure outranks the failed gate
    assert_eq!(ExitCodeResolver::resolve(&report.outcome).code(), 4);
    assert_eq!(String::from_utf8(sinks.into_inner()).unwrap(), "text:2\n");
}

#[tokio::test]
async fn ruleset_analyzer_over_real_files() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("clean.c"), "int main(void) { return 0; }\n").unwrap();
    fs::write(
        src.join("dirty.c"),
        "int x; \n<<<<<<< HEAD\n// TODO: remove\n",
    )
    .unwrap();
    fs::write(src.join("notes.md"), "TODO everywhere \n").unwrap();

    let config = DriverConfig {
        max_priority_1: Some(0),
        ..config(&["json"])
    };
    let analyzer = RulesetAnalyzer::from_config(vec![src.clone()], &config);
    let driver = Driver::new(config);
    let sinks = SharedStream::new(Vec::new());

    let report = driver.run_with(&analyzer, &sinks).await;

    assert_eq!(report.analysis.unwrap().files_analyzed, 2);
    assert_eq!(
        ExitCodeResolver::resolve(&report.outcome),
        ExitOutcome::ViolationsExceedThreshold
    );

    let output = String::from_utf8(sinks.into_inner()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["summary"]["priorities"]["p1"], 1);
    assert_eq!(value["summary"]["files_with_violations"], 1);
    let rules: Vec<&str> = value["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["rule_id"].as_str().unwrap())
        .collect();
    assert!(rules.contains(&"merge conflict marker"));
    assert!(rules.contains(&"trailing whitespace"));
    assert!(rules.contains(&"todo comment"));
}
