//! Analyzer that runs the enabled rules over source files in parallel

use super::{AnalysisError, AnalysisSummary, Analyzer};
use crate::config::DriverConfig;
use crate::rules::{EnabledRules, SourceFile};
use crate::violation::{SharedCollector, Violation, ViolationCollector};
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinError;
use walkdir::WalkDir;

/// Result of analyzing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Analyzed,
    Failed,
}

/// Reads each source file on a blocking task and applies every enabled rule
#[derive(Debug, Clone)]
pub struct RulesetAnalyzer {
    sources: Vec<PathBuf>,
    extensions: Vec<String>,
    max_concurrency: usize,
}

impl RulesetAnalyzer {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        let defaults = DriverConfig::default();
        Self {
            sources,
            extensions: defaults.extensions,
            max_concurrency: defaults.max_concurrency,
        }
    }

    /// Analyzer for `sources` using the config's extensions and concurrency
    pub fn from_config(sources: Vec<PathBuf>, config: &DriverConfig) -> Self {
        Self {
            sources,
            extensions: config.extensions.clone(),
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Expand directory inputs into the files they contain
    fn expand_sources(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        let mut files = Vec::new();

        for source in &self.sources {
            if !source.exists() {
                return Err(AnalysisError::SourceNotFound(source.clone()));
            }
            if !source.is_dir() {
                files.push(source.clone());
                continue;
            }

            for entry in WalkDir::new(source).sort_by_file_name() {
                let entry = entry.map_err(|e| AnalysisError::Unreadable {
                    path: source.clone(),
                    source: e.into(),
                })?;
                if entry.file_type().is_file() && self.has_source_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        if files.is_empty() {
            return Err(AnalysisError::NoSources);
        }
        Ok(files)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Analyze a single file and append its findings as one batch
fn analyze_file(
    path: &Path,
    rules: &EnabledRules,
    collector: &ViolationCollector,
) -> Result<FileOutcome, AnalysisError> {
    let bytes = fs::read(path).map_err(|source| AnalysisError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), "source could not be decoded");
            collector.record(Violation::compilation_error(
                path,
                format!("cannot decode source as UTF-8: {}", e.utf8_error()),
            ));
            return Ok(FileOutcome::Failed);
        }
    };

    let source = SourceFile::new(path, content);
    let findings: Vec<Violation> = rules
        .rules()
        .iter()
        .flat_map(|rule| rule.check(&source, rules.context()))
        .collect();

    tracing::debug!(path = %path.display(), violations = findings.len(), "analyzed");
    collector.record_batch(findings);
    Ok(FileOutcome::Analyzed)
}

/// Fold one finished file into the summary, surfacing run-level failures
fn tally(
    summary: &mut AnalysisSummary,
    joined: Result<Result<FileOutcome, AnalysisError>, JoinError>,
) -> Result<(), AnalysisError> {
    let outcome = joined.map_err(|e| AnalysisError::Task(e.to_string()))??;
    summary.files_analyzed += 1;
    if outcome == FileOutcome::Failed {
        summary.files_failed += 1;
    }
    Ok(())
}

#[async_trait]
impl Analyzer for RulesetAnalyzer {
    async fn analyze(
        &self,
        rules: &EnabledRules,
        collector: SharedCollector,
    ) -> Result<AnalysisSummary, AnalysisError> {
        let files = self.expand_sources()?;
        tracing::info!(
            files = files.len(),
            concurrency = self.max_concurrency,
            "starting analysis"
        );

        // At most `max_concurrency` files in flight; the first run-level
        // failure returns before another file is started.
        let mut in_flight = FuturesUnordered::new();
        let mut summary = AnalysisSummary::default();

        for path in files {
            if in_flight.len() >= self.max_concurrency {
                if let Some(joined) = in_flight.next().await {
                    tally(&mut summary, joined)?;
                }
            }

            let rules = rules.clone();
            let collector = Arc::clone(&collector);
            in_flight.push(tokio::task::spawn_blocking(move || {
                analyze_file(&path, &rules, &collector)
            }));
        }

        while let Some(joined) = in_flight.next().await {
            tally(&mut summary, joined)?;
        }

        tracing::info!(
            analyzed = summary.files_analyzed,
            failed = summary.files_failed,
            "analysis finished"
        );
        Ok(summary)
    }
}
