//! JSON report generation

use super::{ReportError, Reporter, tool_version};
use crate::results::{PriorityCounts, ResultSet};
use crate::violation::Violation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON report generator
pub struct JsonReporter;

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    timestamp: DateTime<Utc>,
    summary: JsonSummary,
    violations: &'a [Violation],
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    files_with_violations: usize,
    priorities: PriorityCounts,
    has_errors: bool,
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError> {
        let report = JsonReport {
            version: tool_version(),
            timestamp: Utc::now(),
            summary: JsonSummary {
                total: results.total(),
                files_with_violations: results.files_with_violations(),
                priorities: results.counts(),
                has_errors: results.has_errors(),
            },
            violations: results.violations(),
        };

        serde_json::to_writer_pretty(&mut *sink, &report)?;
        writeln!(sink)?;
        Ok(())
    }
}
