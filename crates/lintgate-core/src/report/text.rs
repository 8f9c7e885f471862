//! Plain-text report generation

use super::{ReportError, Reporter, tool_version};
use crate::results::ResultSet;
use crate::violation::Priority;
use std::io::Write;

/// Plain-text reporter, one line per violation
pub struct TextReporter;

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(sink, "Lintgate Report")?;
        writeln!(sink)?;
        writeln!(
            sink,
            "Summary: TotalViolations={} FilesWithViolations={} P1={} P2={} P3={}",
            results.total(),
            results.files_with_violations(),
            results.count_by_priority(Priority::P1),
            results.count_by_priority(Priority::P2),
            results.count_by_priority(Priority::P3),
        )?;
        writeln!(sink)?;

        for violation in results.iter().filter(|v| !v.is_compilation_error) {
            writeln!(
                sink,
                "{}: {} {} {}",
                violation.location, violation.rule_id, violation.priority, violation.message
            )?;
        }

        if results.has_errors() {
            writeln!(sink)?;
            writeln!(sink, "Compiler Errors:")?;
            writeln!(sink, "(please be aware that these errors will prevent lintgate from analyzing those source files)")?;
            writeln!(sink)?;
            for violation in results.iter().filter(|v| v.is_compilation_error) {
                writeln!(sink, "{}: {}", violation.location, violation.message)?;
            }
        }

        writeln!(sink)?;
        writeln!(sink, "[lintgate v{}]", tool_version())?;
        Ok(())
    }
}
