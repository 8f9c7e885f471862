//! XML report generation, violations grouped by file

use super::{ReportError, Reporter, escape_markup, tool_version};
use crate::results::ResultSet;
use crate::violation::{Priority, Violation};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

pub struct XmlReporter;

impl XmlReporter {
    /// Group violations by file, files in order of first appearance
    fn group_by_file<'a>(results: &'a dyn ResultSet) -> Vec<(&'a Path, Vec<&'a Violation>)> {
        let mut groups: Vec<(&Path, Vec<&Violation>)> = Vec::new();
        for violation in results.iter() {
            match groups.iter().position(|(path, _)| *path == violation.path()) {
                Some(index) => groups[index].1.push(violation),
                None => groups.push((violation.path(), vec![violation])),
            }
        }
        groups
    }

    fn write_violation(sink: &mut dyn Write, violation: &Violation) -> std::io::Result<()> {
        let location = &violation.location;
        write!(
            sink,
            "    <violation rule=\"{}\" priority=\"{}\" beginline=\"{}\" begincolumn=\"{}\"",
            escape_markup(&violation.rule_id),
            violation.priority.level(),
            location.start_line,
            location.start_column,
        )?;
        if let (Some(end_line), Some(end_column)) = (location.end_line, location.end_column) {
            write!(sink, " endline=\"{}\" endcolumn=\"{}\"", end_line, end_column)?;
        }
        if violation.is_compilation_error {
            write!(sink, " compilationerror=\"true\"")?;
        }
        writeln!(sink, ">{}</violation>", escape_markup(&violation.message))
    }
}

impl Reporter for XmlReporter {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(sink, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            sink,
            r#"<lintgate version="{}" timestamp="{}">"#,
            tool_version(),
            Utc::now().to_rfc3339()
        )?;
        writeln!(
            sink,
            r#"  <summary total="{}" files="{}" p1="{}" p2="{}" p3="{}" errors="{}"/>"#,
            results.total(),
            results.files_with_violations(),
            results.count_by_priority(Priority::P1),
            results.count_by_priority(Priority::P2),
            results.count_by_priority(Priority::P3),
            results.has_errors(),
        )?;

        for (path, violations) in Self::group_by_file(results) {
            writeln!(
                sink,
                r#"  <file name="{}">"#,
                escape_markup(&path.display().to_string())
            )?;
            for violation in violations {
                Self::write_violation(sink, violation)?;
            }
            writeln!(sink, "  </file>")?;
        }

        writeln!(sink, "</lintgate>")?;
        Ok(())
    }
}
