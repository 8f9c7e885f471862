//! HTML report generation

use super::{ReportError, Reporter, escape_markup, tool_version};
use crate::results::ResultSet;
use crate::violation::Priority;
use chrono::Utc;
use std::io::Write;

/// Standalone HTML page with summary cards and a violation table
pub struct HtmlReporter;

const STYLE: &str = r#"    <style>
        :root {
            --bg-primary: #1a1a2e;
            --bg-secondary: #16213e;
            --bg-card: #0f3460;
            --text-primary: #eee;
            --text-secondary: #aaa;
            --accent: #e94560;
            --p1: #f87171;
            --p2: #fbbf24;
            --p3: #4ade80;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.6;
            padding: 2rem;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        h1 { color: var(--accent); margin-bottom: 1rem; }
        h2 { margin: 2rem 0 1rem; border-bottom: 2px solid var(--accent); padding-bottom: 0.5rem; }
        .summary-cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(160px, 1fr)); gap: 1rem; margin-bottom: 2rem; }
        .card { background: var(--bg-card); padding: 1.5rem; border-radius: 8px; text-align: center; }
        .card-value { font-size: 2rem; font-weight: bold; color: var(--accent); }
        .card-label { color: var(--text-secondary); font-size: 0.875rem; }
        table { width: 100%; border-collapse: collapse; margin-bottom: 2rem; }
        th, td { padding: 0.75rem 1rem; text-align: left; border-bottom: 1px solid var(--bg-secondary); }
        th { background: var(--bg-secondary); font-weight: 600; }
        tr:hover { background: var(--bg-secondary); }
        .priority-1 { color: var(--p1); }
        .priority-2 { color: var(--p2); }
        .priority-3 { color: var(--p3); }
        .empty { color: var(--text-secondary); }
        footer { color: var(--text-secondary); font-size: 0.875rem; }
    </style>
"#;

impl HtmlReporter {
    fn card(html: &mut String, label: &str, value: usize) {
        html.push_str(&format!(
            r#"            <div class="card">
                <div class="card-value">{}</div>
                <div class="card-label">{}</div>
            </div>
"#,
            value, label
        ));
    }
}

impl Reporter for HtmlReporter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError> {
        let mut html = String::new();

        html.push_str(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Lintgate Report</title>
"#,
        );
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n    <div class=\"container\">\n");
        html.push_str("        <h1>Lintgate Report</h1>\n");

        // Summary
        html.push_str("        <div class=\"summary-cards\">\n");
        Self::card(&mut html, "Total Violations", results.total());
        Self::card(&mut html, "Files With Violations", results.files_with_violations());
        for priority in Priority::ALL {
            Self::card(
                &mut html,
                &format!("Priority {}", priority.level()),
                results.count_by_priority(priority),
            );
        }
        html.push_str("        </div>\n");

        // Violations
        html.push_str("        <h2>Violations</h2>\n");
        if results.total() == 0 {
            html.push_str("        <p class=\"empty\">No violations found.</p>\n");
        } else {
            html.push_str(
                r#"        <table>
            <thead>
                <tr><th>File</th><th>Location</th><th>Rule</th><th>Priority</th><th>Message</th></tr>
            </thead>
            <tbody>
"#,
            );
            for violation in results.iter() {
                let rule = if violation.is_compilation_error {
                    format!("<em>{}</em>", escape_markup(&violation.rule_id))
                } else {
                    escape_markup(&violation.rule_id)
                };
                html.push_str(&format!(
                    "                <tr><td>{}</td><td>{}:{}</td><td>{}</td><td class=\"priority-{}\">{}</td><td>{}</td></tr>\n",
                    escape_markup(&violation.location.path.display().to_string()),
                    violation.location.start_line,
                    violation.location.start_column,
                    rule,
                    violation.priority.level(),
                    violation.priority,
                    escape_markup(&violation.message),
                ));
            }
            html.push_str("            </tbody>\n        </table>\n");
        }

        html.push_str(&format!(
            "        <footer>Generated by lintgate v{} at {}</footer>\n",
            tool_version(),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        html.push_str("    </div>\n</body>\n</html>\n");

        sink.write_all(html.as_bytes())?;
        Ok(())
    }
}
