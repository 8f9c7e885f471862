//! Report generation for analysis results
//!
//! Reporters render a [`ResultSet`] into a sink. The dispatcher resolves one
//! sink per reporter (shared stdout, or a file derived from the output path
//! template) and runs the reporters sequentially in configured order.

mod dispatcher;
mod html;
mod json;
mod registry;
mod sink;
mod text;
mod xml;

pub use dispatcher::{DispatchSummary, ReportDispatcher, ReportingError};
pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use registry::{ReporterError, ReporterRegistry};
pub use sink::{FileSinks, SharedStream, SinkError, SinkProvider};
pub use text::TextReporter;
pub use xml::XmlReporter;

use crate::results::ResultSet;
use std::io::Write;
use thiserror::Error;

/// Rendering failures
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A named renderer. The name doubles as the output file extension.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, results: &dyn ResultSet, sink: &mut dyn Write) -> Result<(), ReportError>;
}

/// Version string printed in report footers
pub(crate) fn tool_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Escape text for HTML and XML content and attributes
pub(crate) fn escape_markup(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
