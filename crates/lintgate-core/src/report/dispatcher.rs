//! Sequential report dispatch

use super::sink::{SinkError, SinkProvider};
use super::{ReportError, Reporter};
use crate::results::ResultSet;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

/// Failure of the reporting phase
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("{reporter} reporter failed: {source}")]
    Render {
        reporter: String,
        #[source]
        source: ReportError,
    },
}

/// Where each reporter's output went
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// `(reporter name, destination)` in render order
    pub written: Vec<(String, String)>,
}

/// Renders one result set through an ordered list of reporters
#[derive(Clone)]
pub struct ReportDispatcher {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl ReportDispatcher {
    pub fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    pub fn reporter_names(&self) -> Vec<&'static str> {
        self.reporters.iter().map(|r| r.name()).collect()
    }

    /// Render through every reporter, one at a time, in configured order.
    ///
    /// The first failure stops the remaining reporters. Files written by
    /// earlier reporters are left in place.
    pub fn dispatch(
        &self,
        results: &dyn ResultSet,
        sinks: &dyn SinkProvider,
    ) -> Result<DispatchSummary, ReportingError> {
        let mut summary = DispatchSummary::default();

        for reporter in &self.reporters {
            let name = reporter.name();
            let destination = sinks.describe(name);
            let render_error = |source: ReportError| ReportingError::Render {
                reporter: name.to_string(),
                source,
            };

            let mut sink = sinks.open(name)?;
            reporter.render(results, &mut sink).map_err(render_error)?;
            sink.flush().map_err(|e| render_error(e.into()))?;
            drop(sink);

            tracing::info!(reporter = name, destination = %destination, "report written");
            summary.written.push((name.to_string(), destination));
        }

        Ok(summary)
    }
}

impl std::fmt::Debug for ReportDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportDispatcher")
            .field("reporters", &self.reporter_names())
            .finish()
    }
}
