//! Output sinks for reporters
//!
//! [`SinkProvider`] hands out one scoped writer per reporter. Dropping the
//! writer releases it: owned files are flushed and closed, while the shared
//! stream is only unlocked and stays open for the next reporter.

use parking_lot::{Mutex, MutexGuard};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sink acquisition failures
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open report output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves the output destination of each reporter
pub trait SinkProvider: Send + Sync {
    /// Human-readable destination for `reporter_name`, used in logs
    fn describe(&self, reporter_name: &str) -> String;

    /// Acquire the sink for `reporter_name`
    fn open(&self, reporter_name: &str) -> Result<Box<dyn Write + '_>, SinkError>;
}

/// One stream shared by every reporter, stdout by default
pub struct SharedStream<W: Write + Send> {
    stream: Mutex<W>,
}

impl SharedStream<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> SharedStream<W> {
    pub fn new(stream: W) -> Self {
        Self {
            stream: Mutex::new(stream),
        }
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> W {
        self.stream.into_inner()
    }
}

impl<W: Write + Send> SinkProvider for SharedStream<W> {
    fn describe(&self, _reporter_name: &str) -> String {
        "shared output stream".to_string()
    }

    fn open(&self, _reporter_name: &str) -> Result<Box<dyn Write + '_>, SinkError> {
        Ok(Box::new(SharedSink {
            guard: self.stream.lock(),
        }))
    }
}

/// Borrowed handle to the shared stream; never closes it
struct SharedSink<'a, W: Write> {
    guard: MutexGuard<'a, W>,
}

impl<W: Write> Write for SharedSink<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

/// One owned file per reporter, derived from an output path template.
///
/// The template's directory and stem are kept and its extension is replaced
/// by the reporter name: `out/report.txt` becomes `out/report.html` for the
/// `html` reporter. The template path itself is never created.
#[derive(Debug, Clone)]
pub struct FileSinks {
    template: PathBuf,
}

impl FileSinks {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &Path {
        &self.template
    }

    /// Output file for a reporter
    pub fn path_for(&self, reporter_name: &str) -> PathBuf {
        self.template.with_extension(reporter_name)
    }
}

impl SinkProvider for FileSinks {
    fn describe(&self, reporter_name: &str) -> String {
        self.path_for(reporter_name).display().to_string()
    }

    fn open(&self, reporter_name: &str) -> Result<Box<dyn Write + '_>, SinkError> {
        let path = self.path_for(reporter_name);
        let file = File::create(&path).map_err(|source| SinkError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
