//! Lintgate
//!
//! Aggregates the findings of a static-analysis run, gates the run on
//! per-priority thresholds and renders the results in several report formats.
//!
//! The implementation lives in `lintgate-core`; this crate re-exports it.

pub use lintgate_core::*;
