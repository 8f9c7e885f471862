//! Violation records and the run-scoped collector they are written into.

mod collector;
mod types;

pub use collector::{SharedCollector, ViolationCollector, ViolationSnapshot};
pub use types::{
    COMPILER_ERROR_RULE, EquivalenceKey, InvalidPriority, Location, Priority, Violation,
};
