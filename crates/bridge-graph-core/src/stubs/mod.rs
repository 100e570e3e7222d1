//! Test stubs.

pub mod memory_expander;

pub use memory_expander::{InMemoryGraphExpander, RecordedEdge, PRIORITY_EPSILON};
