//! Core data structures for the expansion engine.
//!
//! - **queue**: min-priority queue backing every frontier
//! - **frontier**: per-seed traversal state with parent pointers
//! - **overlap**: meeting events, the pairwise matrix, and path records
//! - **stats**: run counters and the fixed-bucket degree histogram
//! - **result**: outcome types handed to callers and extraction strategies

use std::fmt::{Debug, Display};
use std::hash::Hash;

pub mod frontier;
pub mod overlap;
pub mod queue;
pub mod result;
pub mod stats;

pub use frontier::{FrontierState, ParentLink};
pub use overlap::{OverlapEvent, OverlapMatrix, PathRecord, PathSignature};
pub use queue::MinPriorityQueue;
pub use result::{
    BetweenGraphView, EdgeKey, ExpansionOutcome, OverlapMetadata, TerminationReason,
};
pub use stats::{DegreeHistogram, ExpansionStats, DEGREE_BUCKETS};

/// Bound for node identifier types.
///
/// String names, integers, and `uuid::Uuid` all qualify. `Ord` keeps result
/// sets and matrix iteration deterministic; `Display` feeds edge-key and
/// log formatting.
pub trait NodeKey:
    Clone + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static
{
}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static {}
