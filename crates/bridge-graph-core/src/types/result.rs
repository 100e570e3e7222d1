//! Result types: the expansion outcome, overlap metadata, edge keys, and
//! the refined between-graph view returned by extraction strategies.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::overlap::{OverlapEvent, OverlapMatrix, PathRecord};
use super::stats::ExpansionStats;
use super::NodeKey;

/// Why the run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationReason {
    /// The configured termination strategy was satisfied.
    OverlapSatisfied,
    /// Every frontier drained without satisfying the strategy.
    Exhaustion,
    /// The `max_iterations` safety cap was reached.
    MaxIterations,
    /// The single-seed coverage target was reached.
    N1Coverage,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            TerminationReason::OverlapSatisfied => "overlap-satisfied",
            TerminationReason::Exhaustion => "exhaustion",
            TerminationReason::MaxIterations => "max-iterations",
            TerminationReason::N1Coverage => "n1-coverage",
        };
        f.write_str(tag)
    }
}

/// Directed edge key, serialized as `"source->target"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey<N: NodeKey> {
    /// Node the edge was traversed from.
    pub source: N,
    /// Node the edge was traversed to.
    pub target: N,
}

impl<N: NodeKey> EdgeKey<N> {
    /// Key for the edge `source -> target`.
    pub fn new(source: N, target: N) -> Self {
        Self { source, target }
    }

    /// The same edge keyed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl<N: NodeKey> fmt::Display for EdgeKey<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

impl<N: NodeKey> Serialize for EdgeKey<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Overlap provenance attached to every outcome.
#[derive(Debug, Clone, Serialize)]
pub struct OverlapMetadata<N: NodeKey> {
    /// Why the run stopped.
    pub termination_reason: TerminationReason,
    /// Every detected meeting, in detection order.
    pub overlap_events: Vec<OverlapEvent<N>>,
    /// Main-loop iterations completed.
    pub iterations: u64,
    /// Pairwise meeting-node matrix.
    pub overlap_matrix: OverlapMatrix<N>,
}

/// Refined node/edge/path sets returned by a between-graph strategy.
///
/// All three collections must be subsets of the raw outcome's
/// `sampled_nodes`/`sampled_edges`/`paths`.
#[derive(Debug, Clone, Serialize)]
pub struct BetweenGraphView<N: NodeKey> {
    /// Retained nodes.
    pub nodes: BTreeSet<N>,
    /// Retained edges.
    pub edges: BTreeSet<EdgeKey<N>>,
    /// Retained paths.
    pub paths: Vec<PathRecord<N>>,
}

/// Full result of one expansion run.
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionOutcome<N: NodeKey> {
    /// The seed nodes, in construction order; `PathRecord` seed indices
    /// refer into this array.
    pub seeds: Vec<N>,

    /// Reconstructed seed-to-seed paths.
    pub paths: Vec<PathRecord<N>>,

    /// Union of all frontiers' visited sets (then refined by extraction).
    pub sampled_nodes: BTreeSet<N>,

    /// Every traversed edge (then refined by extraction).
    pub sampled_edges: BTreeSet<EdgeKey<N>>,

    /// Snapshot of each frontier's visited set, by frontier index.
    pub visited_per_frontier: Vec<BTreeSet<N>>,

    /// Run counters.
    pub stats: ExpansionStats,

    /// Overlap provenance (passed through extraction unchanged).
    pub overlap: OverlapMetadata<N>,
}

impl<N: NodeKey> ExpansionOutcome<N> {
    /// Number of retained nodes.
    pub fn node_count(&self) -> usize {
        self.sampled_nodes.len()
    }

    /// Number of retained edges.
    pub fn edge_count(&self) -> usize {
        self.sampled_edges.len()
    }

    /// Number of retained seed-to-seed paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }
}
