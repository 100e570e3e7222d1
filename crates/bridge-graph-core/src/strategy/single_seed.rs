//! Single-seed termination strategies.

use super::SingleSeedTermination;
use crate::types::{FrontierState, NodeKey};

/// Stop once the frontier has visited a target fraction of the graph.
///
/// Needs the caller-supplied `total_nodes` hint; without it the predicate
/// never fires and the run ends by exhaustion or the iteration cap.
#[derive(Debug, Clone, Copy)]
pub struct CoverageThreshold {
    target_fraction: f64,
}

impl CoverageThreshold {
    /// Strategy stopping at `target_fraction` of the graph, in `(0, 1]`.
    pub fn new(target_fraction: f64) -> Self {
        Self { target_fraction }
    }
}

impl<N: NodeKey> SingleSeedTermination<N> for CoverageThreshold {
    fn name(&self) -> &'static str {
        "coverage-threshold"
    }

    fn should_terminate(
        &self,
        frontier: &FrontierState<N>,
        total_nodes: Option<usize>,
        _iteration: u64,
    ) -> bool {
        match total_nodes {
            Some(total) if total > 0 => {
                frontier.visited.len() as f64 / total as f64 >= self.target_fraction
            }
            _ => false,
        }
    }
}
