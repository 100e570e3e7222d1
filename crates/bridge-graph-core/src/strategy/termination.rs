//! Termination strategies for multi-seed runs.
//!
//! All three are pure functions of frontier state and the overlap-event
//! log; the engine relies on that to re-evaluate them after the loop when
//! labelling the outcome.

use std::collections::{HashSet, VecDeque};

use super::Termination;
use crate::types::{FrontierState, NodeKey, OverlapEvent};

fn distinct_pairs<N: NodeKey>(events: &[OverlapEvent<N>]) -> HashSet<(usize, usize)> {
    events
        .iter()
        .map(|event| {
            let low = event.frontier_a.min(event.frontier_b);
            let high = event.frontier_a.max(event.frontier_b);
            (low, high)
        })
        .collect()
}

/// Stop only once every one of the C(N,2) seed pairs has met directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullPairwise;

impl<N: NodeKey> Termination<N> for FullPairwise {
    fn name(&self) -> &'static str {
        "full-pairwise"
    }

    fn should_terminate(
        &self,
        frontiers: &[FrontierState<N>],
        overlap_events: &[OverlapEvent<N>],
        _iteration: u64,
    ) -> bool {
        let n = frontiers.len();
        let required = n * (n - 1) / 2;
        distinct_pairs(overlap_events).len() >= required
    }
}

/// Stop once the overlap-graph over frontier indices is connected.
///
/// An edge exists per recorded overlap pair; the run stops when overlaps
/// span all N frontiers, without requiring every pair to have met directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitiveConnectivity;

impl<N: NodeKey> Termination<N> for TransitiveConnectivity {
    fn name(&self) -> &'static str {
        "transitive-connectivity"
    }

    fn should_terminate(
        &self,
        frontiers: &[FrontierState<N>],
        overlap_events: &[OverlapEvent<N>],
        _iteration: u64,
    ) -> bool {
        let n = frontiers.len();
        if n == 0 {
            return false;
        }

        let pairs = distinct_pairs(overlap_events);
        if pairs.len() + 1 < n {
            // A spanning overlap-graph needs at least n-1 edges.
            return false;
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (a, b) in &pairs {
            adjacency[*a].push(*b);
            adjacency[*b].push(*a);
        }

        // BFS over frontier indices from 0.
        let mut reached = vec![false; n];
        let mut queue = VecDeque::new();
        reached[0] = true;
        queue.push_back(0usize);
        let mut count = 1;

        while let Some(current) = queue.pop_front() {
            for &next in &adjacency[current] {
                if !reached[next] {
                    reached[next] = true;
                    count += 1;
                    queue.push_back(next);
                }
            }
        }

        count == n
    }
}

/// Stop once some single node has been visited by all N frontiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonConvergence;

impl<N: NodeKey> Termination<N> for CommonConvergence {
    fn name(&self) -> &'static str {
        "common-convergence"
    }

    fn should_terminate(
        &self,
        frontiers: &[FrontierState<N>],
        _overlap_events: &[OverlapEvent<N>],
        _iteration: u64,
    ) -> bool {
        let Some(smallest) = frontiers.iter().min_by_key(|f| f.visited.len()) else {
            return false;
        };

        smallest.visited.iter().any(|node| {
            frontiers
                .iter()
                .all(|frontier| frontier.visited.contains(node))
        })
    }
}
