//! Between-graph extraction strategies.
//!
//! Each strategy refines the raw sample into the final between-graph. The
//! returned nodes/edges/paths are always subsets of the raw outcome's;
//! stats and overlap metadata pass through the engine untouched.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use super::BetweenGraphExtraction;
use crate::traits::SalienceScorer;
use crate::types::{BetweenGraphView, EdgeKey, ExpansionOutcome, NodeKey};

/// Undirected adjacency over the sampled edge set, with deterministic
/// neighbor order.
fn adjacency<N: NodeKey>(raw: &ExpansionOutcome<N>) -> BTreeMap<N, BTreeSet<N>> {
    let mut adjacency: BTreeMap<N, BTreeSet<N>> = BTreeMap::new();
    for edge in &raw.sampled_edges {
        adjacency
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone());
        adjacency
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone());
    }
    adjacency
}

/// Sampled edges whose endpoints both survive into `nodes`.
fn edges_within<N: NodeKey>(
    raw: &ExpansionOutcome<N>,
    nodes: &BTreeSet<N>,
) -> BTreeSet<EdgeKey<N>> {
    raw.sampled_edges
        .iter()
        .filter(|edge| nodes.contains(&edge.source) && nodes.contains(&edge.target))
        .cloned()
        .collect()
}

/// Keep only nodes and edges that appear on at least one recorded path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalPaths;

impl<N: NodeKey> BetweenGraphExtraction<N> for MinimalPaths {
    fn name(&self) -> &'static str {
        "minimal-paths"
    }

    fn extract(&self, raw: &ExpansionOutcome<N>) -> BetweenGraphView<N> {
        if raw.paths.is_empty() {
            // Nothing to filter against: an overlap-free run keeps its full
            // sample rather than collapsing to an empty between-graph.
            return BetweenGraphView {
                nodes: raw.sampled_nodes.clone(),
                edges: raw.sampled_edges.clone(),
                paths: Vec::new(),
            };
        }

        let mut nodes = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for path in &raw.paths {
            for node in &path.nodes {
                if raw.sampled_nodes.contains(node) {
                    nodes.insert(node.clone());
                }
            }
            for pair in path.nodes.windows(2) {
                // The path may walk a recorded edge in either direction;
                // keep whichever orientation was actually sampled.
                let forward = EdgeKey::new(pair[0].clone(), pair[1].clone());
                if raw.sampled_edges.contains(&forward) {
                    edges.insert(forward);
                } else {
                    let backward = forward.reversed();
                    if raw.sampled_edges.contains(&backward) {
                        edges.insert(backward);
                    }
                }
            }
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            paths = raw.paths.len(),
            "minimal-paths extraction"
        );

        BetweenGraphView {
            nodes,
            edges,
            paths: raw.paths.clone(),
        }
    }
}

/// Keep the connected component(s) around overlap-meeting nodes, bounded
/// by a node budget and/or a hop radius from the meeting nodes.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedComponent {
    max_nodes: Option<usize>,
    max_radius: Option<u32>,
}

impl TruncatedComponent {
    /// Strategy bounded by `max_nodes` retained nodes and/or `max_radius`
    /// hops from any meeting node. Unset bounds keep whole components.
    pub fn new(max_nodes: Option<usize>, max_radius: Option<u32>) -> Self {
        Self {
            max_nodes,
            max_radius,
        }
    }

    fn under_budget(&self, kept: usize) -> bool {
        self.max_nodes.map_or(true, |cap| kept < cap)
    }
}

impl<N: NodeKey> BetweenGraphExtraction<N> for TruncatedComponent {
    fn name(&self) -> &'static str {
        "truncated-component"
    }

    fn extract(&self, raw: &ExpansionOutcome<N>) -> BetweenGraphView<N> {
        let meeting_nodes: Vec<N> = raw
            .overlap
            .overlap_matrix
            .all_meeting_nodes()
            .into_iter()
            .filter(|node| raw.sampled_nodes.contains(node))
            .collect();

        let adjacency = adjacency(raw);
        let mut kept: BTreeSet<N> = BTreeSet::new();
        let mut queue: VecDeque<(N, u32)> = VecDeque::new();

        for node in meeting_nodes {
            if !self.under_budget(kept.len()) {
                break;
            }
            if kept.insert(node.clone()) {
                queue.push_back((node, 0));
            }
        }

        while let Some((current, depth)) = queue.pop_front() {
            if self.max_radius.is_some_and(|cap| depth >= cap) {
                continue;
            }
            let Some(neighbors) = adjacency.get(&current) else {
                continue;
            };
            for neighbor in neighbors {
                if kept.contains(neighbor) {
                    continue;
                }
                if !self.under_budget(kept.len()) {
                    break;
                }
                kept.insert(neighbor.clone());
                queue.push_back((neighbor.clone(), depth + 1));
            }
        }

        let paths = raw
            .paths
            .iter()
            .filter(|path| path.nodes.iter().all(|node| kept.contains(node)))
            .cloned()
            .collect();

        debug!(kept = kept.len(), "truncated-component extraction");

        BetweenGraphView {
            edges: edges_within(raw, &kept),
            nodes: kept,
            paths,
        }
    }
}

/// Keep the top-K nodes by externally-computed salience while preserving
/// every recorded path.
///
/// Path nodes (and seeds) are always retained so the paths that motivated
/// the sample stay connected after truncation.
pub struct SaliencePreserving<N: NodeKey> {
    top_k: usize,
    scorer: Arc<dyn SalienceScorer<N>>,
}

impl<N: NodeKey> SaliencePreserving<N> {
    /// Strategy retaining `top_k` nodes ranked by `scorer`.
    pub fn new(top_k: usize, scorer: Arc<dyn SalienceScorer<N>>) -> Self {
        Self { top_k, scorer }
    }
}

impl<N: NodeKey> BetweenGraphExtraction<N> for SaliencePreserving<N> {
    fn name(&self) -> &'static str {
        "salience-preserving"
    }

    fn extract(&self, raw: &ExpansionOutcome<N>) -> BetweenGraphView<N> {
        let mut ranked: Vec<(N, f64)> = raw
            .sampled_nodes
            .iter()
            .map(|node| (node.clone(), self.scorer.score(node)))
            .collect();
        // Highest salience first; ties break by node order for determinism.
        ranked.sort_by(|(node_a, score_a), (node_b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| node_a.cmp(node_b))
        });

        let mut nodes: BTreeSet<N> = ranked
            .into_iter()
            .take(self.top_k)
            .map(|(node, _)| node)
            .collect();

        for path in &raw.paths {
            for node in &path.nodes {
                if raw.sampled_nodes.contains(node) {
                    nodes.insert(node.clone());
                }
            }
        }
        for seed in &raw.seeds {
            if raw.sampled_nodes.contains(seed) {
                nodes.insert(seed.clone());
            }
        }

        debug!(
            kept = nodes.len(),
            top_k = self.top_k,
            "salience-preserving extraction"
        );

        BetweenGraphView {
            edges: edges_within(raw, &nodes),
            nodes,
            paths: raw.paths.clone(),
        }
    }
}
