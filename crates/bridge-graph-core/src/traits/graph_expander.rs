//! Graph-source collaborator trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExpansionResult;
use crate::types::NodeKey;

/// One adjacency entry returned by a neighbor lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor<N: NodeKey> {
    /// The adjacent node.
    pub target: N,
    /// Relationship label on the connecting edge.
    pub relationship: String,
}

impl<N: NodeKey> Neighbor<N> {
    /// Build a neighbor entry.
    pub fn new(target: N, relationship: impl Into<String>) -> Self {
        Self {
            target,
            relationship: relationship.into(),
        }
    }
}

/// Lazy graph source driving the expansion.
///
/// Implemented by callers; may wrap an in-memory graph, an API-backed lazy
/// loader, or a cache. Lookups that can touch network or disk are async;
/// degree and priority are kept sync for the hot path (the engine calls
/// them once per discovered node).
///
/// The engine awaits at most one `get_neighbors` call at a time and
/// propagates any returned error directly out of `run()` without retrying.
#[async_trait]
pub trait GraphExpander<N: NodeKey>: Send + Sync {
    /// Node payload produced by [`get_node`](Self::get_node).
    type Node: Send + Sync;

    /// Look up a node, `None` when it does not exist.
    async fn get_node(&self, id: &N) -> ExpansionResult<Option<Self::Node>>;

    /// Adjacency of `id`. Unknown nodes yield an empty list, not an error.
    async fn get_neighbors(&self, id: &N) -> ExpansionResult<Vec<Neighbor<N>>>;

    /// Current (not potential) degree of `id`.
    fn get_degree(&self, id: &N) -> usize;

    /// Expansion priority of `id`; lower = expand sooner. Typically a
    /// weighted degree over a node-weight normaliser plus an epsilon to
    /// avoid division by zero.
    fn calculate_priority(&self, id: &N) -> f64;

    /// Record a traversed edge into the caller's output graph.
    ///
    /// Invoked exactly once per traversed edge.
    fn add_edge(&self, source: &N, target: &N, relationship: &str);
}

/// Shared expanders work unchanged; the caller keeps its handle to inspect
/// the output graph after the run.
#[async_trait]
impl<N: NodeKey, T: GraphExpander<N> + ?Sized> GraphExpander<N> for std::sync::Arc<T> {
    type Node = T::Node;

    async fn get_node(&self, id: &N) -> ExpansionResult<Option<Self::Node>> {
        (**self).get_node(id).await
    }

    async fn get_neighbors(&self, id: &N) -> ExpansionResult<Vec<Neighbor<N>>> {
        (**self).get_neighbors(id).await
    }

    fn get_degree(&self, id: &N) -> usize {
        (**self).get_degree(id)
    }

    fn calculate_priority(&self, id: &N) -> f64 {
        (**self).calculate_priority(id)
    }

    fn add_edge(&self, source: &N, target: &N, relationship: &str) {
        (**self).add_edge(source, target, relationship)
    }
}
