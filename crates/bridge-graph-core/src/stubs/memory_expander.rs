//! In-memory stub implementation of `GraphExpander`.
//!
//! # ⚠️ TEST ONLY - DO NOT USE IN PRODUCTION ⚠️
//!
//! `InMemoryGraphExpander` holds the whole adjacency in memory and answers
//! lookups synchronously behind the async contract. It exists so engine
//! tests stay hermetic: construct a fresh stub (and a fresh orchestrator)
//! per test.
//!
//! Neighbor lists preserve insertion order, and priorities are a pure
//! function of degree and node weight, so runs over a stub are fully
//! deterministic.

use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::ExpansionResult;
use crate::traits::{GraphExpander, Neighbor};
use crate::types::NodeKey;

/// Additive term keeping priorities finite for zero-weight nodes.
pub const PRIORITY_EPSILON: f64 = 1e-6;

/// An edge written back through [`GraphExpander::add_edge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEdge<N: NodeKey> {
    /// Node the edge was traversed from.
    pub source: N,
    /// Node the edge was traversed to.
    pub target: N,
    /// Relationship label.
    pub relationship: String,
}

/// In-memory graph source for tests.
///
/// Priorities follow the usual degree-based shape: weighted degree over the
/// node-weight normaliser plus an epsilon, so low-degree (specific) nodes
/// expand before hubs.
#[derive(Debug, Default)]
pub struct InMemoryGraphExpander<N: NodeKey> {
    adjacency: DashMap<N, Vec<Neighbor<N>>>,
    node_weights: DashMap<N, f64>,
    recorded: RwLock<Vec<RecordedEdge<N>>>,
}

impl<N: NodeKey> InMemoryGraphExpander<N> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            adjacency: DashMap::new(),
            node_weights: DashMap::new(),
            recorded: RwLock::new(Vec::new()),
        }
    }

    /// Ensure `id` exists, with or without edges.
    pub fn add_node(&self, id: N) {
        self.adjacency.entry(id).or_default();
    }

    /// Add a one-way edge `source -> target`.
    pub fn add_directed_edge(&self, source: N, target: N, relationship: &str) {
        self.add_node(target.clone());
        self.adjacency
            .entry(source)
            .or_default()
            .push(Neighbor::new(target, relationship));
    }

    /// Add `a -- b` in both directions.
    pub fn add_undirected_edge(&self, a: N, b: N, relationship: &str) {
        self.add_directed_edge(a.clone(), b.clone(), relationship);
        self.add_directed_edge(b, a, relationship);
    }

    /// Set the priority weight of `id` (default 1.0).
    pub fn set_node_weight(&self, id: N, weight: f64) {
        self.node_weights.insert(id, weight);
    }

    /// Number of known nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Snapshot of all edges written back by the engine, in write order.
    pub fn recorded_edges(&self) -> Vec<RecordedEdge<N>> {
        self.recorded
            .read()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl<N: NodeKey> GraphExpander<N> for InMemoryGraphExpander<N> {
    type Node = N;

    async fn get_node(&self, id: &N) -> ExpansionResult<Option<N>> {
        Ok(self.adjacency.contains_key(id).then(|| id.clone()))
    }

    async fn get_neighbors(&self, id: &N) -> ExpansionResult<Vec<Neighbor<N>>> {
        Ok(self
            .adjacency
            .get(id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    fn get_degree(&self, id: &N) -> usize {
        self.adjacency.get(id).map(|entry| entry.len()).unwrap_or(0)
    }

    fn calculate_priority(&self, id: &N) -> f64 {
        let weight = self.node_weights.get(id).map(|w| *w).unwrap_or(1.0);
        self.get_degree(id) as f64 / (weight + PRIORITY_EPSILON)
    }

    fn add_edge(&self, source: &N, target: &N, relationship: &str) {
        if let Ok(mut log) = self.recorded.write() {
            log.push(RecordedEdge {
                source: source.clone(),
                target: target.clone(),
                relationship: relationship.to_string(),
            });
        }
    }
}
