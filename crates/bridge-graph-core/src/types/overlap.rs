//! Overlap bookkeeping: events, the pairwise meeting matrix, and path
//! records reconstructed from parent chains.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::NodeKey;

/// A detected meeting/proximity between two frontiers at a node.
///
/// Events are append-only; the same pair can meet at many nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapEvent<N: NodeKey> {
    /// Loop iteration at which the meeting was detected.
    pub iteration: u64,
    /// The frontier that was expanding.
    pub frontier_a: usize,
    /// The frontier it met.
    pub frontier_b: usize,
    /// Node at which the meeting happened.
    pub meeting_node: N,
}

/// Pairwise meeting matrix: sorted frontier pair -> meeting nodes.
///
/// Serializes keys as `"min-max"` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapMatrix<N: NodeKey> {
    entries: BTreeMap<(usize, usize), BTreeSet<N>>,
}

impl<N: NodeKey> OverlapMatrix<N> {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record a meeting between frontiers `a` and `b` at `node`.
    ///
    /// The pair key is normalized to (min, max).
    pub fn record(&mut self, a: usize, b: usize, node: N) {
        let key = (a.min(b), a.max(b));
        self.entries.entry(key).or_default().insert(node);
    }

    /// Meeting nodes recorded for the (normalized) pair, if any.
    pub fn meeting_nodes(&self, a: usize, b: usize) -> Option<&BTreeSet<N>> {
        self.entries.get(&(a.min(b), a.max(b)))
    }

    /// Number of distinct pairs that have met.
    pub fn pair_count(&self) -> usize {
        self.entries.len()
    }

    /// Union of all meeting nodes, in sorted order.
    pub fn all_meeting_nodes(&self) -> BTreeSet<N> {
        self.entries
            .values()
            .flat_map(|nodes| nodes.iter().cloned())
            .collect()
    }

    /// Iterate (pair, meeting nodes) entries in sorted pair order.
    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &BTreeSet<N>)> {
        self.entries.iter()
    }

    /// Whether no pair has met yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: NodeKey + Serialize> Serialize for OverlapMatrix<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for ((a, b), nodes) in &self.entries {
            map.serialize_entry(&format!("{a}-{b}"), nodes)?;
        }
        map.end()
    }
}

/// A reconstructed seed-to-seed path.
///
/// Invariant: `nodes` starts at `seeds[from_seed]` and ends at
/// `seeds[to_seed]`; records violating this are discarded during
/// reconstruction, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord<N: NodeKey> {
    /// Index of the seed the path starts from.
    pub from_seed: usize,
    /// Index of the seed the path ends at.
    pub to_seed: usize,
    /// Ordered node sequence, both endpoints included.
    pub nodes: Vec<N>,
}

impl<N: NodeKey> PathRecord<N> {
    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path is empty (never true for stored records).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Dedup signature for recorded paths: normalized seed pair plus length.
///
/// Deliberately content-blind: two distinct equal-length paths between the
/// same seed pair share a signature and only the first is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathSignature {
    low: usize,
    high: usize,
    len: usize,
}

impl PathSignature {
    /// Build the signature for a path between `seed_a` and `seed_b`.
    pub fn new(seed_a: usize, seed_b: usize, len: usize) -> Self {
        Self {
            low: seed_a.min(seed_b),
            high: seed_a.max(seed_b),
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_normalizes_pair_order() {
        let mut matrix: OverlapMatrix<String> = OverlapMatrix::new();
        matrix.record(2, 0, "x".into());
        matrix.record(0, 2, "y".into());

        assert_eq!(matrix.pair_count(), 1);
        let nodes = matrix.meeting_nodes(2, 0).unwrap();
        assert!(nodes.contains("x"));
        assert!(nodes.contains("y"));
    }

    #[test]
    fn test_matrix_serializes_min_max_keys() {
        let mut matrix: OverlapMatrix<String> = OverlapMatrix::new();
        matrix.record(3, 1, "m".into());

        let json = serde_json::to_value(&matrix).unwrap();
        assert!(json.get("1-3").is_some());
    }

    #[test]
    fn test_all_meeting_nodes_union() {
        let mut matrix: OverlapMatrix<String> = OverlapMatrix::new();
        matrix.record(0, 1, "a".into());
        matrix.record(1, 2, "b".into());
        matrix.record(0, 2, "a".into());

        let all = matrix.all_meeting_nodes();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_signature_is_order_insensitive() {
        assert_eq!(PathSignature::new(4, 1, 7), PathSignature::new(1, 4, 7));
        assert_ne!(PathSignature::new(1, 4, 7), PathSignature::new(1, 4, 8));
    }
}
