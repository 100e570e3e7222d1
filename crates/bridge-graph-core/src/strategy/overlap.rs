//! Overlap-detection strategies.

use std::collections::{HashMap, HashSet};

use super::OverlapDetection;
use crate::types::{FrontierState, NodeKey};

/// Report a meeting when the new node is already owned by another frontier.
///
/// Ownership is assigned on first discovery (first owner wins), so the
/// lookup is O(1) per neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalMeeting;

impl<N: NodeKey> OverlapDetection<N> for PhysicalMeeting {
    fn name(&self) -> &'static str {
        "physical-meeting"
    }

    fn detect(
        &self,
        target: &N,
        active: usize,
        _frontiers: &[FrontierState<N>],
        owners: &HashMap<N, usize>,
    ) -> Vec<usize> {
        match owners.get(target) {
            Some(&owner) if owner != active => vec![owner],
            _ => Vec::new(),
        }
    }
}

/// Report overlap once visited-set Jaccard similarity reaches a threshold.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdSharing {
    threshold: f64,
}

impl ThresholdSharing {
    /// Strategy with the given similarity threshold in `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn jaccard<N: NodeKey>(a: &HashSet<N>, b: &HashSet<N>) -> f64 {
        let intersection = a.intersection(b).count();
        let union = a.len() + b.len() - intersection;
        if union == 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

impl<N: NodeKey> OverlapDetection<N> for ThresholdSharing {
    fn name(&self) -> &'static str {
        "threshold-sharing"
    }

    fn detect(
        &self,
        _target: &N,
        active: usize,
        frontiers: &[FrontierState<N>],
        _owners: &HashMap<N, usize>,
    ) -> Vec<usize> {
        let active_visited = &frontiers[active].visited;
        frontiers
            .iter()
            .enumerate()
            .filter(|(index, frontier)| {
                *index != active
                    && Self::jaccard(active_visited, &frontier.visited) >= self.threshold
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Report overlap when another frontier's radius reaches the new node's hop
/// distance from the active seed.
///
/// Each frontier's radius is the max hop distance over its visited nodes.
/// Reports nothing when the active frontier has no distance tracking
/// (fails closed).
#[derive(Debug, Clone, Copy)]
pub struct SphereIntersection {
    max_distance: Option<u32>,
}

impl SphereIntersection {
    /// Strategy with an optional hop cap: nodes farther than `max_distance`
    /// from their seed never trigger overlap.
    pub fn new(max_distance: Option<u32>) -> Self {
        Self { max_distance }
    }
}

impl<N: NodeKey> OverlapDetection<N> for SphereIntersection {
    fn name(&self) -> &'static str {
        "sphere-intersection"
    }

    fn requires_distances(&self) -> bool {
        true
    }

    fn detect(
        &self,
        target: &N,
        active: usize,
        frontiers: &[FrontierState<N>],
        _owners: &HashMap<N, usize>,
    ) -> Vec<usize> {
        let Some(distance) = frontiers[active].distance_of(target) else {
            return Vec::new();
        };
        if let Some(cap) = self.max_distance {
            if distance > cap {
                return Vec::new();
            }
        }

        frontiers
            .iter()
            .enumerate()
            .filter(|(index, frontier)| {
                *index != active && frontier.radius().is_some_and(|radius| radius >= distance)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frontier_with(index: usize, nodes: &[&str]) -> FrontierState<String> {
        let mut frontier = FrontierState::new(index, false);
        for node in nodes {
            frontier.visit(node.to_string(), None);
        }
        frontier
    }

    fn tracked_frontier(index: usize, nodes: &[(&str, u32)]) -> FrontierState<String> {
        let mut frontier = FrontierState::new(index, true);
        for (node, distance) in nodes {
            frontier.visit(node.to_string(), None);
            frontier.record_distance(node.to_string(), *distance);
        }
        frontier
    }

    #[test]
    fn test_physical_meeting_reports_foreign_owner() {
        let frontiers = vec![frontier_with(0, &["a"]), frontier_with(1, &["b"])];
        let mut owners = HashMap::new();
        owners.insert("b".to_string(), 1);

        let hits = PhysicalMeeting.detect(&"b".to_string(), 0, &frontiers, &owners);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_physical_meeting_ignores_own_and_unowned() {
        let frontiers = vec![frontier_with(0, &["a"]), frontier_with(1, &[])];
        let mut owners = HashMap::new();
        owners.insert("a".to_string(), 0);

        let own = PhysicalMeeting.detect(&"a".to_string(), 0, &frontiers, &owners);
        assert!(own.is_empty());

        let unowned = PhysicalMeeting.detect(&"z".to_string(), 0, &frontiers, &owners);
        assert!(unowned.is_empty());
    }

    #[test]
    fn test_threshold_sharing_at_boundary() {
        // visited sets {a, b} and {b, c}: jaccard = 1/3
        let frontiers = vec![frontier_with(0, &["a", "b"]), frontier_with(1, &["b", "c"])];
        let owners = HashMap::new();

        let strict = ThresholdSharing::new(0.5);
        assert!(OverlapDetection::<String>::detect(&strict, &"b".to_string(), 0, &frontiers, &owners).is_empty());

        let loose = ThresholdSharing::new(1.0 / 3.0);
        assert_eq!(
            OverlapDetection::<String>::detect(&loose, &"b".to_string(), 0, &frontiers, &owners),
            vec![1]
        );
    }

    #[test]
    fn test_threshold_sharing_empty_sets() {
        // Jaccard of two empty sets is 0 (guarded division), so any
        // positive threshold reports nothing while 0.0 reports everything.
        let frontiers = vec![frontier_with(0, &[]), frontier_with(1, &[])];
        let owners = HashMap::new();

        let positive = ThresholdSharing::new(0.1);
        assert!(OverlapDetection::<String>::detect(
            &positive,
            &"x".to_string(),
            0,
            &frontiers,
            &owners
        )
        .is_empty());

        let zero = ThresholdSharing::new(0.0);
        assert_eq!(
            OverlapDetection::<String>::detect(&zero, &"x".to_string(), 0, &frontiers, &owners),
            vec![1]
        );
    }

    #[test]
    fn test_sphere_reports_frontiers_within_radius() {
        let frontiers = vec![
            tracked_frontier(0, &[("a", 0), ("b", 1), ("c", 2)]),
            tracked_frontier(1, &[("x", 0), ("y", 1), ("z", 2)]),
            tracked_frontier(2, &[("q", 0)]),
        ];
        let owners = HashMap::new();
        let strategy = SphereIntersection::new(None);

        // c is 2 hops from seed 0; frontier 1 has radius 2, frontier 2 radius 0
        let hits = strategy.detect(&"c".to_string(), 0, &frontiers, &owners);
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn test_sphere_respects_distance_cap() {
        let frontiers = vec![
            tracked_frontier(0, &[("a", 0), ("c", 2)]),
            tracked_frontier(1, &[("x", 0), ("z", 5)]),
        ];
        let owners = HashMap::new();

        let capped = SphereIntersection::new(Some(1));
        assert!(capped.detect(&"c".to_string(), 0, &frontiers, &owners).is_empty());
    }

    #[test]
    fn test_sphere_fails_closed_without_distances() {
        let frontiers = vec![frontier_with(0, &["a"]), tracked_frontier(1, &[("x", 3)])];
        let owners = HashMap::new();
        let strategy = SphereIntersection::new(None);

        // Active frontier 0 has no distance tracking: no overlap reported.
        assert!(strategy.detect(&"a".to_string(), 0, &frontiers, &owners).is_empty());
    }
}
