//! Strategy-composition coverage: every overlap x termination x
//! between-graph combination composes and upholds the extraction contract.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::helpers::{path_graph, seeds};
use crate::config::{
    BetweenGraphKind, ExpansionConfig, OverlapDetectionKind, TerminationKind,
};
use crate::expansion::OverlapBasedExpansion;
use crate::strategy::StrategySet;

fn overlap_kinds() -> Vec<OverlapDetectionKind> {
    vec![
        OverlapDetectionKind::PhysicalMeeting,
        OverlapDetectionKind::ThresholdSharing { threshold: 0.2 },
        OverlapDetectionKind::SphereIntersection { max_distance: None },
    ]
}

fn termination_kinds() -> Vec<TerminationKind> {
    vec![
        TerminationKind::FullPairwise,
        TerminationKind::TransitiveConnectivity,
        TerminationKind::CommonConvergence,
    ]
}

fn between_graph_kinds() -> Vec<BetweenGraphKind> {
    vec![
        BetweenGraphKind::MinimalPaths,
        BetweenGraphKind::TruncatedComponent {
            max_nodes: None,
            max_radius: None,
        },
        BetweenGraphKind::SaliencePreserving { top_k: 3 },
    ]
}

#[tokio::test]
async fn test_all_variants_compose() {
    let mut combinations = 0;

    for overlap in overlap_kinds() {
        for termination in termination_kinds() {
            for between_graph in between_graph_kinds() {
                let config = ExpansionConfig::default()
                    .with_overlap_detection(overlap.clone())
                    .with_termination(termination)
                    .with_between_graph(between_graph.clone())
                    .with_max_iterations(200);

                let graph = Arc::new(path_graph(&["a", "b", "c", "d", "e"]));
                let scorer: Arc<dyn crate::traits::SalienceScorer<String>> =
                    Arc::new(|node: &String| node.len() as f64);
                let strategy_set = StrategySet::from_config(&config, Some(scorer)).unwrap();
                let engine = OverlapBasedExpansion::new(
                    Arc::clone(&graph),
                    seeds(&["a", "e"]),
                    config,
                    strategy_set,
                )
                .unwrap();

                let outcome = engine
                    .run()
                    .await
                    .unwrap_or_else(|err| panic!("{overlap:?}/{termination:?} failed: {err}"));

                // Extraction only ever shrinks the raw sample.
                let union: BTreeSet<String> = outcome
                    .visited_per_frontier
                    .iter()
                    .flat_map(|visited| visited.iter().cloned())
                    .collect();
                assert!(outcome.sampled_nodes.is_subset(&union));

                let recorded: BTreeSet<String> = graph
                    .recorded_edges()
                    .iter()
                    .map(|edge| format!("{}->{}", edge.source, edge.target))
                    .collect();
                for edge in &outcome.sampled_edges {
                    assert!(recorded.contains(&edge.to_string()));
                }

                for path in &outcome.paths {
                    assert_eq!(path.nodes.first(), Some(&outcome.seeds[path.from_seed]));
                    assert_eq!(path.nodes.last(), Some(&outcome.seeds[path.to_seed]));
                }

                combinations += 1;
            }
        }
    }

    assert_eq!(combinations, 27);
}

/// The content-blind path-dedup signature keeps only the first of two
/// equal-length paths between the same seed pair.
#[tokio::test]
async fn test_equal_length_paths_collide_in_dedup() {
    // s0 - m - {x, y} - s1, with pendants raising x/y priorities so that
    // expanding m discovers both of frontier 1's nodes in one iteration:
    // two meetings, two distinct 4-node paths, one shared signature.
    let graph = super::helpers::undirected_graph(&[
        ("s0", "m"),
        ("m", "x"),
        ("m", "y"),
        ("x", "s1"),
        ("y", "s1"),
        ("x", "q1"),
        ("x", "q2"),
        ("y", "r1"),
        ("y", "r2"),
    ]);

    let config = ExpansionConfig::default()
        .with_termination(TerminationKind::FullPairwise)
        .with_max_iterations(50);
    let strategy_set = StrategySet::from_config(&config, None).unwrap();
    let engine =
        OverlapBasedExpansion::new(graph, seeds(&["s0", "s1"]), config, strategy_set).unwrap();
    let outcome = engine.run().await.unwrap();

    assert_eq!(outcome.overlap.overlap_events.len(), 2);
    assert_eq!(outcome.paths.len(), 1);
    // The x-route was discovered first and survives; the y-route collided.
    assert_eq!(outcome.paths[0].nodes, vec!["s0", "m", "x", "s1"]);
}
