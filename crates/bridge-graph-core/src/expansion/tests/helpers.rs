//! Shared builders for engine tests.

use std::sync::Arc;

use crate::config::ExpansionConfig;
use crate::error::ExpansionResult;
use crate::expansion::OverlapBasedExpansion;
use crate::strategy::StrategySet;
use crate::stubs::InMemoryGraphExpander;
use crate::types::ExpansionOutcome;

pub(crate) fn seeds(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Undirected graph from an edge list, all edges labelled "linked".
pub(crate) fn undirected_graph(edges: &[(&str, &str)]) -> InMemoryGraphExpander<String> {
    let graph = InMemoryGraphExpander::new();
    for (a, b) in edges {
        graph.add_undirected_edge(a.to_string(), b.to_string(), "linked");
    }
    graph
}

/// Undirected path graph over `nodes` in order.
pub(crate) fn path_graph(nodes: &[&str]) -> InMemoryGraphExpander<String> {
    let graph = InMemoryGraphExpander::new();
    for pair in nodes.windows(2) {
        graph.add_undirected_edge(pair[0].to_string(), pair[1].to_string(), "linked");
    }
    graph
}

/// Star graph: hub connected to `leaves` leaves.
pub(crate) fn star_graph(hub: &str, leaves: usize) -> InMemoryGraphExpander<String> {
    let graph = InMemoryGraphExpander::new();
    for i in 0..leaves {
        graph.add_undirected_edge(hub.to_string(), format!("leaf{i}"), "linked");
    }
    graph
}

/// Build strategies from config; every test scorer ranks all nodes equally.
pub(crate) fn strategies(config: &ExpansionConfig) -> StrategySet<String> {
    let scorer: Arc<dyn crate::traits::SalienceScorer<String>> = Arc::new(|_: &String| 1.0);
    StrategySet::from_config(config, Some(scorer)).expect("test config builds")
}

/// Construct and run an engine over string seeds.
pub(crate) async fn run(
    graph: InMemoryGraphExpander<String>,
    seed_names: &[&str],
    config: ExpansionConfig,
) -> ExpansionResult<ExpansionOutcome<String>> {
    let strategy_set = strategies(&config);
    OverlapBasedExpansion::new(graph, seeds(seed_names), config, strategy_set)?
        .run()
        .await
}
