//! The overlap-based expansion orchestrator.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, instrument, trace, warn};

use super::paths::reconstruct_between_path;
use crate::config::ExpansionConfig;
use crate::error::{ExpansionError, ExpansionResult};
use crate::strategy::StrategySet;
use crate::traits::{GraphExpander, Neighbor};
use crate::types::{
    EdgeKey, ExpansionOutcome, ExpansionStats, FrontierState, NodeKey, OverlapEvent,
    OverlapMatrix, OverlapMetadata, ParentLink, PathRecord, PathSignature, TerminationReason,
};

/// Multi-seed, degree-prioritised expansion engine.
///
/// Owns one [`FrontierState`] per seed plus all overlap bookkeeping; nothing
/// escapes or is shared across runs. [`run`](Self::run) consumes the
/// instance, so each orchestrator performs exactly one run.
///
/// Single-threaded and cooperative: the engine awaits only at neighbor and
/// seed lookups, so the collaborator may be backed by asynchronous I/O, but
/// at most one node expansion is in flight at any time.
pub struct OverlapBasedExpansion<N: NodeKey, X: GraphExpander<N>> {
    expander: X,
    seeds: Vec<N>,
    config: ExpansionConfig,
    strategies: StrategySet<N>,
    frontiers: Vec<FrontierState<N>>,
    /// Node -> first frontier to discover it ("first owner wins").
    node_owners: HashMap<N, usize>,
    overlap_events: Vec<OverlapEvent<N>>,
    overlap_matrix: OverlapMatrix<N>,
    paths: Vec<PathRecord<N>>,
    path_signatures: HashSet<PathSignature>,
    sampled_edges: BTreeSet<EdgeKey<N>>,
    stats: ExpansionStats,
}

impl<N: NodeKey, X: GraphExpander<N>> OverlapBasedExpansion<N, X> {
    /// Create an orchestrator over `seeds`.
    ///
    /// One frontier is created per seed; distance tracking is enabled only
    /// when the configured overlap strategy asks for it.
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::EmptySeeds` for an empty seed list and
    /// `ExpansionError::Validation` for out-of-range config parameters.
    /// Whether the seed IDs exist in the underlying graph is not checked
    /// here: an absent seed yields an empty frontier at run time.
    pub fn new(
        expander: X,
        seeds: Vec<N>,
        config: ExpansionConfig,
        strategies: StrategySet<N>,
    ) -> ExpansionResult<Self> {
        if seeds.is_empty() {
            return Err(ExpansionError::EmptySeeds);
        }
        config.validate()?;

        let track_distances = strategies.overlap.requires_distances();
        let frontiers = (0..seeds.len())
            .map(|index| FrontierState::new(index, track_distances))
            .collect();

        Ok(Self {
            expander,
            seeds,
            config,
            strategies,
            frontiers,
            node_owners: HashMap::new(),
            overlap_events: Vec::new(),
            overlap_matrix: OverlapMatrix::new(),
            paths: Vec::new(),
            path_signatures: HashSet::new(),
            sampled_edges: BTreeSet::new(),
            stats: ExpansionStats::start(),
        })
    }

    /// Drive the expansion to completion and build the outcome.
    ///
    /// # Errors
    ///
    /// A failed collaborator lookup propagates directly; the engine keeps
    /// no intermediate snapshot to roll back to.
    #[instrument(
        skip(self),
        fields(
            seeds = self.seeds.len(),
            overlap = self.strategies.overlap.name(),
            termination = self.strategies.termination.name(),
        )
    )]
    pub async fn run(mut self) -> ExpansionResult<ExpansionOutcome<N>> {
        let clock = Instant::now();
        self.stats = ExpansionStats::start();

        self.seed_frontiers().await?;

        let reason = if self.seeds.len() == 1 {
            self.run_single_seed().await?
        } else {
            self.run_multi_seed().await?
        };

        self.stats.elapsed_ms = clock.elapsed().as_millis() as u64;
        debug!(
            reason = %reason,
            nodes_expanded = self.stats.nodes_expanded,
            edges_traversed = self.stats.edges_traversed,
            paths = self.paths.len(),
            "expansion complete"
        );

        Ok(self.build_outcome(reason))
    }

    /// Push each existing seed into its frontier; absent seeds leave their
    /// frontier empty (degenerate, not an error).
    async fn seed_frontiers(&mut self) -> ExpansionResult<()> {
        for index in 0..self.seeds.len() {
            let seed = self.seeds[index].clone();
            if self.expander.get_node(&seed).await?.is_none() {
                warn!(frontier = index, seed = %seed, "seed not found; frontier starts empty");
                continue;
            }
            self.frontiers[index].visit(seed.clone(), None);
            self.frontiers[index].record_distance(seed.clone(), 0);
            self.node_owners.entry(seed.clone()).or_insert(index);
            let priority = self.expander.calculate_priority(&seed);
            self.frontiers[index].queue.push(seed, priority);
        }
        Ok(())
    }

    async fn run_multi_seed(&mut self) -> ExpansionResult<TerminationReason> {
        let mut iteration = 0u64;
        loop {
            if self.config.max_iterations.is_some_and(|cap| iteration >= cap) {
                break;
            }
            let Some(active) = self.select_frontier() else {
                break;
            };
            let Some(node) = self.frontiers[active].queue.pop() else {
                break;
            };
            self.expand_node(active, node, iteration, true).await?;
            iteration += 1;
            self.stats.iterations = iteration;

            if self.strategies.termination.should_terminate(
                &self.frontiers,
                &self.overlap_events,
                iteration,
            ) {
                break;
            }
        }

        // The exit cause is not captured in the loop; it is re-derived here.
        // Safe because the termination predicates are pure.
        let reason = if self.strategies.termination.should_terminate(
            &self.frontiers,
            &self.overlap_events,
            iteration,
        ) {
            TerminationReason::OverlapSatisfied
        } else if self.frontiers.iter().all(FrontierState::is_exhausted) {
            TerminationReason::Exhaustion
        } else {
            TerminationReason::MaxIterations
        };
        Ok(reason)
    }

    async fn run_single_seed(&mut self) -> ExpansionResult<TerminationReason> {
        let mut iteration = 0u64;
        loop {
            if self.config.max_iterations.is_some_and(|cap| iteration >= cap) {
                break;
            }
            if self.strategies.single_seed.should_terminate(
                &self.frontiers[0],
                self.config.total_nodes,
                iteration,
            ) {
                break;
            }
            let Some(node) = self.frontiers[0].queue.pop() else {
                break;
            };
            self.expand_node(0, node, iteration, false).await?;
            iteration += 1;
            self.stats.iterations = iteration;
        }

        let reason = if self.strategies.single_seed.should_terminate(
            &self.frontiers[0],
            self.config.total_nodes,
            iteration,
        ) {
            TerminationReason::N1Coverage
        } else if self.frontiers[0].is_exhausted() {
            TerminationReason::Exhaustion
        } else {
            TerminationReason::MaxIterations
        };
        Ok(reason)
    }

    /// The frontier whose queue-front has the globally lowest priority.
    ///
    /// Ties break by frontier array order (strict `<` keeps the first
    /// index), so repeated runs pick the same frontier.
    fn select_frontier(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, frontier) in self.frontiers.iter().enumerate() {
            if let Some(priority) = frontier.queue.peek_priority() {
                match best {
                    Some((_, lowest)) if priority >= lowest => {}
                    _ => best = Some((index, priority)),
                }
            }
        }
        best.map(|(index, _)| index)
    }

    /// Expand one node from the active frontier: fetch neighbors and fold
    /// every unvisited one into the frontier's bookkeeping, detecting
    /// overlap per neighbor when running multi-seed.
    async fn expand_node(
        &mut self,
        active: usize,
        node: N,
        iteration: u64,
        detect_overlap: bool,
    ) -> ExpansionResult<()> {
        self.stats.nodes_expanded += 1;
        self.stats
            .degree_histogram
            .record(self.expander.get_degree(&node));

        let parent_distance = self.frontiers[active].distance_of(&node);
        let neighbors = self.expander.get_neighbors(&node).await?;
        trace!(frontier = active, node = %node, count = neighbors.len(), "expanding");

        for neighbor in neighbors {
            if self.frontiers[active].visited.contains(&neighbor.target) {
                continue;
            }

            self.expander
                .add_edge(&node, &neighbor.target, &neighbor.relationship);
            self.stats.edges_traversed += 1;
            self.sampled_edges
                .insert(EdgeKey::new(node.clone(), neighbor.target.clone()));

            let Neighbor {
                target,
                relationship,
            } = neighbor;
            self.frontiers[active].visit(
                target.clone(),
                Some(ParentLink {
                    parent: node.clone(),
                    relationship,
                }),
            );
            if let Some(distance) = parent_distance {
                self.frontiers[active].record_distance(target.clone(), distance + 1);
            }
            self.node_owners.entry(target.clone()).or_insert(active);
            let priority = self.expander.calculate_priority(&target);
            self.frontiers[active].queue.push(target.clone(), priority);

            if detect_overlap {
                let hits = self.strategies.overlap.detect(
                    &target,
                    active,
                    &self.frontiers,
                    &self.node_owners,
                );
                for other in hits {
                    self.record_overlap(iteration, active, other, &target);
                }
            }
        }

        Ok(())
    }

    /// Log one meeting: event, matrix entry, and (when both parent chains
    /// check out) a deduplicated seed-to-seed path.
    fn record_overlap(&mut self, iteration: u64, active: usize, other: usize, meeting: &N) {
        trace!(active, other, node = %meeting, "frontier overlap");
        self.overlap_events.push(OverlapEvent {
            iteration,
            frontier_a: active,
            frontier_b: other,
            meeting_node: meeting.clone(),
        });
        self.overlap_matrix.record(active, other, meeting.clone());

        if let Some(record) = reconstruct_between_path(
            &self.frontiers[active],
            &self.frontiers[other],
            &self.seeds,
            meeting,
        ) {
            let signature =
                PathSignature::new(record.from_seed, record.to_seed, record.nodes.len());
            if self.path_signatures.insert(signature) {
                debug!(
                    from = record.from_seed,
                    to = record.to_seed,
                    len = record.nodes.len(),
                    "seed-to-seed path recorded"
                );
                self.paths.push(record);
            }
        }
    }

    /// Assemble the raw outcome and delegate refinement to the configured
    /// between-graph strategy, replacing only paths/nodes/edges.
    fn build_outcome(self, reason: TerminationReason) -> ExpansionOutcome<N> {
        let Self {
            seeds,
            strategies,
            frontiers,
            overlap_events,
            overlap_matrix,
            paths,
            sampled_edges,
            stats,
            ..
        } = self;

        let visited_per_frontier: Vec<BTreeSet<N>> = frontiers
            .iter()
            .map(|frontier| frontier.visited.iter().cloned().collect())
            .collect();
        let mut sampled_nodes: BTreeSet<N> = BTreeSet::new();
        for visited in &visited_per_frontier {
            sampled_nodes.extend(visited.iter().cloned());
        }

        let iterations = stats.iterations;
        let raw = ExpansionOutcome {
            seeds,
            paths,
            sampled_nodes,
            sampled_edges,
            visited_per_frontier,
            stats,
            overlap: OverlapMetadata {
                termination_reason: reason,
                overlap_events,
                iterations,
                overlap_matrix,
            },
        };

        let view = strategies.between_graph.extract(&raw);
        ExpansionOutcome {
            paths: view.paths,
            sampled_nodes: view.nodes,
            sampled_edges: view.edges,
            ..raw
        }
    }
}
