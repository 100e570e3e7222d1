//! The four strategy axes and their composition.
//!
//! Each axis is a small object-safe trait with one to three
//! implementations:
//!
//! - **overlap**: how a meeting between frontiers is detected
//! - **termination**: when a multi-seed run has seen enough overlap
//! - **single_seed**: when a one-seed run has covered enough of the graph
//! - **between_graph**: how the raw sample is refined into the final
//!   between-graph
//!
//! Strategies are composed into a [`StrategySet`] via constructor injection
//! (never inheritance) and hold no references into engine state; engine
//! structures are passed by reference as call arguments only.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{
    BetweenGraphKind, ExpansionConfig, OverlapDetectionKind, SingleSeedKind, TerminationKind,
};
use crate::error::{ExpansionError, ExpansionResult};
use crate::traits::SalienceScorer;
use crate::types::{BetweenGraphView, ExpansionOutcome, FrontierState, NodeKey, OverlapEvent};

pub mod between_graph;
pub mod overlap;
pub mod single_seed;
pub mod termination;

pub use between_graph::{MinimalPaths, SaliencePreserving, TruncatedComponent};
pub use overlap::{PhysicalMeeting, SphereIntersection, ThresholdSharing};
pub use single_seed::CoverageThreshold;
pub use termination::{CommonConvergence, FullPairwise, TransitiveConnectivity};

/// Overlap-detection axis: decide which other frontiers the active one has
/// just met at `target`.
pub trait OverlapDetection<N: NodeKey>: Send + Sync {
    /// Strategy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether frontiers must track hop distances for this strategy.
    fn requires_distances(&self) -> bool {
        false
    }

    /// Frontier indices overlapping with `active` at `target`, in frontier
    /// array order. `target` is already visited by (and possibly owned by)
    /// the active frontier when this runs.
    fn detect(
        &self,
        target: &N,
        active: usize,
        frontiers: &[FrontierState<N>],
        owners: &HashMap<N, usize>,
    ) -> Vec<usize>;
}

/// Termination axis for multi-seed runs.
pub trait Termination<N: NodeKey>: Send + Sync {
    /// Strategy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the run has seen enough overlap to stop.
    ///
    /// Must be a pure function of its arguments: the engine re-invokes it
    /// after the loop to label the outcome.
    fn should_terminate(
        &self,
        frontiers: &[FrontierState<N>],
        overlap_events: &[OverlapEvent<N>],
        iteration: u64,
    ) -> bool;
}

/// Termination axis for single-seed runs (no overlap logic applies).
pub trait SingleSeedTermination<N: NodeKey>: Send + Sync {
    /// Strategy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the lone frontier has covered enough of the graph.
    fn should_terminate(
        &self,
        frontier: &FrontierState<N>,
        total_nodes: Option<usize>,
        iteration: u64,
    ) -> bool;
}

/// Between-graph extraction axis: refine the raw sample.
pub trait BetweenGraphExtraction<N: NodeKey>: Send + Sync {
    /// Strategy name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Refined node/edge/path sets; each must be a subset of the raw
    /// outcome's. Stats and overlap metadata are not touched (the strategy
    /// decorates, never recomputes, provenance).
    fn extract(&self, raw: &ExpansionOutcome<N>) -> BetweenGraphView<N>;
}

/// One strategy per axis, composed via constructor injection.
pub struct StrategySet<N: NodeKey> {
    /// Overlap-detection axis.
    pub overlap: Box<dyn OverlapDetection<N>>,
    /// Multi-seed termination axis.
    pub termination: Box<dyn Termination<N>>,
    /// Single-seed termination axis.
    pub single_seed: Box<dyn SingleSeedTermination<N>>,
    /// Between-graph extraction axis.
    pub between_graph: Box<dyn BetweenGraphExtraction<N>>,
}

impl<N: NodeKey> StrategySet<N> {
    /// Compose a set from explicit strategy instances.
    pub fn new(
        overlap: Box<dyn OverlapDetection<N>>,
        termination: Box<dyn Termination<N>>,
        single_seed: Box<dyn SingleSeedTermination<N>>,
        between_graph: Box<dyn BetweenGraphExtraction<N>>,
    ) -> Self {
        Self {
            overlap,
            termination,
            single_seed,
            between_graph,
        }
    }

    /// Build the set declared by `config`.
    ///
    /// `salience` is required when (and only used when) the config selects
    /// salience-preserving extraction; the scoring formula is external to
    /// the engine.
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::Config` when salience-preserving extraction
    /// is selected without a scorer.
    pub fn from_config(
        config: &ExpansionConfig,
        salience: Option<Arc<dyn SalienceScorer<N>>>,
    ) -> ExpansionResult<Self> {
        let overlap: Box<dyn OverlapDetection<N>> = match config.overlap_detection {
            OverlapDetectionKind::PhysicalMeeting => Box::new(PhysicalMeeting),
            OverlapDetectionKind::ThresholdSharing { threshold } => {
                Box::new(ThresholdSharing::new(threshold))
            }
            OverlapDetectionKind::SphereIntersection { max_distance } => {
                Box::new(SphereIntersection::new(max_distance))
            }
        };

        let termination: Box<dyn Termination<N>> = match config.termination {
            TerminationKind::FullPairwise => Box::new(FullPairwise),
            TerminationKind::TransitiveConnectivity => Box::new(TransitiveConnectivity),
            TerminationKind::CommonConvergence => Box::new(CommonConvergence),
        };

        let single_seed: Box<dyn SingleSeedTermination<N>> = match config.single_seed {
            SingleSeedKind::CoverageThreshold { target_fraction } => {
                Box::new(CoverageThreshold::new(target_fraction))
            }
        };

        let between_graph: Box<dyn BetweenGraphExtraction<N>> = match config.between_graph {
            BetweenGraphKind::MinimalPaths => Box::new(MinimalPaths),
            BetweenGraphKind::TruncatedComponent {
                max_nodes,
                max_radius,
            } => Box::new(TruncatedComponent::new(max_nodes, max_radius)),
            BetweenGraphKind::SaliencePreserving { top_k } => {
                let scorer = salience.ok_or_else(|| {
                    ExpansionError::Config(
                        "salience-preserving extraction requires a SalienceScorer".into(),
                    )
                })?;
                Box::new(SaliencePreserving::new(top_k, scorer))
            }
        };

        Ok(Self::new(overlap, termination, single_seed, between_graph))
    }
}
