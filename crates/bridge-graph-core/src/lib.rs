//! Overlap-Based Between-Graph Sampling
//!
//! This crate samples a bounded "between-graph" connecting N seed nodes in
//! a large graph by running N simultaneous degree-prioritised search
//! frontiers and stopping once those frontiers sufficiently overlap,
//! rather than exhausting the whole graph.
//!
//! # Architecture
//!
//! - **config**: declarative strategy selection with file/env loading
//! - **error**: structured error handling with `ExpansionError`
//! - **expansion**: the `OverlapBasedExpansion` orchestrator
//! - **strategy**: the four strategy axes (overlap detection, termination,
//!   single-seed handling, between-graph extraction), 27 compositions
//! - **stubs**: in-memory `GraphExpander` for hermetic tests
//! - **traits**: the async `GraphExpander` collaborator and the salience
//!   scoring seam
//! - **types**: frontiers, priority queue, overlap bookkeeping, outcomes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use bridge_graph_core::config::{ExpansionConfig, TerminationKind};
//! use bridge_graph_core::expansion::OverlapBasedExpansion;
//! use bridge_graph_core::strategy::StrategySet;
//! use bridge_graph_core::stubs::InMemoryGraphExpander;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = InMemoryGraphExpander::new();
//! for pair in ["a", "b", "c", "d", "e"].windows(2) {
//!     graph.add_undirected_edge(pair[0].to_string(), pair[1].to_string(), "linked");
//! }
//!
//! let config = ExpansionConfig::default().with_termination(TerminationKind::CommonConvergence);
//! let strategies = StrategySet::from_config(&config, None)?;
//! let engine = OverlapBasedExpansion::new(
//!     graph,
//!     vec!["a".to_string(), "e".to_string()],
//!     config,
//!     strategies,
//! )?;
//!
//! let outcome = engine.run().await?;
//! assert_eq!(outcome.paths.len(), 1);
//! assert_eq!(outcome.paths[0].nodes, vec!["a", "b", "c", "d", "e"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod expansion;
pub mod strategy;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::{
    BetweenGraphKind, ExpansionConfig, OverlapDetectionKind, SingleSeedKind, TerminationKind,
};
pub use error::{ExpansionError, ExpansionResult};
pub use expansion::OverlapBasedExpansion;
pub use strategy::{
    BetweenGraphExtraction, OverlapDetection, SingleSeedTermination, StrategySet, Termination,
};
pub use traits::{GraphExpander, Neighbor, SalienceScorer};
pub use types::{
    EdgeKey, ExpansionOutcome, ExpansionStats, NodeKey, OverlapEvent, PathRecord,
    TerminationReason,
};
