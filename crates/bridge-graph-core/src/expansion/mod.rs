//! Overlap-based multi-seed expansion.
//!
//! [`OverlapBasedExpansion`] runs N simultaneous degree-prioritised search
//! frontiers over a lazily-loaded graph and stops once they sufficiently
//! overlap, sampling the bounded between-graph that connects the seeds
//! instead of exhausting the whole graph.
//!
//! Control flow: seed N frontiers → each iteration pop the globally
//! lowest-priority pending node across frontiers → expand it through the
//! [`GraphExpander`](crate::traits::GraphExpander) collaborator → update
//! frontier/ownership bookkeeping → delegate overlap detection and
//! termination to the configured [`StrategySet`](crate::strategy::StrategySet)
//! → on stop, union the visited sets and refine through the between-graph
//! strategy.

mod engine;
mod paths;

pub use engine::OverlapBasedExpansion;

#[cfg(test)]
mod tests;
