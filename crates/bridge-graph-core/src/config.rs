//! Expansion configuration.
//!
//! [`ExpansionConfig`] declares the strategy for each of the four axes
//! (overlap detection, termination, single-seed handling, between-graph
//! extraction) plus the optional safety cap and graph-size hint. The four
//! strategy fields are mandatory; `max_iterations` defaults to unbounded and
//! `total_nodes` is consumed only by coverage-based single-seed termination.
//!
//! Configs can be built in code, deserialized from JSON, or loaded from a
//! file merged with `BRIDGE_GRAPH`-prefixed environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExpansionError, ExpansionResult};

/// Default Jaccard similarity threshold for shared-visited overlap detection.
pub const DEFAULT_SHARING_THRESHOLD: f64 = 0.1;

/// Default coverage fraction for single-seed termination.
pub const DEFAULT_COVERAGE_FRACTION: f64 = 0.8;

fn default_sharing_threshold() -> f64 {
    DEFAULT_SHARING_THRESHOLD
}

fn default_coverage_fraction() -> f64 {
    DEFAULT_COVERAGE_FRACTION
}

/// Overlap-detection strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OverlapDetectionKind {
    /// Report a meeting when a neighbor is already owned by another frontier.
    PhysicalMeeting,
    /// Report overlap once visited-set Jaccard similarity reaches `threshold`.
    ThresholdSharing {
        #[serde(default = "default_sharing_threshold")]
        threshold: f64,
    },
    /// Report overlap when another frontier's radius reaches the new node's
    /// hop distance from the active seed, optionally capped.
    SphereIntersection {
        #[serde(default)]
        max_distance: Option<u32>,
    },
}

/// Termination strategy selection for multi-seed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TerminationKind {
    /// Every one of the C(N,2) seed pairs has met at least once.
    FullPairwise,
    /// The overlap-graph over frontier indices spans all N frontiers.
    TransitiveConnectivity,
    /// Some single node has been visited by all N frontiers.
    CommonConvergence,
}

/// Single-seed termination selection (no overlap logic applies when N = 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SingleSeedKind {
    /// Stop once `|visited| / total_nodes` reaches `target_fraction`.
    CoverageThreshold {
        #[serde(default = "default_coverage_fraction")]
        target_fraction: f64,
    },
}

/// Between-graph extraction selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum BetweenGraphKind {
    /// Keep only nodes/edges that appear on at least one recorded path.
    MinimalPaths,
    /// Keep the component(s) around overlap-meeting nodes, bounded by size
    /// and/or hop radius.
    TruncatedComponent {
        #[serde(default)]
        max_nodes: Option<usize>,
        #[serde(default)]
        max_radius: Option<u32>,
    },
    /// Keep the top-K nodes by externally-computed salience while preserving
    /// recorded paths. Requires a scorer at strategy-construction time.
    SaliencePreserving { top_k: usize },
}

/// Configuration for one expansion run.
///
/// # Examples
///
/// ```
/// use bridge_graph_core::config::{ExpansionConfig, TerminationKind};
///
/// let config = ExpansionConfig::default()
///     .with_termination(TerminationKind::CommonConvergence)
///     .with_max_iterations(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Overlap-detection axis.
    pub overlap_detection: OverlapDetectionKind,

    /// Termination axis (N >= 2 runs).
    pub termination: TerminationKind,

    /// Single-seed axis (N = 1 runs).
    pub single_seed: SingleSeedKind,

    /// Between-graph extraction axis.
    pub between_graph: BetweenGraphKind,

    /// Safety cap on loop iterations. `None` means unbounded.
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// Total node count of the underlying graph. Consumed only by
    /// coverage-based single-seed termination.
    #[serde(default)]
    pub total_nodes: Option<usize>,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            overlap_detection: OverlapDetectionKind::PhysicalMeeting,
            termination: TerminationKind::FullPairwise,
            single_seed: SingleSeedKind::CoverageThreshold {
                target_fraction: DEFAULT_COVERAGE_FRACTION,
            },
            between_graph: BetweenGraphKind::MinimalPaths,
            max_iterations: None,
            total_nodes: None,
        }
    }
}

impl ExpansionConfig {
    /// Builder: set the overlap-detection strategy.
    #[must_use]
    pub fn with_overlap_detection(mut self, kind: OverlapDetectionKind) -> Self {
        self.overlap_detection = kind;
        self
    }

    /// Builder: set the termination strategy.
    #[must_use]
    pub fn with_termination(mut self, kind: TerminationKind) -> Self {
        self.termination = kind;
        self
    }

    /// Builder: set the single-seed strategy.
    #[must_use]
    pub fn with_single_seed(mut self, kind: SingleSeedKind) -> Self {
        self.single_seed = kind;
        self
    }

    /// Builder: set the between-graph extraction strategy.
    #[must_use]
    pub fn with_between_graph(mut self, kind: BetweenGraphKind) -> Self {
        self.between_graph = kind;
        self
    }

    /// Builder: set the iteration safety cap.
    #[must_use]
    pub fn with_max_iterations(mut self, cap: u64) -> Self {
        self.max_iterations = Some(cap);
        self
    }

    /// Builder: set the total-node hint for coverage termination.
    #[must_use]
    pub fn with_total_nodes(mut self, total: usize) -> Self {
        self.total_nodes = Some(total);
        self
    }

    /// Validate all strategy parameters.
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::Validation` for out-of-range thresholds,
    /// fractions, or zero-sized retention bounds.
    pub fn validate(&self) -> ExpansionResult<()> {
        if let OverlapDetectionKind::ThresholdSharing { threshold } = self.overlap_detection {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ExpansionError::Validation {
                    field: "overlap_detection.threshold".into(),
                    message: format!("must be within [0, 1], got {threshold}"),
                });
            }
        }

        let SingleSeedKind::CoverageThreshold { target_fraction } = self.single_seed;
        if !(target_fraction > 0.0 && target_fraction <= 1.0) {
            return Err(ExpansionError::Validation {
                field: "single_seed.target_fraction".into(),
                message: format!("must be within (0, 1], got {target_fraction}"),
            });
        }

        match self.between_graph {
            BetweenGraphKind::TruncatedComponent {
                max_nodes: Some(0), ..
            } => {
                return Err(ExpansionError::Validation {
                    field: "between_graph.max_nodes".into(),
                    message: "must be at least 1 when set".into(),
                });
            }
            BetweenGraphKind::SaliencePreserving { top_k: 0 } => {
                return Err(ExpansionError::Validation {
                    field: "between_graph.top_k".into(),
                    message: "must be at least 1".into(),
                });
            }
            _ => {}
        }

        Ok(())
    }

    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::Serialization` on malformed JSON and
    /// `ExpansionError::Validation` on out-of-range parameters.
    pub fn from_json(json: &str) -> ExpansionResult<Self> {
        let parsed: Self = serde_json::from_str(json)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load a configuration from a file, merged with `BRIDGE_GRAPH`-prefixed
    /// environment overrides (e.g. `BRIDGE_GRAPH__MAX_ITERATIONS=500`).
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::Config` when the file is missing or
    /// malformed, and `ExpansionError::Validation` on out-of-range
    /// parameters.
    pub fn from_file(path: &Path) -> ExpansionResult<Self> {
        let raw = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("BRIDGE_GRAPH").separator("__"))
            .build()?;
        let parsed: Self = raw.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Load a configuration from `BRIDGE_GRAPH`-prefixed environment
    /// variables alone, on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ExpansionError::Config` on malformed overrides and
    /// `ExpansionError::Validation` on out-of-range parameters.
    pub fn from_env() -> ExpansionResult<Self> {
        let defaults = config::Config::try_from(&Self::default())?;
        let raw = config::Config::builder()
            .add_source(defaults)
            .add_source(config::Environment::with_prefix("BRIDGE_GRAPH").separator("__"))
            .build()?;
        let parsed: Self = raw.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }
}
