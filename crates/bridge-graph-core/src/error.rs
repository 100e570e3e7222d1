//! Error types for bridge-graph-core.
//!
//! This module defines the central error type [`ExpansionError`] used
//! throughout the crate, along with the [`ExpansionResult<T>`] type alias.
//!
//! # Examples
//!
//! ```rust
//! use bridge_graph_core::error::ExpansionError;
//!
//! fn require_seeds(seeds: &[String]) -> Result<(), ExpansionError> {
//!     if seeds.is_empty() {
//!         return Err(ExpansionError::EmptySeeds);
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_seeds(&[]).is_err());
//! ```

use thiserror::Error;

/// Top-level error type for bridge-graph-core operations.
///
/// Provides structured error variants for all failure modes in the engine,
/// enabling precise error handling and informative error messages.
#[derive(Debug, Error)]
pub enum ExpansionError {
    /// The expansion was constructed with an empty seed list.
    ///
    /// # When This Occurs
    ///
    /// - Calling the orchestrator constructor with zero seeds
    ///
    /// This is the engine's one validated precondition and fails fast at
    /// construction time; it is not recoverable at runtime.
    #[error("At least one seed node is required")]
    EmptySeeds,

    /// A field value failed validation constraints.
    ///
    /// # When This Occurs
    ///
    /// - Similarity threshold outside `[0, 1]`
    /// - Coverage fraction outside `(0, 1]`
    /// - Zero-sized retention bounds
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// Configuration is invalid or missing.
    ///
    /// # When This Occurs
    ///
    /// - Missing or unreadable configuration file
    /// - Invalid configuration value format
    /// - A strategy selection that needs a collaborator which was not
    ///   supplied (e.g. salience-preserving extraction without a scorer)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The graph-source collaborator failed.
    ///
    /// # When This Occurs
    ///
    /// - A neighbor or node lookup backed by network/disk I/O fails
    ///
    /// The engine performs no retries and keeps no snapshot to roll back
    /// to; the failure propagates directly out of `run()`.
    #[error("Graph source error: {0}")]
    GraphSource(String),

    /// Error during serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ExpansionError {
    fn from(err: serde_json::Error) -> Self {
        ExpansionError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ExpansionError {
    fn from(err: config::ConfigError) -> Self {
        ExpansionError::Config(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type ExpansionResult<T> = Result<T, ExpansionError>;
