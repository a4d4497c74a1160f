//! Errors returned by culture operations.

use thiserror::Error;

/// Errors raised by [`CulturalNetwork`](crate::CulturalNetwork) operations.
///
/// None of these leave the network in a changed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CultureError {
    /// A culture-dependent operation ran before `create_cultural_network`
    #[error("network has no culture yet; call create_cultural_network first")]
    NotInitialized,

    /// Zero features or traits passed to the initializer
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The chosen agent has no neighbors (only under `IsolatedPolicy::Fail`)
    #[error("node {0} has no neighbors")]
    NoNeighbors(usize),

    /// Node id is not part of the graph
    #[error("unknown node {0}")]
    UnknownNode(usize),

    /// A culture supplied to `set_culture` breaks the length or trait range
    #[error("invalid culture for node {node}: {reason}")]
    InvalidCulture { node: usize, reason: String },
}

/// Reports a call made before initialization and returns the matching error.
pub(crate) fn not_initialized(operation: &'static str) -> CultureError {
    tracing::warn!(
        operation,
        "network has no culture; use create_cultural_network first"
    );
    CultureError::NotInitialized
}
