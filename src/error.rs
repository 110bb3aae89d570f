//! Error types for dependency analysis.
//!
//! Every error is fatal for the single project-variant being analyzed. The
//! pipeline in [`crate::analysis`] records it and keeps going with sibling
//! variants.

use thiserror::Error;

/// Errors produced by the graph model and the advice engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Attempted to add an edge from a node to itself
    #[error("Invalid edge: '{node}' cannot depend on itself")]
    InvalidEdge { node: String },

    /// The graph and the declared dependencies disagree
    #[error("Malformed graph for {project} ({variant}): '{identifier}' is not consistent with the declared dependencies")]
    MalformedGraph {
        project: String,
        variant: String,
        identifier: String,
    },

    /// Two reconciliation rules produced conflicting advice for one declaration
    #[error("Ambiguous advice for '{identifier}' declared on {configuration}: {kinds}")]
    AmbiguousAdvice {
        identifier: String,
        configuration: String,
        kinds: String,
    },

    /// An advice value violated its construction invariant
    #[error("Invalid advice: {reason}")]
    InvalidAdvice { reason: String },
}

impl AnalysisError {
    /// Short stable code, used by reporters
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::InvalidEdge { .. } => "invalid-edge",
            AnalysisError::MalformedGraph { .. } => "malformed-graph",
            AnalysisError::AmbiguousAdvice { .. } => "ambiguous-advice",
            AnalysisError::InvalidAdvice { .. } => "invalid-advice",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
