//! Error types for the govnet core library.

use thiserror::Error;

use crate::aggregate::EdgeOrientation;
use crate::policy::RelationPolicy;

/// Error type produced while configuring or running graph construction.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The participant roster contained no members.
    #[error("participant roster contains no members")]
    EmptyRoster,
    /// The requested policy/orientation combination is not meaningful.
    #[error("policy `{policy}` cannot build {orientation} graphs")]
    UnsupportedOrientation {
        /// Policy the caller selected.
        policy: RelationPolicy,
        /// Orientation the caller requested.
        orientation: EdgeOrientation,
    },
    /// An edge referenced a node index outside the node set.
    #[error("edge references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node index referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
    /// An edge connected a node to itself.
    #[error("edge forms a self-loop on node {node}")]
    SelfLoopEdge {
        /// The node carrying the self-loop.
        node: usize,
    },
    /// A node's stored index disagreed with its position in the sequence.
    #[error("node at position {position} carries index {index}")]
    NodeIndexMismatch {
        /// Position of the offending node in the supplied sequence.
        position: usize,
        /// Index the node claims to hold.
        index: usize,
    },
}

impl GraphError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::EmptyRoster => GraphErrorCode::EmptyRoster,
            Self::UnsupportedOrientation { .. } => GraphErrorCode::UnsupportedOrientation,
            Self::InvalidNodeId { .. } => GraphErrorCode::InvalidNodeId,
            Self::SelfLoopEdge { .. } => GraphErrorCode::SelfLoopEdge,
            Self::NodeIndexMismatch { .. } => GraphErrorCode::NodeIndexMismatch,
        }
    }
}

/// Machine-readable error codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// The participant roster contained no members.
    EmptyRoster,
    /// The requested policy/orientation combination is not meaningful.
    UnsupportedOrientation,
    /// An edge referenced a node index outside the node set.
    InvalidNodeId,
    /// An edge connected a node to itself.
    SelfLoopEdge,
    /// A node's stored index disagreed with its position in the sequence.
    NodeIndexMismatch,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyRoster => "EMPTY_ROSTER",
            Self::UnsupportedOrientation => "UNSUPPORTED_ORIENTATION",
            Self::InvalidNodeId => "INVALID_NODE_ID",
            Self::SelfLoopEdge => "SELF_LOOP_EDGE",
            Self::NodeIndexMismatch => "NODE_INDEX_MISMATCH",
        }
    }
}

impl std::fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_identifiers() {
        let err = GraphError::InvalidNodeId {
            node: 7,
            node_count: 3,
        };
        assert_eq!(err.code().as_str(), "INVALID_NODE_ID");
        assert_eq!(err.to_string(), "edge references node 7, but node_count is 3");
    }
}
