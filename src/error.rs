/*!
# Errors

All fallible operations return [`Result`]. Every error is raised *before* a graph is touched,
so a failed call never leaves a graph partially modified. The errors signal misuse of the API
rather than recoverable runtime conditions.
*/

use thiserror::Error;

use crate::{
    edge::Weight,
    node::{Node, NumNodes},
};

/// Shorthand for results of graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Coarse classification of a [`GraphError`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A node is not in `0..n`
    OutOfRange,
    /// A count or weight is not admissible
    InvalidArgument,
    /// A weight was requested for a missing edge
    EdgeNotFound,
    /// A mutation was attempted on a read-only or ambiguous view
    UnsupportedOperation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node {node} is out of range for a graph with {len} nodes")]
    NodeOutOfRange { node: Node, len: NumNodes },

    #[error("edge weight must be finite, got {weight}")]
    NonFiniteWeight { weight: Weight },

    #[error("cannot add {requested} nodes to a graph with {current} nodes")]
    NodeCapacityExceeded {
        current: NumNodes,
        requested: NumNodes,
    },

    #[error("no edge ({source_node},{target_node})")]
    EdgeNotFound {
        source_node: Node,
        target_node: Node,
    },

    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::NodeOutOfRange { .. } => ErrorKind::OutOfRange,
            GraphError::NonFiniteWeight { .. } | GraphError::NodeCapacityExceeded { .. } => {
                ErrorKind::InvalidArgument
            }
            GraphError::EdgeNotFound { .. } => ErrorKind::EdgeNotFound,
            GraphError::Unsupported(_) => ErrorKind::UnsupportedOperation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_messages() {
        let err = GraphError::NodeOutOfRange { node: 7, len: 3 };
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            err.to_string(),
            "node 7 is out of range for a graph with 3 nodes"
        );

        let err = GraphError::EdgeNotFound {
            source_node: 1,
            target_node: 2,
        };
        assert_eq!(err.kind(), ErrorKind::EdgeNotFound);
        assert_eq!(err.to_string(), "no edge (1,2)");

        assert_eq!(
            GraphError::NonFiniteWeight {
                weight: Weight::NAN
            }
            .kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            GraphError::Unsupported("graph is unmodifiable").kind(),
            ErrorKind::UnsupportedOperation
        );
    }
}
