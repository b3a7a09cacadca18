/*!
# Node Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
Nodes of a graph with `n` nodes are always exactly `0..n`: removing a node shifts every
larger node down by one, adding a node appends it at `n`.
*/

use crate::error::{GraphError, Result};

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid and is never handed out as a node
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// Returns the number of nodes after appending `additional` nodes to a graph of `current`
/// nodes, or an error if this would reach [`INVALID_NODE`].
pub(crate) fn grown_order(current: NumNodes, additional: NumNodes) -> Result<NumNodes> {
    current
        .checked_add(additional)
        .filter(|&n| n < INVALID_NODE)
        .ok_or(GraphError::NodeCapacityExceeded {
            current,
            requested: additional,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grown_order_rejects_overflow() {
        assert_eq!(grown_order(3, 4), Ok(7));
        assert_eq!(grown_order(0, INVALID_NODE - 1), Ok(INVALID_NODE - 1));
        assert!(grown_order(1, INVALID_NODE - 1).is_err());
        assert!(grown_order(INVALID_NODE - 1, 1).is_err());
        assert!(grown_order(5, INVALID_NODE).is_err());
    }
}
