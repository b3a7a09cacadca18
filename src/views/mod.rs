/*!
# Views

Views reinterpret an existing graph without copying it. Every view is generic over the graph
it wraps, which can be owned, borrowed (`&G`) or mutably borrowed (`&mut G`):

- [`Unmodifiable`] rejects every mutation with [`GraphError::Unsupported`].
  [`ImmutableGraph`] and friends are unmodifiable wrappers around a private deep copy.
- [`AsDirected`] presents an undirected graph as a directed graph with identical out- and
  in-neighborhoods.
- [`AsWeighted`] presents an unweighted graph as a weighted graph with weight `1.0` on every edge.
- [`AsUnweighted`] hides the weights of a weighted graph.

Mutations through a view are forwarded to the wrapped graph whenever their meaning is the
same for both shapes (adding or removing nodes, removing a weighted edge through an
unweighted view, ...). Mutations that would be ambiguous fail with
[`GraphError::Unsupported`]. A view over `&G` does not implement the editing traits at all,
and a view over an [`Unmodifiable`] graph forwards into the rejection of the wrapped graph.

## Example
```
use adjgraphs::prelude::*;

let mut graph = Graph::from_edges(3, [(0, 1)]).unwrap();
{
    let directed = graph.as_directed();
    assert_eq!(directed.in_neighbors_of(1).unwrap().sorted(), vec![0]);
    assert_eq!(directed.number_of_edges(), 2);
}

let mut weighted = graph.as_weighted_mut();
assert_eq!(weighted.edge_weight(1, 0), Ok(1.0));
assert!(weighted.put_edge(1, 2, 2.0).is_err());
assert_eq!(weighted.put_edge(1, 2, 1.0), Ok(None));
assert_eq!(graph.number_of_edges(), 2);
```
*/

use crate::{edge::*, error::*, node::*, ops::*, repr::*};

mod adapters;
mod unmodifiable;

pub use adapters::*;
pub use unmodifiable::*;

/// Implements the read-only capability traits of a view by delegating to `self.graph`.
/// `AdjacencyList` is left to the view as it may reinterpret the payloads.
macro_rules! impl_delegated_order {
    ($view:ident) => {
        impl<G: GraphNodeOrder> GraphNodeOrder for $view<G> {
            fn number_of_nodes(&self) -> NumNodes {
                self.graph.number_of_nodes()
            }
        }
    };
}

pub(crate) use impl_delegated_order;

/// Implements `GraphVertexEditing` for a view by forwarding to `self.graph`
macro_rules! impl_forwarded_vertex_editing {
    ($view:ident) => {
        impl<G: GraphVertexEditing> GraphVertexEditing for $view<G> {
            fn add_vertex(&mut self) -> Result<Node> {
                self.graph.add_vertex()
            }

            fn add_vertices(&mut self, n: NumNodes) -> Result<()> {
                self.graph.add_vertices(n)
            }

            fn remove_vertex(&mut self, u: Node) -> Result<()> {
                self.graph.remove_vertex(u)
            }
        }
    };
}

pub(crate) use impl_forwarded_vertex_editing;
