/*!
`adjgraphs` provides adjacency-list graph containers in four shapes:

|              | undirected               | directed                   |
|--------------|--------------------------|----------------------------|
| unweighted   | [`Graph`](repr::Graph)   | [`Digraph`](repr::Digraph) |
| weighted     | [`WeightedGraph`](repr::WeightedGraph) | [`WeightedDigraph`](repr::WeightedDigraph) |

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes in the graph.
Node ids are always dense: removing a node renames every larger node `v` to `v - 1`.
For **edges**, we use a simple tuple-struct `Edge(Node, Node)`, weighted edges carry a finite
`f64` in `WeightedEdge(Node, Node, Weight)`.

Every node owns a hash map from neighbor to edge weight. Directed graphs keep an outgoing and
an incoming map per node and update both within the same call, so in- and out-neighborhoods
are both available in `O(1)`. Undirected graphs keep a single symmetric map per node.

# Design

Graphs are composed of small capability traits found in [`ops`]; algorithms and views are
written against these traits rather than concrete types. On top of the four base shapes,
[`views`] provides
- read-only views ([`Unmodifiable`](views::Unmodifiable)) and frozen copies
  ([`ImmutableGraph`](views::ImmutableGraph), ...),
- reinterpretations such as [`AsDirected`](views::AsDirected) or
  [`AsWeighted`](views::AsWeighted) that forward mutations when their meaning is unambiguous.

Every base shape can be copied from every other shape (and from every view) via `from_graph`.

Misuse (unknown nodes, non-finite weights, missing edges, mutating a read-only view) is
reported as a [`GraphError`](error::GraphError) before anything is modified.

# Usage

```
use adjgraphs::prelude::*;

let mut graph = WeightedDigraph::default();
graph.add_vertices(3).unwrap();
graph.put_edge(0, 1, 2.5).unwrap();
graph.put_edge(1, 2, -1.0).unwrap();
assert_eq!(graph.edge_weight(0, 1), Ok(2.5));

graph.remove_vertex(1).unwrap();
assert_eq!(graph.number_of_nodes(), 2);
assert!(graph.out_neighbors_of(0).unwrap().is_empty());

let frozen = graph.to_immutable();
assert_eq!(frozen.to_string(), "WeightedDigraph(2) {\n}");
```

In most use-cases, `use adjgraphs::prelude::*;` suffices.
[`repr::digest`] computes representation-independent hashes of graphs and [`io`] writes
graphs in the DOT format.
*/

pub mod edge;
pub mod error;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod views;

/// `adjgraphs::prelude` includes definitions for nodes, edges and errors, all graph operation
/// traits as well as all representations and views.
pub mod prelude {
    pub use super::{edge::*, error::*, node::*, ops::*, repr::*, views::*};
}
