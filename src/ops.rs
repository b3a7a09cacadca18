/*!
# Graph Operations

Capability traits every graph, view and adapter in this crate is composed of:

- [`GraphType`]: static shape of a graph (directed or not, weighted or not),
- [`GraphNodeOrder`] / [`GraphEdgeOrder`]: sizes and node validation,
- [`AdjacencyList`] / [`DirectedAdjacencyList`]: neighborhood queries,
- [`EdgeWeights`]: weight lookup,
- [`GraphVertexEditing`], [`GraphEdgeEditing`], [`WeightedEdgeEditing`]: mutation.

All queries and mutations that take a node fail with [`GraphError::NodeOutOfRange`]
if the node is not in `0..n`. References forward all read traits and mutable references
additionally forward the editing traits, so adapters can borrow the graph they wrap.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{
    edge::*,
    error::{GraphError, Result},
    node::*,
    repr::NeighborSet,
};

/// Marker for the direction of the edges of a graph
pub trait Direction {
    const IS_DIRECTED: bool;
}

/// Marker for the weighting of the edges of a graph
pub trait Weighting {
    const IS_WEIGHTED: bool;
}

/// Edges are ordered pairs
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Directed;

/// Edges are unordered pairs
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Undirected;

/// Edges carry a finite weight
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Weighted;

/// Edges carry no weight
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Unweighted;

impl Direction for Directed {
    const IS_DIRECTED: bool = true;
}

impl Direction for Undirected {
    const IS_DIRECTED: bool = false;
}

impl Weighting for Weighted {
    const IS_WEIGHTED: bool = true;
}

impl Weighting for Unweighted {
    const IS_WEIGHTED: bool = false;
}

/// The shape of a graph
pub trait GraphType {
    type Dir: Direction;
    type Weighting: Weighting;

    fn is_directed() -> bool {
        Self::Dir::IS_DIRECTED
    }

    fn is_weighted() -> bool {
        Self::Weighting::IS_WEIGHTED
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }

    /// Returns a range over all nodes. As the range does not borrow the graph, it can be
    /// used while the graph is mutated.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if `u` is a node of the graph
    fn has_node(&self, u: Node) -> bool {
        u < self.number_of_nodes()
    }

    /// Returns an error if `u` is not a node of the graph
    fn check_node(&self, u: Node) -> Result<()> {
        if self.has_node(u) {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node: u,
                len: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// Undirected edges and self-loops count once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Traits pertaining getters for neighborhoods & edges
pub trait AdjacencyList: GraphNodeOrder {
    /// Payload stored per edge by the backing representation
    type Stored: EdgeWeight;

    /// Returns the (open) neighborhood of a given vertex.
    /// The returned set borrows the graph and thus always reflects its current state.
    ///
    /// Note that for directed graphs, this is equivalent to `out_neighbors_of`
    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Self::Stored>>;

    /// Returns the number of (outgoing) neighbors of `u`
    fn degree_of(&self, u: Node) -> Result<NumNodes> {
        Ok(self.neighbors_of(u)?.len() as NumNodes)
    }

    /// Returns *true* if the egde (u,v) exists in the graph.
    fn has_edge(&self, u: Node, v: Node) -> Result<bool> {
        self.check_node(v)?;
        Ok(self.neighbors_of(u)?.contains(v))
    }

    /// Returns *true* if a self-loop (u,u) exists.
    fn has_self_loop(&self, u: Node) -> Result<bool> {
        self.has_edge(u, u)
    }

    /// Returns an iterator over all edges in the graph together with their stored payload.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edge_entries(
        &self,
        only_normalized: bool,
    ) -> impl Iterator<Item = (Edge, Self::Stored)> + '_ {
        self.vertices()
            .flat_map(move |u| {
                self.neighbors_of(u)
                    .into_iter()
                    .flat_map(move |nbs| nbs.entries().map(move |(v, w)| (Edge(u, v), w)))
            })
            .filter(move |(e, _)| !only_normalized || e.is_normalized())
    }

    /// Returns an iterator over all edges in the graph.
    /// If `only_normalized`, then only edges `(u, v)` with `u <= v` are considered.
    fn edges(&self, only_normalized: bool) -> impl Iterator<Item = Edge> + '_ {
        self.edge_entries(only_normalized).map(|(e, _)| e)
    }

    /// Returns all edges in the graph in sorted order
    fn ordered_edges(&self, only_normalized: bool) -> Vec<Edge> {
        self.edges(only_normalized).sorted_unstable().collect_vec()
    }

    /// Returns all edges with their reported weight in sorted order
    fn ordered_weighted_edges(&self, only_normalized: bool) -> Vec<WeightedEdge> {
        self.edge_entries(only_normalized)
            .sorted_unstable_by_key(|(e, _)| *e)
            .map(|(e, w)| e.with_weight(w.value()))
            .collect_vec()
    }
}

/// Neighborhood queries for directed graphs
pub trait DirectedAdjacencyList: AdjacencyList {
    /// Returns the nodes `v` with edges `(u, v)`
    #[inline]
    fn out_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Self::Stored>> {
        self.neighbors_of(u)
    }

    /// Returns the nodes `v` with edges `(v, u)`
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Self::Stored>>;

    #[inline]
    fn out_degree_of(&self, u: Node) -> Result<NumNodes> {
        self.degree_of(u)
    }

    fn in_degree_of(&self, u: Node) -> Result<NumNodes> {
        Ok(self.in_neighbors_of(u)?.len() as NumNodes)
    }

    /// Returns the out-degree plus the in-degree of a given vertex
    fn total_degree_of(&self, u: Node) -> Result<NumNodes> {
        Ok(self.out_degree_of(u)? + self.in_degree_of(u)?)
    }
}

/// Weight lookup. Edges of unweighted graphs viewed as weighted report `1.0`.
pub trait EdgeWeights: AdjacencyList {
    /// Returns the weight of the edge `(u, v)`.
    /// Fails with [`GraphError::EdgeNotFound`] if there is no such edge.
    fn edge_weight(&self, u: Node, v: Node) -> Result<Weight> {
        self.check_node(v)?;
        self.neighbors_of(u)?
            .weight_of(v)
            .map(EdgeWeight::value)
            .ok_or(GraphError::EdgeNotFound {
                source_node: u,
                target_node: v,
            })
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates a graph with `n` singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert/delete nodes
pub trait GraphVertexEditing: GraphNodeOrder {
    /// Appends a singleton node and returns it. The new node is `n` (before insertion).
    fn add_vertex(&mut self) -> Result<Node>;

    /// Appends `n` singleton nodes
    fn add_vertices(&mut self, n: NumNodes) -> Result<()>;

    /// Removes node `u` together with all edges at `u`.
    /// Every node `v > u` is renamed to `v - 1` afterwards.
    fn remove_vertex(&mut self, u: Node) -> Result<()>;
}

/// Provides functions to insert/delete unweighted edges
pub trait GraphEdgeEditing: GraphNodeOrder {
    /// Adds the edge `(u, v)` to the graph.
    /// Returns *true* exactly if the edge was not present previously.
    fn put_edge(&mut self, u: Node, v: Node) -> Result<bool>;

    /// Removes the edge `(u, v)` from the graph. I.e., the edge FROM u TO v.
    /// Returns *true* exactly if the edge was present previously.
    fn remove_edge(&mut self, u: Node, v: Node) -> Result<bool>;

    /// Adds all edges in the collection and returns the number of new edges.
    /// All endpoints are validated before the first edge is inserted.
    fn put_edges<I, E>(&mut self, edges: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let edges = edges.into_iter().map(Into::into).collect_vec();
        for &Edge(u, v) in &edges {
            self.check_node(u)?;
            self.check_node(v)?;
        }

        let mut added = 0;
        for Edge(u, v) in edges {
            added += self.put_edge(u, v)? as NumEdges;
        }
        Ok(added)
    }
}

/// Provides functions to insert/delete weighted edges
pub trait WeightedEdgeEditing: GraphNodeOrder {
    /// Adds or overwrites the edge `(u, v)` with weight `weight`.
    /// Returns the previous weight if the edge was present.
    /// Fails with [`GraphError::NonFiniteWeight`] for NaN or infinite weights.
    fn put_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>>;

    /// Removes the edge `(u, v)` and returns its weight if it was present.
    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>>;

    /// Adds all edges in the collection and returns the number of new edges.
    /// All endpoints and weights are validated before the first edge is inserted.
    fn put_edges<I, E>(&mut self, edges: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        let edges = edges.into_iter().map(Into::into).collect_vec();
        for &WeightedEdge(u, v, w) in &edges {
            self.check_node(u)?;
            self.check_node(v)?;
            check_weight(w)?;
        }

        let mut added = 0;
        for WeightedEdge(u, v, w) in edges {
            added += self.put_edge(u, v, w)?.is_none() as NumEdges;
        }
        Ok(added)
    }
}

/// Creating an unweighted graph from scratch from a number of nodes and a set of edges
pub trait GraphFromScratch: Sized {
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_edges<I, E>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let mut graph = Self::new(n);
        graph.put_edges(edges)?;
        Ok(graph)
    }
}

/// Creating a weighted graph from scratch from a number of nodes and a set of weighted edges
pub trait WeightedGraphFromScratch: Sized {
    fn from_weighted_edges<I, E>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>;
}

impl<G: GraphNew + WeightedEdgeEditing> WeightedGraphFromScratch for G {
    fn from_weighted_edges<I, E>(n: NumNodes, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        let mut graph = Self::new(n);
        graph.put_edges(edges)?;
        Ok(graph)
    }
}

/// Returns *true* if both graphs have the same number of nodes and every node has the same
/// neighborhood with the same reported weights in both graphs.
///
/// In contrast to `==`, this works across representations and views.
pub fn structurally_eq<G, H>(g: &G, h: &H) -> bool
where
    G: AdjacencyList,
    H: AdjacencyList,
{
    g.number_of_nodes() == h.number_of_nodes()
        && g.vertices().all(|u| match (g.neighbors_of(u), h.neighbors_of(u)) {
            (Ok(a), Ok(b)) => {
                a.len() == b.len()
                    && a.entries()
                        .all(|(v, w)| b.weight_of(v).is_some_and(|x| x.value() == w.value()))
            }
            _ => false,
        })
}

// ---------- Forwarding through references ----------

macro_rules! forward_read_traits {
    ($($ref:tt)*) => {
        impl<G: GraphType + ?Sized> GraphType for $($ref)* G {
            type Dir = G::Dir;
            type Weighting = G::Weighting;
        }

        impl<G: GraphNodeOrder + ?Sized> GraphNodeOrder for $($ref)* G {
            fn number_of_nodes(&self) -> NumNodes {
                (**self).number_of_nodes()
            }
        }

        impl<G: GraphEdgeOrder + ?Sized> GraphEdgeOrder for $($ref)* G {
            fn number_of_edges(&self) -> NumEdges {
                (**self).number_of_edges()
            }
        }

        impl<G: AdjacencyList + ?Sized> AdjacencyList for $($ref)* G {
            type Stored = G::Stored;

            fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Self::Stored>> {
                (**self).neighbors_of(u)
            }
        }

        impl<G: DirectedAdjacencyList + ?Sized> DirectedAdjacencyList for $($ref)* G {
            fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Self::Stored>> {
                (**self).in_neighbors_of(u)
            }
        }

        impl<G: EdgeWeights + ?Sized> EdgeWeights for $($ref)* G {
            fn edge_weight(&self, u: Node, v: Node) -> Result<Weight> {
                (**self).edge_weight(u, v)
            }
        }
    };
}

forward_read_traits!(&);
forward_read_traits!(&mut);

impl<G: GraphVertexEditing + ?Sized> GraphVertexEditing for &mut G {
    fn add_vertex(&mut self) -> Result<Node> {
        (**self).add_vertex()
    }

    fn add_vertices(&mut self, n: NumNodes) -> Result<()> {
        (**self).add_vertices(n)
    }

    fn remove_vertex(&mut self, u: Node) -> Result<()> {
        (**self).remove_vertex(u)
    }
}

impl<G: GraphEdgeEditing + ?Sized> GraphEdgeEditing for &mut G {
    fn put_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        (**self).put_edge(u, v)
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        (**self).remove_edge(u, v)
    }
}

impl<G: WeightedEdgeEditing + ?Sized> WeightedEdgeEditing for &mut G {
    fn put_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>> {
        (**self).put_edge(u, v, weight)
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>> {
        (**self).remove_edge(u, v)
    }
}
