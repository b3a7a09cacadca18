use std::fmt;

use log::debug;

use super::{impl_delegated_order, *};

const UNMODIFIABLE: &str = "graph is unmodifiable";

/// Read-only decorator around a graph.
///
/// Reads delegate to the wrapped graph; every mutation fails with
/// [`GraphError::Unsupported`] before its arguments are looked at.
///
/// `Unmodifiable<&G>` (see `as_unmodifiable`) reflects the current state of `G`,
/// `Unmodifiable<G>` (see `to_immutable`) owns a private copy that never changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unmodifiable<G> {
    graph: G,
}

/// Frozen deep copy of a [`Graph`]
pub type ImmutableGraph = Unmodifiable<Graph>;

/// Frozen deep copy of a [`Digraph`]
pub type ImmutableDigraph = Unmodifiable<Digraph>;

/// Frozen deep copy of a [`WeightedGraph`]
pub type ImmutableWeightedGraph = Unmodifiable<WeightedGraph>;

/// Frozen deep copy of a [`WeightedDigraph`]
pub type ImmutableWeightedDigraph = Unmodifiable<WeightedDigraph>;

impl<G> Unmodifiable<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// Returns a shared reference to the wrapped graph
    pub fn get_ref(&self) -> &G {
        &self.graph
    }
}

impl<G: fmt::Display> fmt::Display for Unmodifiable<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.graph, f)
    }
}

impl<G: GraphType> GraphType for Unmodifiable<G> {
    type Dir = G::Dir;
    type Weighting = G::Weighting;
}

impl_delegated_order!(Unmodifiable);

impl<G: GraphEdgeOrder> GraphEdgeOrder for Unmodifiable<G> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl<G: AdjacencyList> AdjacencyList for Unmodifiable<G> {
    type Stored = G::Stored;

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, G::Stored>> {
        self.graph.neighbors_of(u)
    }
}

impl<G: DirectedAdjacencyList> DirectedAdjacencyList for Unmodifiable<G> {
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, G::Stored>> {
        self.graph.in_neighbors_of(u)
    }
}

impl<G: EdgeWeights> EdgeWeights for Unmodifiable<G> {
    fn edge_weight(&self, u: Node, v: Node) -> Result<Weight> {
        self.graph.edge_weight(u, v)
    }
}

impl<G: GraphNodeOrder> GraphVertexEditing for Unmodifiable<G> {
    fn add_vertex(&mut self) -> Result<Node> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn add_vertices(&mut self, _: NumNodes) -> Result<()> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn remove_vertex(&mut self, _: Node) -> Result<()> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }
}

impl<G: GraphType<Weighting = Unweighted> + GraphNodeOrder> GraphEdgeEditing for Unmodifiable<G> {
    fn put_edge(&mut self, _: Node, _: Node) -> Result<bool> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn remove_edge(&mut self, _: Node, _: Node) -> Result<bool> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn put_edges<I, E>(&mut self, _: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }
}

impl<G: GraphType<Weighting = Weighted> + GraphNodeOrder> WeightedEdgeEditing
    for Unmodifiable<G>
{
    fn put_edge(&mut self, _: Node, _: Node, _: Weight) -> Result<Option<Weight>> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn remove_edge(&mut self, _: Node, _: Node) -> Result<Option<Weight>> {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }

    fn put_edges<I, E>(&mut self, _: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        Err(GraphError::Unsupported(UNMODIFIABLE))
    }
}

macro_rules! impl_unmodifiable_ctors {
    ($($graph:ident),*) => {
        $(
            impl<W: EdgeWeight> $graph<W> {
                /// Returns a read-only view reflecting the current state of this graph
                pub fn as_unmodifiable(&self) -> Unmodifiable<&Self> {
                    Unmodifiable::new(self)
                }

                /// Returns a read-only deep copy that is independent of this graph
                pub fn to_immutable(&self) -> Unmodifiable<Self> {
                    debug!(
                        "frozen copy of {}{} with {} nodes",
                        W::TYPE_PREFIX,
                        stringify!($graph),
                        self.number_of_nodes()
                    );
                    Unmodifiable::new(self.clone())
                }
            }
        )*
    };
}

impl_unmodifiable_ctors!(UndirectedGraph, DirectedGraph);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unsupported<T: fmt::Debug>(res: Result<T>) {
        assert_eq!(res.unwrap_err().kind(), ErrorKind::UnsupportedOperation);
    }

    #[test]
    fn mutations_are_rejected_before_validation() {
        let graph = WeightedDigraph::from_weighted_edges(3, [(0, 1, 2.5), (1, 2, -1.0)]).unwrap();
        let mut view = graph.as_unmodifiable();

        assert_unsupported(view.put_edge(0, 2, 1.0));
        assert_unsupported(view.put_edge(7, 9, Weight::NAN));
        assert_unsupported(view.remove_edge(0, 1));
        assert_unsupported(view.put_edges([(0, 2, 1.0)]));
        assert_unsupported(view.add_vertex());
        assert_unsupported(view.add_vertices(3));
        assert_unsupported(view.remove_vertex(42));

        let mut view = Graph::new(2).to_immutable();
        assert_unsupported(view.put_edge(0, 1));
        assert_unsupported(view.remove_edge(5, 5));
        assert_unsupported(view.put_edges([(0, 1)]));
        assert!(view.is_singleton_graph());
    }

    #[test]
    fn reads_match_the_backing_graph() {
        let graph = WeightedDigraph::from_weighted_edges(3, [(0, 1, 2.5), (2, 1, -1.0)]).unwrap();
        let view = graph.as_unmodifiable();

        assert_eq!(view.number_of_nodes(), graph.number_of_nodes());
        assert_eq!(view.number_of_edges(), graph.number_of_edges());
        for u in graph.vertices() {
            assert_eq!(view.out_neighbors_of(u), graph.out_neighbors_of(u));
            assert_eq!(view.in_neighbors_of(u), graph.in_neighbors_of(u));
            for v in graph.vertices() {
                assert_eq!(view.edge_weight(u, v), graph.edge_weight(u, v));
            }
        }
        assert_eq!(view.degree_of(3), graph.degree_of(3));
        assert_eq!(view.to_string(), graph.to_string());
        assert!(structurally_eq(&view, &graph));
    }

    #[test]
    fn decorator_is_live_and_copy_is_frozen() {
        let mut graph = Graph::new(3);
        graph.put_edge(0, 1).unwrap();
        let frozen = graph.to_immutable();

        graph.put_edge(1, 2).unwrap();
        assert_eq!(graph.as_unmodifiable().number_of_edges(), 2);
        assert_eq!(graph.as_unmodifiable().degree_of(1), Ok(2));
        assert_eq!(frozen.number_of_edges(), 1);
        assert_eq!(frozen.degree_of(1), Ok(1));

        graph.remove_vertex(0).unwrap();
        assert_eq!(graph.as_unmodifiable().number_of_nodes(), 2);
        assert_eq!(frozen.number_of_nodes(), 3);
        assert_eq!(frozen.get_ref().ordered_edges(true), vec![Edge(0, 1)]);
    }

    #[test]
    fn immutable_copies_compare_structurally() {
        let a = WeightedGraph::from_weighted_edges(2, [(0, 1, 0.5)]).unwrap();
        let b = WeightedGraph::from_weighted_edges(2, [(1, 0, 0.5)]).unwrap();
        let frozen: ImmutableWeightedGraph = a.to_immutable();
        assert_eq!(frozen, b.to_immutable());
        assert_eq!(a.as_unmodifiable(), b.as_unmodifiable());
        assert_eq!(
            WeightedGraph::from_graph(&frozen),
            WeightedGraph::from_graph(&b)
        );
        assert_eq!(frozen.to_string(), "WeightedGraph(2) {\n    0 -- 1 [0.50]\n}");
    }
}
