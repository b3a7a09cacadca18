use itertools::Itertools;

use super::{impl_delegated_order, impl_forwarded_vertex_editing, *};

/// An undirected graph seen as a directed graph: every edge `{u, v}` is reported as both
/// `(u, v)` and `(v, u)`, a self-loop `{u, u}` as the single edge `(u, u)`.
///
/// Node insertion and removal are forwarded to the wrapped graph. Adding or removing a single
/// directed edge has no counterpart in the wrapped graph and fails.
#[derive(Clone, Debug)]
pub struct AsDirected<G> {
    graph: G,
}

/// A graph seen as a weighted graph with weight `1.0` on every edge.
///
/// Node mutations and edge removal are forwarded to the wrapped graph. Putting an edge is
/// forwarded only for weight `1.0`, any other weight (non-finite ones included) cannot be stored.
#[derive(Clone, Debug)]
pub struct AsWeighted<G> {
    graph: G,
}

/// A weighted graph seen as an unweighted graph. Every edge reports weight `1.0`.
///
/// Node mutations and edge removal are forwarded to the wrapped graph. Putting an edge would
/// require inventing a weight and fails.
#[derive(Clone, Debug)]
pub struct AsUnweighted<G> {
    graph: G,
}

const AMBIGUOUS_DIRECTED_EDGE: &str = "a single directed edge cannot be stored in an undirected graph";
const WEIGHT_NOT_STORABLE: &str = "only weight 1.0 can be stored in an unweighted graph";
const WEIGHT_UNKNOWN: &str = "an unweighted edge has no weight to store in a weighted graph";

macro_rules! impl_view_ctor {
    ($view:ident where $($bound:tt)*) => {
        impl<G: $($bound)*> $view<G> {
            pub fn new(graph: G) -> Self {
                Self { graph }
            }

            /// Returns a shared reference to the wrapped graph
            pub fn get_ref(&self) -> &G {
                &self.graph
            }

            /// Unwraps the view
            pub fn into_inner(self) -> G {
                self.graph
            }
        }
    };
}

impl_view_ctor!(AsDirected where GraphType<Dir = Undirected>);
impl_view_ctor!(AsWeighted where GraphType<Weighting = Unweighted>);
impl_view_ctor!(AsUnweighted where GraphType<Weighting = Weighted>);

// ---------- AsDirected ----------

impl<G: GraphType<Dir = Undirected>> GraphType for AsDirected<G> {
    type Dir = Directed;
    type Weighting = G::Weighting;
}

impl_delegated_order!(AsDirected);

impl<G: AdjacencyList> GraphEdgeOrder for AsDirected<G> {
    /// Every non-loop edge is counted in both directions.
    ///
    /// Runs in `O(n)` as self-loops are not counted separately by the wrapped graph.
    fn number_of_edges(&self) -> NumEdges {
        self.graph
            .vertices()
            .map(|u| self.graph.degree_of(u).unwrap_or(0) as NumEdges)
            .sum()
    }
}

impl<G: AdjacencyList> AdjacencyList for AsDirected<G> {
    type Stored = G::Stored;

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, G::Stored>> {
        self.graph.neighbors_of(u)
    }
}

impl<G: AdjacencyList> DirectedAdjacencyList for AsDirected<G> {
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, G::Stored>> {
        self.graph.neighbors_of(u)
    }
}

impl<G: EdgeWeights> EdgeWeights for AsDirected<G> {
    fn edge_weight(&self, u: Node, v: Node) -> Result<Weight> {
        self.graph.edge_weight(u, v)
    }
}

impl_forwarded_vertex_editing!(AsDirected);

impl<G: GraphEdgeEditing> GraphEdgeEditing for AsDirected<G> {
    fn put_edge(&mut self, _: Node, _: Node) -> Result<bool> {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }

    fn remove_edge(&mut self, _: Node, _: Node) -> Result<bool> {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }

    fn put_edges<I, E>(&mut self, _: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }
}

impl<G: WeightedEdgeEditing> WeightedEdgeEditing for AsDirected<G> {
    fn put_edge(&mut self, _: Node, _: Node, _: Weight) -> Result<Option<Weight>> {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }

    fn remove_edge(&mut self, _: Node, _: Node) -> Result<Option<Weight>> {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }

    fn put_edges<I, E>(&mut self, _: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        Err(GraphError::Unsupported(AMBIGUOUS_DIRECTED_EDGE))
    }
}

// ---------- AsWeighted ----------

impl<G: GraphType<Weighting = Unweighted>> GraphType for AsWeighted<G> {
    type Dir = G::Dir;
    type Weighting = Weighted;
}

impl_delegated_order!(AsWeighted);

impl<G: GraphEdgeOrder> GraphEdgeOrder for AsWeighted<G> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl<G: AdjacencyList> AdjacencyList for AsWeighted<G> {
    type Stored = Weight;

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Weight>> {
        Ok(self.graph.neighbors_of(u)?.reinterpret())
    }
}

impl<G: DirectedAdjacencyList> DirectedAdjacencyList for AsWeighted<G> {
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, Weight>> {
        Ok(self.graph.in_neighbors_of(u)?.reinterpret())
    }
}

impl<G: AdjacencyList> EdgeWeights for AsWeighted<G> {}

impl_forwarded_vertex_editing!(AsWeighted);

impl<G: GraphEdgeEditing> AsWeighted<G> {
    fn check_storable(weight: Weight) -> Result<()> {
        if weight == 1.0 {
            Ok(())
        } else {
            Err(GraphError::Unsupported(WEIGHT_NOT_STORABLE))
        }
    }
}

impl<G: GraphEdgeEditing> WeightedEdgeEditing for AsWeighted<G> {
    fn put_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>> {
        Self::check_storable(weight)?;
        Ok((!self.graph.put_edge(u, v)?).then_some(1.0))
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>> {
        Ok(self.graph.remove_edge(u, v)?.then_some(1.0))
    }

    fn put_edges<I, E>(&mut self, edges: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        let edges = edges.into_iter().map(Into::into).collect_vec();
        for &WeightedEdge(_, _, w) in &edges {
            Self::check_storable(w)?;
        }
        self.graph.put_edges(edges.iter().map(WeightedEdge::edge))
    }
}

// ---------- AsUnweighted ----------

impl<G: GraphType<Weighting = Weighted>> GraphType for AsUnweighted<G> {
    type Dir = G::Dir;
    type Weighting = Unweighted;
}

impl_delegated_order!(AsUnweighted);

impl<G: GraphEdgeOrder> GraphEdgeOrder for AsUnweighted<G> {
    fn number_of_edges(&self) -> NumEdges {
        self.graph.number_of_edges()
    }
}

impl<G: AdjacencyList> AdjacencyList for AsUnweighted<G> {
    type Stored = ();

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, ()>> {
        Ok(self.graph.neighbors_of(u)?.reinterpret())
    }
}

impl<G: DirectedAdjacencyList> DirectedAdjacencyList for AsUnweighted<G> {
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, ()>> {
        Ok(self.graph.in_neighbors_of(u)?.reinterpret())
    }
}

impl_forwarded_vertex_editing!(AsUnweighted);

impl<G: WeightedEdgeEditing> GraphEdgeEditing for AsUnweighted<G> {
    fn put_edge(&mut self, _: Node, _: Node) -> Result<bool> {
        Err(GraphError::Unsupported(WEIGHT_UNKNOWN))
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(self.graph.remove_edge(u, v)?.is_some())
    }

    fn put_edges<I, E>(&mut self, _: I) -> Result<NumEdges>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Err(GraphError::Unsupported(WEIGHT_UNKNOWN))
    }
}

// ---------- Constructors on the base representations ----------

impl<W: EdgeWeight> UndirectedGraph<W> {
    /// Returns a directed view of this graph
    pub fn as_directed(&self) -> AsDirected<&Self> {
        AsDirected::new(self)
    }

    /// Returns a directed view of this graph that forwards node mutations
    pub fn as_directed_mut(&mut self) -> AsDirected<&mut Self> {
        AsDirected::new(self)
    }
}

macro_rules! impl_weighting_ctors {
    ($($graph:ident => $as:ident, $as_mut:ident, $view:ident);* $(;)?) => {
        $(
            impl $graph {
                #[doc = concat!("Returns an [`", stringify!($view), "`] view of this graph")]
                pub fn $as(&self) -> $view<&Self> {
                    $view::new(self)
                }

                #[doc = concat!(
                    "Returns an [`", stringify!($view), "`] view of this graph that forwards mutations"
                )]
                pub fn $as_mut(&mut self) -> $view<&mut Self> {
                    $view::new(self)
                }
            }
        )*
    };
}

impl_weighting_ctors!(
    Graph => as_weighted, as_weighted_mut, AsWeighted;
    Digraph => as_weighted, as_weighted_mut, AsWeighted;
    WeightedGraph => as_unweighted, as_unweighted_mut, AsUnweighted;
    WeightedDigraph => as_unweighted, as_unweighted_mut, AsUnweighted;
);

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unsupported<T: std::fmt::Debug>(res: Result<T>) {
        assert_eq!(res.unwrap_err().kind(), ErrorKind::UnsupportedOperation);
    }

    #[test]
    fn as_directed_reports_both_directions() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (3, 3)]).unwrap();
        let view = graph.as_directed();

        assert!(<AsDirected<&Graph> as GraphType>::is_directed());
        assert_eq!(view.number_of_edges(), 5);
        for u in graph.vertices() {
            assert_eq!(view.out_neighbors_of(u), view.in_neighbors_of(u));
            assert_eq!(view.out_neighbors_of(u), graph.neighbors_of(u));
        }
        assert!(view.in_neighbors_of(4).is_err());

        let copy = Digraph::from_graph(&view);
        assert_eq!(copy, Digraph::from_graph(&graph));
        assert_eq!(copy.number_of_edges(), view.number_of_edges());
        assert!(structurally_eq(&copy, &view));
    }

    #[test]
    fn as_directed_forwards_vertex_editing_only() {
        let mut graph = WeightedGraph::from_weighted_edges(3, [(0, 2, 0.5), (1, 2, 1.5)]).unwrap();
        let mut view = graph.as_directed_mut();

        assert_unsupported(view.put_edge(0, 1, 1.0));
        assert_unsupported(view.remove_edge(0, 2));
        assert_unsupported(view.put_edges([(0, 1, 1.0)]));
        assert_eq!(view.edge_weight(2, 1), Ok(1.5));

        view.remove_vertex(0).unwrap();
        assert_eq!(view.add_vertex(), Ok(2));
        assert_eq!(view.in_neighbors_of(1).unwrap().sorted(), vec![0]);

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.ordered_weighted_edges(true), vec![WeightedEdge(0, 1, 1.5)]);
    }

    #[test]
    fn as_weighted_reports_unit_weights() {
        let graph = Graph::from_edges(3, [(0, 1), (2, 2)]).unwrap();
        let view = graph.as_weighted();

        assert!(<AsWeighted<&Graph> as GraphType>::is_weighted());
        assert_eq!(view.edge_weight(0, 1), Ok(1.0));
        assert_eq!(view.edge_weight(1, 0), Ok(1.0));
        assert_eq!(view.edge_weight(2, 2), Ok(1.0));
        assert_eq!(
            view.edge_weight(0, 2).unwrap_err(),
            GraphError::EdgeNotFound {
                source_node: 0,
                target_node: 2
            }
        );
        assert_eq!(view.edge_weight(0, 3).unwrap_err().kind(), ErrorKind::OutOfRange);

        let copy = WeightedGraph::from_graph(&view);
        assert_eq!(
            copy.ordered_weighted_edges(true),
            vec![WeightedEdge(0, 1, 1.0), WeightedEdge(2, 2, 1.0)]
        );
    }

    #[test]
    fn as_weighted_stores_unit_weights_only() {
        let mut graph = Digraph::new(3);
        let mut view = graph.as_weighted_mut();

        assert_eq!(view.put_edge(0, 1, 1.0), Ok(None));
        assert_eq!(view.put_edge(0, 1, 1.0), Ok(Some(1.0)));
        assert_unsupported(view.put_edge(1, 2, 0.5));
        assert_unsupported(view.put_edge(1, 2, Weight::NAN));
        assert_unsupported(view.put_edge(1, 2, Weight::NEG_INFINITY));
        assert_unsupported(view.put_edges([(1, 2, 1.0), (2, 0, 3.0)]));
        assert_eq!(view.put_edges([(1, 2, 1.0), (2, 0, 1.0)]), Ok(2));
        assert_eq!(view.remove_edge(2, 0), Ok(Some(1.0)));
        assert_eq!(view.remove_edge(2, 0), Ok(None));
        assert_eq!(view.add_vertex(), Ok(3));
        assert_eq!(view.into_inner().number_of_nodes(), 4);

        assert_eq!(graph.ordered_edges(false), vec![Edge(0, 1), Edge(1, 2)]);
        assert_eq!(graph.number_of_nodes(), 4);
    }

    #[test]
    fn as_unweighted_hides_weights() {
        let mut graph =
            WeightedDigraph::from_weighted_edges(3, [(0, 1, 2.5), (1, 2, -1.0)]).unwrap();
        {
            let view = graph.as_unweighted();
            assert!(!<AsUnweighted<&WeightedDigraph> as GraphType>::is_weighted());
            assert_eq!(view.in_neighbors_of(2).unwrap().sorted(), vec![1]);
            assert_eq!(
                view.ordered_weighted_edges(false),
                vec![WeightedEdge(0, 1, 1.0), WeightedEdge(1, 2, 1.0)]
            );
            assert_eq!(
                WeightedDigraph::from_graph(&view).edge_weight(0, 1),
                Ok(1.0)
            );
            assert_eq!(
                Digraph::from_graph(&view),
                Digraph::from_edges(3, [(0, 1), (1, 2)]).unwrap()
            );
        }

        let mut view = graph.as_unweighted_mut();
        assert_unsupported(view.put_edge(2, 0));
        assert_unsupported(view.put_edges([(2, 0)]));
        assert_eq!(view.remove_edge(0, 1), Ok(true));
        assert_eq!(view.remove_edge(0, 1), Ok(false));
        view.remove_vertex(0).unwrap();

        assert_eq!(graph.ordered_weighted_edges(false), vec![WeightedEdge(0, 1, -1.0)]);
    }

    #[test]
    fn views_over_read_only_graphs_fail_fast() {
        let graph = Graph::from_edges(2, [(0, 1)]).unwrap();

        let mut directed = AsDirected::new(graph.as_unmodifiable());
        assert_unsupported(directed.remove_vertex(0));
        assert_unsupported(directed.add_vertices(1));
        assert_unsupported(directed.put_edge(1, 0));

        let mut weighted = AsWeighted::new(graph.to_immutable());
        assert_unsupported(weighted.put_edge(0, 1, 1.0));
        assert_unsupported(weighted.put_edge(0, 1, Weight::NAN));
        assert_unsupported(weighted.put_edge(5, 0, Weight::INFINITY));
        assert_unsupported(weighted.put_edges([(0, 1, Weight::NAN)]));
        assert_unsupported(weighted.remove_edge(0, 1));
        assert_unsupported(weighted.add_vertex());
        assert_eq!(weighted.edge_weight(0, 1), Ok(1.0));

        let mut nested = AsDirected::new(weighted);
        assert_unsupported(nested.remove_vertex(1));
        assert_eq!(nested.in_neighbors_of(1).unwrap().weight_of(0), Some(1.0));
        assert_eq!(nested.into_inner().into_inner(), graph.to_immutable());

        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.number_of_nodes(), 2);
    }

    #[test]
    fn neighbor_sets_are_live() {
        let mut graph = Graph::new(3);
        graph.put_edge(0, 1).unwrap();
        assert_eq!(graph.as_directed().in_neighbors_of(1).unwrap().sorted(), vec![0]);

        graph.put_edge(2, 1).unwrap();
        assert_eq!(
            graph.as_directed().in_neighbors_of(1).unwrap().sorted(),
            vec![0, 2]
        );
        assert_eq!(graph.as_weighted().degree_of(1), Ok(2));
    }
}
