use std::fmt;

use itertools::Itertools;
use log::{debug, trace};

use crate::testing::test_graph_ops;

use super::{impl_structural_eq, *};

/// An undirected graph storing one symmetric neighborhood per node.
///
/// An edge `{u, v}` with `u != v` is stored in the neighborhoods of both `u` and `v`
/// with the same payload; a self-loop `{u, u}` is stored once in the neighborhood of `u`.
#[derive(Clone, Debug)]
pub struct UndirectedGraph<W>
where
    W: EdgeWeight,
{
    nbs: Vec<NeighborMap<W>>,
    num_edges: NumEdges,
}

/// Unweighted undirected graph
pub type Graph = UndirectedGraph<()>;

/// Undirected graph with finite edge weights
pub type WeightedGraph = UndirectedGraph<Weight>;

impl<W: EdgeWeight> UndirectedGraph<W> {
    /// Copies any graph into a new undirected graph in linear time.
    ///
    /// Every edge `(u, v)` of `graph` becomes the undirected edge `{u, v}`. If a directed
    /// source has both `(u, v)` and `(v, u)` with different weights, the one reported
    /// first wins.
    pub fn from_graph<G: AdjacencyList>(graph: &G) -> Self {
        let mut result = Self::new(graph.number_of_nodes());
        for (Edge(u, v), w) in graph.edge_entries(false) {
            if !result.nbs[u as usize].has_neighbor(v) {
                result.insert_edge_unchecked(u, v, W::from_weight(w.value()));
            }
        }

        debug!(
            "copied graph with {} nodes into {}Graph with {} edges",
            result.number_of_nodes(),
            W::TYPE_PREFIX,
            result.num_edges
        );
        result
    }

    /// Returns *true* if every neighborhood relation is mirrored with a bit-identical
    /// payload and the edge counter matches.
    pub fn is_consistent(&self) -> bool {
        let n = self.nbs.len();
        let bits = |w: W| w.value().to_bits();

        self.nbs.iter().enumerate().all(|(u, nbs)| {
            nbs.as_set().entries().all(|(v, w)| {
                (v as usize) < n
                    && self.nbs[v as usize]
                        .weight_of(u as Node)
                        .is_some_and(|x| bits(x) == bits(w))
            })
        }) && self
            .edge_entries(true)
            .count()
            == self.num_edges as usize
    }

    /// Inserts `{u, v}` into both neighborhoods. Nodes must be valid.
    pub(crate) fn insert_edge_unchecked(&mut self, u: Node, v: Node, weight: W) -> Option<W> {
        let prev = self.nbs[u as usize].insert_neighbor(v, weight);
        if u != v {
            let prev_sym = self.nbs[v as usize].insert_neighbor(u, weight);
            assert!(prev == prev_sym, "neighborhoods of {{{u},{v}}} diverged");
        }

        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    fn insert_edge(&mut self, u: Node, v: Node, weight: W) -> Result<Option<W>> {
        self.check_node(u)?;
        self.check_node(v)?;

        trace!("put edge {{{u},{v}}} with {weight:?}");
        Ok(self.insert_edge_unchecked(u, v, weight))
    }

    fn delete_edge(&mut self, u: Node, v: Node) -> Result<Option<W>> {
        self.check_node(u)?;
        self.check_node(v)?;

        let prev = self.nbs[u as usize].try_remove_neighbor(v);
        if u != v {
            let prev_sym = self.nbs[v as usize].try_remove_neighbor(u);
            assert!(prev == prev_sym, "neighborhoods of {{{u},{v}}} diverged");
        }

        if prev.is_some() {
            trace!("removed edge {{{u},{v}}}");
            self.num_edges -= 1;
        }
        Ok(prev)
    }
}

impl<W: EdgeWeight> Default for UndirectedGraph<W> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<W: EdgeWeight> GraphType for UndirectedGraph<W> {
    type Dir = Undirected;
    type Weighting = W::Weighting;
}

impl<W: EdgeWeight> GraphNew for UndirectedGraph<W> {
    fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![NeighborMap::default(); n as usize],
            num_edges: 0,
        }
    }
}

impl<W: EdgeWeight> GraphNodeOrder for UndirectedGraph<W> {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl<W: EdgeWeight> GraphEdgeOrder for UndirectedGraph<W> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<W: EdgeWeight> AdjacencyList for UndirectedGraph<W> {
    type Stored = W;

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, W>> {
        self.check_node(u)?;
        Ok(self.nbs[u as usize].as_set())
    }
}

impl EdgeWeights for WeightedGraph {}

impl<W: EdgeWeight> GraphVertexEditing for UndirectedGraph<W> {
    fn add_vertex(&mut self) -> Result<Node> {
        let u = self.number_of_nodes();
        grown_order(u, 1)?;

        self.nbs.push(NeighborMap::default());
        Ok(u)
    }

    fn add_vertices(&mut self, n: NumNodes) -> Result<()> {
        let total = grown_order(self.number_of_nodes(), n)? as usize;
        self.nbs.resize_with(total, NeighborMap::default);
        Ok(())
    }

    fn remove_vertex(&mut self, u: Node) -> Result<()> {
        self.check_node(u)?;

        let nbs = self.nbs.remove(u as usize);
        for v in nbs.as_set().iter().filter(|&v| v != u) {
            // Indices above `u` already shifted by one
            let idx = if v > u { v - 1 } else { v };
            assert!(self.nbs[idx as usize].try_remove_neighbor(u).is_some());
        }

        // A self-loop is stored once and thus counted once
        let removed = nbs.num_of_neighbors();
        self.num_edges -= removed;

        for nbs in self.nbs.iter_mut() {
            nbs.renumber_after_removal(u);
        }

        debug!("removed node {u} with {removed} incident edges");
        debug_assert!(self.is_consistent());
        Ok(())
    }
}

impl GraphEdgeEditing for Graph {
    fn put_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(self.insert_edge(u, v, ())?.is_none())
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(self.delete_edge(u, v)?.is_some())
    }
}

impl WeightedEdgeEditing for WeightedGraph {
    fn put_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>> {
        let weight = check_weight(weight)?;
        self.insert_edge(u, v, weight)
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>> {
        self.delete_edge(u, v)
    }
}

impl_structural_eq!(UndirectedGraph => nbs);

impl<W: EdgeWeight> fmt::Display for UndirectedGraph<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}Graph({}) {{", W::TYPE_PREFIX, self.number_of_nodes())?;
        for (Edge(u, v), w) in self.edge_entries(true).sorted_unstable_by_key(|(e, _)| *e) {
            write!(f, "    {u} -- {v}")?;
            w.write_label(f)?;
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_graph,
    Graph,
    (graph_new, adjacency_list, edge_editing, vertex_removal, copies)
);

test_graph_ops!(
    test_weighted_graph,
    WeightedGraph,
    (graph_new, adjacency_list, edge_editing, vertex_removal, copies)
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_symmetric() {
        let mut graph = Graph::new(3);
        assert_eq!(graph.put_edge(0, 2), Ok(true));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.neighbors_of(0).unwrap().sorted(), vec![2]);
        assert_eq!(graph.neighbors_of(2).unwrap().sorted(), vec![0]);
        assert_eq!(graph.has_edge(2, 0), Ok(true));

        assert_eq!(graph.put_edge(2, 0), Ok(false));
        assert_eq!(graph.put_edge(0, 2), Ok(false));
        assert_eq!(graph.number_of_edges(), 1);

        assert_eq!(graph.remove_edge(2, 0), Ok(true));
        assert_eq!(graph.remove_edge(0, 2), Ok(false));
        assert!(graph.is_singleton_graph());
        assert!(graph.is_consistent());
    }

    #[test]
    fn weights_are_shared_by_both_directions() {
        let mut graph = WeightedGraph::new(4);
        assert_eq!(graph.put_edge(1, 3, 0.5), Ok(None));
        assert_eq!(graph.put_edge(3, 1, -2.0), Ok(Some(0.5)));
        assert_eq!(graph.edge_weight(1, 3), Ok(-2.0));
        assert_eq!(graph.edge_weight(3, 1), Ok(-2.0));
        assert_eq!(
            graph.edge_weight(0, 1).unwrap_err().kind(),
            ErrorKind::EdgeNotFound
        );

        assert_eq!(graph.remove_edge(3, 1), Ok(Some(-2.0)));
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn self_loops_are_stored_once() {
        let mut graph = Graph::new(2);
        assert_eq!(graph.put_edge(1, 1), Ok(true));
        assert_eq!(graph.put_edge(0, 1), Ok(true));
        assert_eq!(graph.degree_of(1), Ok(2));
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.has_self_loop(1), Ok(true));
        assert_eq!(graph.has_self_loop(0), Ok(false));

        graph.remove_vertex(1).unwrap();
        assert_eq!(graph.number_of_nodes(), 1);
        assert_eq!(graph.number_of_edges(), 0);
        assert!(graph.is_consistent());
    }

    #[test]
    fn renumbering_keeps_edges_between_survivors() {
        let mut graph =
            WeightedGraph::from_weighted_edges(5, [(0, 4, 1.0), (4, 3, 2.0), (3, 1, 3.0), (2, 0, 4.0)])
                .unwrap();
        graph.remove_vertex(2).unwrap();

        assert_eq!(
            graph.ordered_weighted_edges(true),
            vec![
                WeightedEdge(0, 3, 1.0),
                WeightedEdge(1, 2, 3.0),
                WeightedEdge(2, 3, 2.0)
            ]
        );
        assert_eq!(graph.number_of_edges(), 3);
        assert!(graph.is_consistent());
    }

    #[test]
    fn errors_leave_graph_untouched() {
        let mut graph = Graph::from_edges(3, [(0, 1)]).unwrap();
        let before = graph.clone();

        assert_eq!(graph.put_edge(3, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(graph.remove_edge(0, 3).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(graph.degree_of(3).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(graph.has_edge(0, 7).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert!(graph.put_edges([(1, 2), (2, 3)]).is_err());
        assert!(graph.remove_vertex(3).is_err());

        assert_eq!(graph, before);
    }

    #[test]
    fn equality_and_hash_are_structural() {
        use std::hash::{BuildHasher, RandomState};

        let a = WeightedGraph::from_weighted_edges(3, [(0, 1, 0.0), (1, 2, 2.0)]).unwrap();
        let b = WeightedGraph::from_weighted_edges(3, [(2, 1, 2.0), (1, 0, -0.0)]).unwrap();
        let c = WeightedGraph::from_weighted_edges(3, [(0, 1, 0.0), (1, 2, 2.5)]).unwrap();
        let d = WeightedGraph::from_weighted_edges(4, [(0, 1, 0.0), (1, 2, 2.0)]).unwrap();

        let state = RandomState::new();
        assert_eq!(a, b);
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn display_lists_every_edge_once() {
        let graph = Graph::from_edges(3, [(2, 0), (1, 1)]).unwrap();
        assert_eq!(graph.to_string(), "Graph(3) {\n    0 -- 2\n    1 -- 1\n}");

        let graph = WeightedGraph::from_weighted_edges(2, [(1, 0, 1.0 / 3.0)]).unwrap();
        assert_eq!(graph.to_string(), "WeightedGraph(2) {\n    0 -- 1 [0.33]\n}");
    }
}
