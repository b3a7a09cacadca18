/*!
# Directed Graph Representations

[`DirectedGraph`] stores **both outgoing and incoming neighborhoods** of every node,
enabling `O(1)` access to in-neighbors as well as out-neighbors.

Every mutation updates both sides within the same call. The payload stored for an edge
`(u, v)` in the outgoing map of `u` is always identical to the one stored in the incoming
map of `v`; any divergence is a bug and triggers a panic.

## Provided Representations

- [`Digraph`]: unweighted directed graph.
- [`WeightedDigraph`]: directed graph with finite edge weights.
*/

use std::fmt;

use itertools::Itertools;
use log::{debug, trace};

use crate::testing::test_graph_ops;

use super::{impl_structural_eq, *};

/// A directed graph storing **outgoing and incoming neighborhoods**.
///
/// # Type parameters
/// - `W`: payload stored per edge, `()` or [`Weight`].
#[derive(Clone, Debug)]
pub struct DirectedGraph<W>
where
    W: EdgeWeight,
{
    out_nbs: Vec<NeighborMap<W>>,
    in_nbs: Vec<NeighborMap<W>>,
    num_edges: NumEdges,
}

/// Unweighted directed graph
pub type Digraph = DirectedGraph<()>;

/// Directed graph with finite edge weights
pub type WeightedDigraph = DirectedGraph<Weight>;

impl<W: EdgeWeight> DirectedGraph<W> {
    /// Copies any graph into a new directed graph in linear time.
    ///
    /// Every edge `(u, v)` reported by `graph.neighbors_of(u)` becomes a directed edge.
    /// Undirected sources thus yield both `(u, v)` and `(v, u)`.
    pub fn from_graph<G: AdjacencyList>(graph: &G) -> Self {
        let mut result = Self::new(graph.number_of_nodes());
        for (Edge(u, v), w) in graph.edge_entries(false) {
            result.insert_edge_unchecked(u, v, W::from_weight(w.value()));
        }

        debug!(
            "copied graph with {} nodes into {}Digraph with {} edges",
            result.number_of_nodes(),
            W::TYPE_PREFIX,
            result.num_edges
        );
        result
    }

    /// Returns *true* if the outgoing and incoming neighborhoods describe exactly the same
    /// edges with bit-identical weights and the edge counter matches.
    pub fn is_consistent(&self) -> bool {
        let n = self.out_nbs.len();
        let bits = |w: W| w.value().to_bits();

        n == self.in_nbs.len()
            && self.out_nbs.iter().enumerate().all(|(u, nbs)| {
                nbs.as_set().entries().all(|(v, w)| {
                    (v as usize) < n
                        && self.in_nbs[v as usize]
                            .weight_of(u as Node)
                            .is_some_and(|x| bits(x) == bits(w))
                })
            })
            && self.in_nbs.iter().enumerate().all(|(v, nbs)| {
                nbs.as_set().iter().all(|u| {
                    (u as usize) < n && self.out_nbs[u as usize].has_neighbor(v as Node)
                })
            })
            && self
                .out_nbs
                .iter()
                .map(|nbs| nbs.num_of_neighbors() as NumEdges)
                .sum::<NumEdges>()
                == self.num_edges
    }

    /// Inserts `(u, v)` into both neighborhoods. Nodes must be valid.
    pub(crate) fn insert_edge_unchecked(&mut self, u: Node, v: Node, weight: W) -> Option<W> {
        let prev = self.out_nbs[u as usize].insert_neighbor(v, weight);
        let prev_in = self.in_nbs[v as usize].insert_neighbor(u, weight);
        assert!(prev == prev_in, "neighborhoods of ({u},{v}) diverged");

        if prev.is_none() {
            self.num_edges += 1;
        }
        prev
    }

    fn insert_edge(&mut self, u: Node, v: Node, weight: W) -> Result<Option<W>> {
        self.check_node(u)?;
        self.check_node(v)?;

        trace!("put edge ({u},{v}) with {weight:?}");
        Ok(self.insert_edge_unchecked(u, v, weight))
    }

    fn delete_edge(&mut self, u: Node, v: Node) -> Result<Option<W>> {
        self.check_node(u)?;
        self.check_node(v)?;

        let prev = self.out_nbs[u as usize].try_remove_neighbor(v);
        let prev_in = self.in_nbs[v as usize].try_remove_neighbor(u);
        assert!(prev == prev_in, "neighborhoods of ({u},{v}) diverged");

        if prev.is_some() {
            trace!("removed edge ({u},{v})");
            self.num_edges -= 1;
        }
        Ok(prev)
    }
}

impl<W: EdgeWeight> Default for DirectedGraph<W> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<W: EdgeWeight> GraphType for DirectedGraph<W> {
    type Dir = Directed;
    type Weighting = W::Weighting;
}

impl<W: EdgeWeight> GraphNew for DirectedGraph<W> {
    fn new(n: NumNodes) -> Self {
        Self {
            out_nbs: vec![NeighborMap::default(); n as usize],
            in_nbs: vec![NeighborMap::default(); n as usize],
            num_edges: 0,
        }
    }
}

impl<W: EdgeWeight> GraphNodeOrder for DirectedGraph<W> {
    fn number_of_nodes(&self) -> NumNodes {
        self.out_nbs.len() as NumNodes
    }
}

impl<W: EdgeWeight> GraphEdgeOrder for DirectedGraph<W> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<W: EdgeWeight> AdjacencyList for DirectedGraph<W> {
    type Stored = W;

    fn neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, W>> {
        self.check_node(u)?;
        Ok(self.out_nbs[u as usize].as_set())
    }
}

impl<W: EdgeWeight> DirectedAdjacencyList for DirectedGraph<W> {
    fn in_neighbors_of(&self, u: Node) -> Result<NeighborSet<'_, W>> {
        self.check_node(u)?;
        Ok(self.in_nbs[u as usize].as_set())
    }
}

impl EdgeWeights for WeightedDigraph {}

impl<W: EdgeWeight> GraphVertexEditing for DirectedGraph<W> {
    fn add_vertex(&mut self) -> Result<Node> {
        let u = self.number_of_nodes();
        grown_order(u, 1)?;

        self.out_nbs.push(NeighborMap::default());
        self.in_nbs.push(NeighborMap::default());
        Ok(u)
    }

    fn add_vertices(&mut self, n: NumNodes) -> Result<()> {
        let total = grown_order(self.number_of_nodes(), n)? as usize;

        self.out_nbs.resize_with(total, NeighborMap::default);
        self.in_nbs.resize_with(total, NeighborMap::default);
        Ok(())
    }

    fn remove_vertex(&mut self, u: Node) -> Result<()> {
        self.check_node(u)?;

        let out_nbs = std::mem::take(&mut self.out_nbs[u as usize]);
        let in_nbs = std::mem::take(&mut self.in_nbs[u as usize]);

        for v in out_nbs.as_set().iter().filter(|&v| v != u) {
            assert!(self.in_nbs[v as usize].try_remove_neighbor(u).is_some());
        }
        for v in in_nbs.as_set().iter().filter(|&v| v != u) {
            assert!(self.out_nbs[v as usize].try_remove_neighbor(u).is_some());
        }

        // A self-loop appears in both neighborhoods but is a single edge
        let removed = out_nbs.num_of_neighbors() + in_nbs.num_of_neighbors()
            - out_nbs.has_neighbor(u) as NumNodes;
        self.num_edges -= removed;

        self.out_nbs.remove(u as usize);
        self.in_nbs.remove(u as usize);
        for nbs in self.out_nbs.iter_mut().chain(self.in_nbs.iter_mut()) {
            nbs.renumber_after_removal(u);
        }

        debug!("removed node {u} with {removed} incident edges");
        debug_assert!(self.is_consistent());
        Ok(())
    }
}

impl GraphEdgeEditing for Digraph {
    fn put_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(self.insert_edge(u, v, ())?.is_none())
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<bool> {
        Ok(self.delete_edge(u, v)?.is_some())
    }
}

impl WeightedEdgeEditing for WeightedDigraph {
    fn put_edge(&mut self, u: Node, v: Node, weight: Weight) -> Result<Option<Weight>> {
        let weight = check_weight(weight)?;
        self.insert_edge(u, v, weight)
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Option<Weight>> {
        self.delete_edge(u, v)
    }
}

impl_structural_eq!(DirectedGraph => out_nbs);

impl<W: EdgeWeight> fmt::Display for DirectedGraph<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}Digraph({}) {{", W::TYPE_PREFIX, self.number_of_nodes())?;
        for (Edge(u, v), w) in self.edge_entries(false).sorted_unstable_by_key(|(e, _)| *e) {
            write!(f, "    {u} -> {v}")?;
            w.write_label(f)?;
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_digraph,
    Digraph,
    (
        graph_new,
        adjacency_list,
        directed_adjacency_list,
        edge_editing,
        vertex_removal,
        copies
    )
);

test_graph_ops!(
    test_weighted_digraph,
    WeightedDigraph,
    (
        graph_new,
        adjacency_list,
        directed_adjacency_list,
        edge_editing,
        vertex_removal,
        copies
    )
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_scenario_with_removal() {
        let mut graph = WeightedDigraph::default();
        graph.add_vertices(3).unwrap();
        assert_eq!(graph.put_edge(0, 1, 2.5), Ok(None));
        assert_eq!(graph.put_edge(1, 2, -1.0), Ok(None));

        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.edge_weight(0, 1), Ok(2.5));
        assert_eq!(graph.out_neighbors_of(0).unwrap().sorted(), vec![1]);
        assert_eq!(graph.in_neighbors_of(2).unwrap().sorted(), vec![1]);

        graph.remove_vertex(1).unwrap();
        assert_eq!(graph.number_of_nodes(), 2);
        assert!(graph.out_neighbors_of(0).unwrap().is_empty());
        assert!(graph.in_neighbors_of(1).unwrap().is_empty());
        assert_eq!(graph.has_edge(0, 1), Ok(false));
        assert_eq!(graph.number_of_edges(), 0);
        assert!(graph.is_consistent());
    }

    #[test]
    fn put_overwrites_and_reports_previous_weight() {
        let mut graph = WeightedDigraph::new(2);
        assert_eq!(graph.put_edge(0, 1, 1.0), Ok(None));
        assert_eq!(graph.put_edge(0, 1, 4.0), Ok(Some(1.0)));
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.in_neighbors_of(1).unwrap().weight_of(0), Some(4.0));

        assert_eq!(graph.remove_edge(0, 1), Ok(Some(4.0)));
        assert_eq!(graph.remove_edge(0, 1), Ok(None));
        assert_eq!(graph.number_of_edges(), 0);
    }

    #[test]
    fn errors_leave_graph_untouched() {
        let mut graph = WeightedDigraph::from_weighted_edges(3, [(0, 1, 1.5)]).unwrap();
        let before = graph.clone();

        assert_eq!(
            graph.put_edge(0, 3, 1.0).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            graph.put_edge(0, 2, Weight::NAN).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            graph.put_edge(0, 2, Weight::NEG_INFINITY).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            graph.remove_edge(5, 0).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            graph.remove_vertex(3).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            graph.edge_weight(1, 0).unwrap_err(),
            GraphError::EdgeNotFound {
                source_node: 1,
                target_node: 0
            }
        );
        assert_eq!(
            graph.edge_weight(0, 9).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert!(graph.in_neighbors_of(3).is_err());
        assert!(
            graph
                .put_edges([(0, 2, 1.0), (1, 2, Weight::INFINITY)])
                .is_err()
        );

        assert_eq!(graph, before);
    }

    #[test]
    fn self_loops_count_once() {
        let mut graph = Digraph::new(3);
        assert_eq!(graph.put_edge(1, 1), Ok(true));
        assert_eq!(graph.put_edge(1, 1), Ok(false));
        assert_eq!(graph.put_edge(1, 2), Ok(true));
        assert_eq!(graph.put_edge(0, 1), Ok(true));
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.total_degree_of(1), Ok(4));

        graph.remove_vertex(1).unwrap();
        assert_eq!(graph.number_of_edges(), 0);
        assert_eq!(graph.number_of_nodes(), 2);
        assert!(graph.is_consistent());
    }

    #[test]
    fn renumbering_keeps_edges_between_survivors() {
        let mut graph = Digraph::from_edges(5, [(0, 4), (4, 3), (3, 1), (2, 0), (2, 2)]).unwrap();
        graph.remove_vertex(2).unwrap();

        assert_eq!(
            graph.ordered_edges(false),
            vec![Edge(0, 3), Edge(2, 1), Edge(3, 2)]
        );
        assert_eq!(graph.in_neighbors_of(2).unwrap().sorted(), vec![3]);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    fn vertices_are_appended() {
        let mut graph = Digraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.add_vertex(), Ok(0));
        assert_eq!(graph.add_vertex(), Ok(1));
        graph.add_vertices(0).unwrap();
        graph.add_vertices(3).unwrap();
        assert_eq!(graph.number_of_nodes(), 5);
        assert_eq!(
            graph.add_vertices(INVALID_NODE).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(graph.number_of_nodes(), 5);
    }

    #[test]
    fn display_lists_every_edge_once() {
        let graph = WeightedDigraph::from_weighted_edges(3, [(1, 0, 0.5), (0, 2, 2.0)]).unwrap();
        assert_eq!(
            graph.to_string(),
            "WeightedDigraph(3) {\n    0 -> 2 [2.00]\n    1 -> 0 [0.50]\n}"
        );
        assert_eq!(Digraph::new(1).to_string(), "Digraph(1) {\n}");
    }
}
