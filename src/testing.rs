/*!
Randomized checks shared by all graph representations.

Every check builds random graphs with a seeded [`Pcg64Mcg`], mirrors each operation on a
simple ordered [`Model`] and compares the graph against the model after every step.
*/

#[cfg(test)]
use std::{collections::BTreeMap, fmt::Debug};

#[cfg(test)]
use itertools::Itertools;
#[cfg(test)]
use rand::{Rng, SeedableRng};
#[cfg(test)]
use rand_pcg::Pcg64Mcg;

#[cfg(test)]
use crate::{edge::*, error::*, node::*, ops::*, repr::*};

/// Generates a test module running the listed checks on a graph type.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($check:ident),* $(,)?)) => {
        #[cfg(test)]
        mod $env {
            use super::*;

            $(
                #[test]
                fn $check() {
                    crate::testing::$check::<$graph>();
                }
            )*
        }
    };
}

pub(crate) use test_graph_ops;

/// Uniform interface over weighted and unweighted representations.
/// Unweighted graphs ignore the weight passed to [`TestGraph::insert`].
#[cfg(test)]
pub(crate) trait TestGraph:
    GraphNew
    + GraphType
    + GraphVertexEditing
    + GraphEdgeOrder
    + AdjacencyList
    + Clone
    + Debug
    + Eq
    + std::hash::Hash
    + std::fmt::Display
{
    /// Returns *true* if the edge is new
    fn insert(&mut self, u: Node, v: Node, weight: Weight) -> Result<bool>;

    /// Returns *true* if the edge was present
    fn delete(&mut self, u: Node, v: Node) -> Result<bool>;

    fn copy_from<G: AdjacencyList>(graph: &G) -> Self;
}

#[cfg(test)]
macro_rules! impl_test_graph {
    ($graph:ident, unweighted) => {
        impl TestGraph for $graph {
            fn insert(&mut self, u: Node, v: Node, _: Weight) -> Result<bool> {
                self.put_edge(u, v)
            }

            fn delete(&mut self, u: Node, v: Node) -> Result<bool> {
                self.remove_edge(u, v)
            }

            fn copy_from<G: AdjacencyList>(graph: &G) -> Self {
                Self::from_graph(graph)
            }
        }
    };
    ($graph:ident, weighted) => {
        impl TestGraph for $graph {
            fn insert(&mut self, u: Node, v: Node, weight: Weight) -> Result<bool> {
                Ok(self.put_edge(u, v, weight)?.is_none())
            }

            fn delete(&mut self, u: Node, v: Node) -> Result<bool> {
                Ok(self.remove_edge(u, v)?.is_some())
            }

            fn copy_from<G: AdjacencyList>(graph: &G) -> Self {
                Self::from_graph(graph)
            }
        }
    };
}

#[cfg(test)]
impl_test_graph!(Graph, unweighted);
#[cfg(test)]
impl_test_graph!(Digraph, unweighted);
#[cfg(test)]
impl_test_graph!(WeightedGraph, weighted);
#[cfg(test)]
impl_test_graph!(WeightedDigraph, weighted);

/// Reference model: an ordered edge map. Undirected edges are kept normalized.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct Model {
    directed: bool,
    weighted: bool,
    n: NumNodes,
    edges: BTreeMap<Edge, Weight>,
}

#[cfg(test)]
impl Model {
    pub fn of<G: GraphType>(n: NumNodes) -> Self {
        Self {
            directed: G::is_directed(),
            weighted: G::is_weighted(),
            n,
            edges: BTreeMap::new(),
        }
    }

    fn key(&self, u: Node, v: Node) -> Edge {
        if self.directed {
            Edge(u, v)
        } else {
            Edge(u, v).normalized()
        }
    }

    pub fn insert(&mut self, u: Node, v: Node, weight: Weight) -> bool {
        let weight = if self.weighted { weight } else { 1.0 };
        self.edges.insert(self.key(u, v), weight).is_none()
    }

    pub fn delete(&mut self, u: Node, v: Node) -> bool {
        self.edges.remove(&self.key(u, v)).is_some()
    }

    pub fn remove_vertex(&mut self, u: Node) {
        let shift = |x: Node| if x > u { x - 1 } else { x };
        self.edges = std::mem::take(&mut self.edges)
            .into_iter()
            .filter(|(Edge(a, b), _)| *a != u && *b != u)
            .map(|(Edge(a, b), w)| (Edge(shift(a), shift(b)), w))
            .collect();
        self.n -= 1;
    }

    /// All edges as reported by `ordered_weighted_edges(!directed)`
    pub fn weighted_edges(&self) -> Vec<WeightedEdge> {
        self.edges
            .iter()
            .map(|(e, &w)| e.with_weight(w))
            .collect_vec()
    }

    pub fn out_neighbors(&self, u: Node) -> Vec<Node> {
        self.edges
            .keys()
            .filter_map(|&Edge(a, b)| {
                if a == u {
                    Some(b)
                } else if !self.directed && b == u {
                    Some(a)
                } else {
                    None
                }
            })
            .sorted_unstable()
            .dedup()
            .collect_vec()
    }

    pub fn in_neighbors(&self, u: Node) -> Vec<Node> {
        self.edges
            .keys()
            .filter(|Edge(_, b)| *b == u)
            .map(|&Edge(a, _)| a)
            .sorted_unstable()
            .collect_vec()
    }

    /// Asserts that `graph` describes exactly the modelled graph
    pub fn assert_matches<G: AdjacencyList + GraphEdgeOrder + GraphType>(&self, graph: &G) {
        assert_eq!(graph.number_of_nodes(), self.n);
        assert_eq!(graph.number_of_edges() as usize, self.edges.len());
        assert_eq!(graph.ordered_weighted_edges(!self.directed), self.weighted_edges());

        for u in 0..self.n {
            let nbs = self.out_neighbors(u);
            assert_eq!(graph.neighbors_of(u).unwrap().sorted(), nbs);
            assert_eq!(graph.degree_of(u).unwrap() as usize, nbs.len());
        }
        assert!(graph.neighbors_of(self.n).is_err());
    }
}

/// Returns a random graph with `n` nodes and at most `m` edges together with its model.
/// Weights are small multiples of `0.5`, possibly negative or zero.
#[cfg(test)]
pub(crate) fn random_graph<G: TestGraph, R: Rng>(rng: &mut R, n: NumNodes, m: usize) -> (G, Model) {
    let mut graph = G::new(n);
    let mut model = Model::of::<G>(n);
    for _ in 0..m {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        let w = rng.random_range(-4i32..=8) as Weight * 0.5;
        assert_eq!(graph.insert(u, v, w).unwrap(), model.insert(u, v, w));
    }
    (graph, model)
}

#[cfg(test)]
pub(crate) fn graph_new<G: TestGraph>() {
    for n in 0..50 {
        let graph = G::new(n);
        Model::of::<G>(n).assert_matches(&graph);
        assert!(graph.is_singleton_graph());
        assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
        assert_eq!(graph.is_empty(), n == 0);
    }
}

#[cfg(test)]
pub(crate) fn adjacency_list<G: TestGraph>() {
    let rng = &mut Pcg64Mcg::seed_from_u64(3);

    for n in [1 as NumNodes, 10, 20, 50] {
        for m in [n as usize, 2 * n as usize, 5 * n as usize] {
            let (graph, model) = random_graph::<G, _>(rng, n, m);
            model.assert_matches(&graph);

            for _ in 0..n {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                let present = model.out_neighbors(u).contains(&v);
                assert_eq!(graph.has_edge(u, v), Ok(present));
                assert_eq!(graph.has_self_loop(u), Ok(model.out_neighbors(u).contains(&u)));
            }

            assert!(graph.has_edge(0, n).is_err());
            assert!(graph.degree_of(n).is_err());
        }
    }
}

#[cfg(test)]
pub(crate) fn directed_adjacency_list<G: TestGraph + DirectedAdjacencyList>() {
    let rng = &mut Pcg64Mcg::seed_from_u64(5);

    for n in [10 as NumNodes, 20, 50] {
        for m in [2 * n as usize, 5 * n as usize] {
            let (graph, model) = random_graph::<G, _>(rng, n, m);

            for u in 0..n {
                let in_nbs = model.in_neighbors(u);
                let out_nbs = model.out_neighbors(u);
                assert_eq!(graph.in_neighbors_of(u).unwrap().sorted(), in_nbs);
                assert_eq!(graph.out_neighbors_of(u).unwrap().sorted(), out_nbs);
                assert_eq!(graph.in_degree_of(u).unwrap() as usize, in_nbs.len());
                assert_eq!(
                    graph.total_degree_of(u).unwrap() as usize,
                    in_nbs.len() + out_nbs.len()
                );
            }
            assert!(graph.in_neighbors_of(n).is_err());
        }
    }
}

#[cfg(test)]
pub(crate) fn edge_editing<G: TestGraph>() {
    let rng = &mut Pcg64Mcg::seed_from_u64(7);

    for n in [5 as NumNodes, 20, 40] {
        let (mut graph, mut model) = random_graph::<G, _>(rng, n, 3 * n as usize);

        for _ in 0..(10 * n) {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if rng.random_bool(0.5) {
                let w = rng.random_range(0i32..4) as Weight;
                assert_eq!(graph.insert(u, v, w), Ok(model.insert(u, v, w)));
            } else {
                assert_eq!(graph.delete(u, v), Ok(model.delete(u, v)));
            }
        }
        model.assert_matches(&graph);

        let before = graph.clone();
        assert_eq!(graph.insert(n, 0, 1.0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(graph.delete(0, n).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(graph, before);

        for u in graph.vertices() {
            for v in model.out_neighbors(u) {
                graph.delete(u, v).unwrap();
            }
        }
        assert!(graph.is_singleton_graph());
    }
}

#[cfg(test)]
pub(crate) fn vertex_removal<G: TestGraph>() {
    let rng = &mut Pcg64Mcg::seed_from_u64(11);

    for n in [1 as NumNodes, 8, 30] {
        let (mut graph, mut model) = random_graph::<G, _>(rng, n, 3 * n as usize);

        while !graph.is_empty() {
            let u = rng.random_range(0..graph.number_of_nodes());
            graph.remove_vertex(u).unwrap();
            model.remove_vertex(u);
            model.assert_matches(&graph);

            if rng.random_bool(0.2) {
                assert_eq!(graph.add_vertex(), Ok(model.n));
                model.n += 1;
            }
        }
        assert!(graph.remove_vertex(0).is_err());
    }
}

#[cfg(test)]
pub(crate) fn copies<G: TestGraph>() {
    let rng = &mut Pcg64Mcg::seed_from_u64(13);

    for n in [0 as NumNodes, 6, 25] {
        let (graph, model) = random_graph::<G, _>(rng, n, 4 * n as usize);

        let same = G::copy_from(&graph);
        model.assert_matches(&same);
        assert_eq!(same, graph);
        assert_eq!(same.to_string(), graph.to_string());
        assert!(structurally_eq(&same, &graph));

        fn idempotent<H: TestGraph, G: AdjacencyList>(graph: &G) {
            let once = H::copy_from(graph);
            assert_eq!(H::copy_from(&once), once);
            assert_eq!(once.number_of_nodes(), graph.number_of_nodes());
        }
        idempotent::<Graph, _>(&graph);
        idempotent::<Digraph, _>(&graph);
        idempotent::<WeightedGraph, _>(&graph);
        idempotent::<WeightedDigraph, _>(&graph);

        // Copies within the same direction keep every edge
        if G::is_directed() {
            assert_eq!(
                Digraph::copy_from(&graph).ordered_edges(false),
                graph.ordered_edges(false)
            );
            assert!(structurally_eq(
                &WeightedDigraph::copy_from(&graph),
                &graph
            ));
        } else {
            assert_eq!(
                Graph::copy_from(&graph).ordered_edges(true),
                graph.ordered_edges(true)
            );
            assert!(structurally_eq(&WeightedGraph::copy_from(&graph), &graph));
        }
    }
}
