/*!
# Graph Representations

All graphs store one [`NeighborMap`] per node, mapping each neighbor to the payload of the
connecting edge (`()` for unweighted graphs, [`Weight`] for weighted graphs).

- [`UndirectedGraph`] keeps a single symmetric map per node: [`Graph`], [`WeightedGraph`].
- [`DirectedGraph`] keeps an outgoing and an incoming map per node that are updated in
  lockstep: [`Digraph`], [`WeightedDigraph`].

Every representation can be copied from every other one (and from any view) in linear time
via `from_graph` or `From<&_>`. Copying drops what does not fit the target: weights are
dropped by unweighted targets, unweighted sources yield weight `1.0`, undirected sources
yield both directions in directed targets.

Equality and hashing are structural: two graphs of the same type are equal iff they have the
same number of nodes and equal neighborhoods (including weights).
*/

use crate::{edge::*, error::*, node::*, ops::*};

mod directed;
mod neighborhood;
mod undirected;

pub mod digest;

pub use directed::*;
pub use neighborhood::*;
pub use undirected::*;

macro_rules! impl_structural_eq {
    ($struct:ident => $nbs:ident) => {
        impl<W: EdgeWeight> PartialEq for $struct<W> {
            fn eq(&self, other: &Self) -> bool {
                self.$nbs == other.$nbs
            }
        }

        // Weights are always finite, thus `==` is reflexive
        impl<W: EdgeWeight> Eq for $struct<W> {}

        impl<W: EdgeWeight> std::hash::Hash for $struct<W> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u32(self.number_of_nodes());
                state.write_u64(
                    self.$nbs
                        .iter()
                        .fold(0u64, |acc, nbs| acc.wrapping_add(nbs.hash_sum())),
                );
            }
        }
    };
}

pub(crate) use impl_structural_eq;

macro_rules! impl_graph_conversions {
    ($($target:ty => [$($source:ty),*]);* $(;)?) => {
        $($(
            impl From<&$source> for $target {
                fn from(graph: &$source) -> Self {
                    Self::from_graph(graph)
                }
            }
        )*)*
    };
}

impl_graph_conversions!(
    Graph => [Digraph, WeightedGraph, WeightedDigraph];
    Digraph => [Graph, WeightedGraph, WeightedDigraph];
    WeightedGraph => [Graph, Digraph, WeightedDigraph];
    WeightedDigraph => [Graph, Digraph, WeightedGraph];
);

/// Flat, validated exchange representation used for (de)serialization:
/// the number of nodes and all edges with their reported weight.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphRepr {
    pub nodes: NumNodes,
    pub edges: Vec<WeightedEdge>,
}

#[cfg(feature = "serde")]
macro_rules! impl_serde_repr {
    ($struct:ident, $only_normalized:literal) => {
        impl<W: EdgeWeight> From<&$struct<W>> for GraphRepr {
            fn from(graph: &$struct<W>) -> Self {
                Self {
                    nodes: graph.number_of_nodes(),
                    edges: graph.ordered_weighted_edges($only_normalized),
                }
            }
        }

        impl<W: EdgeWeight> TryFrom<GraphRepr> for $struct<W> {
            type Error = GraphError;

            fn try_from(repr: GraphRepr) -> Result<Self> {
                let mut graph = Self::new(repr.nodes);
                for &WeightedEdge(u, v, w) in &repr.edges {
                    graph.check_node(u)?;
                    graph.check_node(v)?;
                    check_weight(w)?;
                }
                for WeightedEdge(u, v, w) in repr.edges {
                    graph.insert_edge_unchecked(u, v, W::from_weight(w));
                }
                Ok(graph)
            }
        }

        impl<W: EdgeWeight> serde::Serialize for $struct<W> {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&GraphRepr::from(self), serializer)
            }
        }

        impl<'de, W: EdgeWeight> serde::Deserialize<'de> for $struct<W> {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let repr = <GraphRepr as serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(repr).map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(feature = "serde")]
impl_serde_repr!(DirectedGraph, false);

#[cfg(feature = "serde")]
impl_serde_repr!(UndirectedGraph, true);

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let graph = WeightedDigraph::from_weighted_edges(4, [(0, 1, 2.5), (3, 3, -1.0)]).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let back: WeightedDigraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);

        let graph = Graph::from_edges(3, [(2, 0), (1, 1)]).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn invalid_input_is_rejected() {
        let json = r#"{"nodes":2,"edges":[[0,5,1.0]]}"#;
        assert!(serde_json::from_str::<Digraph>(json).is_err());
    }
}
