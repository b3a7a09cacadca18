use std::fmt::{self, Debug, Display};

use fxhash::FxHashMap;

use crate::{
    error::{GraphError, Result},
    node::Node,
    repr::RawNeighbors,
};

/// An edge is defined by two nodes/endpoints.
/// Is is up to the graph whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Weights are finite real numbers
pub type Weight = f64;

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }

    /// Attaches a weight to the edge
    pub fn with_weight(self, weight: Weight) -> WeightedEdge {
        WeightedEdge(self.0, self.1, weight)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

/// An edge with a weight attached to it
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

impl WeightedEdge {
    /// Drops the weight
    pub fn edge(&self) -> Edge {
        Edge(self.0, self.1)
    }

    pub fn weight(&self) -> Weight {
        self.2
    }
}

impl Display for WeightedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})[{:.2}]", self.0, self.1, self.2)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}

/// Returns `weight` if it is finite and an error otherwise
pub fn check_weight(weight: Weight) -> Result<Weight> {
    if weight.is_finite() {
        Ok(weight)
    } else {
        Err(GraphError::NonFiniteWeight { weight })
    }
}

/// Payload stored per edge in the adjacency maps.
///
/// Unweighted graphs store `()` and report every edge with weight `1.0`,
/// weighted graphs store the (finite) [`Weight`] itself.
pub trait EdgeWeight: Copy + PartialEq + Debug + 'static {
    /// Prefix of the type name in the textual representation (`""` or `"Weighted"`)
    const TYPE_PREFIX: &'static str;

    /// Weighting marker of graphs storing this payload
    type Weighting: crate::ops::Weighting;

    /// The weight reported for an edge carrying this payload
    fn value(self) -> Weight;

    /// Converts a (finite) weight into the payload, dropping it if unweighted
    fn from_weight(weight: Weight) -> Self;

    /// Bits contributing to the structural hash. Equal payloads yield equal bits.
    fn hash_bits(self) -> u64;

    /// Writes the weight suffix of an edge line (nothing for unweighted edges)
    fn write_label(self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    #[doc(hidden)]
    fn raw_neighbors(map: &FxHashMap<Node, Self>) -> RawNeighbors<'_>;
}

impl EdgeWeight for () {
    const TYPE_PREFIX: &'static str = "";
    type Weighting = crate::ops::Unweighted;

    fn value(self) -> Weight {
        1.0
    }

    fn from_weight(_: Weight) -> Self {}

    fn hash_bits(self) -> u64 {
        0
    }

    fn write_label(self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }

    fn raw_neighbors(map: &FxHashMap<Node, Self>) -> RawNeighbors<'_> {
        RawNeighbors::Plain(map)
    }
}

impl EdgeWeight for Weight {
    const TYPE_PREFIX: &'static str = "Weighted";
    type Weighting = crate::ops::Weighted;

    fn value(self) -> Weight {
        self
    }

    fn from_weight(weight: Weight) -> Self {
        weight
    }

    fn hash_bits(self) -> u64 {
        // `0.0 == -0.0` must hash equally
        if self == 0.0 { 0 } else { self.to_bits() }
    }

    fn write_label(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " [{self:.2}]")
    }

    fn raw_neighbors(map: &FxHashMap<Node, Self>) -> RawNeighbors<'_> {
        RawNeighbors::Weighted(map)
    }
}
