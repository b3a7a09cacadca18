/*!
# Graph Hash Digests

[`GraphDigest`] computes a **hash-based digest** of a graph that is independent of the
underlying representation and of the insertion order of edges.

The digest encodes
- whether the graph is directed,
- the number of nodes, and
- the sorted list of edges together with the bits of their reported weight,

before feeding them into a cryptographic hash function. Undirected graphs list every edge
once in normalized form, so an undirected graph and its directed copy never share a digest.
Unweighted edges report `1.0`, so an unweighted graph and its
[`AsWeighted`](crate::views::AsWeighted) view share a digest.

## Example
```
use adjgraphs::{prelude::*, repr::digest::GraphDigest};

let mut graph = Graph::new(10);
graph.put_edge(4, 3).unwrap();
graph.put_edge(1, 2).unwrap();

let copy = Digraph::from_graph(&graph);
assert_eq!(graph.digest_sha256().len(), 64);
assert_ne!(graph.digest_sha256(), copy.digest_sha256());
```
*/

use std::fmt::LowerHex;

use super::*;
use ::digest::{Digest, Output};

/// Trait for computing a **canonical hash digest** of a graph.
///
/// Two graphs of the same direction with the same nodes and the same edges (with
/// bit-identical reported weights) yield the same digest, independent of how they are stored.
pub trait GraphDigest {
    /// Computes a digest of the graph using the hash function `D` and returns it as a
    /// hexadecimal string.
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest;

    /// Computes a **SHA-256 digest** of the graph (64 hex characters).
    ///
    /// # Example
    /// ```
    /// use adjgraphs::{prelude::*, repr::digest::GraphDigest};
    ///
    /// let a = WeightedDigraph::from_weighted_edges(3, [(0, 1, 0.5), (2, 0, 1.0)]).unwrap();
    /// let b = WeightedDigraph::from_weighted_edges(3, [(2, 0, 1.0), (0, 1, 0.5)]).unwrap();
    /// assert_eq!(a.digest_sha256(), b.digest_sha256());
    /// ```
    fn digest_sha256(&self) -> String {
        self.digest::<sha2::Sha256>()
    }
}

impl<G> GraphDigest for G
where
    G: AdjacencyList + GraphType,
{
    fn digest<D>(&self) -> String
    where
        Output<D>: LowerHex,
        D: Digest,
    {
        let mut hasher = D::new();
        let directed = G::is_directed();

        hasher.update([directed as u8]);
        hasher.update(self.number_of_nodes().to_le_bytes());
        for WeightedEdge(u, v, w) in self.ordered_weighted_edges(!directed) {
            hasher.update(u.to_le_bytes());
            hasher.update(v.to_le_bytes());
            // `-0.0` and `0.0` are equal weights
            hasher.update((w + 0.0).to_bits().to_le_bytes());
        }

        format!("{:x}", hasher.finalize())
    }
}
