use std::{cmp::Ordering, collections::hash_map::Keys, fmt, iter::Copied, marker::PhantomData};

use fxhash::{FxHashMap, FxHashSet};
use itertools::{Either, Itertools};

use super::*;

/// The neighborhood of a single node: a map from neighbor to the payload of the connecting edge.
///
/// Lookup, insertion and removal of a single neighbor are `O(1)`.
#[derive(Clone, PartialEq)]
pub struct NeighborMap<W>(FxHashMap<Node, W>);

impl<W> Default for NeighborMap<W> {
    fn default() -> Self {
        Self(FxHashMap::default())
    }
}

impl<W: EdgeWeight> fmt::Debug for NeighborMap<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.as_set().sorted_entries()).finish()
    }
}

impl<W: EdgeWeight> NeighborMap<W> {
    /// Returns the number of neighbors in the Neighborhood
    pub fn num_of_neighbors(&self) -> NumNodes {
        self.0.len() as NumNodes
    }

    /// Returns *true* if `v` is in the Neighborhood
    pub fn has_neighbor(&self, v: Node) -> bool {
        self.0.contains_key(&v)
    }

    /// Returns the payload of the edge to `v` if present
    pub fn weight_of(&self, v: Node) -> Option<W> {
        self.0.get(&v).copied()
    }

    /// Adds or overwrites the neighbor `v`.
    /// Returns the previous payload if `v` was in the Neighborhood before.
    pub fn insert_neighbor(&mut self, v: Node, weight: W) -> Option<W> {
        self.0.insert(v, weight)
    }

    /// Tries to remove a neighbor from the Neighborhood.
    /// Returns the payload if the node was in the Neighborhood before.
    pub fn try_remove_neighbor(&mut self, v: Node) -> Option<W> {
        self.0.remove(&v)
    }

    /// Closes the gap left by removing node `removed` from the graph: drops `removed` and
    /// renames every neighbor `v > removed` to `v - 1`. Smaller neighbors are unchanged.
    pub fn renumber_after_removal(&mut self, removed: Node) {
        if !self.0.keys().any(|&v| v >= removed) {
            return;
        }

        self.0 = self
            .0
            .drain()
            .filter_map(|(v, w)| match v.cmp(&removed) {
                Ordering::Less => Some((v, w)),
                Ordering::Equal => None,
                Ordering::Greater => Some((v - 1, w)),
            })
            .collect();
    }

    /// Removes all neighbors in the Neighborhood
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns a read-only set view of the Neighborhood
    pub fn as_set(&self) -> NeighborSet<'_, W> {
        NeighborSet::new(W::raw_neighbors(&self.0))
    }

    /// Order-independent contribution of this Neighborhood to the structural hash
    pub(crate) fn hash_sum(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, (&v, w)| acc.wrapping_add(v as u64 ^ w.hash_bits()))
    }
}

/// Borrowed storage behind a [`NeighborSet`]
#[doc(hidden)]
#[derive(Clone, Copy)]
pub enum RawNeighbors<'a> {
    Plain(&'a FxHashMap<Node, ()>),
    Weighted(&'a FxHashMap<Node, Weight>),
}

/// A borrowed, read-only view of the neighbors of a node.
///
/// As the view borrows the graph, the graph cannot be modified while the view is alive.
/// The payload `W` is the one reported to the caller: a set over an unweighted
/// neighborhood reinterpreted as `NeighborSet<'_, Weight>` reports `1.0` for every neighbor.
pub struct NeighborSet<'a, W> {
    raw: RawNeighbors<'a>,
    _payload: PhantomData<W>,
}

impl<W> Clone for NeighborSet<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for NeighborSet<'_, W> {}

impl<W: EdgeWeight> fmt::Debug for NeighborSet<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.sorted()).finish()
    }
}

/// Iterator over the neighbors of a [`NeighborSet`] in arbitrary order
pub type NeighborIter<'a> = Either<Copied<Keys<'a, Node, ()>>, Copied<Keys<'a, Node, Weight>>>;

impl<'a, W: EdgeWeight> NeighborSet<'a, W> {
    pub(crate) fn new(raw: RawNeighbors<'a>) -> Self {
        Self {
            raw,
            _payload: PhantomData,
        }
    }

    /// Returns the same set reporting payloads of type `V`
    pub fn reinterpret<V: EdgeWeight>(self) -> NeighborSet<'a, V> {
        NeighborSet::new(self.raw)
    }

    /// Returns the number of neighbors
    pub fn len(&self) -> usize {
        match self.raw {
            RawNeighbors::Plain(map) => map.len(),
            RawNeighbors::Weighted(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns *true* if `v` is a neighbor
    pub fn contains(&self, v: Node) -> bool {
        match self.raw {
            RawNeighbors::Plain(map) => map.contains_key(&v),
            RawNeighbors::Weighted(map) => map.contains_key(&v),
        }
    }

    /// Returns the payload of the edge to `v` if present
    pub fn weight_of(&self, v: Node) -> Option<W> {
        match self.raw {
            RawNeighbors::Plain(map) => map.get(&v).map(|&w| W::from_weight(w.value())),
            RawNeighbors::Weighted(map) => map.get(&v).map(|&w| W::from_weight(w)),
        }
    }

    /// Returns an iterator over all neighbors in arbitrary order
    pub fn iter(self) -> NeighborIter<'a> {
        match self.raw {
            RawNeighbors::Plain(map) => Either::Left(map.keys().copied()),
            RawNeighbors::Weighted(map) => Either::Right(map.keys().copied()),
        }
    }

    /// Returns an iterator over all neighbors and edge payloads in arbitrary order
    pub fn entries(self) -> impl Iterator<Item = (Node, W)> + 'a {
        match self.raw {
            RawNeighbors::Plain(map) => {
                Either::Left(map.keys().map(|&v| (v, W::from_weight(().value()))))
            }
            RawNeighbors::Weighted(map) => {
                Either::Right(map.iter().map(|(&v, &w)| (v, W::from_weight(w))))
            }
        }
    }

    /// Returns all neighbors in ascending order
    pub fn sorted(&self) -> Vec<Node> {
        self.iter().sorted_unstable().collect_vec()
    }

    /// Returns all neighbors and edge payloads in ascending order of neighbors
    pub fn sorted_entries(&self) -> Vec<(Node, W)> {
        self.entries().sorted_unstable_by_key(|(v, _)| *v).collect_vec()
    }

    /// Copies the neighbors into an owned set
    pub fn to_set(&self) -> FxHashSet<Node> {
        self.iter().collect()
    }
}

impl<'a, W: EdgeWeight> IntoIterator for NeighborSet<'a, W> {
    type Item = Node;
    type IntoIter = NeighborIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal if they contain the same neighbors, independent of the payloads
impl<W: EdgeWeight, V: EdgeWeight> PartialEq<NeighborSet<'_, V>> for NeighborSet<'_, W> {
    fn eq(&self, other: &NeighborSet<'_, V>) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<W: EdgeWeight> Eq for NeighborSet<'_, W> {}
