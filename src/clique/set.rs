// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value types used by the clique search: candidate pools and cliques.

use std::fmt;
use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::graph::VertexWeightedGraph;

/// A set of vertex ids stored in descending order.
///
/// The smallest id sits at the tail of the buffer, so the next candidate of a
/// search frame is extracted in O(1) and filtering a pool keeps it sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexSet {
    vertices: Vec<usize>,
}

impl VertexSet {
    /// Build a set from arbitrary ids; duplicates are dropped.
    pub fn from_vertices<I: IntoIterator<Item = usize>>(vertices: I) -> Self {
        let mut vertices: Vec<usize> = vertices.into_iter().collect();
        vertices.sort_unstable_by(|a, b| b.cmp(a));
        vertices.dedup();
        VertexSet { vertices }
    }

    /// Wrap a buffer that is already strictly descending.
    pub(crate) fn from_descending(vertices: Vec<usize>) -> Self {
        debug_assert!(vertices.windows(2).all(|w| w[0] > w[1]));
        VertexSet { vertices }
    }

    #[inline]
    fn position(&self, v: usize) -> Result<usize, usize> {
        self.vertices.binary_search_by(|probe| v.cmp(probe))
    }

    /// Insert `v`, returning `false` if it was already present.
    pub fn insert(&mut self, v: usize) -> bool {
        match self.position(v) {
            Ok(_) => false,
            Err(pos) => {
                self.vertices.insert(pos, v);
                true
            }
        }
    }

    /// Remove and return the smallest id.
    #[inline]
    pub fn pop_min(&mut self) -> Option<usize> {
        self.vertices.pop()
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.position(v).is_ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Members from largest to smallest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.vertices.iter().copied()
    }

    /// Snapshot of the members in ascending order.
    pub fn to_vec(&self) -> Vec<usize> {
        self.vertices.iter().rev().copied().collect()
    }
}

/// A candidate complete subgraph.
///
/// Members are kept in insertion order; cliques produced by
/// [`CliqueEnumerator`](crate::CliqueEnumerator) are therefore ascending. The
/// total weight is accumulated as vertices are appended. Equality and hashing
/// only look at the member sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clique {
    vertices: SmallVec<[usize; 8]>,
    weight: f64,
}

impl Clique {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `v` with weight `weight`.
    #[inline]
    pub fn push(&mut self, v: usize, weight: f64) {
        self.vertices.push(v);
        self.weight += weight;
    }

    /// Copy of this clique with `v` appended. The receiver is left untouched.
    pub fn extended(&self, v: usize, weight: f64) -> Clique {
        let mut clique = self.clone();
        clique.push(v, weight);
        clique
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.vertices.last().copied()
    }

    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// Sum of the member weights, as accumulated while the clique was built.
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.weight
    }

    /// Recompute the total weight from the graph.
    pub fn compute_weight<G: VertexWeightedGraph>(&self, graph: &G) -> f64 {
        self.vertices.iter().map(|&v| graph.vertex_weight(v)).sum()
    }

    /// Whether the members are distinct vertices of `graph` and every pair of
    /// them is adjacent.
    pub fn is_valid<G: VertexWeightedGraph>(&self, graph: &G) -> bool {
        let n = graph.num_vertices();
        if self.vertices.iter().any(|&v| v >= n) {
            return false;
        }
        let mut adjacent = FixedBitSet::with_capacity(n);
        for (i, &u) in self.vertices.iter().enumerate() {
            adjacent.clear();
            adjacent.extend(graph.neighbors(u));
            if self.vertices[i + 1..]
                .iter()
                .any(|&w| w == u || !adjacent.contains(w))
            {
                return false;
            }
        }
        true
    }
}

impl PartialEq for Clique {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl Eq for Clique {}

impl Hash for Clique {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

impl fmt::Display for Clique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    #[test]
    fn vertex_set_keeps_descending_order() {
        let mut set = VertexSet::from_vertices([3, 1, 4, 1, 5]);
        assert_eq!(set.len(), 4);
        assert!(set.insert(2));
        assert!(!set.insert(4));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert_eq!(set.to_vec(), vec![1, 2, 3, 4, 5]);
        assert!(set.contains(3));
        assert!(!set.contains(0));
    }

    #[test]
    fn pop_min_drains_in_ascending_order() {
        let mut set = VertexSet::from_vertices(0..4);
        let mut drained = Vec::new();
        while let Some(v) = set.pop_min() {
            drained.push(v);
        }
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(set.is_empty());
    }

    #[test]
    fn extended_does_not_touch_the_parent() {
        let mut parent = Clique::new();
        parent.push(0, 2.0);
        let child = parent.extended(3, 1.5);
        assert_eq!(parent.vertices(), &[0]);
        assert_eq!(child.vertices(), &[0, 3]);
        assert_eq!(child.total_weight(), 3.5);
        assert_eq!(child.last(), Some(3));
        assert_eq!(child.to_string(), "[0, 3]");
    }

    #[test]
    fn validity_requires_every_pair_adjacent() {
        // 0-1-2 triangle plus a pendant 3 hanging off 2
        let g = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (0, 2), (2, 3)]);
        let mut triangle = Clique::new();
        for v in [0, 1, 2] {
            triangle.push(v, 1.0);
        }
        assert!(triangle.is_valid(&g));
        assert_eq!(triangle.compute_weight(&g), 3.0);

        let path = triangle.extended(3, 1.0);
        assert!(!path.is_valid(&g));

        let mut repeated = Clique::new();
        repeated.push(1, 1.0);
        repeated.push(1, 1.0);
        assert!(!repeated.is_valid(&g));

        let mut out_of_range = Clique::new();
        out_of_range.push(9, 1.0);
        assert!(!out_of_range.is_valid(&g));

        assert!(Clique::new().is_valid(&g));
    }

    #[test]
    fn equality_ignores_weight() {
        let mut a = Clique::new();
        a.push(1, 1.0);
        let mut b = Clique::new();
        b.push(1, 5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_members_and_weight() {
        let mut clique = Clique::new();
        clique.push(2, 0.5);
        clique.push(4, 1.0);
        let json = serde_json::to_string(&clique).unwrap();
        assert_eq!(json, r#"{"vertices":[2,4],"weight":1.5}"#);
    }
}
