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

//! The read-only graph capability set shared by the clique enumerator and
//! the fingerprinting code.
//!
//! Both algorithms only need dense vertex ids `0..n`, a weight per vertex and
//! neighbor enumeration. Storage is left to the caller; an adapter for
//! undirected [`petgraph::graph::Graph`] values is provided so that any
//! petgraph graph whose node payload implements [`NodeWeight`] can be used
//! directly.

use std::ops::Range;

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::Undirected;

/// Weight reported for every vertex of a graph without configured weights.
pub const DEFAULT_VERTEX_WEIGHT: f64 = 1.0;

/// Read-only view over an undirected graph with (optionally) weighted vertices.
///
/// Vertex ids are dense: `0..num_vertices()`.
pub trait VertexWeightedGraph {
    /// Number of vertices.
    fn num_vertices(&self) -> usize;

    /// All vertex ids in ascending order.
    fn vertices(&self) -> Range<usize> {
        0..self.num_vertices()
    }

    /// Whether the graph carries real vertex weights. When this is `false`
    /// [`vertex_weight`](Self::vertex_weight) returns [`DEFAULT_VERTEX_WEIGHT`].
    fn has_vertex_weights(&self) -> bool;

    /// Weight of vertex `v`.
    fn vertex_weight(&self, v: usize) -> f64;

    /// Lazily enumerate the vertices adjacent to `v`.
    fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_;

    /// Whether `u` and `v` share an edge.
    fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).any(|w| w == v)
    }
}

impl<G: VertexWeightedGraph + ?Sized> VertexWeightedGraph for &G {
    #[inline]
    fn num_vertices(&self) -> usize {
        (**self).num_vertices()
    }

    #[inline]
    fn has_vertex_weights(&self) -> bool {
        (**self).has_vertex_weights()
    }

    #[inline]
    fn vertex_weight(&self, v: usize) -> f64 {
        (**self).vertex_weight(v)
    }

    #[inline]
    fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        (**self).neighbors(v)
    }

    #[inline]
    fn is_adjacent(&self, u: usize, v: usize) -> bool {
        (**self).is_adjacent(u, v)
    }
}

/// Conversion from a node payload to a vertex weight.
///
/// `()` marks a graph without vertex weights.
pub trait NodeWeight {
    /// `false` when the payload carries no weight information.
    const WEIGHTED: bool = true;

    fn weight(&self) -> f64;
}

impl NodeWeight for () {
    const WEIGHTED: bool = false;

    #[inline]
    fn weight(&self) -> f64 {
        DEFAULT_VERTEX_WEIGHT
    }
}

macro_rules! numeric_node_weight {
    ($($t:ty),*) => {
        $(
            impl NodeWeight for $t {
                #[inline]
                fn weight(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_node_weight!(f64, f32, u32, u64, i32, i64, usize);

impl<N, E, Ix> VertexWeightedGraph for Graph<N, E, Undirected, Ix>
where
    N: NodeWeight,
    Ix: IndexType,
{
    #[inline]
    fn num_vertices(&self) -> usize {
        self.node_count()
    }

    #[inline]
    fn has_vertex_weights(&self) -> bool {
        N::WEIGHTED
    }

    #[inline]
    fn vertex_weight(&self, v: usize) -> f64 {
        self.node_weight(NodeIndex::new(v))
            .map_or(DEFAULT_VERTEX_WEIGHT, NodeWeight::weight)
    }

    fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        Graph::neighbors(self, NodeIndex::new(v)).map(|n| n.index())
    }

    fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.find_edge(NodeIndex::new(u), NodeIndex::new(v)).is_some()
    }
}
