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

//! Bounded clique enumeration by depth-first backtracking.
//!
//! The search keeps its own stack of frames instead of recursing so that it
//! can stop after every reported clique and resume on the next pull. Each
//! frame holds a clique, the vertices that may still extend it and, through
//! the clique, the weight accumulated so far.
//!
//! Candidate pools only ever contain vertices larger than the last vertex of
//! the frame's clique that are adjacent to every clique member and fit in the
//! remaining weight budget. Every vertex subset is therefore reached through
//! exactly one path and cliques are reported in ascending lexicographic
//! preorder: `[0]`, `[0, 1]`, `[0, 1, 2]`, ..., `[1]`, `[1, 2]`, ...

use std::iter::FusedIterator;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::clique::config::{CliqueSearchConfig, ResolvedBounds};
use crate::clique::set::{Clique, VertexSet};
use crate::error::{CliqueError, Result};
use crate::graph::VertexWeightedGraph;

/// Where the search currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// More cliques may follow.
    Running,
    /// Every clique within the bounds has been visited.
    Exhausted,
    /// The time budget ran out; the sequence is truncated.
    TimedOut,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Stack operations performed (expansions and backtracks).
    pub steps: u64,
    /// Frames pushed onto the stack.
    pub frames_pushed: u64,
    /// Cliques handed out to the caller.
    pub cliques_emitted: u64,
    /// Deepest stack observed, root frame included.
    pub max_depth: usize,
}

struct Frame {
    clique: Clique,
    candidates: VertexSet,
}

#[inline]
fn next_mark_token(mark_token: &mut u64, marks: &mut [u64]) -> u64 {
    let token = *mark_token;
    *mark_token = mark_token.wrapping_add(1);
    if *mark_token == 0 {
        marks.fill(0);
        *mark_token = 1;
    }
    token
}

/// Child pool for `clique + v`: the remaining parent candidates above `v`
/// that are adjacent to `v` and keep the total weight within `max_weight`.
///
/// The parent pool already holds only common neighbors of the parent clique,
/// so intersecting with the neighbors of `v` keeps the pool complete-able.
fn extend_candidates<G: VertexWeightedGraph>(
    graph: &G,
    marks: &mut [u64],
    mark_token: &mut u64,
    v: usize,
    parent: &VertexSet,
    weight: f64,
    max_weight: f64,
) -> VertexSet {
    let token = next_mark_token(mark_token, marks);
    for u in graph.neighbors(v) {
        if u > v && u < marks.len() {
            marks[u] = token;
        }
    }
    let pool: Vec<usize> = parent
        .iter()
        .filter(|&u| u > v && marks[u] == token && weight + graph.vertex_weight(u) <= max_weight)
        .collect();
    VertexSet::from_descending(pool)
}

/// Lazily enumerates the cliques of a graph whose size lies in
/// `[min_size, max_size]` and whose total vertex weight is at most
/// `max_weight`.
///
/// Results are pulled with [`has_next`](Self::has_next) followed by
/// [`next_clique`](Self::next_clique), or through the [`Iterator`]
/// implementation. A timeout truncates the sequence; [`status`](Self::status)
/// tells a truncated run apart from an exhausted one.
///
/// ```
/// use cliquehash::{CliqueEnumerator, CliqueSearchConfig};
/// use petgraph::graph::UnGraph;
///
/// let g = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let cliques: Vec<Vec<usize>> = CliqueEnumerator::new(&g, CliqueSearchConfig::new().min_size(2))
///     .unwrap()
///     .map(|c| c.vertices().to_vec())
///     .collect();
/// assert_eq!(cliques, vec![vec![0, 1], vec![0, 1, 2], vec![0, 2], vec![1, 2], vec![2, 3]]);
/// ```
pub struct CliqueEnumerator<G> {
    graph: G,
    bounds: ResolvedBounds,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    started: bool,
    stack: Vec<Frame>,
    ready: Option<Clique>,
    status: SearchStatus,
    stats: SearchStats,
    marks: Vec<u64>,
    mark_token: u64,
}

impl<G: VertexWeightedGraph> CliqueEnumerator<G> {
    /// Build an enumerator over `graph`.
    ///
    /// Fails if a finite weight bound is requested on a graph without vertex
    /// weights, if `max_size` exceeds the number of vertices or if the weight
    /// bound is NaN. `min_size > max_size` is accepted and yields nothing.
    pub fn new(graph: G, config: CliqueSearchConfig) -> Result<Self> {
        let bounds = config.resolve(&graph)?;
        Ok(Self::from_bounds(graph, bounds, config.timeout))
    }

    /// Cliques with `min_size..=max_size` vertices, no weight bound, no timeout.
    pub fn with_bounds(graph: G, min_size: usize, max_size: usize) -> Result<Self> {
        Self::new(graph, CliqueSearchConfig::new().size_range(min_size, max_size))
    }

    /// Every non-empty clique of the graph.
    pub fn all(graph: G) -> Self {
        let bounds = ResolvedBounds {
            min_size: 1,
            max_size: graph.num_vertices(),
            max_weight: f64::INFINITY,
        };
        Self::from_bounds(graph, bounds, None)
    }

    fn from_bounds(graph: G, bounds: ResolvedBounds, timeout: Option<Duration>) -> Self {
        let num_vertices = graph.num_vertices();
        debug!(
            num_vertices,
            min_size = bounds.min_size,
            max_size = bounds.max_size,
            max_weight = bounds.max_weight,
            ?timeout,
            "configured clique enumeration"
        );

        let mut stack = Vec::with_capacity(bounds.max_size + 1);
        let mut status = SearchStatus::Running;
        if bounds.min_size > bounds.max_size || num_vertices == 0 {
            status = SearchStatus::Exhausted;
        } else {
            let candidates = if bounds.max_size == 0 {
                VertexSet::default()
            } else {
                VertexSet::from_descending(
                    graph
                        .vertices()
                        .rev()
                        .filter(|&v| graph.vertex_weight(v) <= bounds.max_weight)
                        .collect(),
                )
            };
            stack.push(Frame {
                clique: Clique::new(),
                candidates,
            });
        }

        let stats = SearchStats {
            max_depth: stack.len(),
            frames_pushed: stack.len() as u64,
            ..SearchStats::default()
        };
        CliqueEnumerator {
            graph,
            bounds,
            timeout,
            deadline: None,
            started: false,
            stack,
            ready: None,
            status,
            stats,
            marks: vec![0; num_vertices],
            mark_token: 1,
        }
    }

    /// Advance the search until the next clique is buffered.
    ///
    /// Returns `true` at once if a clique is already buffered. Returns `false`
    /// when the search is exhausted or the time budget ran out; check
    /// [`status`](Self::status) to distinguish the two.
    pub fn has_next(&mut self) -> bool {
        if self.ready.is_some() {
            return true;
        }
        if self.status != SearchStatus::Running {
            return false;
        }
        if !self.started {
            self.started = true;
            self.deadline = self.timeout.and_then(|t| Instant::now().checked_add(t));
        }
        let max_size = self.bounds.max_size;
        let max_weight = self.bounds.max_weight;

        while let Some(frame) = self.stack.last_mut() {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.status = SearchStatus::TimedOut;
                    warn!(
                        steps = self.stats.steps,
                        cliques = self.stats.cliques_emitted,
                        "clique enumeration timed out"
                    );
                    return false;
                }
            }
            self.stats.steps += 1;

            let Some(v) = frame.candidates.pop_min() else {
                self.stack.pop();
                continue;
            };
            let clique = frame.clique.extended(v, self.graph.vertex_weight(v));
            let candidates = if clique.size() >= max_size {
                VertexSet::default()
            } else {
                extend_candidates(
                    &self.graph,
                    &mut self.marks,
                    &mut self.mark_token,
                    v,
                    &frame.candidates,
                    clique.total_weight(),
                    max_weight,
                )
            };
            let emit = clique.size() >= self.bounds.min_size;
            let result = emit.then(|| clique.clone());

            self.stack.push(Frame { clique, candidates });
            self.stats.frames_pushed += 1;
            self.stats.max_depth = self.stats.max_depth.max(self.stack.len());

            if let Some(result) = result {
                debug_assert!(result.is_valid(&self.graph));
                self.stats.cliques_emitted += 1;
                self.ready = Some(result);
                return true;
            }
        }

        self.status = SearchStatus::Exhausted;
        debug!(
            steps = self.stats.steps,
            cliques = self.stats.cliques_emitted,
            max_depth = self.stats.max_depth,
            "clique enumeration exhausted"
        );
        false
    }

    /// Hand out the clique buffered by the last successful
    /// [`has_next`](Self::has_next).
    pub fn next_clique(&mut self) -> Result<Clique> {
        self.ready.take().ok_or(CliqueError::NoBufferedClique)
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn is_timed_out(&self) -> bool {
        self.status == SearchStatus::TimedOut
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }
}

impl<G: VertexWeightedGraph> Iterator for CliqueEnumerator<G> {
    type Item = Clique;

    fn next(&mut self) -> Option<Clique> {
        if self.has_next() {
            self.ready.take()
        } else {
            None
        }
    }
}

impl<G: VertexWeightedGraph> FusedIterator for CliqueEnumerator<G> {}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{NodeIndex, UnGraph};

    fn complete(n: u32) -> UnGraph<(), ()> {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in u + 1..n {
                edges.push((u, v));
            }
        }
        let mut g = UnGraph::from_edges(&edges);
        while g.node_count() < n as usize {
            g.add_node(());
        }
        g
    }

    fn vertices(cliques: Vec<Clique>) -> Vec<Vec<usize>> {
        cliques.into_iter().map(|c| c.vertices().to_vec()).collect()
    }

    #[test]
    fn complete_graph_in_lexicographic_preorder() {
        let g = complete(3);
        let found = vertices(CliqueEnumerator::all(&g).collect());
        assert_eq!(
            found,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![0, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn has_next_is_idempotent() {
        let g = complete(3);
        let mut it = CliqueEnumerator::with_bounds(&g, 2, 2).unwrap();
        assert!(it.has_next());
        assert!(it.has_next());
        assert_eq!(it.next_clique().unwrap().vertices(), &[0, 1]);
        assert_eq!(it.next_clique(), Err(CliqueError::NoBufferedClique));
        assert!(it.has_next());
        assert_eq!(it.next_clique().unwrap().vertices(), &[0, 2]);
    }

    #[test]
    fn next_without_has_next_is_a_protocol_error() {
        let g = complete(2);
        let mut it = CliqueEnumerator::all(&g);
        assert_eq!(it.next_clique(), Err(CliqueError::NoBufferedClique));
    }

    #[test]
    fn candidates_are_restricted_to_neighbors() {
        // 0-1, 1-2 path: {0, 2} must never be proposed.
        let g = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2)]);
        let found = vertices(CliqueEnumerator::with_bounds(&g, 2, 3).unwrap().collect());
        assert_eq!(found, vec![vec![0, 1], vec![1, 2]]);
    }

    #[test]
    fn weight_bound_prunes_heavy_vertices() {
        let mut g = UnGraph::<f64, ()>::from_edges(&[(0, 1), (1, 2), (0, 2)]);
        for (v, w) in [(0, 4.0), (1, 5.0), (2, 12.0)] {
            *g.node_weight_mut(NodeIndex::new(v)).unwrap() = w;
        }
        let config = CliqueSearchConfig::new().max_weight(10.0);
        let found: Vec<Clique> = CliqueEnumerator::new(&g, config).unwrap().collect();
        assert_eq!(vertices(found.clone()), vec![vec![0], vec![0, 1], vec![1]]);
        assert_eq!(found[1].total_weight(), 9.0);
    }

    #[test]
    fn exhaustion_and_timeout_are_distinguished() {
        let g = complete(4);
        let mut it = CliqueEnumerator::all(&g);
        assert_eq!(it.status(), SearchStatus::Running);
        assert_eq!(it.by_ref().count(), 15);
        assert_eq!(it.status(), SearchStatus::Exhausted);
        assert!(!it.has_next());

        let config = CliqueSearchConfig::new().timeout(Duration::ZERO);
        let mut it = CliqueEnumerator::new(&g, config).unwrap();
        assert!(!it.has_next());
        assert!(it.is_timed_out());
        assert_eq!(it.next(), None);
    }

    #[test]
    fn inverted_bounds_and_empty_graph_yield_nothing() {
        let g = complete(4);
        let mut it = CliqueEnumerator::with_bounds(&g, 3, 2).unwrap();
        assert!(!it.has_next());
        assert_eq!(it.status(), SearchStatus::Exhausted);

        let empty = UnGraph::<(), ()>::default();
        assert_eq!(CliqueEnumerator::all(&empty).count(), 0);
    }

    #[test]
    fn max_size_bounds_stack_depth() {
        let g = complete(6);
        let mut it = CliqueEnumerator::with_bounds(&g, 1, 3).unwrap();
        let count = it.by_ref().count();
        // 6 + 15 + 20
        assert_eq!(count, 41);
        assert_eq!(it.stats().max_depth, 4);
        assert_eq!(it.stats().cliques_emitted, 41);
    }

    #[test]
    fn zero_max_size_emits_nothing() {
        let g = complete(3);
        let mut it = CliqueEnumerator::with_bounds(&g, 0, 0).unwrap();
        assert!(!it.has_next());
        assert_eq!(it.status(), SearchStatus::Exhausted);
    }

    #[test]
    fn mark_token_wraps_by_clearing_marks() {
        let mut marks = vec![7u64; 3];
        let mut token = u64::MAX;
        assert_eq!(next_mark_token(&mut token, &mut marks), u64::MAX);
        assert_eq!(token, 1);
        assert_eq!(marks, vec![0, 0, 0]);
    }
}
