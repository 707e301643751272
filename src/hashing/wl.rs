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

//! Weisfeiler-Lehman color refinement collapsed into a SHA-256 digest.
//!
//! Every vertex starts with the same color. In each round a vertex's new
//! color is derived from its current color and the sorted multiset of its
//! neighbors' colors. Distinct signatures are numbered by their rank in
//! sorted order, so the numbering depends only on the structure and never on
//! vertex ids. The final colors are sorted, encoded as big-endian `u32`s and
//! hashed.
//!
//! Equal fingerprints do not prove two graphs isomorphic: regular graphs of
//! the same size and degree, for instance, are never told apart.

use foldhash::fast::RandomState;
use indexmap::IndexSet;
use sha2::{Digest, Sha256};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::GraphHash;
use crate::graph::VertexWeightedGraph;

type Signature = SmallVec<[u32; 16]>;

/// Signature table for a single refinement round. Built fresh every round and
/// dropped once the round's labels are known.
struct RoundContext {
    signatures: IndexSet<Signature, RandomState>,
}

impl RoundContext {
    fn with_capacity(capacity: usize) -> Self {
        RoundContext {
            signatures: IndexSet::with_capacity_and_hasher(capacity, RandomState::default()),
        }
    }

    /// Slot of `signature` in first-seen order.
    #[inline]
    fn intern(&mut self, signature: Signature) -> usize {
        self.signatures.insert_full(signature).0
    }

    #[inline]
    fn num_classes(&self) -> usize {
        self.signatures.len()
    }

    /// Translate per-vertex slots into dense labels ordered by signature.
    fn into_labels(self, slots: &[usize]) -> Vec<u32> {
        let mut order: Vec<usize> = (0..self.signatures.len()).collect();
        order.sort_unstable_by(|&a, &b| self.signatures[a].cmp(&self.signatures[b]));
        let mut rank = vec![0u32; order.len()];
        for (r, &slot) in order.iter().enumerate() {
            rank[slot] = r as u32;
        }
        slots.iter().map(|&slot| rank[slot]).collect()
    }
}

/// Weisfeiler-Lehman fingerprint of a graph after a fixed number of
/// refinement rounds.
///
/// ```
/// use cliquehash::WlFingerprint;
/// use petgraph::graph::UnGraph;
///
/// let a = UnGraph::<(), ()>::from_edges(&[(0, 1), (1, 2)]);
/// let b = UnGraph::<(), ()>::from_edges(&[(2, 0), (0, 1)]);
/// let h = WlFingerprint::new(&a, 3).hash();
/// assert_eq!(h.len(), 64);
/// assert_eq!(h, WlFingerprint::new(&b, 3).hash());
/// ```
pub struct WlFingerprint<G> {
    graph: G,
    iterations: usize,
}

impl<G: VertexWeightedGraph> WlFingerprint<G> {
    pub fn new(graph: G, iterations: usize) -> Self {
        WlFingerprint { graph, iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn refine_round(&self, labels: &[u32]) -> (Vec<u32>, usize) {
        let n = labels.len();
        let mut round = RoundContext::with_capacity(n);
        let mut slots = Vec::with_capacity(n);
        for (v, &label) in labels.iter().enumerate() {
            let mut signature = Signature::new();
            signature.push(label);
            signature.extend(self.graph.neighbors(v).map(|u| labels[u]));
            signature[1..].sort_unstable();
            slots.push(round.intern(signature));
        }
        let classes = round.num_classes();
        (round.into_labels(&slots), classes)
    }

    /// Per-vertex colors after refinement, indexed by vertex id.
    ///
    /// Stops early once a round no longer splits any color class; later
    /// rounds would reproduce the same labels.
    pub fn labels(&self) -> Vec<u32> {
        let n = self.graph.num_vertices();
        let mut labels = vec![0u32; n];
        let mut classes = usize::from(n > 0);
        for round in 0..self.iterations {
            let (next, next_classes) = self.refine_round(&labels);
            debug_assert!(next_classes >= classes);
            trace!(round, classes = next_classes, "refinement round");
            labels = next;
            if next_classes == classes {
                debug!(round, classes, "color refinement stabilized");
                break;
            }
            classes = next_classes;
        }
        labels
    }

    /// SHA-256 of the sorted final colors, as 64 lowercase hex characters.
    pub fn hash(&self) -> String {
        let mut labels = self.labels();
        labels.sort_unstable();
        let mut hasher = Sha256::new();
        for label in &labels {
            hasher.update(label.to_be_bytes());
        }
        let digest = format!("{:x}", hasher.finalize());
        debug!(
            num_vertices = labels.len(),
            iterations = self.iterations,
            %digest,
            "computed WL fingerprint"
        );
        digest
    }
}

impl<G: VertexWeightedGraph> GraphHash for WlFingerprint<G> {
    fn hash(&self) -> String {
        WlFingerprint::hash(self)
    }

    fn name(&self) -> String {
        format!("weisfeiler-lehman-sha256/{}", self.iterations)
    }
}
