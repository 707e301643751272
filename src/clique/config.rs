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

//! Configuration for bounded clique enumeration.

use std::time::Duration;

use crate::error::{CliqueError, Result};
use crate::graph::VertexWeightedGraph;

/// Bounds and time budget for a [`CliqueEnumerator`](crate::CliqueEnumerator).
#[derive(Debug, Clone, PartialEq)]
pub struct CliqueSearchConfig {
    /// Smallest clique reported.
    pub min_size: usize,
    /// Largest clique reported. `None` means the number of vertices.
    pub max_size: Option<usize>,
    /// Upper bound, inclusive, on the total vertex weight of a clique.
    pub max_weight: f64,
    /// Wall-clock budget for the whole search. `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl Default for CliqueSearchConfig {
    fn default() -> Self {
        Self {
            min_size: 1,
            max_size: None,
            max_weight: f64::INFINITY,
            timeout: None,
        }
    }
}

impl CliqueSearchConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    #[must_use]
    pub const fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    #[must_use]
    pub const fn size_range(self, min_size: usize, max_size: usize) -> Self {
        self.min_size(min_size).max_size(max_size)
    }

    #[must_use]
    pub fn max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Millisecond budget; `0` disables the timeout.
    #[must_use]
    pub const fn timeout_millis(mut self, millis: u64) -> Self {
        self.timeout = if millis == 0 {
            None
        } else {
            Some(Duration::from_millis(millis))
        };
        self
    }

    /// Check the configuration against `graph` and resolve the size bounds.
    pub(crate) fn resolve<G: VertexWeightedGraph>(&self, graph: &G) -> Result<ResolvedBounds> {
        let num_vertices = graph.num_vertices();
        if self.max_weight.is_nan() {
            return Err(CliqueError::InvalidWeightBound);
        }
        if self.max_weight.is_finite() && !graph.has_vertex_weights() {
            return Err(CliqueError::MissingVertexWeights {
                max_weight: self.max_weight,
            });
        }
        let max_size = self.max_size.unwrap_or(num_vertices);
        if max_size > num_vertices {
            return Err(CliqueError::InvalidSizeBounds {
                max_size,
                num_vertices,
            });
        }
        Ok(ResolvedBounds {
            min_size: self.min_size,
            max_size,
            max_weight: self.max_weight,
        })
    }
}

/// Size and weight bounds after validation against a concrete graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedBounds {
    pub min_size: usize,
    pub max_size: usize,
    pub max_weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    fn path(n: u32) -> UnGraph<(), ()> {
        let edges: Vec<(u32, u32)> = (1..n).map(|v| (v - 1, v)).collect();
        UnGraph::from_edges(&edges)
    }

    #[test]
    fn defaults_cover_every_size() {
        let g = path(4);
        let bounds = CliqueSearchConfig::new().resolve(&g).unwrap();
        assert_eq!(bounds.min_size, 1);
        assert_eq!(bounds.max_size, 4);
        assert!(bounds.max_weight.is_infinite());
    }

    #[test]
    fn zero_millis_means_no_timeout() {
        let config = CliqueSearchConfig::new().timeout_millis(0);
        assert_eq!(config.timeout, None);
        let config = config.timeout_millis(25);
        assert_eq!(config.timeout, Some(Duration::from_millis(25)));
    }

    #[test]
    fn finite_weight_needs_weighted_graph() {
        let g = path(3);
        let err = CliqueSearchConfig::new()
            .max_weight(10.0)
            .resolve(&g)
            .unwrap_err();
        assert_eq!(err, CliqueError::MissingVertexWeights { max_weight: 10.0 });
    }

    #[test]
    fn rejects_oversized_and_nan_bounds() {
        let g = path(3);
        let err = CliqueSearchConfig::new().max_size(4).resolve(&g).unwrap_err();
        assert_eq!(
            err,
            CliqueError::InvalidSizeBounds {
                max_size: 4,
                num_vertices: 3
            }
        );
        let err = CliqueSearchConfig::new()
            .max_weight(f64::NAN)
            .resolve(&g)
            .unwrap_err();
        assert_eq!(err, CliqueError::InvalidWeightBound);
    }

    #[test]
    fn inverted_sizes_are_accepted() {
        let g = path(3);
        let bounds = CliqueSearchConfig::new().size_range(3, 2).resolve(&g).unwrap();
        assert_eq!((bounds.min_size, bounds.max_size), (3, 2));
    }
}
