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

//! Bounded clique enumeration and Weisfeiler-Lehman fingerprints over a
//! read-only, vertex weighted graph.
//!
//! * [`CliqueEnumerator`] lazily walks the cliques of a graph whose size and
//!   total vertex weight lie within configured bounds, with an optional
//!   wall-clock budget.
//! * [`WlFingerprint`] reduces a graph to a SHA-256 digest that does not
//!   depend on vertex numbering.
//!
//! Both work on any type implementing [`VertexWeightedGraph`]; undirected
//! [`petgraph::graph::Graph`] values are supported out of the box.

pub mod clique;
pub mod error;
pub mod graph;
pub mod hashing;

pub use clique::{Clique, CliqueEnumerator, CliqueSearchConfig, SearchStats, SearchStatus, VertexSet};
pub use error::{CliqueError, Result};
pub use graph::{NodeWeight, VertexWeightedGraph, DEFAULT_VERTEX_WEIGHT};
pub use hashing::{GraphHash, WlFingerprint};
