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

use thiserror::Error;

/// Errors raised by the clique enumerator.
///
/// Configuration problems are reported when the enumerator is built; protocol
/// misuse is reported by [`CliqueEnumerator::next_clique`](crate::CliqueEnumerator::next_clique).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CliqueError {
    #[error("a finite weight bound ({max_weight}) requires a vertex weighted graph")]
    MissingVertexWeights { max_weight: f64 },

    #[error("max clique size {max_size} exceeds the number of vertices ({num_vertices})")]
    InvalidSizeBounds { max_size: usize, num_vertices: usize },

    #[error("the weight bound must not be NaN")]
    InvalidWeightBound,

    #[error("no clique is buffered; call has_next() first")]
    NoBufferedClique,
}

pub type Result<T> = std::result::Result<T, CliqueError>;
