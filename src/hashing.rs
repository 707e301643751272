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

//! Structural graph fingerprints.

mod wl;

pub use wl::WlFingerprint;

/// A hash of a graph's structure that does not depend on how its vertices
/// are numbered.
pub trait GraphHash {
    /// Digest rendered as lowercase hexadecimal.
    fn hash(&self) -> String;

    /// Name of the hashing scheme.
    fn name(&self) -> String;
}
