// Dweve DocGraph - Document/Graph Mapping Adapters
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Canonical graphs and seeded stores.
//!
//! - **graphs**: in-memory graphs for import (ring, grid, drivers, likes)
//! - **stores**: `MemoryStore`s pre-filled with named graphs for export

mod graphs;
mod stores;

pub use graphs::*;
pub use stores::*;

use crate::FixtureList;
use docgraph_core::MultiDiGraph;

fn ring() -> MultiDiGraph {
    ring_graph(10)
}

fn grid() -> MultiDiGraph {
    grid_graph(4)
}

/// Returns all graph fixtures for iteration.
pub fn all() -> FixtureList {
    vec![
        ("ring", ring),
        ("grid", grid),
        ("drivers", drivers_graph),
        ("likes", likes_graph),
    ]
}
