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

//! Shared test fixtures and controllers for DocGraph adapters.
//!
//! # Quick Start
//!
//! ```rust
//! use docgraph_test::fixtures;
//!
//! // In-memory graphs to import
//! let ring = fixtures::ring_graph(5);
//! let grid = fixtures::grid_graph(3);
//! let drivers = fixtures::drivers_graph();
//!
//! // Seeded stores to export from
//! let store = fixtures::fraud_store();
//! ```
//!
//! Controllers in [`controllers`] route the fixtures the default controller
//! cannot: tuple ids, attribute-typed nodes, attribute-typed edges.

use docgraph_core::MultiDiGraph;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> MultiDiGraph)>;

/// Canonical graphs and seeded stores.
pub mod fixtures;

/// Example controllers.
pub mod controllers;

/// Counting utilities.
pub mod counts;

pub use fixtures::*;

pub use controllers::{
    DriversController, GridController, ImdbController, IntKeyController, LikesController,
    SuffixController,
};
pub use counts::{collection_counts, nodes_by_collection};
