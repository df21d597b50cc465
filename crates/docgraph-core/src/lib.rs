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

//! Data model shared by DocGraph adapters.
//!
//! This crate provides:
//! - [`ExternalId`]: `collection/key` identifiers of store documents
//! - [`NodeId`]: identifiers of in-memory graph nodes (strings, numbers,
//!   booleans or tuples)
//! - [`Document`]: attribute maps exchanged with the store
//! - [`MultiDiGraph`]: the in-memory directed multigraph
//! - [`key`]: normalization of arbitrary values into valid document keys
//!
//! # Example
//!
//! ```rust
//! use docgraph_core::{Attributes, ExternalId, MultiDiGraph, NodeId};
//!
//! let mut graph = MultiDiGraph::new("ring");
//! graph.add_edge("Node/1", "Node/2", Attributes::new());
//!
//! let id = NodeId::from("Node/1");
//! assert!(graph.has_node(&id));
//! assert_eq!(id.as_external_id(), Some(ExternalId::parse("Node/1").unwrap()));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod document;
mod error;
mod graph;
mod id;
pub mod key;

pub use document::{Attributes, Document, FROM_FIELD, ID_FIELD, KEY_FIELD, TO_FIELD};
pub use error::{CoreError, Result};
pub use graph::MultiDiGraph;
pub use id::{ExternalId, NodeId};
