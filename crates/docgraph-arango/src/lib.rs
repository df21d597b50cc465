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

//! Bidirectional mapping between document-store collections and in-memory
//! directed multigraphs.
//!
//! The store holds vertex documents and edge documents (with `_from`/`_to`)
//! in named collections, grouped into named graphs. This crate:
//!
//! - **exports** selected collections into a [`MultiDiGraph`], optionally
//!   projecting each collection onto a set of attributes
//! - **imports** a [`MultiDiGraph`] into a named graph, routing every node and
//!   edge to a collection and key, in batches
//!
//! Routing is delegated to a [`Controller`]. The default works for graphs with
//! one vertex and one edge collection, or whose node ids are already
//! `collection/key` strings; anything else needs a custom controller.
//!
//! # Mapping
//!
//! | Store | Graph |
//! |-------|-------|
//! | Vertex document | Node, id = `_id` unless the controller chooses |
//! | Edge document | Edge between the nodes its `_from`/`_to` became |
//! | Document attributes | Node/edge attributes (projected if requested) |
//!
//! # Example: Export
//!
//! ```rust
//! use docgraph_arango::{Adapter, ExportOptions, MemoryStore, Metagraph};
//!
//! fn example(adapter: &Adapter<MemoryStore>) -> docgraph_arango::Result<()> {
//!     let metagraph = Metagraph::new()
//!         .with_vertex_collection("account", ["Balance", "account_type"])
//!         .with_vertex_collection("customer", ["Name"])
//!         .with_edge_collection("transaction", ["transaction_amt"]);
//!
//!     let graph = adapter.export("fraud-detection", &metagraph, &ExportOptions::default())?;
//!     println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//!     Ok(())
//! }
//! ```
//!
//! # Example: Import
//!
//! ```rust
//! use docgraph_arango::{Adapter, EdgeDefinition, ImportOptions, MemoryStore};
//! use docgraph_core::MultiDiGraph;
//!
//! fn example(graph: &MultiDiGraph) -> docgraph_arango::Result<()> {
//!     let adapter = Adapter::new(MemoryStore::new());
//!     let options = ImportOptions::builder()
//!         .edge_definitions(vec![EdgeDefinition::new("Grid_Edge", ["Grid_Node"], ["Grid_Node"])])
//!         .batch_size(1000)
//!         .build();
//!
//!     let summary = adapter.import("Grid", graph, &options)?;
//!     println!("wrote {} documents", summary.total_documents());
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod adapter;
pub mod aql;
pub mod batch;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod mapping;
pub mod store;

pub use adapter::Adapter;
pub use aql::{AqlStatement, FetchRequest};
pub use batch::{BatchFlusher, FlushMode};
pub use config::{
    ConnectionConfig, EdgeDefinition, EndpointPolicy, ExportOptions, ExportOptionsBuilder,
    ImportOptions, ImportOptionsBuilder, Metagraph, OnDuplicate,
};
pub use controller::{Controller, DefaultController, FullCycleController, NodeContext};
pub use error::{AdapterError, ElementKind, Result};
pub use export::{export_collections, export_graph, export_named_graph};
pub use import::{import_graph, ImportSummary};
pub use logging::LogLevel;
pub use mapping::{AdbMap, NxMap};
pub use store::{
    BulkInsertResult, DocumentSink, DocumentSource, GraphDefinition, GraphMetadata, GraphStore,
    InsertOptions, MemoryStore, StoreError, StoreResult,
};

pub use docgraph_core::MultiDiGraph;
