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

//! Contracts for the document store the adapter reads from and writes to.
//!
//! The adapter never talks to a wire protocol directly. It needs three
//! capabilities, each a trait here:
//!
//! - [`DocumentSource`]: count and stream a collection's documents
//! - [`DocumentSink`]: bulk-insert documents into a collection
//! - [`GraphMetadata`]: create, inspect and delete named graphs
//!
//! [`GraphStore`] is implemented for anything providing all three.
//! [`MemoryStore`] is an in-process implementation.

mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::aql::FetchRequest;
use crate::config::{EdgeDefinition, OnDuplicate};
use docgraph_core::Document;

/// Failure reported by a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection does not exist.
    #[error("collection '{0}' not found")]
    CollectionNotFound(String),

    /// The collection exists with the other type (document vs edge).
    #[error("collection '{name}' exists but is not {expected} collection")]
    CollectionTypeMismatch {
        /// Collection name.
        name: String,
        /// "an edge" or "a document".
        expected: &'static str,
    },

    /// The graph does not exist.
    #[error("graph '{0}' not found")]
    GraphNotFound(String),

    /// A graph with that name already exists.
    #[error("graph '{0}' already exists")]
    GraphExists(String),

    /// A bulk insert was rejected as a whole.
    #[error("bulk insert into '{collection}' rejected: {reason}")]
    InsertRejected {
        /// Target collection.
        collection: String,
        /// Why.
        reason: String,
    },

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Stream of fetched documents.
pub type DocumentCursor<'a> = Box<dyn Iterator<Item = StoreResult<Document>> + Send + 'a>;

/// Options for one bulk insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertOptions {
    /// Duplicate-key policy.
    pub on_duplicate: OnDuplicate,
    /// Passthrough options, store specific.
    pub extra: BTreeMap<String, Value>,
}

impl InsertOptions {
    /// Whether the passthrough `complete` flag is set: reject the whole batch
    /// if any document fails.
    pub fn complete(&self) -> bool {
        self.extra
            .get("complete")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Outcome of one bulk insert, in the store's import-report shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkInsertResult {
    /// Newly created documents.
    pub created: usize,
    /// Documents that replaced or updated existing ones.
    pub updated: usize,
    /// Documents skipped by the `ignore` policy.
    pub ignored: usize,
    /// Documents rejected.
    pub errors: usize,
}

impl BulkInsertResult {
    /// Total documents accounted for.
    pub fn total(&self) -> usize {
        self.created + self.updated + self.ignored + self.errors
    }

    /// Sum two reports.
    pub fn merge(&mut self, other: &BulkInsertResult) {
        self.created += other.created;
        self.updated += other.updated;
        self.ignored += other.ignored;
        self.errors += other.errors;
    }
}

/// A named graph's schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Graph name.
    pub name: String,
    /// Edge collections and the vertex collections they join.
    pub edge_definitions: Vec<EdgeDefinition>,
    /// Vertex collections without edges.
    pub orphan_collections: Vec<String>,
}

impl GraphDefinition {
    /// Create a graph definition.
    pub fn new(
        name: impl Into<String>,
        edge_definitions: Vec<EdgeDefinition>,
        orphan_collections: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            edge_definitions,
            orphan_collections,
        }
    }

    /// Every vertex collection, orphans included, sorted and deduplicated.
    pub fn vertex_collections(&self) -> Vec<String> {
        self.edge_definitions
            .iter()
            .flat_map(|d| d.vertex_collections().map(str::to_string))
            .chain(self.orphan_collections.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every edge collection, sorted and deduplicated.
    pub fn edge_collections(&self) -> Vec<String> {
        self.edge_definitions
            .iter()
            .map(|d| d.edge_collection.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Reads documents.
pub trait DocumentSource {
    /// Number of documents in a collection.
    fn count(&self, collection: &str) -> StoreResult<usize>;

    /// Stream a collection's documents, projected as the request says.
    ///
    /// Cursor order is unspecified.
    fn fetch(&self, request: &FetchRequest) -> StoreResult<DocumentCursor<'_>>;
}

/// Writes documents.
pub trait DocumentSink {
    /// Insert documents into a collection in one request.
    ///
    /// Per-document failures are counted in the result; only failures of the
    /// request as a whole are errors.
    fn bulk_insert(
        &self,
        collection: &str,
        documents: Vec<Document>,
        options: &InsertOptions,
    ) -> StoreResult<BulkInsertResult>;
}

/// Manages named graphs.
pub trait GraphMetadata {
    /// Whether a graph exists.
    fn has_graph(&self, name: &str) -> StoreResult<bool>;

    /// Create a graph, creating any missing collections it names.
    fn create_graph(&self, definition: &GraphDefinition) -> StoreResult<GraphDefinition>;

    /// Delete a graph. Returns whether it existed.
    ///
    /// With `drop_collections`, collections no other graph uses are dropped too.
    fn delete_graph(&self, name: &str, ignore_missing: bool, drop_collections: bool)
        -> StoreResult<bool>;

    /// A graph's definition.
    fn graph(&self, name: &str) -> StoreResult<GraphDefinition>;
}

/// A store providing every capability the adapter needs.
pub trait GraphStore: DocumentSource + DocumentSink + GraphMetadata + Send + Sync {}

impl<T> GraphStore for T where T: DocumentSource + DocumentSink + GraphMetadata + Send + Sync {}
