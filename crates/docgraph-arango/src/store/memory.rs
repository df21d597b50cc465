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

//! In-process store backed by locked maps.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

use super::{
    BulkInsertResult, DocumentCursor, DocumentSink, DocumentSource, GraphDefinition,
    GraphMetadata, InsertOptions, StoreError, StoreResult,
};
use crate::aql::FetchRequest;
use crate::config::OnDuplicate;
use docgraph_core::{key::is_valid_key, Document, ExternalId, ID_FIELD, KEY_FIELD};

#[derive(Debug, Clone, Default)]
struct Collection {
    edge: bool,
    documents: BTreeMap<String, Document>,
    last_generated_key: u64,
}

impl Collection {
    fn new(edge: bool) -> Self {
        Self {
            edge,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct State {
    collections: BTreeMap<String, Collection>,
    graphs: BTreeMap<String, GraphDefinition>,
    bulk_inserts: usize,
}

impl State {
    fn ensure_collection(&mut self, name: &str, edge: bool) -> StoreResult<()> {
        match self.collections.get(name) {
            Some(existing) if existing.edge != edge => Err(StoreError::CollectionTypeMismatch {
                name: name.to_string(),
                expected: if edge { "an edge" } else { "a document" },
            }),
            Some(_) => Ok(()),
            None => {
                self.collections.insert(name.to_string(), Collection::new(edge));
                Ok(())
            }
        }
    }

    fn collection(&self, name: &str) -> StoreResult<&Collection> {
        self.collections
            .get(name)
            .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
    }
}

/// A thread-safe, in-process document store.
///
/// Supports document and edge collections, named graphs, bulk inserts under
/// every duplicate policy, counts and attribute projection. Keys of documents
/// inserted without one are generated from a per-collection counter.
///
/// # Examples
///
/// ```
/// use docgraph_arango::store::{DocumentSource, MemoryStore};
/// use docgraph_core::Document;
///
/// let store = MemoryStore::new();
/// store.create_collection("users", false).unwrap();
/// store.insert("users", Document::new().with("_key", "alice")).unwrap();
/// assert_eq!(store.count("users").unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection if absent.
    pub fn create_collection(&self, name: &str, edge: bool) -> StoreResult<()> {
        self.state.write().ensure_collection(name, edge)
    }

    /// Whether a collection exists.
    pub fn has_collection(&self, name: &str) -> bool {
        self.state.read().collections.contains_key(name)
    }

    /// Whether a collection exists and holds edges.
    pub fn is_edge_collection(&self, name: &str) -> bool {
        self.state
            .read()
            .collections
            .get(name)
            .is_some_and(|c| c.edge)
    }

    /// Names of all collections, sorted.
    pub fn collection_names(&self) -> Vec<String> {
        self.state.read().collections.keys().cloned().collect()
    }

    /// Drop a collection. Returns whether it existed.
    pub fn drop_collection(&self, name: &str) -> bool {
        self.state.write().collections.remove(name).is_some()
    }

    /// Insert one document with the default policy.
    pub fn insert(&self, collection: &str, document: Document) -> StoreResult<BulkInsertResult> {
        self.bulk_insert(collection, vec![document], &InsertOptions::default())
    }

    /// One document by key.
    pub fn document(&self, collection: &str, key: &str) -> Option<Document> {
        self.state
            .read()
            .collections
            .get(collection)
            .and_then(|c| c.documents.get(key).cloned())
    }

    /// Every document of a collection, ordered by key.
    pub fn documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(self
            .state
            .read()
            .collection(collection)?
            .documents
            .values()
            .cloned()
            .collect())
    }

    /// Number of bulk insert requests applied so far.
    pub fn bulk_insert_count(&self) -> usize {
        self.state.read().bulk_inserts
    }
}

impl DocumentSource for MemoryStore {
    fn count(&self, collection: &str) -> StoreResult<usize> {
        Ok(self.state.read().collection(collection)?.documents.len())
    }

    fn fetch(&self, request: &FetchRequest) -> StoreResult<DocumentCursor<'_>> {
        let state = self.state.read();
        let documents: Vec<Document> = state
            .collection(&request.collection)?
            .documents
            .values()
            .map(|document| {
                if request.explicit {
                    document.project(&request.attributes)
                } else {
                    document.clone()
                }
            })
            .collect();
        Ok(Box::new(documents.into_iter().map(Ok)))
    }
}

/// Assign `_key`/`_id` to a document bound for `collection`, checking it fits.
fn stamp_identity(
    collection: &str,
    target: &Collection,
    staged: &BTreeMap<String, Document>,
    last_generated_key: &mut u64,
    document: &mut Document,
) -> std::result::Result<String, String> {
    let key = match (document.key(), document.id()) {
        (Some(key), _) => key.to_string(),
        (None, Some(id)) => ExternalId::parse(id)
            .map_err(|e| e.to_string())?
            .into_parts()
            .1,
        (None, None) => loop {
            *last_generated_key += 1;
            let candidate = last_generated_key.to_string();
            if !target.documents.contains_key(&candidate) && !staged.contains_key(&candidate) {
                break candidate;
            }
        },
    };

    if !is_valid_key(&key) {
        return Err(format!("illegal document key '{}'", key));
    }
    let id = format!("{}/{}", collection, key);
    if let Some(given) = document.id() {
        if given != id {
            return Err(format!("document id '{}' does not match '{}'", given, id));
        }
    }
    if target.edge {
        for endpoint in [document.from_vertex(), document.to_vertex()] {
            match endpoint {
                Some(endpoint) => {
                    ExternalId::parse(endpoint).map_err(|e| e.to_string())?;
                }
                None => return Err("edge document lacks _from or _to".to_string()),
            }
        }
    }

    document.insert(KEY_FIELD, key.clone());
    document.insert(ID_FIELD, id);
    Ok(key)
}

impl DocumentSink for MemoryStore {
    fn bulk_insert(
        &self,
        collection: &str,
        documents: Vec<Document>,
        options: &InsertOptions,
    ) -> StoreResult<BulkInsertResult> {
        let mut state = self.state.write();
        let target = state.collection(collection)?;
        let mut last_generated_key = target.last_generated_key;
        let mut staged: BTreeMap<String, Document> = BTreeMap::new();
        let mut result = BulkInsertResult::default();

        for mut document in documents {
            let key = match stamp_identity(
                collection,
                target,
                &staged,
                &mut last_generated_key,
                &mut document,
            ) {
                Ok(key) => key,
                Err(reason) => {
                    debug!("rejected document in '{}': {}", collection, reason);
                    result.errors += 1;
                    continue;
                }
            };

            let existing = staged.get(&key).or_else(|| target.documents.get(&key));
            match (existing, options.on_duplicate) {
                (None, _) => {
                    result.created += 1;
                    staged.insert(key, document);
                }
                (Some(_), OnDuplicate::Replace) => {
                    result.updated += 1;
                    staged.insert(key, document);
                }
                (Some(old), OnDuplicate::Update) => {
                    let mut merged = old.clone();
                    merged.attributes_mut().extend(document.into_attributes());
                    result.updated += 1;
                    staged.insert(key, merged);
                }
                (Some(_), OnDuplicate::Ignore) => result.ignored += 1,
                (Some(_), OnDuplicate::Error) => result.errors += 1,
            }
        }

        if options.complete() && result.errors > 0 {
            return Err(StoreError::InsertRejected {
                collection: collection.to_string(),
                reason: format!("{} document(s) failed", result.errors),
            });
        }

        if let Some(target) = state.collections.get_mut(collection) {
            target.documents.extend(staged);
            target.last_generated_key = last_generated_key;
        }
        state.bulk_inserts += 1;
        debug!(
            "bulk insert into '{}': {} created, {} updated, {} ignored, {} errors",
            collection, result.created, result.updated, result.ignored, result.errors
        );
        Ok(result)
    }
}

impl GraphMetadata for MemoryStore {
    fn has_graph(&self, name: &str) -> StoreResult<bool> {
        Ok(self.state.read().graphs.contains_key(name))
    }

    fn create_graph(&self, definition: &GraphDefinition) -> StoreResult<GraphDefinition> {
        let mut state = self.state.write();
        if state.graphs.contains_key(&definition.name) {
            return Err(StoreError::GraphExists(definition.name.clone()));
        }
        for edge_definition in &definition.edge_definitions {
            state.ensure_collection(&edge_definition.edge_collection, true)?;
        }
        for vertex_collection in definition.vertex_collections() {
            state.ensure_collection(&vertex_collection, false)?;
        }
        state
            .graphs
            .insert(definition.name.clone(), definition.clone());
        Ok(definition.clone())
    }

    fn delete_graph(
        &self,
        name: &str,
        ignore_missing: bool,
        drop_collections: bool,
    ) -> StoreResult<bool> {
        let mut state = self.state.write();
        let definition = match state.graphs.remove(name) {
            Some(definition) => definition,
            None if ignore_missing => return Ok(false),
            None => return Err(StoreError::GraphNotFound(name.to_string())),
        };

        if drop_collections {
            let in_use: Vec<String> = state
                .graphs
                .values()
                .flat_map(|g| g.vertex_collections().into_iter().chain(g.edge_collections()))
                .collect();
            for collection in definition
                .vertex_collections()
                .into_iter()
                .chain(definition.edge_collections())
            {
                if !in_use.contains(&collection) {
                    state.collections.remove(&collection);
                }
            }
        }
        Ok(true)
    }

    fn graph(&self, name: &str) -> StoreResult<GraphDefinition> {
        self.state
            .read()
            .graphs
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::GraphNotFound(name.to_string()))
    }
}
