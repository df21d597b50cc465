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

//! Graph → store import.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::batch::{BatchFlusher, FlushMode};
use crate::config::ImportOptions;
use crate::controller::{Controller, NodeContext};
use crate::error::{AdapterError, ElementKind, Result};
use crate::mapping::NxMap;
use crate::store::{BulkInsertResult, GraphDefinition, GraphMetadata, GraphStore, InsertOptions};
use docgraph_core::{
    Document, ExternalId, MultiDiGraph, NodeId, FROM_FIELD, ID_FIELD, KEY_FIELD, TO_FIELD,
};

/// What an import wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    /// The graph the documents were written into.
    pub graph: GraphDefinition,
    /// Documents handed to the store, per collection.
    pub documents: BTreeMap<String, usize>,
    /// Bulk inserts submitted.
    pub batches: usize,
    /// What the store reported for the synchronous batches. Empty when the
    /// batches were submitted asynchronously.
    pub inserted: BulkInsertResult,
    /// Whether batches were submitted without waiting; if so, some may still
    /// be in flight.
    pub asynchronous: bool,
}

impl ImportSummary {
    /// Documents handed to the store, all collections.
    pub fn total_documents(&self) -> usize {
        self.documents.values().sum()
    }
}

/// Import a graph into the store as the named graph `name`.
///
/// Nodes are all written (and flushed) before any edge, since edges reference
/// the store ids nodes were given. `runtime` is used for asynchronous
/// submission; without it the current tokio runtime is used, if any.
pub fn import_graph<S, C>(
    store: &Arc<S>,
    controller: &C,
    name: &str,
    graph: &MultiDiGraph,
    options: &ImportOptions,
    runtime: Option<&Handle>,
) -> Result<ImportSummary>
where
    S: GraphStore + 'static,
    C: Controller + ?Sized,
{
    options.validate()?;
    let mode = flush_mode(options, runtime)?;
    let definition = resolve_graph(&**store, name, options)?;

    let vertex_collections = definition.vertex_collections();
    let edge_collections = definition.edge_collections();
    let homogeneous = vertex_collections.len() == 1 && edge_collections.len() == 1;

    info!(
        "importing {} nodes and {} edges into graph '{}'",
        graph.node_count(),
        graph.edge_count(),
        name
    );

    let mut flusher = BatchFlusher::new(
        Arc::clone(store),
        options.effective_batch_size(),
        InsertOptions {
            on_duplicate: options.on_duplicate,
            extra: options.insert_options.clone(),
        },
    )
    .with_mode(mode);
    let mut nx_map = NxMap::with_capacity(graph.node_count());

    for (i, (node_id, attributes)) in graph.nodes().enumerate() {
        let index = i + 1;
        let collection = if homogeneous {
            vertex_collections[0].clone()
        } else {
            let chosen = controller.identify_vertex(node_id, attributes, &vertex_collections)?;
            declared(ElementKind::Vertex, chosen, &vertex_collections)?
        };

        let key = if options.keyify_nodes {
            controller.keyify_vertex(index, node_id, attributes, &collection)?
        } else {
            index.to_string()
        };
        let adb_id = ExternalId::new(collection.as_str(), key.as_str())?;

        let mut document = Document::from_attributes(attributes.clone());
        document.insert(ID_FIELD, adb_id.to_string());
        document.insert(KEY_FIELD, key);
        let identity = identity_fields(&document);
        controller.prepare_vertex_document(&mut document, &collection)?;
        check_identity(ElementKind::Vertex, &identity, &document)?;

        nx_map.insert(node_id.clone(), adb_id);
        flusher.push(&collection, document)?;
    }
    flusher.flush_all()?;
    debug!("node pass done: {} nodes mapped", nx_map.len());

    for (i, (from, to, attributes)) in graph.edges().enumerate() {
        let index = i + 1;
        let from_entry = nx_map.require(from)?;
        let to_entry = nx_map.require(to)?;
        let from_ctx = NodeContext {
            id: from,
            collection: from_entry.collection(),
            attributes: node_attributes(graph, from)?,
        };
        let to_ctx = NodeContext {
            id: to,
            collection: to_entry.collection(),
            attributes: node_attributes(graph, to)?,
        };

        let collection = if homogeneous {
            edge_collections[0].clone()
        } else {
            let chosen = controller.identify_edge(attributes, &from_ctx, &to_ctx, &edge_collections)?;
            declared(ElementKind::Edge, chosen, &edge_collections)?
        };

        let key = if options.keyify_edges {
            controller.keyify_edge(index, attributes, &from_ctx, &to_ctx, &nx_map, &collection)?
        } else {
            Some(index.to_string())
        };

        let mut document = Document::from_attributes(attributes.clone());
        match key {
            Some(key) => {
                let adb_id = ExternalId::new(collection.as_str(), key.as_str())?;
                document.insert(ID_FIELD, adb_id.to_string());
                document.insert(KEY_FIELD, key);
            }
            None => {
                document.remove(ID_FIELD);
                document.remove(KEY_FIELD);
            }
        }
        document.insert(FROM_FIELD, from_entry.adb_id.to_string());
        document.insert(TO_FIELD, to_entry.adb_id.to_string());
        let identity = identity_fields(&document);
        controller.prepare_edge_document(&mut document, &collection)?;
        check_identity(ElementKind::Edge, &identity, &document)?;

        flusher.push(&collection, document)?;
    }
    flusher.flush_all()?;

    let asynchronous = flusher.is_async();
    let (documents, batches, inserted) = flusher.into_counts();
    info!(
        "imported graph '{}': {} documents in {} batches{}",
        name,
        documents.values().sum::<usize>(),
        batches,
        if asynchronous { " (submitted asynchronously)" } else { "" }
    );

    Ok(ImportSummary {
        graph: definition,
        documents,
        batches,
        inserted,
        asynchronous,
    })
}

const IDENTITY_FIELDS: [&str; 4] = [ID_FIELD, KEY_FIELD, FROM_FIELD, TO_FIELD];

fn identity_fields(document: &Document) -> [Option<Value>; 4] {
    IDENTITY_FIELDS.map(|field| document.get(field).cloned())
}

/// Document hooks may add or change attributes, never `_id`/`_key`/`_from`/`_to`.
fn check_identity(
    element: ElementKind,
    before: &[Option<Value>; 4],
    document: &Document,
) -> Result<()> {
    let changed = IDENTITY_FIELDS
        .iter()
        .zip(before)
        .find(|(field, old)| document.get(field) != old.as_ref());
    match changed {
        Some((field, _)) => Err(AdapterError::IdentityChanged {
            element,
            document: describe(before),
            field: *field,
        }),
        None => Ok(()),
    }
}

/// `_id` when assigned, else `_from -> _to`.
fn describe(identity: &[Option<Value>; 4]) -> String {
    let text = |value: &Option<Value>| {
        value
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    match identity[0].as_ref().and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => format!("{} -> {}", text(&identity[2]), text(&identity[3])),
    }
}

fn flush_mode(options: &ImportOptions, runtime: Option<&Handle>) -> Result<FlushMode> {
    if !options.use_async {
        return Ok(FlushMode::Sync);
    }
    runtime
        .cloned()
        .or_else(|| Handle::try_current().ok())
        .map(FlushMode::Async)
        .ok_or(AdapterError::AsyncRuntimeUnavailable)
}

/// Find, replace or create the target graph.
fn resolve_graph<S>(store: &S, name: &str, options: &ImportOptions) -> Result<GraphDefinition>
where
    S: GraphMetadata + ?Sized,
{
    let exists = store.has_graph(name)?;
    let edge_definitions = match (&options.edge_definitions, exists && !options.overwrite_graph) {
        (_, true) => {
            debug!("reusing existing graph '{}'", name);
            return Ok(store.graph(name)?);
        }
        (Some(definitions), false) => definitions.clone(),
        (None, false) => {
            return Err(AdapterError::missing(
                format!("graph '{}'", name),
                ["edge_definitions".to_string()],
            ))
        }
    };

    if exists {
        store.delete_graph(name, true, options.drop_collections_on_overwrite)?;
        info!(
            "deleted graph '{}'{}",
            name,
            if options.drop_collections_on_overwrite {
                " and its collections"
            } else {
                ""
            }
        );
    }

    info!("creating graph '{}'", name);
    Ok(store.create_graph(&GraphDefinition::new(
        name,
        edge_definitions,
        options.orphan_collections.clone(),
    ))?)
}

fn declared(element: ElementKind, collection: String, declared: &[String]) -> Result<String> {
    if declared.contains(&collection) {
        Ok(collection)
    } else {
        Err(AdapterError::UnknownCollection {
            element,
            collection,
            declared: declared.to_vec(),
        })
    }
}

fn node_attributes<'g>(
    graph: &'g MultiDiGraph,
    id: &NodeId,
) -> Result<&'g docgraph_core::Attributes> {
    graph
        .node(id)
        .ok_or_else(|| AdapterError::UnmappedNode(id.to_string()))
}
