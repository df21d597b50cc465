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

//! Store → graph export.

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn, Level};

use crate::aql::FetchRequest;
use crate::config::{EndpointPolicy, ExportOptions, Metagraph};
use crate::controller::Controller;
use crate::error::{AdapterError, Result};
use crate::mapping::AdbMap;
use crate::store::{DocumentCursor, DocumentSource, GraphMetadata};
use docgraph_core::{CoreError, Document, MultiDiGraph, NodeId, FROM_FIELD, ID_FIELD, TO_FIELD};

/// Export the collections of a metagraph into a graph.
///
/// Every vertex collection is read before any edge collection, so edges can
/// be attached to the nodes their endpoints became. Pass `graph` to extend an
/// existing graph instead of starting a new one named `name`.
pub fn export_graph<S, C>(
    source: &S,
    controller: &C,
    name: &str,
    metagraph: &Metagraph,
    options: &ExportOptions,
    graph: Option<MultiDiGraph>,
) -> Result<MultiDiGraph>
where
    S: DocumentSource + ?Sized,
    C: Controller + ?Sized,
{
    metagraph.validate()?;
    info!(
        "exporting graph '{}' from {} vertex and {} edge collections",
        name,
        metagraph.vertex_collections.len(),
        metagraph.edge_collections.len()
    );

    let mut graph = graph.unwrap_or_else(|| MultiDiGraph::new(name));
    let mut adb_map = AdbMap::new();

    for (collection, attributes) in &metagraph.vertex_collections {
        for document in fetch(source, collection, attributes, options)? {
            let mut vertex = document?;
            let adb_id = vertex
                .id()
                .ok_or_else(|| CoreError::MissingField(ID_FIELD.to_string()))?
                .to_string();

            let node_id = match controller.prepare_vertex(&mut vertex, collection)? {
                Some(node_id) => node_id,
                None => match vertex.get(ID_FIELD) {
                    Some(id) => NodeId::from_json(id)?,
                    None => NodeId::from(adb_id.as_str()),
                },
            };

            adb_map.insert(adb_id, node_id.clone(), collection.as_str());
            graph.add_node(node_id, vertex.into_attributes());
        }
    }

    let mut fallbacks = 0usize;
    for (collection, attributes) in &metagraph.edge_collections {
        for document in fetch(source, collection, attributes, options)? {
            let mut edge = document?;
            // Endpoints are fixed before the hook sees the edge.
            let from = resolve_endpoint(&adb_map, &edge, FROM_FIELD, options, &mut fallbacks)?;
            let to = resolve_endpoint(&adb_map, &edge, TO_FIELD, options, &mut fallbacks)?;
            controller.prepare_edge(&mut edge, collection)?;
            graph.add_edge(from, to, edge.into_attributes());
        }
    }

    if fallbacks > 0 {
        warn!(
            "{} edge endpoints of '{}' were not exported and kept their store ids",
            fallbacks, name
        );
    }
    info!(
        "exported graph '{}': {} nodes, {} edges",
        name,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Export whole collections, without projection.
pub fn export_collections<S, C, V, E>(
    source: &S,
    controller: &C,
    name: &str,
    vertex_collections: V,
    edge_collections: E,
    options: &ExportOptions,
) -> Result<MultiDiGraph>
where
    S: DocumentSource + ?Sized,
    C: Controller + ?Sized,
    V: IntoIterator,
    V::Item: Into<String>,
    E: IntoIterator,
    E::Item: Into<String>,
{
    let metagraph = Metagraph::from_collections(vertex_collections, edge_collections);
    let options = options.clone().without_projection();
    export_graph(source, controller, name, &metagraph, &options, None)
}

/// Export every collection of a named graph, without projection.
pub fn export_named_graph<S, C>(
    store: &S,
    controller: &C,
    name: &str,
    options: &ExportOptions,
) -> Result<MultiDiGraph>
where
    S: DocumentSource + GraphMetadata + ?Sized,
    C: Controller + ?Sized,
{
    if !store.has_graph(name)? {
        return Err(AdapterError::GraphNotFound(name.to_string()));
    }
    let definition = store.graph(name)?;
    export_collections(
        store,
        controller,
        name,
        definition.vertex_collections(),
        definition.edge_collections(),
        options,
    )
}

fn fetch<'s, S>(
    source: &'s S,
    collection: &str,
    attributes: &BTreeSet<String>,
    options: &ExportOptions,
) -> Result<DocumentCursor<'s>>
where
    S: DocumentSource + ?Sized,
{
    let request = FetchRequest::new(collection)
        .with_attributes(attributes.clone())
        .explicit(options.explicit_metagraph)
        .with_options(options.query_options.clone());

    // count() is a separate round trip, made only for the debug line.
    if tracing::enabled!(Level::DEBUG) {
        match source.count(collection) {
            Ok(count) => debug!("fetching {} documents from '{}'", count, collection),
            Err(e) => warn!("could not count '{}': {}", collection, e),
        }
    }
    trace!("{}", request.to_aql().render_inline());
    Ok(source.fetch(&request)?)
}

fn resolve_endpoint(
    adb_map: &AdbMap,
    edge: &Document,
    field: &str,
    options: &ExportOptions,
    fallbacks: &mut usize,
) -> Result<NodeId> {
    let endpoint = edge
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::MissingField(field.to_string()))?;

    if let Some(node_id) = adb_map.resolve(endpoint) {
        return Ok(node_id.clone());
    }

    match options.endpoint_policy {
        EndpointPolicy::Permissive => {
            debug!("endpoint '{}' was not exported, using it as a node id", endpoint);
            *fallbacks += 1;
            Ok(NodeId::from(endpoint))
        }
        EndpointPolicy::Strict => Err(AdapterError::UnresolvedEndpoint {
            edge: edge.id().unwrap_or("<unknown>").to_string(),
            endpoint: endpoint.to_string(),
        }),
    }
}
