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

//! Routing controllers.
//!
//! A [`Controller`] decides, per element, how a document becomes a graph
//! element on export and how a graph element becomes a document on import:
//! which collection it goes to, which key it gets, and how its attributes are
//! adjusted on the way. Every method has a default; implementors override
//! only what their data needs.

use serde_json::Value;

use crate::error::{AdapterError, ElementKind, Result};
use crate::mapping::NxMap;
use docgraph_core::{Attributes, Document, ExternalId, NodeId, ID_FIELD, KEY_FIELD};

/// One endpoint of an edge being imported.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    /// The node's id in the graph.
    pub id: &'a NodeId,
    /// The collection the node was routed to.
    pub collection: &'a str,
    /// The node's attributes.
    pub attributes: &'a Attributes,
}

/// Strategy hooks for both conversion directions.
pub trait Controller {
    /// Adjust a fetched vertex before it becomes a node.
    ///
    /// Return `Some(id)` to choose the node id; otherwise the document's `_id`
    /// after this hook runs is used, so rewriting `_id` works as well.
    fn prepare_vertex(&self, vertex: &mut Document, collection: &str) -> Result<Option<NodeId>> {
        let _ = (vertex, collection);
        Ok(None)
    }

    /// Adjust a fetched edge before it is added to the graph.
    ///
    /// Runs after `_from`/`_to` are resolved to node ids, so changing them
    /// here does not move the edge.
    fn prepare_edge(&self, edge: &mut Document, collection: &str) -> Result<()> {
        let _ = (edge, collection);
        Ok(())
    }

    /// Pick the vertex collection for a node.
    ///
    /// Only called when the target graph is not homogeneous. The default uses
    /// the collection segment of a `collection/key` node id.
    fn identify_vertex(
        &self,
        id: &NodeId,
        attributes: &Attributes,
        collections: &[String],
    ) -> Result<String> {
        let _ = attributes;
        route(ElementKind::Vertex, id.as_external_id(), collections)
    }

    /// Pick the edge collection for an edge.
    ///
    /// Only called when the target graph is not homogeneous. The default can
    /// only answer when a single edge collection is declared.
    fn identify_edge(
        &self,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        collections: &[String],
    ) -> Result<String> {
        let _ = (attributes, from, to);
        route(ElementKind::Edge, None, collections)
    }

    /// Pick the key for a node. `index` counts nodes from 1.
    ///
    /// Only called when keyified import is requested. The default uses the key
    /// segment of a `collection/key` node id, else the index.
    fn keyify_vertex(
        &self,
        index: usize,
        id: &NodeId,
        attributes: &Attributes,
        collection: &str,
    ) -> Result<String> {
        let _ = (attributes, collection);
        Ok(id
            .as_external_id()
            .map(|external| external.into_parts().1)
            .unwrap_or_else(|| index.to_string()))
    }

    /// Pick the key for an edge. `index` counts edges from 1.
    ///
    /// Only called when keyified import is requested. `None` leaves key
    /// generation to the store. The default uses the index.
    fn keyify_edge(
        &self,
        index: usize,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        nx_map: &NxMap,
        collection: &str,
    ) -> Result<Option<String>> {
        let _ = (attributes, from, to, nx_map, collection);
        Ok(Some(index.to_string()))
    }

    /// Adjust a vertex document just before it is buffered for insertion.
    ///
    /// `_id` and `_key` are already set and must not change.
    fn prepare_vertex_document(&self, document: &mut Document, collection: &str) -> Result<()> {
        let _ = (document, collection);
        Ok(())
    }

    /// Adjust an edge document just before it is buffered for insertion.
    ///
    /// Identity fields are already set and must not change.
    fn prepare_edge_document(&self, document: &mut Document, collection: &str) -> Result<()> {
        let _ = (document, collection);
        Ok(())
    }
}

impl<C: Controller + ?Sized> Controller for &C {
    fn prepare_vertex(&self, vertex: &mut Document, collection: &str) -> Result<Option<NodeId>> {
        (**self).prepare_vertex(vertex, collection)
    }

    fn prepare_edge(&self, edge: &mut Document, collection: &str) -> Result<()> {
        (**self).prepare_edge(edge, collection)
    }

    fn identify_vertex(
        &self,
        id: &NodeId,
        attributes: &Attributes,
        collections: &[String],
    ) -> Result<String> {
        (**self).identify_vertex(id, attributes, collections)
    }

    fn identify_edge(
        &self,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        collections: &[String],
    ) -> Result<String> {
        (**self).identify_edge(attributes, from, to, collections)
    }

    fn keyify_vertex(
        &self,
        index: usize,
        id: &NodeId,
        attributes: &Attributes,
        collection: &str,
    ) -> Result<String> {
        (**self).keyify_vertex(index, id, attributes, collection)
    }

    fn keyify_edge(
        &self,
        index: usize,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        nx_map: &NxMap,
        collection: &str,
    ) -> Result<Option<String>> {
        (**self).keyify_edge(index, attributes, from, to, nx_map, collection)
    }

    fn prepare_vertex_document(&self, document: &mut Document, collection: &str) -> Result<()> {
        (**self).prepare_vertex_document(document, collection)
    }

    fn prepare_edge_document(&self, document: &mut Document, collection: &str) -> Result<()> {
        (**self).prepare_edge_document(document, collection)
    }
}

/// Route by an id's collection segment, or by the only candidate.
fn route(element: ElementKind, id: Option<ExternalId>, collections: &[String]) -> Result<String> {
    match (id, collections) {
        (Some(id), _) => Ok(id.into_parts().0),
        (None, [only]) => Ok(only.clone()),
        (None, _) => Err(AdapterError::RoutingNotImplemented {
            element,
            candidates: collections.len(),
        }),
    }
}

fn attribute_id(attributes: &Attributes) -> Option<ExternalId> {
    attributes
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(|s| ExternalId::parse(s).ok())
}

fn attribute_key(attributes: &Attributes) -> Option<String> {
    attributes
        .get(KEY_FIELD)
        .and_then(Value::as_str)
        .filter(|key| docgraph_core::key::is_valid_key(key))
        .map(str::to_string)
        .or_else(|| attribute_id(attributes).map(|id| id.into_parts().1))
}

/// The controller used when none is given. Every hook keeps its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultController;

impl Controller for DefaultController {}

/// Routes and keys by the `_id`/`_key` attributes export leaves on elements.
///
/// Exporting with full documents and importing with this controller writes
/// every element back to the collection and key it came from.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullCycleController;

impl Controller for FullCycleController {
    fn identify_vertex(
        &self,
        id: &NodeId,
        attributes: &Attributes,
        collections: &[String],
    ) -> Result<String> {
        let id = attribute_id(attributes).or_else(|| id.as_external_id());
        route(ElementKind::Vertex, id, collections)
    }

    fn identify_edge(
        &self,
        attributes: &Attributes,
        _from: &NodeContext<'_>,
        _to: &NodeContext<'_>,
        collections: &[String],
    ) -> Result<String> {
        route(ElementKind::Edge, attribute_id(attributes), collections)
    }

    fn keyify_vertex(
        &self,
        index: usize,
        id: &NodeId,
        attributes: &Attributes,
        collection: &str,
    ) -> Result<String> {
        match attribute_key(attributes) {
            Some(key) => Ok(key),
            None => DefaultController.keyify_vertex(index, id, attributes, collection),
        }
    }

    fn keyify_edge(
        &self,
        index: usize,
        attributes: &Attributes,
        _from: &NodeContext<'_>,
        _to: &NodeContext<'_>,
        _nx_map: &NxMap,
        _collection: &str,
    ) -> Result<Option<String>> {
        Ok(Some(
            attribute_key(attributes).unwrap_or_else(|| index.to_string()),
        ))
    }
}
