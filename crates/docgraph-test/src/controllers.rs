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

//! Example controllers for graphs the default routing cannot handle.

use docgraph_arango::{Controller, FullCycleController, NodeContext, NxMap, Result};
use docgraph_core::{key::normalize_string, Attributes, Document, NodeId};
use serde_json::Value;

/// Maps grid nodes `(row, col)` to keys like `"01"` and back.
///
/// Keys are one digit per coordinate, so grids up to 10 × 10 round-trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridController;

impl Controller for GridController {
    fn prepare_vertex(&self, vertex: &mut Document, _collection: &str) -> Result<Option<NodeId>> {
        let key = match vertex.key() {
            Some(key) => key.to_string(),
            None => match vertex.external_id() {
                Ok(id) => id.into_parts().1,
                Err(_) => return Ok(None),
            },
        };
        let coordinates: Option<Vec<NodeId>> = key
            .chars()
            .map(|c| c.to_digit(10).map(|d| NodeId::Int(i64::from(d))))
            .collect();
        Ok(coordinates.map(NodeId::Tuple))
    }

    fn keyify_vertex(
        &self,
        _index: usize,
        id: &NodeId,
        _attributes: &Attributes,
        _collection: &str,
    ) -> Result<String> {
        Ok(id.to_key())
    }
}

/// Maps integer node ids to keys and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntKeyController;

impl Controller for IntKeyController {
    fn prepare_vertex(&self, vertex: &mut Document, _collection: &str) -> Result<Option<NodeId>> {
        Ok(vertex
            .external_id()
            .ok()
            .and_then(|id| id.key().parse::<i64>().ok())
            .map(NodeId::Int))
    }

    fn keyify_vertex(
        &self,
        _index: usize,
        id: &NodeId,
        _attributes: &Attributes,
        _collection: &str,
    ) -> Result<String> {
        Ok(id.to_key())
    }
}

/// Routes the drivers graph: `type: person` → `Person`, `type: car` → `Car`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriversController;

impl Controller for DriversController {
    fn identify_vertex(
        &self,
        id: &NodeId,
        attributes: &Attributes,
        collections: &[String],
    ) -> Result<String> {
        match attributes.get("type").and_then(Value::as_str) {
            Some("person") => Ok("Person".to_string()),
            Some("car") => Ok("Car".to_string()),
            Some(other) => Ok(other.to_string()),
            None => FullCycleController.identify_vertex(id, attributes, collections),
        }
    }

    fn keyify_vertex(
        &self,
        _index: usize,
        id: &NodeId,
        _attributes: &Attributes,
        _collection: &str,
    ) -> Result<String> {
        Ok(normalize_string(&id.to_string()).into_owned())
    }
}

/// Routes likes-graph edges by their `kind` attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct LikesController;

impl Controller for LikesController {
    fn identify_edge(
        &self,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        collections: &[String],
    ) -> Result<String> {
        match attributes.get("kind").and_then(Value::as_str) {
            Some(kind) => Ok(kind.to_string()),
            None => FullCycleController.identify_edge(attributes, from, to, collections),
        }
    }
}

/// Writes every element back under its original key, into `<collection><suffix>`.
#[derive(Debug, Clone)]
pub struct SuffixController {
    suffix: String,
}

impl SuffixController {
    /// Create a controller appending `suffix` to collection names.
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Controller for SuffixController {
    fn identify_vertex(
        &self,
        id: &NodeId,
        attributes: &Attributes,
        _collections: &[String],
    ) -> Result<String> {
        let original = FullCycleController.identify_vertex(id, attributes, &[])?;
        Ok(format!("{}{}", original, self.suffix))
    }

    fn identify_edge(
        &self,
        attributes: &Attributes,
        from: &NodeContext<'_>,
        to: &NodeContext<'_>,
        _collections: &[String],
    ) -> Result<String> {
        let original = FullCycleController.identify_edge(attributes, from, to, &[])?;
        Ok(format!("{}{}", original, self.suffix))
    }

    fn keyify_vertex(
        &self,
        index: usize,
        id: &NodeId,
        attributes: &Attributes,
        collection: &str,
    ) -> Result<String> {
        FullCycleController.keyify_vertex(index, id, attributes, collection)
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
        FullCycleController.keyify_edge(index, attributes, from, to, nx_map, collection)
    }
}

/// Tags exported IMDB vertices with a `bipartite` side: 0 for users, 1 for
/// movies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImdbController;

impl Controller for ImdbController {
    fn prepare_vertex(&self, vertex: &mut Document, collection: &str) -> Result<Option<NodeId>> {
        let side = if collection == "Users" { 0 } else { 1 };
        vertex.insert("bipartite", side);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_grid_controller_round_trips_keys() {
        let id = NodeId::from((3, 7));
        let key = GridController
            .keyify_vertex(1, &id, &Attributes::new(), "Grid_Node")
            .unwrap();
        assert_eq!(key, "37");

        let mut vertex = Document::new().with("_id", "Grid_Node/37").with("_key", "37");
        let back = GridController.prepare_vertex(&mut vertex, "Grid_Node").unwrap();
        assert_eq!(back, Some(id));
    }

    #[test]
    fn test_grid_controller_ignores_non_digit_keys() {
        let mut vertex = Document::new().with("_id", "Grid_Node/ab");
        assert_eq!(GridController.prepare_vertex(&mut vertex, "Grid_Node").unwrap(), None);
    }

    #[test]
    fn test_int_key_controller() {
        let mut vertex = Document::new().with("_id", "Ring/42");
        assert_eq!(
            IntKeyController.prepare_vertex(&mut vertex, "Ring").unwrap(),
            Some(NodeId::Int(42))
        );
    }

    #[test]
    fn test_drivers_controller_routes_by_type() {
        let attributes = match json!({"type": "car"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let collection = DriversController
            .identify_vertex(&NodeId::from("tesla"), &attributes, &[])
            .unwrap();
        assert_eq!(collection, "Car");
    }

    #[test]
    fn test_suffix_controller() {
        let attributes = match json!({"_id": "account/1", "_key": "1"}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let controller = SuffixController::new("_new");
        assert_eq!(
            controller
                .identify_vertex(&NodeId::from("x"), &attributes, &[])
                .unwrap(),
            "account_new"
        );
        assert_eq!(
            controller
                .keyify_vertex(9, &NodeId::from("x"), &attributes, "account_new")
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn test_imdb_controller_tags_side() {
        let mut vertex = Document::new().with("_id", "Movies/1");
        ImdbController.prepare_vertex(&mut vertex, "Movies").unwrap();
        assert_eq!(vertex.get("bipartite"), Some(&json!(1)));
    }
}
