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

//! In-memory directed multigraph.
//!
//! [`MultiDiGraph`] wraps a `petgraph` [`StableDiGraph`] and keeps a
//! `NodeId → NodeIndex` map for O(1) lookup. Parallel edges are allowed.
//! Nodes and edges iterate in insertion order, which the import pipeline
//! relies on for reproducible index-based keys.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde_json::Value;
use std::collections::HashMap;

use crate::document::Attributes;
use crate::id::NodeId;

#[derive(Debug, Clone)]
struct NodeEntry {
    id: NodeId,
    attributes: Attributes,
}

/// A named, directed multigraph with attribute maps on nodes and edges.
#[derive(Debug, Clone, Default)]
pub struct MultiDiGraph {
    name: String,
    graph: StableDiGraph<NodeEntry, Attributes>,
    index: HashMap<NodeId, NodeIndex>,
}

impl MultiDiGraph {
    /// Create an empty graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty graph with preallocated capacity.
    pub fn with_capacity(name: impl Into<String>, nodes: usize, edges: usize) -> Self {
        Self {
            name: name.into(),
            graph: StableDiGraph::with_capacity(nodes, edges),
            index: HashMap::with_capacity(nodes),
        }
    }

    /// The graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the graph.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node, or merge `attributes` into an existing node with the same id.
    pub fn add_node(&mut self, id: impl Into<NodeId>, attributes: Attributes) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            self.graph[idx].attributes.extend(attributes);
            return idx;
        }

        let idx = self.graph.add_node(NodeEntry {
            id: id.clone(),
            attributes,
        });
        self.index.insert(id, idx);
        idx
    }

    fn ensure_node(&mut self, id: NodeId) -> NodeIndex {
        match self.index.get(&id) {
            Some(&idx) => idx,
            None => self.add_node(id, Attributes::new()),
        }
    }

    /// Add an edge. Missing endpoints are created with no attributes.
    pub fn add_edge(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        attributes: Attributes,
    ) -> EdgeIndex {
        let from = self.ensure_node(from.into());
        let to = self.ensure_node(to.into());
        self.graph.add_edge(from, to, attributes)
    }

    /// Whether a node with this id exists.
    pub fn has_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Whether at least one edge runs from `from` to `to`.
    pub fn has_edge(&self, from: &NodeId, to: &NodeId) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Attributes of a node.
    pub fn node(&self, id: &NodeId) -> Option<&Attributes> {
        self.index.get(id).map(|&idx| &self.graph[idx].attributes)
    }

    /// Mutable attributes of a node.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Attributes> {
        let idx = *self.index.get(id)?;
        Some(&mut self.graph[idx].attributes)
    }

    /// Single attribute of a node.
    pub fn node_attribute(&self, id: &NodeId, name: &str) -> Option<&Value> {
        self.node(id).and_then(|attrs| attrs.get(name))
    }

    /// Iterate `(id, attributes)` over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, &Attributes)> + '_ {
        self.graph.node_indices().map(move |idx| {
            let entry = &self.graph[idx];
            (&entry.id, &entry.attributes)
        })
    }

    /// Mutable attributes of every node in insertion order.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = (&NodeId, &mut Attributes)> + '_ {
        self.graph
            .node_weights_mut()
            .map(|entry| (&entry.id, &mut entry.attributes))
    }

    /// Iterate `(from, to, attributes)` over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId, &Attributes)> + '_ {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            Some((&self.graph[a].id, &self.graph[b].id, &self.graph[e]))
        })
    }

    /// Mutable attributes of every edge in insertion order.
    pub fn edge_weights_mut(&mut self) -> impl Iterator<Item = &mut Attributes> + '_ {
        self.graph.edge_weights_mut()
    }

    /// Ids of the direct successors of a node; parallel edges repeat.
    pub fn successors(&self, id: &NodeId) -> Vec<&NodeId> {
        match self.index.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|n| &self.graph[n].id)
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_add_nodes_and_edges() {
        let mut g = MultiDiGraph::new("ring");
        for i in 0..3 {
            g.add_node(i, Attributes::new());
        }
        g.add_edge(0, 1, Attributes::new());
        g.add_edge(1, 2, Attributes::new());
        g.add_edge(2, 0, Attributes::new());

        assert_eq!(g.name(), "ring");
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge(&NodeId::Int(2), &NodeId::Int(0)));
        assert!(!g.has_edge(&NodeId::Int(0), &NodeId::Int(2)));
    }

    #[test]
    fn test_parallel_edges() {
        let mut g = MultiDiGraph::new("multi");
        g.add_edge("a", "b", attrs(json!({"w": 1})));
        g.add_edge("a", "b", attrs(json!({"w": 2})));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.successors(&NodeId::from("a")).len(), 2);
    }

    #[test]
    fn test_add_edge_creates_missing_endpoints() {
        let mut g = MultiDiGraph::new("g");
        g.add_edge("x", "y", Attributes::new());
        assert!(g.has_node(&NodeId::from("x")));
        assert!(g.has_node(&NodeId::from("y")));
        assert!(g.node(&NodeId::from("x")).unwrap().is_empty());
    }

    #[test]
    fn test_add_node_merges_attributes() {
        let mut g = MultiDiGraph::new("g");
        g.add_node("a", attrs(json!({"x": 1, "y": 1})));
        g.add_node("a", attrs(json!({"y": 2, "z": 3})));
        assert_eq!(g.node_count(), 1);
        let node = g.node(&NodeId::from("a")).unwrap();
        assert_eq!(node.get("x"), Some(&json!(1)));
        assert_eq!(node.get("y"), Some(&json!(2)));
        assert_eq!(node.get("z"), Some(&json!(3)));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut g = MultiDiGraph::new("g");
        for id in ["c", "a", "b"] {
            g.add_node(id, Attributes::new());
        }
        let order: Vec<String> = g.nodes().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_tuple_ids() {
        let mut g = MultiDiGraph::new("grid");
        g.add_edge((0, 0), (0, 1), Attributes::new());
        assert!(g.has_edge(&NodeId::from((0, 0)), &NodeId::from((0, 1))));
    }

    #[test]
    fn test_node_mut() {
        let mut g = MultiDiGraph::new("g");
        g.add_node("a", Attributes::new());
        g.node_mut(&NodeId::from("a"))
            .unwrap()
            .insert("flag".to_string(), json!(true));
        assert_eq!(
            g.node_attribute(&NodeId::from("a"), "flag"),
            Some(&json!(true))
        );
    }
}
