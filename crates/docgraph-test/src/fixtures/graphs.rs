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

//! Canonical in-memory graphs.

use docgraph_core::{Attributes, MultiDiGraph, NodeId};
use serde_json::{json, Value};

fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// A directed ring of `n` integer nodes: `0 → 1 → … → n-1 → 0`.
pub fn ring_graph(n: usize) -> MultiDiGraph {
    let mut graph = MultiDiGraph::with_capacity("Ring", n, n);
    for i in 0..n {
        graph.add_node(i, attrs(json!({ "position": i })));
    }
    for i in 0..n {
        graph.add_edge(i, (i + 1) % n, Attributes::new());
    }
    graph
}

/// An `n × n` grid with `(row, col)` tuple node ids and edges to the right
/// and downward neighbours.
pub fn grid_graph(n: usize) -> MultiDiGraph {
    let mut graph = MultiDiGraph::with_capacity("Grid", n * n, 2 * n * n.saturating_sub(1));
    for i in 0..n {
        for j in 0..n {
            graph.add_node((i, j), Attributes::new());
        }
    }
    for i in 0..n {
        for j in 0..n {
            if i + 1 < n {
                graph.add_edge((i, j), (i + 1, j), Attributes::new());
            }
            if j + 1 < n {
                graph.add_edge((i, j), (i, j + 1), Attributes::new());
            }
        }
    }
    graph
}

/// People driving cars: two vertex kinds, one edge kind.
///
/// Node ids are bare names, so routing needs the `type` attribute.
pub fn drivers_graph() -> MultiDiGraph {
    let mut graph = MultiDiGraph::new("Drivers");
    for (id, kind) in [
        ("alice", "person"),
        ("bob", "person"),
        ("tesla", "car"),
        ("volvo", "car"),
    ] {
        graph.add_node(id, attrs(json!({ "type": kind })));
    }
    graph.add_edge("alice", "tesla", attrs(json!({ "since": 2019 })));
    graph.add_edge("bob", "volvo", attrs(json!({ "since": 2021 })));
    graph.add_edge("bob", "tesla", attrs(json!({ "since": 2022 })));
    graph
}

/// People who like or dislike each other: one vertex kind, two edge kinds.
///
/// Edges carry their kind in the `kind` attribute.
pub fn likes_graph() -> MultiDiGraph {
    let mut graph = MultiDiGraph::new("Likes");
    for id in ["alice", "bob", "carol"] {
        graph.add_node(id, Attributes::new());
    }
    graph.add_edge("alice", "bob", attrs(json!({ "kind": "likes" })));
    graph.add_edge("bob", "carol", attrs(json!({ "kind": "dislikes" })));
    graph.add_edge("carol", "alice", attrs(json!({ "kind": "likes" })));
    graph
}

/// Ids of `ring_graph(n)` in insertion order.
pub fn ring_node_ids(n: usize) -> Vec<NodeId> {
    (0..n).map(NodeId::from).collect()
}
