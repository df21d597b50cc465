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

//! Store → graph → store and graph → store → graph cycles.

use docgraph_arango::{
    Adapter, DocumentSource, EdgeDefinition, ExportOptions, FullCycleController, ImportOptions,
    MemoryStore, Metagraph,
};
use docgraph_core::NodeId;
use docgraph_test::{
    collection_counts, fixtures, GridController, IntKeyController, SuffixController,
};
use serde_json::json;

const FRAUD_COLLECTIONS: [&str; 5] = ["account", "accountHolder", "bank", "customer", "transaction"];

#[test]
fn test_grid_round_trip_preserves_node_ids() {
    let original = fixtures::grid_graph(4);
    let adapter = Adapter::new(MemoryStore::new()).with_controller(GridController);
    let options = ImportOptions::new()
        .with_edge_definitions(vec![EdgeDefinition::new(
            "Grid_Edge",
            ["Grid_Node"],
            ["Grid_Node"],
        )])
        .with_keyify();
    adapter.import("Grid", &original, &options).unwrap();

    let exported = adapter
        .export_graph("Grid", &ExportOptions::default())
        .unwrap();
    assert_eq!(exported.node_count(), original.node_count());
    assert_eq!(exported.edge_count(), original.edge_count());
    for (id, _) in original.nodes() {
        assert!(exported.has_node(id), "node {} missing after round trip", id);
    }
    for (from, to, _) in original.edges() {
        assert!(exported.has_edge(from, to), "edge {} -> {} missing", from, to);
    }
}

#[test]
fn test_ring_round_trip_preserves_node_ids() {
    let original = fixtures::ring_graph(6);
    let adapter = Adapter::new(MemoryStore::new()).with_controller(IntKeyController);
    let options = ImportOptions::builder()
        .edge_definitions(vec![EdgeDefinition::new("Ring_Edge", ["Ring_Node"], ["Ring_Node"])])
        .keyify_nodes(true)
        .build();
    adapter.import("Ring", &original, &options).unwrap();

    let metagraph = Metagraph::new()
        .with_vertex_collection("Ring_Node", ["position"])
        .with_edge_collection("Ring_Edge", Vec::<String>::new());
    let exported = adapter
        .export("Ring", &metagraph, &ExportOptions::default())
        .unwrap();

    for id in fixtures::ring_node_ids(6) {
        assert!(exported.has_node(&id));
    }
    assert_eq!(
        exported.node_attribute(&NodeId::from(2usize), "position"),
        Some(&json!(2))
    );
    assert!(exported.has_edge(&NodeId::from(5usize), &NodeId::from(0usize)));
}

#[test]
fn test_full_cycle_into_existing_collections() {
    let adapter = Adapter::new(fixtures::fraud_store()).with_controller(FullCycleController);
    let before = collection_counts(&**adapter.store(), &FRAUD_COLLECTIONS).unwrap();

    let mut graph = adapter
        .export_graph(fixtures::FRAUD_GRAPH, &ExportOptions::default())
        .unwrap();
    for (_, attributes) in graph.nodes_mut() {
        attributes.insert("new_vertex_data".to_string(), json!(["new", "vertex", "data"]));
    }
    for attributes in graph.edge_weights_mut() {
        attributes.insert("new_edge_data".to_string(), json!({"new": "edge data"}));
    }

    adapter
        .import(
            fixtures::FRAUD_GRAPH,
            &graph,
            &ImportOptions::new().with_keyify(),
        )
        .unwrap();

    let after = collection_counts(&**adapter.store(), &FRAUD_COLLECTIONS).unwrap();
    assert_eq!(before, after);

    let store = adapter.store();
    let customer = store.document("customer", "10000002").unwrap();
    assert_eq!(customer.get("Name"), Some(&json!("Ben")));
    assert_eq!(
        customer.get("new_vertex_data"),
        Some(&json!(["new", "vertex", "data"]))
    );
    let transaction = store.document("transaction", "t3").unwrap();
    assert_eq!(transaction.from_vertex(), Some("account/20000002"));
    assert_eq!(transaction.get("new_edge_data"), Some(&json!({"new": "edge data"})));
}

#[test]
fn test_full_cycle_into_new_collections() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let graph = adapter
        .export_graph(fixtures::FRAUD_GRAPH, &ExportOptions::default())
        .unwrap();

    let adapter = adapter.with_controller(SuffixController::new("_new"));
    let options = ImportOptions::new()
        .with_edge_definitions(vec![
            EdgeDefinition::new("accountHolder_new", ["customer_new"], ["account_new"]),
            EdgeDefinition::new("transaction_new", ["account_new"], ["account_new"]),
        ])
        .with_orphan_collections(["bank_new"])
        .with_keyify();
    adapter.import("fraud-detection-new", &graph, &options).unwrap();

    let store = adapter.store();
    for collection in FRAUD_COLLECTIONS {
        let renamed = format!("{}_new", collection);
        assert_eq!(
            store.count(collection).unwrap(),
            store.count(&renamed).unwrap(),
            "{} and {} differ",
            collection,
            renamed
        );
    }
    let holder = store.document("accountHolder_new", "h1").unwrap();
    assert_eq!(holder.from_vertex(), Some("customer_new/10000001"));
    assert_eq!(holder.to_vertex(), Some("account_new/20000001"));
}

#[test]
fn test_export_import_export_is_stable() {
    let adapter = Adapter::new(fixtures::imdb_store()).with_controller(FullCycleController);
    let first = adapter
        .export_graph(fixtures::IMDB_GRAPH, &ExportOptions::default())
        .unwrap();
    adapter
        .import(
            fixtures::IMDB_GRAPH,
            &first,
            &ImportOptions::new().with_keyify(),
        )
        .unwrap();
    let second = adapter
        .export_graph(fixtures::IMDB_GRAPH, &ExportOptions::default())
        .unwrap();

    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.edge_count(), second.edge_count());
    for (id, attributes) in first.nodes() {
        assert_eq!(second.node(id), Some(attributes));
    }
}
