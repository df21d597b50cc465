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

//! Export pipeline tests against seeded stores.

use docgraph_arango::{
    export_graph, AdapterError, Adapter, Controller, DefaultController, ExportOptions, Metagraph,
};
use docgraph_core::{Document, NodeId};
use docgraph_test::{fixtures, nodes_by_collection, ImdbController};
use serde_json::json;

fn fraud_metagraph() -> Metagraph {
    Metagraph::new()
        .with_vertex_collection("account", ["Balance", "account_type"])
        .with_vertex_collection("customer", ["Name"])
        .with_edge_collection("transaction", ["transaction_amt"])
        .with_edge_collection("accountHolder", Vec::<String>::new())
}

#[test]
fn test_export_metagraph_projects_attributes() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let graph = adapter
        .export("fraud-detection", &fraud_metagraph(), &ExportOptions::default())
        .unwrap();

    assert_eq!(graph.node_count(), 7);
    assert_eq!(graph.edge_count(), 9);

    let account = graph.node(&NodeId::from("account/20000001")).unwrap();
    assert_eq!(account.get("Balance"), Some(&json!(1200)));
    assert_eq!(account.get("_id"), Some(&json!("account/20000001")));
    assert!(account.get("rank").is_none());
    assert!(account.get("_key").is_none());

    let counts = nodes_by_collection(&graph);
    assert_eq!(counts["account"], 4);
    assert_eq!(counts["customer"], 3);

    for (from, _, attributes) in graph.edges() {
        assert!(attributes.contains_key("_from"));
        assert!(attributes.contains_key("_to"));
        assert!(!attributes.contains_key("receiver_bank_id"));
        if from.as_str().is_some_and(|id| id.starts_with("account/")) {
            assert!(attributes.contains_key("transaction_amt"));
        }
    }
}

#[test]
fn test_export_metagraph_from_json() {
    let metagraph = Metagraph::from_value(&json!({
        "vertexCollections": {
            "account": ["Balance", "account_type"],
            "customer": ["Name"]
        },
        "edgeCollections": {
            "transaction": ["transaction_amt"],
            "accountHolder": []
        }
    }))
    .unwrap();
    assert_eq!(metagraph, fraud_metagraph());
}

#[test]
fn test_export_named_graph_includes_orphans() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let graph = adapter
        .export_graph(fixtures::FRAUD_GRAPH, &ExportOptions::default())
        .unwrap();

    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 9);
    let account = graph.node(&NodeId::from("account/20000003")).unwrap();
    assert_eq!(account.get("rank"), Some(&json!(0.9)));
    assert!(graph.has_node(&NodeId::from("bank/1")));
}

#[test]
fn test_export_collections_subset() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let graph = adapter
        .export_collections(
            "accounts",
            ["account"],
            ["transaction"],
            &ExportOptions::default(),
        )
        .unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 5);
    assert!(graph.has_edge(
        &NodeId::from("account/20000001"),
        &NodeId::from("account/20000003")
    ));
}

#[test]
fn test_export_parallel_edges_are_kept() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let graph = adapter
        .export_collections("accounts", ["account"], ["transaction"], &ExportOptions::default())
        .unwrap();
    let parallel = graph
        .edges()
        .filter(|(from, to, _)| {
            from.as_str() == Some("account/20000001") && to.as_str() == Some("account/20000003")
        })
        .count();
    assert_eq!(parallel, 2);
}

#[test]
fn test_export_prepare_vertex_hook() {
    let adapter = Adapter::new(fixtures::imdb_store()).with_controller(ImdbController);
    let graph = adapter
        .export_graph(fixtures::IMDB_GRAPH, &ExportOptions::default())
        .unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(
        graph.node_attribute(&NodeId::from("Users/1"), "bipartite"),
        Some(&json!(0))
    );
    assert_eq!(
        graph.node_attribute(&NodeId::from("Movies/2"), "bipartite"),
        Some(&json!(1))
    );
}

/// Uses each vertex's key as its node id by rewriting `_id`.
struct KeyAsId;

impl Controller for KeyAsId {
    fn prepare_vertex(
        &self,
        vertex: &mut Document,
        collection: &str,
    ) -> docgraph_arango::Result<Option<NodeId>> {
        if let Some(key) = vertex.key().map(str::to_string) {
            vertex.insert("_id", format!("{}:{}", collection, key));
        }
        Ok(None)
    }
}

#[test]
fn test_export_node_id_override_keeps_edges_attached() {
    let store = fixtures::fraud_store();
    let graph = export_graph(
        &store,
        &KeyAsId,
        "fraud",
        &Metagraph::from_collections(["customer", "account"], ["accountHolder"]),
        &ExportOptions::new().without_projection().with_strict_endpoints(),
        None,
    )
    .unwrap();

    assert!(graph.has_node(&NodeId::from("customer:10000001")));
    assert!(!graph.has_node(&NodeId::from("customer/10000001")));
    assert!(graph.has_edge(
        &NodeId::from("customer:10000001"),
        &NodeId::from("account:20000002")
    ));
    assert_eq!(graph.node_count(), 7);
}

struct RewriteHolder;

impl Controller for RewriteHolder {
    fn prepare_edge(&self, edge: &mut Document, collection: &str) -> docgraph_arango::Result<()> {
        if collection == "accountHolder" {
            edge.insert("_from", "customer/10000003");
            edge.insert("rewritten", true);
        }
        Ok(())
    }
}

#[test]
fn test_export_prepare_edge_does_not_move_edges() {
    let adapter = Adapter::new(fixtures::fraud_store()).with_controller(RewriteHolder);
    let graph = adapter
        .export_collections(
            "holders",
            ["customer", "account"],
            ["accountHolder"],
            &ExportOptions::default(),
        )
        .unwrap();

    assert_eq!(graph.edge_count(), 4);
    assert!(graph.has_edge(
        &NodeId::from("customer/10000001"),
        &NodeId::from("account/20000001")
    ));
    assert!(graph.has_edge(
        &NodeId::from("customer/10000002"),
        &NodeId::from("account/20000003")
    ));
    assert_eq!(graph.successors(&NodeId::from("customer/10000003")).len(), 1);
    assert!(graph.edges().all(|(_, _, attrs)| attrs.get("rewritten") == Some(&json!(true))));
}

#[test]
fn test_export_unresolved_endpoints() {
    let store = fixtures::fraud_store();
    let metagraph = Metagraph::from_collections(["customer"], ["accountHolder"]);

    let permissive = export_graph(
        &store,
        &DefaultController,
        "holders",
        &metagraph,
        &ExportOptions::default(),
        None,
    )
    .unwrap();
    assert_eq!(permissive.node_count(), 7);
    assert!(permissive
        .node(&NodeId::from("account/20000004"))
        .unwrap()
        .is_empty());

    let strict = export_graph(
        &store,
        &DefaultController,
        "holders",
        &metagraph,
        &ExportOptions::builder()
            .endpoint_policy(docgraph_arango::EndpointPolicy::Strict)
            .build(),
        None,
    );
    assert!(matches!(
        strict,
        Err(AdapterError::UnresolvedEndpoint { ref endpoint, .. }) if endpoint.starts_with("account/")
    ));
}

#[test]
fn test_export_missing_metagraph_keys() {
    let err = Metagraph::from_value(&json!({"vertexCollections": {}})).unwrap_err();
    match err {
        AdapterError::MissingConfiguration { missing, .. } => {
            assert_eq!(missing, vec!["edgeCollections"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_export_rejects_bad_collection_names() {
    let adapter = Adapter::new(fixtures::fraud_store());
    let result = adapter.export(
        "fraud",
        &Metagraph::from_collections(["account`; REMOVE"], Vec::<String>::new()),
        &ExportOptions::default(),
    );
    assert!(matches!(result, Err(AdapterError::InvalidCollectionName(_))));
}
