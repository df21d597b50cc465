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

//! Seeded stores.

use docgraph_arango::{
    DocumentSink, EdgeDefinition, GraphDefinition, GraphMetadata, InsertOptions, MemoryStore,
};
use docgraph_core::Document;
use serde_json::{json, Value};

/// Name of the graph [`fraud_store`] defines.
pub const FRAUD_GRAPH: &str = "fraud-detection";

/// Name of the graph [`imdb_store`] defines.
pub const IMDB_GRAPH: &str = "imdb";

fn docs(values: Vec<Value>) -> Vec<Document> {
    values
        .into_iter()
        .filter_map(|v| Document::from_value(v).ok())
        .collect()
}

fn seed(store: &MemoryStore, collection: &str, values: Vec<Value>) {
    let result = store
        .bulk_insert(collection, docs(values), &InsertOptions::default())
        .unwrap_or_else(|e| panic!("seeding '{}' failed: {}", collection, e));
    assert_eq!(result.errors, 0, "seeding '{}' rejected documents", collection);
}

/// Edge definitions of [`FRAUD_GRAPH`].
pub fn fraud_edge_definitions() -> Vec<EdgeDefinition> {
    vec![
        EdgeDefinition::new("accountHolder", ["customer"], ["account"]),
        EdgeDefinition::new("transaction", ["account"], ["account"]),
    ]
}

/// A store holding the fraud-detection graph.
///
/// - `customer`: 3 documents
/// - `account`: 4 documents
/// - `bank`: 1 document (orphan collection)
/// - `accountHolder`: 4 edges, customer → account
/// - `transaction`: 5 edges, account → account
pub fn fraud_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .create_graph(&GraphDefinition::new(
            FRAUD_GRAPH,
            fraud_edge_definitions(),
            vec!["bank".to_string()],
        ))
        .unwrap_or_else(|e| panic!("creating '{}' failed: {}", FRAUD_GRAPH, e));

    seed(
        &store,
        "customer",
        vec![
            json!({"_key": "10000001", "Name": "Ava", "Ssn": "111-11-1111"}),
            json!({"_key": "10000002", "Name": "Ben", "Ssn": "222-22-2222"}),
            json!({"_key": "10000003", "Name": "Cleo", "Ssn": "333-33-3333"}),
        ],
    );
    seed(
        &store,
        "account",
        vec![
            json!({"_key": "20000001", "Balance": 1200, "account_type": "checking", "rank": 0.4}),
            json!({"_key": "20000002", "Balance": 80, "account_type": "saving", "rank": 0.1}),
            json!({"_key": "20000003", "Balance": 5000, "account_type": "checking", "rank": 0.9}),
            json!({"_key": "20000004", "Balance": 15, "account_type": "saving", "rank": 0.2}),
        ],
    );
    seed(
        &store,
        "bank",
        vec![json!({"_key": "1", "bank_name": "Bank of Nowhere"})],
    );
    seed(
        &store,
        "accountHolder",
        vec![
            json!({"_key": "h1", "_from": "customer/10000001", "_to": "account/20000001"}),
            json!({"_key": "h2", "_from": "customer/10000001", "_to": "account/20000002"}),
            json!({"_key": "h3", "_from": "customer/10000002", "_to": "account/20000003"}),
            json!({"_key": "h4", "_from": "customer/10000003", "_to": "account/20000004"}),
        ],
    );
    seed(
        &store,
        "transaction",
        vec![
            json!({"_key": "t1", "_from": "account/20000001", "_to": "account/20000003", "transaction_amt": 300, "receiver_bank_id": "1"}),
            json!({"_key": "t2", "_from": "account/20000003", "_to": "account/20000001", "transaction_amt": 120, "receiver_bank_id": "1"}),
            json!({"_key": "t3", "_from": "account/20000002", "_to": "account/20000004", "transaction_amt": 20, "receiver_bank_id": "1"}),
            json!({"_key": "t4", "_from": "account/20000004", "_to": "account/20000002", "transaction_amt": 5, "receiver_bank_id": "1"}),
            json!({"_key": "t5", "_from": "account/20000001", "_to": "account/20000003", "transaction_amt": 40, "receiver_bank_id": "1"}),
        ],
    );
    store
}

/// A store holding a bipartite users/movies ratings graph.
///
/// - `Users`: 3 documents
/// - `Movies`: 2 documents
/// - `Ratings`: 4 edges, user → movie
pub fn imdb_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .create_graph(&GraphDefinition::new(
            IMDB_GRAPH,
            vec![EdgeDefinition::new("Ratings", ["Users"], ["Movies"])],
            vec![],
        ))
        .unwrap_or_else(|e| panic!("creating '{}' failed: {}", IMDB_GRAPH, e));

    seed(
        &store,
        "Users",
        vec![
            json!({"_key": "1", "age": 24, "gender": "M"}),
            json!({"_key": "2", "age": 53, "gender": "F"}),
            json!({"_key": "3", "age": 23, "gender": "M"}),
        ],
    );
    seed(
        &store,
        "Movies",
        vec![
            json!({"_key": "1", "title": "Toy Story"}),
            json!({"_key": "2", "title": "GoldenEye"}),
        ],
    );
    seed(
        &store,
        "Ratings",
        vec![
            json!({"_from": "Users/1", "_to": "Movies/1", "rating": 5}),
            json!({"_from": "Users/2", "_to": "Movies/1", "rating": 4}),
            json!({"_from": "Users/2", "_to": "Movies/2", "rating": 3}),
            json!({"_from": "Users/3", "_to": "Movies/2", "rating": 1}),
        ],
    );
    store
}
