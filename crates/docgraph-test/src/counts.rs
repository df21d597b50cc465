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

//! Counting helpers for assertions.

use docgraph_arango::{DocumentSource, StoreResult};
use docgraph_core::MultiDiGraph;
use serde_json::Value;
use std::collections::BTreeMap;

/// Nodes per collection, judged by each node's `_id` attribute.
///
/// Nodes without an `_id` are counted under the empty string.
pub fn nodes_by_collection(graph: &MultiDiGraph) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for (_, attributes) in graph.nodes() {
        let collection = attributes
            .get("_id")
            .and_then(Value::as_str)
            .and_then(|id| id.split_once('/'))
            .map(|(collection, _)| collection.to_string())
            .unwrap_or_default();
        *counts.entry(collection).or_insert(0) += 1;
    }
    counts
}

/// Document counts of the named collections.
pub fn collection_counts<S>(store: &S, collections: &[&str]) -> StoreResult<BTreeMap<String, usize>>
where
    S: DocumentSource + ?Sized,
{
    collections
        .iter()
        .map(|name| Ok((name.to_string(), store.count(name)?)))
        .collect()
}
