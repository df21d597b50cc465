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

//! Per-run identity maps.
//!
//! Export records, for every fetched vertex, which node id it became
//! ([`AdbMap`]); edges are then attached by looking their `_from`/`_to` up.
//! Import records, for every node, which store id it was given ([`NxMap`]);
//! edges take their `_from`/`_to` from it. Both maps live for one run only.

use std::collections::HashMap;

use crate::error::{AdapterError, Result};
use docgraph_core::{ExternalId, NodeId};

/// Where a fetched vertex landed in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbEntry {
    /// Node id in the graph.
    pub node_id: NodeId,
    /// Collection the vertex was fetched from.
    pub collection: String,
}

/// Store id → graph node id, built during export.
#[derive(Debug, Default)]
pub struct AdbMap {
    entries: HashMap<String, AdbEntry>,
}

impl AdbMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vertex. A later record for the same id replaces the earlier one.
    pub fn insert(
        &mut self,
        external_id: impl Into<String>,
        node_id: NodeId,
        collection: impl Into<String>,
    ) -> Option<AdbEntry> {
        self.entries.insert(
            external_id.into(),
            AdbEntry {
                node_id,
                collection: collection.into(),
            },
        )
    }

    /// The entry for a store id.
    pub fn get(&self, external_id: &str) -> Option<&AdbEntry> {
        self.entries.get(external_id)
    }

    /// The node id for a store id.
    pub fn resolve(&self, external_id: &str) -> Option<&NodeId> {
        self.entries.get(external_id).map(|e| &e.node_id)
    }

    /// Number of recorded vertices.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where a graph node was written in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NxEntry {
    /// The node's store id.
    pub adb_id: ExternalId,
}

impl NxEntry {
    /// Target collection.
    pub fn collection(&self) -> &str {
        self.adb_id.collection()
    }

    /// Assigned key.
    pub fn key(&self) -> &str {
        self.adb_id.key()
    }
}

/// Graph node id → store id, built during import.
#[derive(Debug, Default)]
pub struct NxMap {
    entries: HashMap<NodeId, NxEntry>,
}

impl NxMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map sized for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Record a node.
    pub fn insert(&mut self, node_id: NodeId, adb_id: ExternalId) -> Option<NxEntry> {
        self.entries.insert(node_id, NxEntry { adb_id })
    }

    /// The entry for a node.
    pub fn get(&self, node_id: &NodeId) -> Option<&NxEntry> {
        self.entries.get(node_id)
    }

    /// The entry for a node, or [`AdapterError::UnmappedNode`].
    pub fn require(&self, node_id: &NodeId) -> Result<&NxEntry> {
        self.entries
            .get(node_id)
            .ok_or_else(|| AdapterError::UnmappedNode(node_id.to_string()))
    }

    /// The store id for a node.
    pub fn adb_id(&self, node_id: &NodeId) -> Option<&ExternalId> {
        self.entries.get(node_id).map(|e| &e.adb_id)
    }

    /// Number of recorded nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
