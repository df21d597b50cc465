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

//! The adapter: a store, a controller and the two conversion directions.

use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

use crate::config::{ConnectionConfig, ExportOptions, ImportOptions, Metagraph};
use crate::controller::{Controller, DefaultController};
use crate::error::Result;
use crate::export::{export_collections, export_graph, export_named_graph};
use crate::import::{import_graph, ImportSummary};
use crate::logging::{self, LogLevel};
use crate::store::GraphStore;
use docgraph_core::MultiDiGraph;

/// Converts between a document store and in-memory graphs.
///
/// # Examples
///
/// ```
/// use docgraph_arango::{Adapter, EdgeDefinition, ImportOptions, MemoryStore};
/// use docgraph_core::MultiDiGraph;
///
/// let mut graph = MultiDiGraph::new("pair");
/// graph.add_edge(1, 2, Default::default());
///
/// let adapter = Adapter::new(MemoryStore::new());
/// let options = ImportOptions::new()
///     .with_edge_definitions(vec![EdgeDefinition::new("links", ["points"], ["points"])]);
/// let summary = adapter.import("pair", &graph, &options).unwrap();
/// assert_eq!(summary.total_documents(), 3);
///
/// let exported = adapter.export_graph("pair", &Default::default()).unwrap();
/// assert_eq!(exported.node_count(), 2);
/// ```
pub struct Adapter<S, C = DefaultController> {
    store: Arc<S>,
    controller: C,
    connection: Option<ConnectionConfig>,
    runtime: Option<Handle>,
}

impl<S> Adapter<S, DefaultController>
where
    S: GraphStore + 'static,
{
    /// Create an adapter over a store, with the default controller.
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Create an adapter over a shared store.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self {
            store,
            controller: DefaultController,
            connection: None,
            runtime: None,
        }
    }
}

impl<S, C> Adapter<S, C>
where
    S: GraphStore + 'static,
    C: Controller,
{
    /// Replace the controller.
    pub fn with_controller<D: Controller>(self, controller: D) -> Adapter<S, D> {
        Adapter {
            store: self.store,
            controller,
            connection: self.connection,
            runtime: self.runtime,
        }
    }

    /// Record the connection the store was opened with.
    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        info!(
            "connected to {} as '{}' (database '{}')",
            connection.url(),
            connection.username,
            connection.database
        );
        self.connection = Some(connection);
        self
    }

    /// Parse and record a JSON connection object.
    pub fn with_connection_value(self, value: &Value) -> Result<Self> {
        let connection = ConnectionConfig::from_value(value)?;
        Ok(self.with_connection(connection))
    }

    /// Use this runtime for asynchronous batch submission.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Install a log subscriber at this level.
    pub fn with_log_level(self, level: LogLevel) -> Self {
        logging::init(level);
        self
    }

    /// The store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The recorded connection, if any.
    pub fn connection(&self) -> Option<&ConnectionConfig> {
        self.connection.as_ref()
    }

    /// Export the collections of a metagraph into a new graph.
    pub fn export(
        &self,
        name: &str,
        metagraph: &Metagraph,
        options: &ExportOptions,
    ) -> Result<MultiDiGraph> {
        export_graph(
            &*self.store,
            &self.controller,
            name,
            metagraph,
            options,
            None,
        )
    }

    /// Export the collections of a metagraph into an existing graph.
    pub fn export_into(
        &self,
        graph: MultiDiGraph,
        metagraph: &Metagraph,
        options: &ExportOptions,
    ) -> Result<MultiDiGraph> {
        let name = graph.name().to_string();
        export_graph(
            &*self.store,
            &self.controller,
            &name,
            metagraph,
            options,
            Some(graph),
        )
    }

    /// Export whole collections into a new graph.
    pub fn export_collections<V, E>(
        &self,
        name: &str,
        vertex_collections: V,
        edge_collections: E,
        options: &ExportOptions,
    ) -> Result<MultiDiGraph>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        export_collections(
            &*self.store,
            &self.controller,
            name,
            vertex_collections,
            edge_collections,
            options,
        )
    }

    /// Export every collection of a named graph into a new graph.
    pub fn export_graph(&self, name: &str, options: &ExportOptions) -> Result<MultiDiGraph> {
        export_named_graph(&*self.store, &self.controller, name, options)
    }

    /// Import a graph into the store as the named graph `name`.
    pub fn import(
        &self,
        name: &str,
        graph: &MultiDiGraph,
        options: &ImportOptions,
    ) -> Result<ImportSummary> {
        import_graph(
            &self.store,
            &self.controller,
            name,
            graph,
            options,
            self.runtime.as_ref(),
        )
    }
}
