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

//! Configuration types for store/graph conversions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::aql::validate_collection_name;
use crate::error::{AdapterError, Result};
use docgraph_core::CoreError;

/// Default store protocol.
pub const DEFAULT_PROTOCOL: &str = "https";

/// Default store port.
pub const DEFAULT_PORT: u16 = 8529;

/// Collect the keys of `required` absent from a JSON object, sorted.
///
/// Each requirement lists accepted spellings; any one of them satisfies it and
/// the first spelling is reported when none is present.
pub fn missing_keys(value: &Value, required: &[&[&str]]) -> Vec<String> {
    let object = value.as_object();
    let mut missing: Vec<String> = required
        .iter()
        .filter(|names| {
            !names
                .iter()
                .any(|name| object.is_some_and(|o| o.contains_key(*name)))
        })
        .filter_map(|names| names.first().map(|n| n.to_string()))
        .collect();
    missing.sort();
    missing
}

fn require_keys(context: &str, value: &Value, required: &[&[&str]]) -> Result<()> {
    let missing = missing_keys(value, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AdapterError::missing(context, missing))
    }
}

// ============================================================================
// Connection
// ============================================================================

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Credentials and address of the document store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Host name, without protocol or port.
    #[serde(alias = "hostname")]
    pub host: String,
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
    /// Database name.
    #[serde(alias = "dbName")]
    pub database: String,
    /// Protocol (default: "https").
    #[serde(default = "default_protocol")]
    pub protocol: String,
    /// Port (default: 8529).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ConnectionConfig {
    /// Create a connection with the default protocol and port.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
            database: database.into(),
            protocol: default_protocol(),
            port: DEFAULT_PORT,
        }
    }

    /// Parse and validate a JSON connection object.
    ///
    /// Every missing required key is reported at once.
    pub fn from_value(value: &Value) -> Result<Self> {
        require_keys(
            "connection",
            value,
            &[
                &["host", "hostname"],
                &["username"],
                &["password"],
                &["database", "dbName"],
            ],
        )?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Set the protocol.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `protocol://host:port`
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("protocol", &self.protocol)
            .field("port", &self.port)
            .finish()
    }
}

// ============================================================================
// Metagraph
// ============================================================================

/// Selection of collections to export, each with the attributes to keep.
///
/// An empty attribute set keeps no user attributes when the projection is
/// explicit; `_id` (and `_from`/`_to` on edges) are always kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metagraph {
    /// Vertex collection name to attribute set.
    pub vertex_collections: BTreeMap<String, BTreeSet<String>>,
    /// Edge collection name to attribute set.
    pub edge_collections: BTreeMap<String, BTreeSet<String>>,
}

impl Metagraph {
    /// Create an empty metagraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a metagraph from bare collection names, with empty attribute sets.
    pub fn from_collections<V, E>(vertex_collections: V, edge_collections: E) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            vertex_collections: vertex_collections
                .into_iter()
                .map(|c| (c.into(), BTreeSet::new()))
                .collect(),
            edge_collections: edge_collections
                .into_iter()
                .map(|c| (c.into(), BTreeSet::new()))
                .collect(),
        }
    }

    /// Add a vertex collection with its attribute set.
    pub fn with_vertex_collection<I, S>(mut self, name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vertex_collections
            .insert(name.into(), attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Add an edge collection with its attribute set.
    pub fn with_edge_collection<I, S>(mut self, name: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edge_collections
            .insert(name.into(), attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Parse a JSON metagraph.
    ///
    /// Both `vertexCollections` and `edgeCollections` must be present. Each
    /// collection's attributes may be given as an array of names, an object
    /// whose keys are the names, or `null` for none.
    pub fn from_value(value: &Value) -> Result<Self> {
        require_keys(
            "metagraph",
            value,
            &[&["vertexCollections"], &["edgeCollections"]],
        )?;
        Ok(Self {
            vertex_collections: parse_collections(&value["vertexCollections"])?,
            edge_collections: parse_collections(&value["edgeCollections"])?,
        })
    }

    /// Check every collection name against the store's naming rule.
    pub fn validate(&self) -> Result<()> {
        self.vertex_collections
            .keys()
            .chain(self.edge_collections.keys())
            .try_for_each(|name| validate_collection_name(name).map(|_| ()))
    }
}

fn parse_collections(value: &Value) -> Result<BTreeMap<String, BTreeSet<String>>> {
    let object = match value {
        Value::Object(object) => object,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            return Err(CoreError::InvalidDocument(format!(
                "expected an object of collections, got {}",
                other
            ))
            .into())
        }
    };
    object
        .iter()
        .map(|(name, attributes)| Ok((name.clone(), parse_attributes(name, attributes)?)))
        .collect()
}

fn parse_attributes(collection: &str, value: &Value) -> Result<BTreeSet<String>> {
    match value {
        Value::Null => Ok(BTreeSet::new()),
        Value::Object(object) => Ok(object.keys().cloned().collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    CoreError::InvalidDocument(format!(
                        "attribute names of '{}' must be strings, got {}",
                        collection, item
                    ))
                    .into()
                })
            })
            .collect(),
        Value::String(single) => Ok(BTreeSet::from([single.clone()])),
        other => Err(CoreError::InvalidDocument(format!(
            "invalid attribute set for '{}': {}",
            collection, other
        ))
        .into()),
    }
}

// ============================================================================
// Edge definitions
// ============================================================================

/// One edge collection of a named graph and the vertex collections it joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    /// The edge collection.
    pub edge_collection: String,
    /// Collections edges may start from.
    pub from_vertex_collections: Vec<String>,
    /// Collections edges may point to.
    pub to_vertex_collections: Vec<String>,
}

impl EdgeDefinition {
    /// Create an edge definition.
    pub fn new<F, T>(edge_collection: impl Into<String>, from: F, to: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            edge_collection: edge_collection.into(),
            from_vertex_collections: from.into_iter().map(Into::into).collect(),
            to_vertex_collections: to.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse and validate a JSON edge definition.
    pub fn from_value(value: &Value) -> Result<Self> {
        require_keys(
            "edge definition",
            value,
            &[
                &["edge_collection"],
                &["from_vertex_collections"],
                &["to_vertex_collections"],
            ],
        )?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Vertex collections on either side.
    pub fn vertex_collections(&self) -> impl Iterator<Item = &str> {
        self.from_vertex_collections
            .iter()
            .chain(self.to_vertex_collections.iter())
            .map(String::as_str)
    }

    /// Check every collection name against the store's naming rule.
    pub fn validate(&self) -> Result<()> {
        validate_collection_name(&self.edge_collection)?;
        self.vertex_collections()
            .try_for_each(|name| validate_collection_name(name).map(|_| ()))
    }
}

// ============================================================================
// Policies
// ============================================================================

/// What the store does when an inserted key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDuplicate {
    /// Replace the stored document.
    #[default]
    Replace,
    /// Merge the new attributes into the stored document.
    Update,
    /// Keep the stored document.
    Ignore,
    /// Count the document as an error.
    Error,
}

impl OnDuplicate {
    /// The store's name for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDuplicate::Replace => "replace",
            OnDuplicate::Update => "update",
            OnDuplicate::Ignore => "ignore",
            OnDuplicate::Error => "error",
        }
    }
}

/// How export treats an edge endpoint that no fetched vertex produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointPolicy {
    /// Use the raw external id as the node id.
    #[default]
    Permissive,
    /// Fail with [`AdapterError::UnresolvedEndpoint`].
    Strict,
}

// ============================================================================
// Export options
// ============================================================================

/// Options for store → graph export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Keep only the metagraph's attributes (default: true).
    pub explicit_metagraph: bool,
    /// Endpoint resolution policy (default: permissive).
    pub endpoint_policy: EndpointPolicy,
    /// Passed through to the store query.
    pub query_options: BTreeMap<String, Value>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            explicit_metagraph: true,
            endpoint_policy: EndpointPolicy::Permissive,
            query_options: BTreeMap::new(),
        }
    }
}

/// Builder for [`ExportOptions`].
#[derive(Default)]
pub struct ExportOptionsBuilder {
    explicit_metagraph: Option<bool>,
    endpoint_policy: Option<EndpointPolicy>,
    query_options: BTreeMap<String, Value>,
}

impl ExportOptionsBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to project documents onto the metagraph's attributes.
    pub fn explicit_metagraph(mut self, explicit: bool) -> Self {
        self.explicit_metagraph = Some(explicit);
        self
    }

    /// Set the endpoint resolution policy.
    pub fn endpoint_policy(mut self, policy: EndpointPolicy) -> Self {
        self.endpoint_policy = Some(policy);
        self
    }

    /// Add a passthrough query option.
    pub fn query_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_options.insert(name.into(), value.into());
        self
    }

    /// Build the options. Unset fields use their defaults.
    pub fn build(self) -> ExportOptions {
        let defaults = ExportOptions::default();
        ExportOptions {
            explicit_metagraph: self.explicit_metagraph.unwrap_or(defaults.explicit_metagraph),
            endpoint_policy: self.endpoint_policy.unwrap_or(defaults.endpoint_policy),
            query_options: self.query_options,
        }
    }
}

impl ExportOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ExportOptions.
    pub fn builder() -> ExportOptionsBuilder {
        ExportOptionsBuilder::default()
    }

    /// Fetch full documents instead of projecting.
    pub fn without_projection(mut self) -> Self {
        self.explicit_metagraph = false;
        self
    }

    /// Fail on edges whose endpoints were not exported.
    pub fn with_strict_endpoints(mut self) -> Self {
        self.endpoint_policy = EndpointPolicy::Strict;
        self
    }

    /// Add a passthrough query option.
    pub fn with_query_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query_options.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// Import options
// ============================================================================

/// Options for graph → store import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Graph schema; when absent the existing store graph is reused.
    pub edge_definitions: Option<Vec<EdgeDefinition>>,
    /// Vertex collections without edges.
    pub orphan_collections: Vec<String>,
    /// Delete the existing graph definition first.
    pub overwrite_graph: bool,
    /// Also drop the graph's collections when overwriting.
    pub drop_collections_on_overwrite: bool,
    /// Ask the controller for vertex keys instead of using the index.
    pub keyify_nodes: bool,
    /// Ask the controller for edge keys instead of using the index.
    pub keyify_edges: bool,
    /// Flush a collection's buffer when it reaches this size.
    pub batch_size: Option<usize>,
    /// Submit batches without waiting for them.
    pub use_async: bool,
    /// Duplicate-key policy for inserts.
    pub on_duplicate: OnDuplicate,
    /// Passed through to the store on every insert.
    pub insert_options: BTreeMap<String, Value>,
}

/// Builder for [`ImportOptions`].
#[derive(Default)]
pub struct ImportOptionsBuilder {
    edge_definitions: Option<Vec<EdgeDefinition>>,
    orphan_collections: Vec<String>,
    overwrite_graph: Option<bool>,
    drop_collections_on_overwrite: Option<bool>,
    keyify_nodes: Option<bool>,
    keyify_edges: Option<bool>,
    batch_size: Option<usize>,
    use_async: Option<bool>,
    on_duplicate: Option<OnDuplicate>,
    insert_options: BTreeMap<String, Value>,
}

impl ImportOptionsBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the graph schema.
    pub fn edge_definitions(mut self, definitions: Vec<EdgeDefinition>) -> Self {
        self.edge_definitions = Some(definitions);
        self
    }

    /// Add an orphan vertex collection.
    pub fn orphan_collection(mut self, name: impl Into<String>) -> Self {
        self.orphan_collections.push(name.into());
        self
    }

    /// Set whether to delete the existing graph definition first.
    pub fn overwrite_graph(mut self, overwrite: bool) -> Self {
        self.overwrite_graph = Some(overwrite);
        self
    }

    /// Set whether overwriting also drops the graph's collections.
    pub fn drop_collections_on_overwrite(mut self, drop: bool) -> Self {
        self.drop_collections_on_overwrite = Some(drop);
        self
    }

    /// Set whether vertex keys come from the controller.
    pub fn keyify_nodes(mut self, keyify: bool) -> Self {
        self.keyify_nodes = Some(keyify);
        self
    }

    /// Set whether edge keys come from the controller.
    pub fn keyify_edges(mut self, keyify: bool) -> Self {
        self.keyify_edges = Some(keyify);
        self
    }

    /// Set the flush threshold.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Set whether batches are submitted without waiting.
    pub fn use_async(mut self, use_async: bool) -> Self {
        self.use_async = Some(use_async);
        self
    }

    /// Set the duplicate-key policy.
    pub fn on_duplicate(mut self, policy: OnDuplicate) -> Self {
        self.on_duplicate = Some(policy);
        self
    }

    /// Add a passthrough insert option.
    pub fn insert_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_options.insert(name.into(), value.into());
        self
    }

    /// Build the options. Unset fields use their defaults.
    pub fn build(self) -> ImportOptions {
        let defaults = ImportOptions::default();
        ImportOptions {
            edge_definitions: self.edge_definitions,
            orphan_collections: self.orphan_collections,
            overwrite_graph: self.overwrite_graph.unwrap_or(defaults.overwrite_graph),
            drop_collections_on_overwrite: self
                .drop_collections_on_overwrite
                .unwrap_or(defaults.drop_collections_on_overwrite),
            keyify_nodes: self.keyify_nodes.unwrap_or(defaults.keyify_nodes),
            keyify_edges: self.keyify_edges.unwrap_or(defaults.keyify_edges),
            batch_size: self.batch_size.or(defaults.batch_size),
            use_async: self.use_async.unwrap_or(defaults.use_async),
            on_duplicate: self.on_duplicate.unwrap_or(defaults.on_duplicate),
            insert_options: self.insert_options,
        }
    }
}

impl ImportOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ImportOptions.
    pub fn builder() -> ImportOptionsBuilder {
        ImportOptionsBuilder::default()
    }

    /// Set the graph schema.
    pub fn with_edge_definitions(mut self, definitions: Vec<EdgeDefinition>) -> Self {
        self.edge_definitions = Some(definitions);
        self
    }

    /// Set the orphan vertex collections.
    pub fn with_orphan_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.orphan_collections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Delete the existing graph definition first.
    pub fn with_overwrite(mut self) -> Self {
        self.overwrite_graph = true;
        self
    }

    /// Ask the controller for both vertex and edge keys.
    pub fn with_keyify(mut self) -> Self {
        self.keyify_nodes = true;
        self.keyify_edges = true;
        self
    }

    /// Set the flush threshold.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Submit batches without waiting.
    pub fn with_async(mut self) -> Self {
        self.use_async = true;
        self
    }

    /// Set the duplicate-key policy.
    pub fn with_on_duplicate(mut self, policy: OnDuplicate) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// The flush threshold, treating zero as unset.
    pub fn effective_batch_size(&self) -> Option<usize> {
        self.batch_size.filter(|size| *size > 0)
    }

    /// Check every collection name against the store's naming rule.
    pub fn validate(&self) -> Result<()> {
        if let Some(definitions) = &self.edge_definitions {
            definitions.iter().try_for_each(EdgeDefinition::validate)?;
        }
        self.orphan_collections
            .iter()
            .try_for_each(|name| validate_collection_name(name).map(|_| ()))
    }
}
