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

//! Error types for store/graph conversions.

use docgraph_core::CoreError;
use std::fmt;
use thiserror::Error;

use crate::store::StoreError;

/// Which kind of graph element an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// A vertex / graph node.
    Vertex,
    /// An edge.
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Vertex => f.write_str("vertex"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

/// Error type for adapter operations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Required configuration keys are absent.
    #[error("missing {context} attributes: {}", .missing.join(", "))]
    MissingConfiguration {
        /// What was being validated (connection, metagraph, edge definition, ...).
        context: String,
        /// The missing keys, sorted.
        missing: Vec<String>,
    },

    /// A collection name the store would reject.
    #[error("invalid collection name: '{0}'")]
    InvalidCollectionName(String),

    /// The controller cannot decide between several target collections.
    #[error(
        "controller must be customized to route {element}s: there are {candidates} {element} collections to choose from"
    )]
    RoutingNotImplemented {
        /// Element being routed.
        element: ElementKind,
        /// Number of declared collections for that element kind.
        candidates: usize,
    },

    /// The controller picked a collection outside the declared set.
    #[error("{element} collection '{collection}' is not one of the declared collections [{}]", .declared.join(", "))]
    UnknownCollection {
        /// Element being routed.
        element: ElementKind,
        /// The collection the controller returned.
        collection: String,
        /// The collections declared for this operation.
        declared: Vec<String>,
    },

    /// An exported edge references a vertex that was never fetched.
    #[error("edge '{edge}' references vertex '{endpoint}' which was not exported")]
    UnresolvedEndpoint {
        /// The edge's `_id`.
        edge: String,
        /// The unresolved `_from`/`_to` value.
        endpoint: String,
    },

    /// An edge endpoint was not visited during the node pass of an import.
    #[error("edge endpoint '{0}' was not visited in the node pass")]
    UnmappedNode(String),

    /// An import-side document hook changed an identity field.
    #[error("{element} document hook changed '{field}' of '{document}'")]
    IdentityChanged {
        /// Element whose document was changed.
        element: ElementKind,
        /// The `_id` assigned before the hook ran.
        document: String,
        /// The changed field.
        field: &'static str,
    },

    /// The named graph does not exist in the store.
    #[error("graph '{0}' does not exist")]
    GraphNotFound(String),

    /// Asynchronous submission was requested outside a tokio runtime.
    #[error("asynchronous batch submission requires a tokio runtime")]
    AsyncRuntimeUnavailable,

    /// Identifier or document error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failure reported by the store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AdapterError {
    /// Build a [`AdapterError::MissingConfiguration`] with sorted keys.
    pub fn missing(context: impl Into<String>, missing: impl IntoIterator<Item = String>) -> Self {
        let mut missing: Vec<String> = missing.into_iter().collect();
        missing.sort();
        AdapterError::MissingConfiguration {
            context: context.into(),
            missing,
        }
    }
}

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_configuration() {
        let err = AdapterError::missing(
            "metagraph",
            vec!["vertexCollections".to_string(), "edgeCollections".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "missing metagraph attributes: edgeCollections, vertexCollections"
        );
    }

    #[test]
    fn test_error_display_routing_not_implemented() {
        let err = AdapterError::RoutingNotImplemented {
            element: ElementKind::Vertex,
            candidates: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("vertex"));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_error_display_unknown_collection() {
        let err = AdapterError::UnknownCollection {
            element: ElementKind::Edge,
            collection: "hates".to_string(),
            declared: vec!["likes".to_string(), "dislikes".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("hates"));
        assert!(msg.contains("likes, dislikes"));
    }

    #[test]
    fn test_error_display_identity_changed() {
        let err = AdapterError::IdentityChanged {
            element: ElementKind::Vertex,
            document: "users/1".to_string(),
            field: "_key",
        };
        assert_eq!(
            err.to_string(),
            "vertex document hook changed '_key' of 'users/1'"
        );
    }

    #[test]
    fn test_error_from_core() {
        let core = CoreError::MissingField("_id".to_string());
        let err: AdapterError = core.into();
        assert!(matches!(err, AdapterError::Core(_)));
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_error_from_store() {
        let err: AdapterError = StoreError::CollectionNotFound("users".to_string()).into();
        assert!(matches!(err, AdapterError::Store(_)));
        assert!(err.to_string().contains("users"));
    }
}
