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

//! AQL statement types and builders.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::escape::quote_collection;

/// Query used to read one collection.
///
/// With `@explicit` set, each document keeps only the requested attributes plus
/// `_id`, and `_from`/`_to` when present.
pub const FETCH_QUERY: &str = "FOR doc IN @@collection \
RETURN @explicit \
? MERGE(KEEP(doc, @attributes), { _id: doc._id }, \
HAS(doc, \"_from\") ? { _from: doc._from, _to: doc._to } : {}) \
: doc";

/// A single AQL statement with bind variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqlStatement {
    /// The AQL query text.
    pub query: String,
    /// Bind variables. Collection parameters are keyed with a leading `@`.
    #[serde(rename = "bindVars")]
    pub bind_vars: BTreeMap<String, Value>,
    /// Cursor options passed to the store.
    pub options: BTreeMap<String, Value>,
    /// Optional comment describing the statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl AqlStatement {
    /// Create a new statement.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            bind_vars: BTreeMap::new(),
            options: BTreeMap::new(),
            comment: None,
        }
    }

    /// Bind a value parameter (`@name`).
    pub fn with_bind_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bind_vars.insert(name.into(), value.into());
        self
    }

    /// Bind a collection parameter (`@@name`).
    pub fn with_collection(mut self, name: &str, collection: impl Into<String>) -> Self {
        self.bind_vars
            .insert(format!("@{}", name), Value::String(collection.into()));
        self
    }

    /// Add cursor options.
    pub fn with_options(mut self, options: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.options.extend(options);
        self
    }

    /// Add a comment to this statement.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Check if this statement has bind variables.
    pub fn has_bind_vars(&self) -> bool {
        !self.bind_vars.is_empty()
    }

    /// Render this statement with bind variables substituted as literals.
    ///
    /// Meant for logs; clients send [`AqlStatement::query`] and
    /// [`AqlStatement::bind_vars`] separately.
    pub fn render_inline(&self) -> String {
        let mut result = self.query.clone();
        if !self.has_bind_vars() {
            return result;
        }
        // Collection parameters first so `@@name` is not consumed by `@name`.
        for (name, value) in self.bind_vars.iter().filter(|(n, _)| n.starts_with('@')) {
            let literal = match value {
                Value::String(collection) => quote_collection(collection),
                other => other.to_string(),
            };
            result = result.replace(&format!("@{}", name), &literal);
        }
        for (name, value) in self.bind_vars.iter().filter(|(n, _)| !n.starts_with('@')) {
            result = result.replace(&format!("@{}", name), &value.to_string());
        }
        result
    }
}

/// A request to read one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchRequest {
    /// Collection to read.
    pub collection: String,
    /// Attributes to keep when `explicit` is set.
    pub attributes: BTreeSet<String>,
    /// Project documents onto `attributes`.
    pub explicit: bool,
    /// Passthrough cursor options.
    pub options: BTreeMap<String, Value>,
}

impl FetchRequest {
    /// Request every document of a collection, unprojected.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Project onto these attributes.
    pub fn with_attributes(mut self, attributes: BTreeSet<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set whether to project.
    pub fn explicit(mut self, explicit: bool) -> Self {
        self.explicit = explicit;
        self
    }

    /// Add passthrough cursor options.
    pub fn with_options(mut self, options: BTreeMap<String, Value>) -> Self {
        self.options = options;
        self
    }

    /// The parameterized AQL for this request.
    pub fn to_aql(&self) -> AqlStatement {
        AqlStatement::new(FETCH_QUERY)
            .with_collection("collection", self.collection.clone())
            .with_bind_var(
                "attributes",
                self.attributes
                    .iter()
                    .cloned()
                    .map(Value::String)
                    .collect::<Vec<_>>(),
            )
            .with_bind_var("explicit", self.explicit)
            .with_options(self.options.clone())
            .with_comment(format!("fetch {}", self.collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_request_binds_parameters() {
        let request = FetchRequest::new("account")
            .with_attributes(BTreeSet::from(["Balance".to_string(), "rank".to_string()]))
            .explicit(true);
        let statement = request.to_aql();

        assert_eq!(statement.query, FETCH_QUERY);
        assert!(!statement.query.contains("account"));
        assert_eq!(statement.bind_vars["@collection"], json!("account"));
        assert_eq!(statement.bind_vars["attributes"], json!(["Balance", "rank"]));
        assert_eq!(statement.bind_vars["explicit"], json!(true));
        assert!(statement.has_bind_vars());
    }

    #[test]
    fn test_fetch_request_passes_options() {
        let mut options = BTreeMap::new();
        options.insert("batchSize".to_string(), json!(1000));
        let statement = FetchRequest::new("users").with_options(options).to_aql();
        assert_eq!(statement.options["batchSize"], json!(1000));
        assert_eq!(statement.comment.as_deref(), Some("fetch users"));
    }

    #[test]
    fn test_render_inline_without_bind_vars() {
        let statement = AqlStatement::new("RETURN LENGTH(users)");
        assert!(!statement.has_bind_vars());
        assert_eq!(statement.render_inline(), "RETURN LENGTH(users)");
    }

    #[test]
    fn test_render_inline() {
        let statement = FetchRequest::new("users")
            .with_attributes(BTreeSet::from(["name".to_string()]))
            .explicit(false)
            .to_aql();
        let rendered = statement.render_inline();
        assert!(rendered.starts_with("FOR doc IN `users` RETURN false"));
        assert!(rendered.contains("KEEP(doc, [\"name\"])"));
        assert!(!rendered.contains('@'));
    }

    #[test]
    fn test_statement_serializes_bind_vars_key() {
        let statement = AqlStatement::new("RETURN @x").with_bind_var("x", 1);
        let value = serde_json::to_value(&statement).unwrap();
        assert_eq!(value["bindVars"]["x"], json!(1));
        assert!(value.get("comment").is_none());
    }
}
