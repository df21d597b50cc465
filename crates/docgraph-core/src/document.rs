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

//! Store documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::error::{CoreError, Result};
use crate::id::ExternalId;

/// Attribute map carried by documents, graph nodes and graph edges.
pub type Attributes = Map<String, Value>;

/// Identity field holding the `collection/key` id.
pub const ID_FIELD: &str = "_id";
/// Identity field holding the key within the collection.
pub const KEY_FIELD: &str = "_key";
/// Edge field holding the source vertex id.
pub const FROM_FIELD: &str = "_from";
/// Edge field holding the target vertex id.
pub const TO_FIELD: &str = "_to";

/// A document: an attribute map that carries `_id` once materialized.
///
/// Edge documents additionally carry `_from` and `_to`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Attributes);

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from an attribute map.
    pub fn from_attributes(attributes: Attributes) -> Self {
        Self(attributes)
    }

    /// Create a document from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::InvalidDocument(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Add an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Get an attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Set an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Whether the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.0
    }

    /// Mutably borrow the attribute map.
    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.0
    }

    /// Consume into the attribute map.
    pub fn into_attributes(self) -> Attributes {
        self.0
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// The raw `_id` string.
    pub fn id(&self) -> Option<&str> {
        self.str_field(ID_FIELD)
    }

    /// The raw `_key` string.
    pub fn key(&self) -> Option<&str> {
        self.str_field(KEY_FIELD)
    }

    /// The raw `_from` string.
    pub fn from_vertex(&self) -> Option<&str> {
        self.str_field(FROM_FIELD)
    }

    /// The raw `_to` string.
    pub fn to_vertex(&self) -> Option<&str> {
        self.str_field(TO_FIELD)
    }

    /// Parse `_id` as a document id.
    pub fn external_id(&self) -> Result<ExternalId> {
        let id = self
            .id()
            .ok_or_else(|| CoreError::MissingField(ID_FIELD.to_string()))?;
        ExternalId::parse(id)
    }

    /// Whether the document carries both edge endpoints.
    pub fn is_edge(&self) -> bool {
        self.from_vertex().is_some() && self.to_vertex().is_some()
    }

    /// Keep only the named attributes plus the identity fields.
    ///
    /// `_id` is always retained; `_from`/`_to` are retained when the document
    /// is an edge.
    pub fn project(&self, keep: &BTreeSet<String>) -> Document {
        let is_edge = self.is_edge();
        let projected = self
            .0
            .iter()
            .filter(|(name, _)| {
                keep.contains(name.as_str())
                    || name.as_str() == ID_FIELD
                    || (is_edge && (name.as_str() == FROM_FIELD || name.as_str() == TO_FIELD))
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Document(projected)
    }
}

impl From<Attributes> for Document {
    fn from(attributes: Attributes) -> Self {
        Self(attributes)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.0)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keep(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_document_builder_and_accessors() {
        let doc = Document::new()
            .with(ID_FIELD, "users/alice")
            .with(KEY_FIELD, "alice")
            .with("age", 30);

        assert_eq!(doc.id(), Some("users/alice"));
        assert_eq!(doc.key(), Some("alice"));
        assert_eq!(doc.get("age"), Some(&json!(30)));
        assert!(!doc.is_edge());
        assert_eq!(doc.external_id().unwrap().collection(), "users");
    }

    #[test]
    fn test_document_missing_id() {
        let doc = Document::new().with("name", "x");
        assert_eq!(
            doc.external_id().unwrap_err(),
            CoreError::MissingField("_id".to_string())
        );
    }

    #[test]
    fn test_project_vertex() {
        let doc = Document::new()
            .with(ID_FIELD, "users/alice")
            .with(KEY_FIELD, "alice")
            .with("a", 1)
            .with("b", 2)
            .with("c", 3);

        let projected = doc.project(&keep(&["a", "b", "missing"]));
        assert_eq!(projected.len(), 3);
        assert!(projected.contains(ID_FIELD));
        assert!(projected.contains("a"));
        assert!(projected.contains("b"));
        assert!(!projected.contains("c"));
        assert!(!projected.contains(KEY_FIELD));
    }

    #[test]
    fn test_project_edge_keeps_endpoints() {
        let doc = Document::new()
            .with(ID_FIELD, "knows/1")
            .with(FROM_FIELD, "users/a")
            .with(TO_FIELD, "users/b")
            .with("since", 2020);

        let projected = doc.project(&BTreeSet::new());
        assert_eq!(projected.from_vertex(), Some("users/a"));
        assert_eq!(projected.to_vertex(), Some("users/b"));
        assert!(!projected.contains("since"));
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Document::from_value(json!({"_id": "a/b"})).is_ok());
        assert!(Document::from_value(json!([1, 2])).is_err());
    }
}
