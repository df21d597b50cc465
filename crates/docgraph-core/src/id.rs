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

//! Identifiers on both sides of the mapping.
//!
//! | Side | Type | Shape |
//! |------|------|-------|
//! | Store | [`ExternalId`] | `"<collection>/<key>"` |
//! | Graph | [`NodeId`] | string, integer, float, boolean or tuple of those |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::key::{is_valid_key, normalize_tuple};

/// A document identifier in the external store, `"<collection>/<key>"`.
///
/// Both segments are non-empty, separated by exactly one `/`, and the key
/// only contains characters accepted by [`crate::key::is_valid_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId {
    collection: String,
    key: String,
}

impl ExternalId {
    /// Build an identifier from its two segments.
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        let key = key.into();
        let value = || format!("{}/{}", collection, key);

        if collection.is_empty() {
            return Err(CoreError::InvalidExternalId {
                value: value(),
                reason: "empty collection",
            });
        }
        if collection.contains('/') {
            return Err(CoreError::InvalidExternalId {
                value: value(),
                reason: "collection contains '/'",
            });
        }
        if !is_valid_key(&key) {
            return Err(CoreError::InvalidExternalId {
                value: value(),
                reason: "key is empty or contains characters outside the key alphabet",
            });
        }

        Ok(Self { collection, key })
    }

    /// Parse a `collection/key` string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((collection, key)) => Self::new(collection, key),
            None => Err(CoreError::InvalidExternalId {
                value: s.to_string(),
                reason: "missing '/' separator",
            }),
        }
    }

    /// The collection segment.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The key segment.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Split into `(collection, key)`.
    pub fn into_parts(self) -> (String, String) {
        (self.collection, self.key)
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

impl FromStr for ExternalId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ExternalId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExternalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A node identifier inside the in-memory graph.
///
/// Floats compare and hash by bit pattern so that every variant can key a
/// hash map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    /// Boolean identifier.
    Bool(bool),
    /// Integer identifier.
    Int(i64),
    /// Floating-point identifier.
    Float(f64),
    /// String identifier; graphs exported from the store use `collection/key`.
    Str(String),
    /// Fixed-order tuple of identifiers, e.g. grid coordinates.
    Tuple(Vec<NodeId>),
}

impl NodeId {
    /// Borrow the string form if this is a string identifier.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeId::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret a string identifier as a store document id.
    ///
    /// Returns `None` for non-string identifiers and for strings that are not
    /// `collection/key` shaped.
    pub fn as_external_id(&self) -> Option<ExternalId> {
        self.as_str().and_then(|s| ExternalId::parse(s).ok())
    }

    /// Flatten into a valid document key, normalizing away illegal characters.
    pub fn to_key(&self) -> String {
        match self {
            NodeId::Tuple(items) => normalize_tuple(items),
            other => normalize_tuple([other]),
        }
    }

    /// Convert a JSON value into a node id.
    ///
    /// Null and objects cannot identify a node.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(NodeId::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(NodeId::Int(i)),
                None => n
                    .as_f64()
                    .map(NodeId::Float)
                    .ok_or_else(|| CoreError::InvalidNodeId(n.to_string())),
            },
            Value::String(s) => Ok(NodeId::Str(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(NodeId::from_json)
                .collect::<Result<Vec<_>>>()
                .map(NodeId::Tuple),
            Value::Null => Err(CoreError::InvalidNodeId("null".to_string())),
            Value::Object(_) => Err(CoreError::InvalidNodeId("object".to_string())),
        }
    }

    /// Convert into a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            NodeId::Bool(b) => Value::Bool(*b),
            NodeId::Int(i) => Value::from(*i),
            NodeId::Float(f) => Value::from(*f),
            NodeId::Str(s) => Value::String(s.clone()),
            NodeId::Tuple(items) => Value::Array(items.iter().map(NodeId::to_json).collect()),
        }
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeId::Bool(a), NodeId::Bool(b)) => a == b,
            (NodeId::Int(a), NodeId::Int(b)) => a == b,
            (NodeId::Float(a), NodeId::Float(b)) => a.to_bits() == b.to_bits(),
            (NodeId::Str(a), NodeId::Str(b)) => a == b,
            (NodeId::Tuple(a), NodeId::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            NodeId::Bool(b) => b.hash(state),
            NodeId::Int(i) => i.hash(state),
            NodeId::Float(f) => f.to_bits().hash(state),
            NodeId::Str(s) => s.hash(state),
            NodeId::Tuple(items) => items.hash(state),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Bool(b) => write!(f, "{}", b),
            NodeId::Int(i) => write!(f, "{}", i),
            NodeId::Float(x) => write!(f, "{}", x),
            NodeId::Str(s) => f.write_str(s),
            NodeId::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<&str> for NodeId {
    fn from(v: &str) -> Self {
        NodeId::Str(v.to_string())
    }
}

impl From<String> for NodeId {
    fn from(v: String) -> Self {
        NodeId::Str(v)
    }
}

impl From<&ExternalId> for NodeId {
    fn from(v: &ExternalId) -> Self {
        NodeId::Str(v.to_string())
    }
}

impl From<ExternalId> for NodeId {
    fn from(v: ExternalId) -> Self {
        NodeId::Str(v.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(v: i64) -> Self {
        NodeId::Int(v)
    }
}

impl From<i32> for NodeId {
    fn from(v: i32) -> Self {
        NodeId::Int(i64::from(v))
    }
}

/// Values above `i64::MAX` become their decimal string rather than wrapping.
impl From<usize> for NodeId {
    fn from(v: usize) -> Self {
        i64::try_from(v)
            .map(NodeId::Int)
            .unwrap_or_else(|_| NodeId::Str(v.to_string()))
    }
}

impl From<f64> for NodeId {
    fn from(v: f64) -> Self {
        NodeId::Float(v)
    }
}

impl From<bool> for NodeId {
    fn from(v: bool) -> Self {
        NodeId::Bool(v)
    }
}

impl From<Vec<NodeId>> for NodeId {
    fn from(v: Vec<NodeId>) -> Self {
        NodeId::Tuple(v)
    }
}

impl<A: Into<NodeId>, B: Into<NodeId>> From<(A, B)> for NodeId {
    fn from((a, b): (A, B)) -> Self {
        NodeId::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<NodeId>, B: Into<NodeId>, C: Into<NodeId>> From<(A, B, C)> for NodeId {
    fn from((a, b, c): (A, B, C)) -> Self {
        NodeId::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize_fits_i64() {
        assert_eq!(NodeId::from(7usize), NodeId::Int(7));
        assert_eq!(NodeId::from(i64::MAX as usize), NodeId::Int(i64::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_from_usize_above_i64_does_not_wrap() {
        let id = NodeId::from(usize::MAX);
        assert_eq!(id, NodeId::Str(usize::MAX.to_string()));
        assert_eq!(id.to_key(), "18446744073709551615");
    }
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_external_id_parse() {
        let id = ExternalId::parse("users/alice").unwrap();
        assert_eq!(id.collection(), "users");
        assert_eq!(id.key(), "alice");
        assert_eq!(id.to_string(), "users/alice");
    }

    #[test]
    fn test_external_id_rejects_malformed() {
        assert!(ExternalId::parse("users").is_err());
        assert!(ExternalId::parse("/alice").is_err());
        assert!(ExternalId::parse("users/").is_err());
        assert!(ExternalId::parse("users/a/b").is_err());
        assert!(ExternalId::parse("users/a b").is_err());
    }

    #[test]
    fn test_external_id_serde() {
        let id = ExternalId::new("Node", "7").unwrap();
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, json!("Node/7"));
        let back: ExternalId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_value::<ExternalId>(json!("nope")).is_err());
    }

    #[test]
    fn test_node_id_from_json() {
        assert_eq!(NodeId::from_json(&json!("a/1")).unwrap(), NodeId::from("a/1"));
        assert_eq!(NodeId::from_json(&json!(5)).unwrap(), NodeId::Int(5));
        assert_eq!(NodeId::from_json(&json!(2.5)).unwrap(), NodeId::Float(2.5));
        assert_eq!(NodeId::from_json(&json!(true)).unwrap(), NodeId::Bool(true));
        assert_eq!(NodeId::from_json(&json!([1, 2])).unwrap(), NodeId::from((1, 2)));
        assert!(NodeId::from_json(&json!(null)).is_err());
        assert!(NodeId::from_json(&json!({"a": 1})).is_err());
    }

    #[test]
    fn test_node_id_json_roundtrip_tuple() {
        let id = NodeId::from((0, "x"));
        assert_eq!(NodeId::from_json(&id.to_json()).unwrap(), id);
    }

    #[test]
    fn test_node_id_hash_distinguishes_variants() {
        let mut map = HashMap::new();
        map.insert(NodeId::Int(1), "int");
        map.insert(NodeId::from("1"), "str");
        map.insert(NodeId::Float(1.0), "float");
        map.insert(NodeId::Bool(true), "bool");
        map.insert(NodeId::from((1, 1)), "tuple");
        assert_eq!(map.len(), 5);
        assert_eq!(map[&NodeId::Float(1.0)], "float");
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::from((3, 4)).to_string(), "(3, 4)");
        assert_eq!(NodeId::from("Node/1").to_string(), "Node/1");
        assert_eq!(NodeId::Int(-2).to_string(), "-2");
    }

    #[test]
    fn test_node_id_to_key() {
        assert_eq!(NodeId::from((3, 4)).to_key(), "34");
        assert_eq!(NodeId::from("Big Red").to_key(), "BigRed");
        assert_eq!(NodeId::Int(-2).to_key(), "-2");
    }

    #[test]
    fn test_node_id_as_external_id() {
        let id = NodeId::from("Person/bob");
        assert_eq!(id.as_external_id().unwrap().collection(), "Person");
        assert!(NodeId::from("bob").as_external_id().is_none());
        assert!(NodeId::Int(1).as_external_id().is_none());
    }
}
