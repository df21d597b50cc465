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

//! Error types for the DocGraph data model.

use thiserror::Error;

/// Error type for identifier and document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A string is not a well-formed `collection/key` document identifier.
    #[error("invalid document id '{value}': {reason}")]
    InvalidExternalId {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// A JSON value cannot be used as a graph node identifier.
    #[error("invalid node id: {0}")]
    InvalidNodeId(String),

    /// A value cannot be used as a document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A document lacks a field the operation requires.
    #[error("document is missing required field '{0}'")]
    MissingField(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
