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

//! AQL query building utilities.
//!
//! Queries are sent as constant text plus bind variables; collection names
//! are never spliced into query text.

pub mod escape;
pub mod statements;

pub use escape::{
    is_valid_collection_name, quote_collection, validate_collection_name,
    MAX_COLLECTION_NAME_LENGTH,
};
pub use statements::{AqlStatement, FetchRequest, FETCH_QUERY};
