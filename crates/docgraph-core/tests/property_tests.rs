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

//! Property-based tests for key normalization and identifiers.

use docgraph_core::key::{is_valid_key_char, normalize_string, normalize_tuple};
use docgraph_core::{ExternalId, NodeId};
use proptest::prelude::*;

proptest! {
    /// Normalized strings only contain key characters.
    #[test]
    fn prop_normalize_output_is_key_alphabet(s in ".*") {
        let normalized = normalize_string(&s);
        prop_assert!(normalized.chars().all(is_valid_key_char));
    }

    /// Normalization drops characters but never reorders or invents them.
    #[test]
    fn prop_normalize_is_subsequence(s in ".*") {
        let normalized = normalize_string(&s);
        let expected: String = s.chars().filter(|c| is_valid_key_char(*c)).collect();
        prop_assert_eq!(normalized.as_ref(), expected.as_str());
    }

    /// Normalizing twice changes nothing.
    #[test]
    fn prop_normalize_idempotent(s in ".*") {
        let once = normalize_string(&s).into_owned();
        let twice = normalize_string(&once).into_owned();
        prop_assert_eq!(once, twice);
    }

    /// Grid coordinates flatten to the concatenated digits.
    #[test]
    fn prop_tuple_key_concatenates(a in 0u32..1000, b in 0u32..1000) {
        prop_assert_eq!(normalize_tuple([a, b]), format!("{}{}", a, b));
        prop_assert_eq!(NodeId::from((a as i64, b as i64)).to_key(), format!("{}{}", a, b));
    }

    /// Any normalized non-empty key forms a valid document id.
    #[test]
    fn prop_normalized_key_builds_external_id(s in ".*") {
        let key = normalize_string(&s);
        prop_assume!(!key.is_empty());
        let id = ExternalId::new("Node", key.as_ref()).unwrap();
        prop_assert_eq!(ExternalId::parse(&id.to_string()).unwrap(), id);
    }
}
