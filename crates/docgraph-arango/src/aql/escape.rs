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

//! Collection name validation and AQL quoting.

use crate::error::{AdapterError, Result};
use std::borrow::Cow;

/// Maximum length of a collection name, in bytes.
pub const MAX_COLLECTION_NAME_LENGTH: usize = 256;

/// Check if a string is a valid collection name.
///
/// Valid names start with a letter or underscore, continue with letters,
/// digits, underscores or hyphens, and are at most
/// [`MAX_COLLECTION_NAME_LENGTH`] bytes long.
pub fn is_valid_collection_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_COLLECTION_NAME_LENGTH {
        return false;
    }

    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return false;
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Validate and return a collection name, or error if invalid.
pub fn validate_collection_name(name: &str) -> Result<&str> {
    if is_valid_collection_name(name) {
        Ok(name)
    } else {
        Err(AdapterError::InvalidCollectionName(name.to_string()))
    }
}

/// Quote a collection name with backticks for inline AQL.
///
/// Valid names never contain backticks, so they come back unchanged inside the
/// quotes; anything else has its backticks and backslashes escaped.
pub fn quote_collection(name: &str) -> String {
    format!("`{}`", escape_backticks(name))
}

fn escape_backticks(s: &str) -> Cow<'_, str> {
    if !s.contains(['`', '\\']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        match c {
            '`' => escaped.push_str("\\`"),
            '\\' => escaped.push_str("\\\\"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
