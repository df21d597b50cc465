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

//! Key normalization.
//!
//! Document keys accept ASCII letters and digits plus a fixed punctuation set.
//! The helpers here turn arbitrary strings and tuple-shaped node identifiers
//! into keys the store accepts by dropping every other character.
//!
//! # Examples
//!
//! ```
//! use docgraph_core::key::{normalize_string, normalize_tuple};
//!
//! assert_eq!(normalize_string("a/b c!d"), "abc!d");
//! assert_eq!(normalize_tuple([3, 4]), "34");
//! ```

use std::borrow::Cow;
use std::fmt::Display;

/// Punctuation characters allowed in a document key besides ASCII alphanumerics.
pub const KEY_PUNCTUATION: [char; 16] = [
    '_', '-', ':', '.', '@', '(', ')', '+', ',', '=', ';', '$', '!', '*', '\'', '%',
];

/// Check whether a single character may appear in a document key.
#[inline]
pub fn is_valid_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || KEY_PUNCTUATION.contains(&c)
}

/// Check whether a string is a non-empty, fully valid document key.
pub fn is_valid_key(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_valid_key_char)
}

/// Drop every character that is not allowed in a document key.
///
/// Returns `Cow::Borrowed` when the input is already clean.
pub fn normalize_string(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_valid_key_char) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(s.chars().filter(|c| is_valid_key_char(*c)).collect())
}

/// Concatenate the string form of each element and normalize the result.
///
/// Used for node identifiers that are tuples, e.g. grid coordinates `(3, 4)`
/// become the key `"34"`.
pub fn normalize_tuple<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let joined: String = values.into_iter().map(|v| v.to_string()).collect();
    normalize_string(&joined).into_owned()
}
