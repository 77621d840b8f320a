//! Token tree flattening
//!
//! Collapses a nested [`TokenTree`] into a single-level [`FlatTokens`] map whose
//! keys are the ancestor path joined with [`DELIMITER`]:
//!
//! ```text
//! colors.red        -> colors-red
//! colors.blue.light -> colors-blue-light
//! ```
//!
//! Keys are not escaped. A key that already contains `-` can land on the same
//! flat key as a deeper path; the later value wins and keeps the earlier
//! position.
//!
//! Null tokens carry no value and are left out.

use indexmap::IndexMap;

use crate::tokens::{TokenGroup, TokenTree, TokenValue};

/// Separator between path segments in a flat key
pub const DELIMITER: char = '-';

/// Single-level token map, in flattening order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatTokens {
    entries: IndexMap<String, TokenValue>,
}

impl FlatTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TokenValue> {
        self.entries.get(key)
    }

    /// Insert a value, returning the one it replaced.
    ///
    /// A replaced key keeps its earlier position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TokenValue>) -> Option<TokenValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<TokenValue>> FromIterator<(K, V)> for FlatTokens {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flat = FlatTokens::new();
        for (key, value) in iter {
            flat.insert(key, value);
        }
        flat
    }
}

/// Flatten a token tree.
///
/// A root that is not a group is treated as a single leaf under the empty key.
pub fn flatten(tree: &TokenTree) -> FlatTokens {
    let mut flat = FlatTokens::new();
    match tree {
        TokenTree::Group(group) => flatten_into(group, "", &mut flat),
        TokenTree::Leaf(TokenValue::Null) => {}
        TokenTree::Leaf(value) => {
            flat.insert(String::new(), value.clone());
        }
    }
    flat
}

fn flatten_into(group: &TokenGroup, parent: &str, out: &mut FlatTokens) {
    for (key, child) in group {
        let path = compose_key(parent, key);
        match child {
            TokenTree::Group(nested) => flatten_into(nested, &path, out),
            TokenTree::Leaf(TokenValue::Null) => {
                tracing::trace!(key = %path, "skipping null token");
            }
            TokenTree::Leaf(value) => {
                if out.insert(path.as_str(), value.clone()).is_some() {
                    tracing::debug!(key = %path, "flattened token key collides with an earlier path, keeping the later value");
                }
            }
        }
    }
}

fn compose_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + 1 + key.len());
        path.push_str(parent);
        path.push(DELIMITER);
        path.push_str(key);
        path
    }
}
