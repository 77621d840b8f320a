//! Nested token trees
//!
//! A token tree is what a utility-CSS config hands over once it has been
//! deserialized: groups of named tokens nested to any depth, e.g.
//!
//! ```text
//! colors:
//!   red: "#ff0000"
//!   blue:
//!     light: "#aaf"
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Serialize, Serializer};

use super::TokenValue;

/// Field name the `toml` deserializer wraps datetimes in
const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

/// Named children of a group, in source order
pub type TokenGroup = IndexMap<String, TokenTree>;

/// A node of a token tree
#[derive(Clone, Debug, PartialEq)]
pub enum TokenTree {
    Leaf(TokenValue),
    Group(TokenGroup),
}

impl TokenTree {
    /// An empty group
    pub fn empty() -> Self {
        Self::Group(TokenGroup::new())
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn as_group(&self) -> Option<&TokenGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&TokenValue> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Group(_) => None,
        }
    }

    /// Direct child lookup. Leaves have no children.
    pub fn get(&self, key: &str) -> Option<&TokenTree> {
        self.as_group().and_then(|group| group.get(key))
    }

    /// Look up a node by a dotted path such as `theme.extend.colors`.
    ///
    /// The empty path addresses the node itself.
    pub fn get_path(&self, path: &str) -> Option<&TokenTree> {
        let path = path.trim();
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| node.get(segment))
    }

    /// Number of leaves below this node (a leaf counts itself)
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(group) => group.values().map(TokenTree::leaf_count).sum(),
        }
    }
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<TokenValue> for TokenTree {
    fn from(value: TokenValue) -> Self {
        Self::Leaf(value)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TokenTree {
                fn from(value: $ty) -> Self {
                    Self::Leaf(TokenValue::from(value))
                }
            }
        )*
    };
}

leaf_from!(&str, String, i64, f64, bool);

impl From<TokenGroup> for TokenTree {
    fn from(group: TokenGroup) -> Self {
        Self::Group(group)
    }
}

impl From<serde_json::Value> for TokenTree {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Leaf(TokenValue::Null),
            serde_json::Value::Bool(b) => Self::Leaf(TokenValue::Bool(b)),
            serde_json::Value::Number(n) => Self::Leaf(number_value(&n)),
            serde_json::Value::String(s) => Self::Leaf(TokenValue::Str(s)),
            serde_json::Value::Array(items) => Self::Leaf(TokenValue::List(items)),
            serde_json::Value::Object(map) => Self::Group(
                map.into_iter()
                    .map(|(key, child)| (key, TokenTree::from(child)))
                    .collect(),
            ),
        }
    }
}

impl From<&TokenTree> for serde_json::Value {
    fn from(tree: &TokenTree) -> Self {
        match tree {
            TokenTree::Leaf(value) => serde_json::Value::from(value),
            TokenTree::Group(group) => serde_json::Value::Object(
                group
                    .iter()
                    .map(|(key, child)| (key.clone(), serde_json::Value::from(child)))
                    .collect(),
            ),
        }
    }
}

fn number_value(n: &serde_json::Number) -> TokenValue {
    if let Some(i) = n.as_i64() {
        TokenValue::Int(i)
    } else {
        TokenValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Serialize for TokenTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Group(group) => serializer.collect_map(group),
        }
    }
}

impl<'de> Deserialize<'de> for TokenTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TokenTreeVisitor)
    }
}

/// Builds trees straight from the source document so key order survives
/// whatever map type the format would otherwise pick.
struct TokenTreeVisitor;

impl<'de> Visitor<'de> for TokenTreeVisitor {
    type Value = TokenTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a token value, list or group")
    }

    fn visit_bool<E>(self, v: bool) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Bool(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Int(v)))
    }

    fn visit_u64<E>(self, v: u64) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(match i64::try_from(v) {
            Ok(i) => TokenValue::Int(i),
            Err(_) => TokenValue::Float(v as f64),
        }))
    }

    fn visit_f64<E>(self, v: f64) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Float(v)))
    }

    fn visit_str<E>(self, v: &str) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Str(v.to_string())))
    }

    fn visit_string<E>(self, v: String) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Str(v)))
    }

    fn visit_unit<E>(self) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Null))
    }

    fn visit_none<E>(self) -> Result<TokenTree, E> {
        Ok(TokenTree::Leaf(TokenValue::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<TokenTree, D::Error> {
        TokenTree::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TokenTree, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<serde_json::Value>()? {
            items.push(item);
        }
        Ok(TokenTree::Leaf(TokenValue::List(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TokenTree, A::Error> {
        let mut group = TokenGroup::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, child)) = map.next_entry::<String, TokenTree>()? {
            group.insert(key, child);
        }
        // TOML datetimes arrive as a one-field map holding their string form.
        if group.len() == 1
            && matches!(
                group.get(TOML_DATETIME_FIELD),
                Some(TokenTree::Leaf(TokenValue::Str(_)))
            )
        {
            if let Some((_, stamp)) = group.pop() {
                return Ok(stamp);
            }
        }
        Ok(TokenTree::Group(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> TokenTree {
        TokenTree::from(json!({
            "theme": {
                "extend": {
                    "colors": { "red": "#ff0000", "blue": { "light": "#aaf" } },
                    "fontFamily": { "sans": ["Inter", "sans-serif"] }
                }
            }
        }))
    }

    #[test]
    fn dotted_path_lookup() {
        let tree = sample();
        assert_eq!(
            tree.get_path("theme.extend.colors.red"),
            Some(&TokenTree::from("#ff0000"))
        );
        assert!(tree.get_path("theme.extend.colors").unwrap().is_group());
        assert_eq!(tree.get_path(""), Some(&tree));
        assert_eq!(tree.get_path("theme.missing"), None);
        // Leaves have no children.
        assert_eq!(tree.get_path("theme.extend.colors.red.dark"), None);
    }

    #[test]
    fn lists_stay_leaves() {
        let tree = sample();
        let sans = tree.get_path("theme.extend.fontFamily.sans").unwrap();
        assert_eq!(
            sans.as_leaf(),
            Some(&TokenValue::List(vec![json!("Inter"), json!("sans-serif")]))
        );
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn deserialize_keeps_source_order() {
        let tree: TokenTree = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = tree.as_group().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn deserialize_scalars() {
        let tree: TokenTree =
            serde_json::from_str(r#"{"a": 1.5, "b": true, "c": null, "d": 18446744073709551615}"#)
                .unwrap();
        assert_eq!(tree.get("a"), Some(&TokenTree::from(1.5)));
        assert_eq!(tree.get("b"), Some(&TokenTree::from(true)));
        assert_eq!(tree.get("c"), Some(&TokenTree::Leaf(TokenValue::Null)));
        assert!(matches!(
            tree.get("d"),
            Some(TokenTree::Leaf(TokenValue::Float(_)))
        ));
    }

    #[test]
    fn round_trips_through_json_value() {
        let tree = sample();
        let value = serde_json::Value::from(&tree);
        assert_eq!(TokenTree::from(value), tree);
        assert_eq!(serde_json::to_value(&tree).unwrap(), serde_json::Value::from(&tree));
    }

    #[test]
    fn toml_datetimes_are_string_leaves() {
        let tree: TokenTree = toml::from_str("[meta]\nbuilt = 1979-05-27T07:32:00Z\n").unwrap();
        assert_eq!(
            tree.get_path("meta.built"),
            Some(&TokenTree::from("1979-05-27T07:32:00Z"))
        );
        assert_eq!(tree.leaf_count(), 1);
    }
}
