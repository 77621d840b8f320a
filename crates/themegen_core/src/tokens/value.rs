//! Leaf token values

use std::fmt::{self, Display, Formatter};

use serde::{Serialize, Serializer};

/// A leaf of a token tree
///
/// Lists are leaves too: the flattener never descends into them, even when
/// they hold objects.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<serde_json::Value>),
}

impl TokenValue {
    /// Render a list leaf with a custom separator.
    ///
    /// Non-list values render the same way as their `Display` form.
    pub fn join(&self, sep: &str) -> String {
        match self {
            Self::List(items) => join_json(items, sep),
            other => other.to_string(),
        }
    }
}

/// String form used for theme.json values.
///
/// Numbers print without a trailing `.0`, null prints empty and lists are
/// comma-joined.
impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(n) => f.write_str(&format_float(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => Ok(()),
            Self::List(items) => f.write_str(&join_json(items, ",")),
        }
    }
}

impl Serialize for TokenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
            Self::List(items) => serializer.collect_seq(items),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for TokenValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for TokenValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&TokenValue> for serde_json::Value {
    fn from(value: &TokenValue) -> Self {
        match value {
            TokenValue::Str(s) => serde_json::Value::String(s.clone()),
            TokenValue::Int(i) => serde_json::Value::from(*i),
            TokenValue::Float(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            TokenValue::Bool(b) => serde_json::Value::Bool(*b),
            TokenValue::Null => serde_json::Value::Null,
            TokenValue::List(items) => serde_json::Value::Array(items.clone()),
        }
    }
}

pub(crate) fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

fn join_json(items: &[serde_json::Value], sep: &str) -> String {
    items
        .iter()
        .map(|item| render_json(item, sep))
        .collect::<Vec<_>>()
        .join(sep)
}

fn render_json(value: &serde_json::Value, sep: &str) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(format_float).unwrap_or_default()
            }
        }
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => join_json(items, sep),
        // Objects inside lists have no natural string form; compact JSON keeps them readable.
        object @ serde_json::Value::Object(_) => object.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn numbers_render_like_css_values() {
        assert_eq!(TokenValue::Int(16).to_string(), "16");
        assert_eq!(TokenValue::Float(16.0).to_string(), "16");
        assert_eq!(TokenValue::Float(1.5).to_string(), "1.5");
        assert_eq!(TokenValue::Float(-0.0).to_string(), "0");
        assert_eq!(TokenValue::Float(0.125).to_string(), "0.125");
    }

    #[test]
    fn null_and_bool_render() {
        assert_eq!(TokenValue::Null.to_string(), "");
        assert_eq!(TokenValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn lists_join_with_commas() {
        let fonts = TokenValue::List(vec![json!("Inter"), json!("sans-serif")]);
        assert_eq!(fonts.to_string(), "Inter,sans-serif");
        assert_eq!(fonts.join(", "), "Inter, sans-serif");
    }

    #[test]
    fn nested_lists_flatten_and_objects_stay_json() {
        let value = TokenValue::List(vec![
            json!(["1rem", { "lineHeight": "1.5" }]),
            json!(null),
            json!(2),
        ]);
        assert_eq!(value.to_string(), r#"1rem,{"lineHeight":"1.5"},,2"#);
    }

    #[test]
    fn converts_to_json() {
        assert_eq!(serde_json::Value::from(&TokenValue::Int(3)), json!(3));
        assert_eq!(
            serde_json::Value::from(&TokenValue::Float(f64::NAN)),
            serde_json::Value::Null
        );
        assert_eq!(
            serde_json::Value::from(&TokenValue::List(vec![json!("a")])),
            json!(["a"])
        );
    }
}
