//! Theme template rendering
//!
//! A template is an ordinary theme.json body in which two kinds of directive
//! objects are replaced with token data:
//!
//! ```json
//! { "$transform": "palette", "tokens": "theme.extend.colors", "only": ["blue", "teal"] }
//! { "$token": "theme.extend.fontFamily.sans", "join": "," }
//! ```
//!
//! `$transform` runs the token transform engine on the group at `tokens`.
//! `$token` copies the raw token value at the given path. A `$token` whose path
//! does not exist is dropped from its parent object (or becomes `null` inside
//! an array).

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use themegen_core::{transform, AllowList, OutputKind, ParseKindError, TokenTree};

const TRANSFORM_KEY: &str = "$transform";
const TOKEN_KEY: &str = "$token";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid directive at `{at}`: {reason}")]
    InvalidDirective { at: String, reason: String },

    #[error("unknown transform at `{at}`")]
    UnknownKind {
        at: String,
        #[source]
        source: ParseKindError,
    },

    #[error("theme template must be an object at the top level")]
    NotAnObject,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransformDirective {
    #[serde(rename = "$transform")]
    kind: String,
    #[serde(default)]
    tokens: String,
    #[serde(default)]
    only: AllowList,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TokenDirective {
    #[serde(rename = "$token")]
    path: String,
    #[serde(default)]
    join: Option<String>,
}

/// Render a template against a token tree.
///
/// The top level must be an object; the result is the rendered object.
pub fn render(template: &Value, tokens: &TokenTree) -> Result<Map<String, Value>, TemplateError> {
    if !template.is_object() {
        return Err(TemplateError::NotAnObject);
    }
    match resolve(template, tokens, "")? {
        Some(Value::Object(body)) => Ok(body),
        // The root can only disappear if it is itself a directive.
        _ => Err(TemplateError::NotAnObject),
    }
}

fn resolve(value: &Value, tokens: &TokenTree, at: &str) -> Result<Option<Value>, TemplateError> {
    match value {
        Value::Object(map) if map.contains_key(TRANSFORM_KEY) => {
            resolve_transform(value, tokens, at).map(Some)
        }
        Value::Object(map) if map.contains_key(TOKEN_KEY) => resolve_token(value, tokens, at),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let child_at = format!("{at}/{}", escape_pointer(key));
                if let Some(resolved) = resolve(child, tokens, &child_at)? {
                    out.insert(key.clone(), resolved);
                }
            }
            Ok(Some(Value::Object(out)))
        }
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let resolved = resolve(item, tokens, &format!("{at}/{i}"))?;
                out.push(resolved.unwrap_or(Value::Null));
            }
            Ok(Some(Value::Array(out)))
        }
        other => Ok(Some(other.clone())),
    }
}

fn resolve_transform(value: &Value, tokens: &TokenTree, at: &str) -> Result<Value, TemplateError> {
    let directive: TransformDirective = parse_directive(value, at)?;
    let kind: OutputKind = directive
        .kind
        .parse()
        .map_err(|source| TemplateError::UnknownKind {
            at: display_at(at),
            source,
        })?;

    let data = tokens.get_path(&directive.tokens);
    if data.is_none() {
        tracing::warn!(
            "no tokens at `{}` for {} at `{}`, writing false",
            directive.tokens,
            kind,
            display_at(at)
        );
    }

    let out = transform(kind, data, &directive.only);
    tracing::debug!("{} at `{}`: {} entries", kind, display_at(at), out.len());
    serde_json::to_value(&out).map_err(|e| TemplateError::InvalidDirective {
        at: display_at(at),
        reason: e.to_string(),
    })
}

fn resolve_token(value: &Value, tokens: &TokenTree, at: &str) -> Result<Option<Value>, TemplateError> {
    let directive: TokenDirective = parse_directive(value, at)?;
    let Some(node) = tokens.get_path(&directive.path) else {
        tracing::warn!(
            "no token at `{}`, dropping `{}`",
            directive.path,
            display_at(at)
        );
        return Ok(None);
    };

    match (directive.join, node) {
        (None, node) => Ok(Some(Value::from(node))),
        (Some(sep), TokenTree::Leaf(leaf)) => Ok(Some(Value::String(leaf.join(&sep)))),
        (Some(_), TokenTree::Group(_)) => Err(TemplateError::InvalidDirective {
            at: display_at(at),
            reason: format!("`join` needs a list token but `{}` is a group", directive.path),
        }),
    }
}

fn parse_directive<T: for<'de> Deserialize<'de>>(value: &Value, at: &str) -> Result<T, TemplateError> {
    T::deserialize(value).map_err(|e| TemplateError::InvalidDirective {
        at: display_at(at),
        reason: e.to_string(),
    })
}

fn display_at(at: &str) -> String {
    if at.is_empty() {
        "/".to_string()
    } else {
        at.to_string()
    }
}

/// JSON pointer escaping (RFC 6901)
fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
