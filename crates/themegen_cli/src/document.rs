//! theme.json document assembly and output

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;

/// Indentation used for every JSON file themegen writes
const INDENT: &[u8] = b"   ";

/// A complete theme.json document
///
/// `$schema` and `version` always come first. Template keys of the same name
/// replace their values but not their position.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    body: Map<String, Value>,
}

impl ThemeDocument {
    pub fn new(schema: &str, version: u32, template: Map<String, Value>) -> Self {
        let mut body = Map::with_capacity(template.len() + 2);
        body.insert("$schema".to_string(), Value::String(schema.to_string()));
        body.insert("version".to_string(), Value::from(version));
        for (key, value) in template {
            body.insert(key, value);
        }
        Self { body }
    }

    #[cfg(test)]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn to_json(&self) -> Result<String> {
        to_pretty_json(&self.body)
    }

    /// Write the document to `target`, replacing any existing file atomically.
    pub fn write(&self, target: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(target, json.as_bytes())
    }
}

/// Pretty JSON with three-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .context("Failed to serialize theme.json")?;
    String::from_utf8(buf).context("theme.json is not valid UTF-8")
}

/// Write through a temp file in the target directory and rename it into
/// place, so readers never see a half-written file.
fn write_atomic(target: &Path, contents: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;

    fn template(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("template must be an object"),
        }
    }

    #[test]
    fn metadata_comes_first() {
        let doc = ThemeDocument::new(
            "https://schemas.wp.org/trunk/theme.json",
            2,
            template(json!({ "settings": { "appearanceTools": true } })),
        );
        let keys: Vec<&String> = doc.as_map().keys().collect();
        assert_eq!(keys, vec!["$schema", "version", "settings"]);
    }

    #[test]
    fn template_overrides_keep_position() {
        let doc = ThemeDocument::new(
            "https://example.test/schema.json",
            2,
            template(json!({ "styles": {}, "version": 3 })),
        );
        let keys: Vec<&String> = doc.as_map().keys().collect();
        assert_eq!(keys, vec!["$schema", "version", "styles"]);
        assert_eq!(doc.as_map()["version"], json!(3));
    }

    #[test]
    fn three_space_indent() {
        let doc = ThemeDocument::new("s", 2, template(json!({ "settings": { "a": [] } })));
        assert_eq!(
            doc.to_json().unwrap(),
            "{\n   \"$schema\": \"s\",\n   \"version\": 2,\n   \"settings\": {\n      \"a\": []\n   }\n}"
        );
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("theme.json");
        fs::write(&target, "stale").unwrap();

        let doc = ThemeDocument::new("s", 2, Map::new());
        doc.write(&target).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
        assert_eq!(written, json!({ "$schema": "s", "version": 2 }));
        // Only the target is left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("theme.json");
        let err = ThemeDocument::new("s", 2, Map::new())
            .write(&target)
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to create a temporary file"));
    }
}
