//! Reading token sources and theme templates from disk
//!
//! Sources are re-read on every call. Nothing here caches a previously loaded
//! file, so a rebuild always sees the current contents.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use themegen_core::TokenTree;

/// Document formats accepted for tokens and templates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Toml,
    Yaml,
}

impl SourceFormat {
    /// Pick a format from the file extension. Unknown extensions are read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(parsed)
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = SourceFormat::from_path(path);
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("Failed to parse {} as {:?}", path.display(), format))
}

/// A token file on disk
#[derive(Debug, Clone)]
pub struct TokenSource {
    path: PathBuf,
}

impl TokenSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and parse the token file.
    pub fn load(&self) -> Result<TokenTree> {
        if !self.path.exists() {
            anyhow::bail!(
                "Unable to locate token source {}. Use the `tokens` option to specify the path to the token file.",
                self.path.display()
            );
        }
        let tree: TokenTree = read_document(&self.path)?;
        tracing::debug!(
            "loaded {} tokens from {}",
            tree.leaf_count(),
            self.path.display()
        );
        Ok(tree)
    }
}

/// Read the theme template.
pub fn load_template(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        anyhow::bail!(
            "Unable to locate source file {}. Use the `file` option to specify the path to the source file.",
            path.display()
        );
    }
    read_document(path)
}
