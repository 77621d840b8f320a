//! theme.json generation: validate, load, render, write

use anyhow::Result;
use std::path::PathBuf;

use crate::config::ThemegenConfig;
use crate::document::ThemeDocument;
use crate::loader::{load_template, TokenSource};
use crate::paths::{resolve, validate};
use crate::template::render;

/// Generate theme.json from the configured template and token source.
///
/// Returns the path that was written.
pub fn generate_theme_json(config: &ThemegenConfig) -> Result<PathBuf> {
    validate(config)?;
    let paths = resolve(config);
    tracing::debug!(
        "template {}, tokens {}, target {}",
        paths.file.display(),
        paths.tokens.display(),
        paths.target.display()
    );

    let template = load_template(&paths.file)?;
    let tokens = TokenSource::new(&paths.tokens).load()?;
    let body = render(&template, &tokens)?;

    ThemeDocument::new(&config.schema, config.version, body).write(&paths.target)?;

    let name = paths
        .target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.target.clone());
    tracing::info!("{name} created successfully!");
    Ok(paths.target)
}
