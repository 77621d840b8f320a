//! Path validation for the configured root, template, tokens and target

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::config::ThemegenConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Missing parameters required to generate theme.json file: {0}")]
    Missing(String),

    #[error(
        "The path, file, tokens and target options cannot reference a directory outside of the current working directory (`{option}` is `{value}`)"
    )]
    OutsideRoot { option: &'static str, value: String },
}

/// Absolute-or-root-relative locations of everything a build touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub file: PathBuf,
    pub tokens: PathBuf,
    pub target: PathBuf,
}

fn options(config: &ThemegenConfig) -> [(&'static str, &str); 4] {
    [
        ("path", config.path.as_str()),
        ("file", config.file.as_str()),
        ("tokens", config.tokens.as_str()),
        ("target", config.target.as_str()),
    ]
}

/// Reject empty options and options that climb out of the working directory.
pub fn validate(config: &ThemegenConfig) -> Result<(), PathError> {
    let missing: Vec<&str> = options(config)
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(option, _)| *option)
        .collect();
    if !missing.is_empty() {
        return Err(PathError::Missing(missing.join(", ")));
    }

    for (option, value) in options(config) {
        if climbs_out(value) {
            return Err(PathError::OutsideRoot {
                option,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn climbs_out(value: &str) -> bool {
    value.contains("../")
        || value.contains("..\\")
        || Path::new(value)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
}

/// Join `file`, `tokens` and `target` onto the configured root.
///
/// Leading `./` and `/` are stripped first, so `/theme.json`, `./theme.json`
/// and `theme.json` all land in the root.
pub fn resolve(config: &ThemegenConfig) -> ResolvedPaths {
    let root = Path::new(&config.path);
    ResolvedPaths {
        file: under_root(root, &config.file),
        tokens: under_root(root, &config.tokens),
        target: under_root(root, &config.target),
    }
}

fn under_root(root: &Path, value: &str) -> PathBuf {
    let mut rest = value.trim();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    root.join(rest.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate(&ThemegenConfig::default()), Ok(()));
    }

    #[test]
    fn empty_options_are_reported_together() {
        let config = ThemegenConfig {
            file: String::new(),
            target: "  ".to_string(),
            ..ThemegenConfig::default()
        };
        assert_eq!(
            validate(&config),
            Err(PathError::Missing("file, target".to_string()))
        );
    }

    #[test]
    fn parent_references_are_rejected() {
        for (option, config) in [
            (
                "target",
                ThemegenConfig {
                    target: "../theme.json".to_string(),
                    ..ThemegenConfig::default()
                },
            ),
            (
                "path",
                ThemegenConfig {
                    path: "..".to_string(),
                    ..ThemegenConfig::default()
                },
            ),
            (
                "tokens",
                ThemegenConfig {
                    tokens: "config/../../tokens.json".to_string(),
                    ..ThemegenConfig::default()
                },
            ),
        ] {
            match validate(&config) {
                Err(PathError::OutsideRoot { option: got, .. }) => assert_eq!(got, option),
                other => panic!("expected OutsideRoot for {option}, got {other:?}"),
            }
        }
    }

    #[test]
    fn dotted_names_are_not_parent_references() {
        let config = ThemegenConfig {
            file: "theme..config.json".to_string(),
            ..ThemegenConfig::default()
        };
        assert_eq!(validate(&config), Ok(()));
    }

    #[test]
    fn resolve_strips_leading_markers() {
        let config = ThemegenConfig {
            path: "site/theme".to_string(),
            file: "./theme.config.json".to_string(),
            tokens: "/tokens/tailwind.json".to_string(),
            target: "theme.json".to_string(),
            ..ThemegenConfig::default()
        };
        let paths = resolve(&config);
        assert_eq!(paths.file, Path::new("site/theme/theme.config.json"));
        assert_eq!(paths.tokens, Path::new("site/theme/tokens/tailwind.json"));
        assert_eq!(paths.target, Path::new("site/theme/theme.json"));
    }
}
