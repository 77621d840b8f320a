//! themegen configuration file handling

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the optional project config file
pub const CONFIG_FILE: &str = "themegen.toml";

/// Top-level themegen configuration (themegen.toml)
///
/// Every key is optional; missing keys fall back to the defaults below and
/// command-line flags override both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemegenConfig {
    /// Project root that `file`, `tokens` and `target` are relative to
    #[serde(default = "default_path")]
    pub path: String,
    /// Theme template (JSON, TOML or YAML)
    #[serde(default = "default_file")]
    pub file: String,
    /// Design token source (JSON, TOML or YAML)
    #[serde(default = "default_tokens")]
    pub tokens: String,
    /// Output file
    #[serde(default = "default_target")]
    pub target: String,
    /// `$schema` written at the top of the output
    #[serde(default = "default_schema")]
    pub schema: String,
    /// theme.json format version
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_path() -> String {
    ".".to_string()
}

fn default_file() -> String {
    "theme.config.json".to_string()
}

fn default_tokens() -> String {
    "tokens.json".to_string()
}

fn default_target() -> String {
    "theme.json".to_string()
}

fn default_schema() -> String {
    "https://schemas.wp.org/trunk/theme.json".to_string()
}

fn default_version() -> u32 {
    2
}

impl Default for ThemegenConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            file: default_file(),
            tokens: default_tokens(),
            target: default_target(),
            schema: default_schema(),
            version: default_version(),
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub path: Option<String>,
    pub file: Option<String>,
    pub tokens: Option<String>,
    pub target: Option<String>,
    pub schema: Option<String>,
    pub version: Option<u32>,
}

impl ThemegenConfig {
    /// Load configuration from a directory (looks for themegen.toml).
    ///
    /// A directory without a config file yields the defaults.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, path.display());
            return Ok(Self::default());
        }

        Self::load_file(&config_path)
    }

    /// Load an explicitly named config file, which must exist.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            anyhow::bail!("Config file {} does not exist", config_path.display());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ThemegenConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Apply command-line overrides on top of this config
    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            path,
            file,
            tokens,
            target,
            schema,
            version,
        } = overrides;

        if let Some(path) = path {
            self.path = path;
        }
        if let Some(file) = file {
            self.file = file;
        }
        if let Some(tokens) = tokens {
            self.tokens = tokens;
        }
        if let Some(target) = target {
            self.target = target;
        }
        if let Some(schema) = schema {
            self.schema = schema;
        }
        if let Some(version) = version {
            self.version = version;
        }
    }
}
