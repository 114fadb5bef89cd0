//! Configuration loading for certlint
//!
//! Loads configuration from a `certlint.toml` file, searched for from a start
//! directory upwards.

use crate::models::{Source, UnknownSource};
use crate::registry::Registry;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "certlint.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown lint '{0}' in configuration")]
    UnknownRule(String),

    #[error(transparent)]
    UnknownSource(#[from] UnknownSource),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Lints to run. Empty or `["ALL"]` runs every lint.
    #[serde(default)]
    pub enable: Vec<String>,

    #[serde(default)]
    pub disable: Vec<String>,

    #[serde(default)]
    pub exclude_sources: Vec<Source>,

    /// Record not-applicable and not-effective lints in reports
    #[serde(default = "default_record_not_applicable")]
    pub record_not_applicable: bool,

    #[serde(default)]
    pub parallel: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enable: Vec::new(),
            disable: Vec::new(),
            exclude_sources: Vec::new(),
            record_not_applicable: true,
            parallel: false,
        }
    }
}

fn default_record_not_applicable() -> bool {
    true
}

impl LintConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reject lint names the registry does not know about
    pub fn validate(&self, registry: &Registry) -> Result<(), ConfigError> {
        self.enable
            .iter()
            .chain(&self.disable)
            .filter(|name| name.as_str() != "ALL")
            .find(|name| !registry.contains(name))
            .map_or(Ok(()), |name| Err(ConfigError::UnknownRule(name.clone())))
    }
}

/// Load configuration from a specific file
pub fn load_config(path: &Path) -> Result<LintConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loading configuration");
    LintConfig::from_toml(&content)
}

/// Find `certlint.toml` starting from a path and walking up
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Discover and load the nearest configuration, if any
pub fn load_config_from_dir(start_path: &Path) -> anyhow::Result<Option<LintConfig>> {
    let Some(path) = find_config_file(start_path) else {
        debug!(start = %start_path.display(), "no configuration file found");
        return Ok(None);
    };

    let config = load_config(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    Ok(Some(config))
}

/// Merge caller-provided selections over file settings.
/// Caller lists take precedence.
pub fn merge_config(
    config: Option<&LintConfig>,
    cli_enable: &[String],
    cli_disable: &[String],
    cli_exclude_sources: &[String],
) -> Result<LintConfig, ConfigError> {
    let mut merged = config.cloned().unwrap_or_default();

    if !cli_enable.is_empty() {
        merged.enable = cli_enable.to_vec();
        // An explicit enable list overrides disables from the file
        merged.disable.retain(|name| !cli_enable.contains(name));
    }

    for name in cli_disable {
        if !merged.disable.contains(name) {
            merged.disable.push(name.clone());
        }
    }

    for raw in cli_exclude_sources {
        let source: Source = raw.parse()?;
        if !merged.exclude_sources.contains(&source) {
            merged.exclude_sources.push(source);
        }
    }

    Ok(merged)
}
