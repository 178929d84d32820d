//! Parsing and validation for odhlint.toml configuration files

use crate::error::ConfigError;
use crate::rules::go::DependencyLayer;
use crate::types::GlobPattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "odhlint.toml";

/// Main configuration struct for odhlint.toml
///
/// Every section is optional; an empty file is the default configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rule selection
    #[serde(default)]
    pub rules: RulesConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Go detector settings
    #[serde(default)]
    pub go: GoRulesConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_file(&content, path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Self::parse_file(s, Path::new(DEFAULT_CONFIG_FILE))
    }

    fn parse_file(s: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run
    ///
    /// An explicit path must exist. Without one, `./odhlint.toml` is used
    /// when present and the defaults otherwise.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading configuration from {}", path.display());
            return Self::load(path);
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            debug!("Loading configuration from {}", default_path.display());
            Self::load(&default_path)
        } else {
            debug!("No {} found; using defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.go.exclude {
            globset::Glob::new(pattern.as_str()).map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid exclude glob pattern '{}': {}",
                    pattern.as_str(),
                    e
                ))
            })?;
        }

        for (idx, layer) in self.go.layers.iter().enumerate() {
            if layer.path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "go.layers[{}]: layer path must not be empty",
                    idx
                )));
            }
            if layer.forbidden.iter().any(|f| f.is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "go.layers[{}] ('{}'): forbidden import fragments must not be empty",
                    idx, layer.path
                )));
            }
        }

        for id in self.rules.enable.iter().chain(&self.rules.disable) {
            if id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Rule IDs in [rules] must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Rules configuration section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Allow-list of rule IDs; when non-empty only these run
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rule IDs to skip; ignored when `enable` is non-empty
    #[serde(default)]
    pub disable: Vec<String>,
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Settings for the Go detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoRulesConfig {
    /// Paths skipped while walking source directories
    #[serde(default = "default_exclude")]
    pub exclude: Vec<GlobPattern>,

    /// Architectural layers for ODH-GO-004; empty means the builtin defaults
    #[serde(default)]
    pub layers: Vec<DependencyLayer>,
}

impl Default for GoRulesConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
            layers: Vec::new(),
        }
    }
}

fn default_exclude() -> Vec<GlobPattern> {
    vec![GlobPattern::new("vendor/**")]
}
