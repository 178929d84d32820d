//! Error types for odhlint
//!
//! Only *fatal* conditions are errors: a document that cannot be loaded or a
//! configuration file that cannot be parsed. Rule findings are never errors;
//! they are reported as [`Violation`](crate::rules::Violation)s.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Semantic validation error
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// I/O error reading the config file
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while loading a document (bundle or Go sources)
///
/// Any of these aborts the run before a single rule executes.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The bundle root does not exist
    #[error("bundle path does not exist: {}", .0.display())]
    BundleNotFound(PathBuf),

    /// The bundle has no manifests directory
    #[error("manifests directory not found: {}", .0.display())]
    ManifestsDirMissing(PathBuf),

    /// A file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A YAML document could not be decoded
    #[error("failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A source file could not be parsed into a syntax tree
    #[error("failed to parse {}: {message}", .path.display())]
    Syntax { path: PathBuf, message: String },

    /// Walking a source directory failed
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// An exclude pattern did not compile
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },
}

/// Top-level error type for odhlint
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Load error
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// I/O error while writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
