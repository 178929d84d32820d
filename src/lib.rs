#![forbid(unsafe_code)]

//! odhlint: rule-based validation for Go sources and OLM operator bundles
//!
//! Two families of rules share one engine:
//! - Go syntax-tree detectors such as `errordemote`, run over parsed
//!   [`SourceFile`](syntax::SourceFile)s
//! - manifest validators run over a loaded [`Bundle`](bundle::Bundle)
//!
//! Rules are collected into an explicit [`RuleRegistry`](rules::RuleRegistry),
//! filtered by a [`Selection`](engine::Selection) and executed by the
//! [`ExecutionEngine`](engine::ExecutionEngine), which returns a
//! deterministically ordered [`Report`](engine::Report).

pub mod bundle;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod syntax;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, LintError, LoadError};

// Re-export core domain types for convenient access
pub use types::{Category, GlobPattern, RuleId, Severity};
