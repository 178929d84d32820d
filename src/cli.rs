//! CLI argument parsing and command dispatch

pub mod args;
pub mod bundle;
pub mod common;
pub mod go;
pub mod list;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat, RuleFamily};
pub use common::{EXIT_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, GlobalOptions};
