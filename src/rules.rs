#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod go;
pub mod olm;
mod registry;
mod rule;

pub use registry::RuleRegistry;
pub use rule::{Rule, RuleMeta, Violation};
