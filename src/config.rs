//! Configuration file parsing and validation

pub mod odhlint_toml;

pub use odhlint_toml::{
    ColorOption, Config, DEFAULT_CONFIG_FILE, GoRulesConfig, OutputConfig, OutputFormat,
    RulesConfig,
};
