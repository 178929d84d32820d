#![forbid(unsafe_code)]

//! Normalization of loosely typed manifest values
//!
//! Kubernetes accepts both integers and percentage strings for
//! disruption budgets, and YAML lets booleans arrive as strings.

use serde_yaml::Value;

/// `0`, `0.0`, `"0"` or `"0%"`, ignoring surrounding whitespace
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => matches!(s.trim(), "0" | "0%"),
        _ => false,
    }
}

/// `100`, `100.0`, `"100"` or `"100%"`, ignoring surrounding whitespace
pub fn is_full(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(100.0),
        Value::String(s) => matches!(s.trim(), "100" | "100%"),
        _ => false,
    }
}

/// `true`, or one of the strings `true`, `True`, `TRUE`
pub fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "true" | "True" | "TRUE"),
        _ => false,
    }
}
