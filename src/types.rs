#![forbid(unsafe_code)]

//! Core domain types for odhlint
//!
//! This module defines the shared vocabulary used by both rule families:
//! rule identifiers, severities, categories and glob patterns.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Violation severity levels
///
/// Severities are totally ordered: `Error > Warning > Info`. The order drives
/// both report sorting and exit-status decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// All severities, most severe first
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    fn weight(self) -> u8 {
        match self {
            Severity::Error => 3,
            Severity::Warning => 2,
            Severity::Info => 1,
        }
    }

    /// Returns the lowercase name used in output
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule categories
///
/// Purely descriptive: categories group rules in listings and reports but
/// never influence selection or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "OLM-Requirement")]
    OlmRequirement,
    #[serde(rename = "OLM-Best-Practice")]
    OlmBestPractice,
    #[serde(rename = "OLM-Security")]
    OlmSecurity,
    #[serde(rename = "OLM-Upgrade")]
    OlmUpgrade,
    #[serde(rename = "Go-Error-Handling")]
    GoErrorHandling,
    #[serde(rename = "Go-Type-Safety")]
    GoTypeSafety,
    #[serde(rename = "Go-Maintainability")]
    GoMaintainability,
    #[serde(rename = "Go-Architecture")]
    GoArchitecture,
}

impl Category {
    /// Listing order for `odhlint rules`
    pub const ALL: [Category; 8] = [
        Category::OlmRequirement,
        Category::OlmBestPractice,
        Category::OlmSecurity,
        Category::OlmUpgrade,
        Category::GoErrorHandling,
        Category::GoTypeSafety,
        Category::GoMaintainability,
        Category::GoArchitecture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::OlmRequirement => "OLM-Requirement",
            Category::OlmBestPractice => "OLM-Best-Practice",
            Category::OlmSecurity => "OLM-Security",
            Category::OlmUpgrade => "OLM-Upgrade",
            Category::GoErrorHandling => "Go-Error-Handling",
            Category::GoTypeSafety => "Go-Type-Safety",
            Category::GoMaintainability => "Go-Maintainability",
            Category::GoArchitecture => "Go-Architecture",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated rule identifier
///
/// Rule IDs must be non-empty and contain only alphanumeric characters, hyphens, and underscores.
/// Builtin rules use the form `<namespace>-<category>-<number>`, e.g. `ODH-OLM-001`.
/// Identifiers are referenced from suppression directives and enable/disable
/// lists, so a published ID is never renumbered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(Cow<'static, str>);

impl RuleId {
    /// Creates a new RuleId, validating the input
    ///
    /// Returns None if the input is empty or contains invalid characters
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if !Self::is_valid(&id) {
            return None;
        }
        Some(RuleId(Cow::Owned(id)))
    }

    /// Wraps a compile-time identifier of a builtin rule
    ///
    /// Not validated here; the builtin registries are covered by tests.
    pub const fn builtin(id: &'static str) -> Self {
        RuleId(Cow::Borrowed(id))
    }

    fn is_valid(id: &str) -> bool {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    }

    /// Returns the rule ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RuleId::new(value).ok_or_else(|| "Invalid rule ID".to_string())
    }
}

impl From<RuleId> for String {
    fn from(rule_id: RuleId) -> Self {
        rule_id.0.into_owned()
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}
