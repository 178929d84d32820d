#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing rules

use crate::types::{Category, RuleId, Severity};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Static identity and classification of a rule
///
/// Every builtin rule carries one of these as a `static`, so a rule
/// implementation only has to provide [`Rule::meta`] and [`Rule::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMeta {
    /// Stable identifier, e.g. `ODH-OLM-001`
    pub id: RuleId,

    /// Short kebab-case name, also accepted by suppression directives
    pub name: &'static str,

    pub category: Category,

    pub severity: Severity,

    /// Human-readable explanation of what the rule checks
    pub description: &'static str,

    /// Advisory only; odhlint never rewrites files
    pub fixable: bool,
}

/// A single violation detected by a rule
///
/// This structure captures all information needed to report and serialize a violation.
/// Violations are value objects and are never mutated once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// ID of the rule that detected this violation
    pub rule_id: RuleId,

    /// Name of the rule that detected this violation
    pub rule_name: String,

    pub category: Category,

    pub severity: Severity,

    /// Human-readable message describing this particular finding
    pub message: String,

    /// File where the violation was found
    pub file: PathBuf,

    /// Line number (1-indexed); 0 means the violation applies to the whole file
    pub line: u32,

    /// Longer explanation and remediation hint
    pub description: String,

    pub fixable: bool,
}

impl Violation {
    /// Creates a file-level violation stamped with the rule's identity
    pub fn new(meta: &RuleMeta, file: &Path, message: impl Into<String>) -> Self {
        Violation {
            rule_id: meta.id.clone(),
            rule_name: meta.name.to_string(),
            category: meta.category,
            severity: meta.severity,
            message: message.into(),
            file: file.to_path_buf(),
            line: 0,
            description: meta.description.to_string(),
            fixable: meta.fixable,
        }
    }

    /// Sets the line the violation points at
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    /// Replaces the rule-wide description with a finding-specific one
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// `file` or `file:line` when a line is known
    pub fn location(&self) -> String {
        if self.line > 0 {
            format!("{}:{}", self.file.display(), self.line)
        } else {
            self.file.display().to_string()
        }
    }
}

/// Trait that all rules must implement
///
/// `D` is the document type the rule inspects: a parsed Go
/// [`SourceFile`](crate::syntax::SourceFile) or an OLM
/// [`Bundle`](crate::bundle::Bundle).
///
/// Rules are stateless and must not panic on any document the loader
/// accepted. The trait is `Send + Sync` so the engine can fan rules out
/// across threads.
pub trait Rule<D: ?Sized>: Send + Sync {
    /// Returns the rule's static identity
    fn meta(&self) -> &RuleMeta;

    /// Checks the document and returns every violation found
    ///
    /// Returns an empty vector if no violations are found.
    fn validate(&self, document: &D) -> Vec<Violation>;

    fn id(&self) -> &RuleId {
        &self.meta().id
    }

    fn name(&self) -> &str {
        self.meta().name
    }

    fn category(&self) -> Category {
        self.meta().category
    }

    fn severity(&self) -> Severity {
        self.meta().severity
    }

    fn description(&self) -> &str {
        self.meta().description
    }

    fn fixable(&self) -> bool {
        self.meta().fixable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static META: RuleMeta = RuleMeta {
        id: RuleId::builtin("TEST-RULE-001"),
        name: "test-rule",
        category: Category::OlmBestPractice,
        severity: Severity::Warning,
        description: "Test description",
        fixable: true,
    };

    // Mock rule over plain strings for testing trait implementation
    struct MockRule;

    impl Rule<str> for MockRule {
        fn meta(&self) -> &RuleMeta {
            &META
        }

        fn validate(&self, document: &str) -> Vec<Violation> {
            document
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains("bad"))
                .map(|(idx, _)| {
                    Violation::new(self.meta(), Path::new("doc.txt"), "bad line")
                        .at_line(idx as u32 + 1)
                })
                .collect()
        }
    }

    #[test]
    fn test_violation_construction() {
        let violation = Violation::new(&META, Path::new("manifests/csv.yaml"), "Test violation");

        assert_eq!(violation.rule_id.as_str(), "TEST-RULE-001");
        assert_eq!(violation.rule_name, "test-rule");
        assert_eq!(violation.severity, Severity::Warning);
        assert_eq!(violation.line, 0);
        assert_eq!(violation.description, "Test description");
        assert!(violation.fixable);
    }

    #[test]
    fn test_violation_location() {
        let violation = Violation::new(&META, Path::new("main.go"), "x");
        assert_eq!(violation.location(), "main.go");
        assert_eq!(violation.clone().at_line(12).location(), "main.go:12");
    }

    #[test]
    fn test_rule_trait_defaults_read_meta() {
        let rule = MockRule;
        assert_eq!(rule.id().as_str(), "TEST-RULE-001");
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.category(), Category::OlmBestPractice);
        assert_eq!(rule.severity(), Severity::Warning);
        assert_eq!(rule.description(), "Test description");
        assert!(rule.fixable());
    }

    #[test]
    fn test_rule_validate() {
        let rule = MockRule;
        let violations = rule.validate("ok\nbad\nok\nbad");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[1].line, 4);
        assert!(rule.validate("").is_empty());
    }

    #[test]
    fn test_rule_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Box<dyn Rule<str>>>();
        assert_sync::<Box<dyn Rule<str>>>();
    }
}
