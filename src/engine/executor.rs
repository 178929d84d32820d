#![forbid(unsafe_code)]

//! Parallel rule execution and deterministic ordering
//!
//! Rules never share mutable state: each rayon task runs one rule on one
//! immutable document and returns its own `Vec`, and the vectors are merged
//! and sorted afterwards. The result is the same regardless of thread
//! scheduling or registry order.

use crate::engine::selection::Selection;
use crate::rules::{Rule, RuleRegistry, Violation};
use crate::types::Severity;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Outcome of running the active rules over a set of documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// All violations, in canonical order
    pub violations: Vec<Violation>,
    /// Number of documents checked
    pub documents_checked: usize,
    /// Number of rules executed per document
    pub rules_executed: usize,
}

impl Report {
    /// Builds a report, putting `violations` into canonical order
    pub fn new(mut violations: Vec<Violation>, documents_checked: usize, rules_executed: usize) -> Self {
        sort_violations(&mut violations);
        Self {
            violations,
            documents_checked,
            rules_executed,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn errors(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn infos(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// 1 if any Error-severity violation is present, else 0
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() { 1 } else { 0 }
    }
}

/// Canonical violation order
///
/// Severity descending, then file, rule ID, line and message ascending.
pub fn compare_violations(a: &Violation, b: &Violation) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| a.file.cmp(&b.file))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then_with(|| a.line.cmp(&b.line))
        .then_with(|| a.message.cmp(&b.message))
}

pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(compare_violations);
}

/// Runs the selected rules of a registry
pub struct ExecutionEngine<'r, D: ?Sized> {
    rules: Vec<&'r dyn Rule<D>>,
}

impl<'r, D: ?Sized + Sync> ExecutionEngine<'r, D> {
    /// Creates an engine over the rules of `registry` that `selection` keeps
    pub fn new(registry: &'r RuleRegistry<D>, selection: &Selection) -> Self {
        let rules = selection.apply(registry);
        debug!("{} of {} rule(s) selected", rules.len(), registry.len());
        Self { rules }
    }

    /// The active rules, in registry order
    pub fn rules(&self) -> &[&'r dyn Rule<D>] {
        &self.rules
    }

    /// Run every active rule once against `document`
    pub fn run(&self, document: &D) -> Report {
        let violations: Vec<Violation> = self
            .rules
            .par_iter()
            .flat_map_iter(|rule| rule.validate(document))
            .collect();

        Report::new(violations, 1, self.rules.len())
    }

    /// Run every active rule once against each document
    pub fn run_all(&self, documents: &[D]) -> Report
    where
        D: Sized,
    {
        let rules = &self.rules;
        let violations: Vec<Violation> = documents
            .par_iter()
            .flat_map(|document| {
                rules
                    .par_iter()
                    .flat_map_iter(move |rule| rule.validate(document))
            })
            .collect();

        Report::new(violations, documents.len(), self.rules.len())
    }
}
