#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. One violation record per violation, in report order
//! 2. One summary record

use crate::engine::Report;
use crate::rules::Violation;
use serde::Serialize;

/// JSONL output formatter
#[derive(Debug, Default)]
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the report as JSONL
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails to serialize.
    pub fn format(&self, report: &Report) -> Result<String, serde_json::Error> {
        let mut output = String::new();

        for violation in &report.violations {
            let record = ViolationRecord {
                record_type: "violation",
                violation,
            };
            output.push_str(&serde_json::to_string(&record)?);
            output.push('\n');
        }

        let summary = SummaryRecord {
            record_type: "summary",
            passed: !report.has_errors(),
            documents_checked: report.documents_checked,
            rules_executed: report.rules_executed,
            total_violations: report.violations.len(),
            errors: report.errors(),
            warnings: report.warnings(),
            infos: report.infos(),
        };
        output.push_str(&serde_json::to_string(&summary)?);
        output.push('\n');

        Ok(output)
    }
}

#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    #[serde(flatten)]
    violation: &'a Violation,
}

#[derive(Debug, Serialize)]
struct SummaryRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    documents_checked: usize,
    rules_executed: usize,
    total_violations: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleMeta;
    use crate::types::{Category, RuleId, Severity};
    use serde_json::Value;
    use std::path::Path;

    static META: RuleMeta = RuleMeta {
        id: RuleId::builtin("ODH-GO-001"),
        name: "errordemote",
        category: Category::GoErrorHandling,
        severity: Severity::Error,
        description: "demoted",
        fixable: false,
    };

    fn lines(report: &Report) -> Vec<Value> {
        JsonlFormatter::new()
            .format(report)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_report_has_only_summary() {
        let records = lines(&Report::new(Vec::new(), 3, 4));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "summary");
        assert_eq!(records[0]["passed"], true);
        assert_eq!(records[0]["documents_checked"], 3);
        assert_eq!(records[0]["rules_executed"], 4);
    }

    #[test]
    fn test_violation_records_precede_summary() {
        let report = Report::new(
            vec![
                Violation::new(&META, Path::new("b.go"), "second").at_line(2),
                Violation::new(&META, Path::new("a.go"), "first").at_line(9),
            ],
            2,
            1,
        );
        let records = lines(&report);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0]["type"], "violation");
        assert_eq!(records[0]["rule_id"], "ODH-GO-001");
        assert_eq!(records[0]["rule_name"], "errordemote");
        assert_eq!(records[0]["category"], "Go-Error-Handling");
        assert_eq!(records[0]["severity"], "error");
        assert_eq!(records[0]["file"], "a.go");
        assert_eq!(records[0]["line"], 9);
        assert_eq!(records[1]["file"], "b.go");

        assert_eq!(records[2]["type"], "summary");
        assert_eq!(records[2]["passed"], false);
        assert_eq!(records[2]["errors"], 2);
    }
}
