//! Integration tests for the Go detectors
//!
//! Sources are written to disk and read back through the same path the `go`
//! command uses: file discovery, parsing and the builtin registry.

mod common;

use common::{DEMOTED_ERROR, RETURNED_ERROR, go_func, write_file};
use odhlint::config::GoRulesConfig;
use odhlint::engine::{ExecutionEngine, Report, Selection, collect_go_files};
use odhlint::rules::RuleRegistry;
use odhlint::syntax::SourceFile;
use odhlint::types::Severity;
use tempfile::TempDir;

fn check_source(source: &str) -> Report {
    check_source_with(source, &Selection::default())
}

fn check_source_with(source: &str, selection: &Selection) -> Report {
    let file = assert_ok!(SourceFile::parse("main.go", source));
    let registry = RuleRegistry::go_rules(&GoRulesConfig::default());
    ExecutionEngine::new(&registry, selection).run(&file)
}

fn ids(report: &Report) -> Vec<String> {
    report
        .violations
        .iter()
        .map(|v| v.rule_id.to_string())
        .collect()
}

fn errordemote_only() -> Selection {
    Selection::from_lists("ODH-GO-001", "")
}

#[test]
fn test_logged_error_in_else_branch_is_flagged() {
    let report = check_source_with(&go_func(DEMOTED_ERROR), &errordemote_only());
    assert_eq!(report.violations.len(), 1);

    let violation = &report.violations[0];
    assert_eq!(violation.rule_id.as_str(), "ODH-GO-001");
    assert_eq!(violation.rule_name, "errordemote");
    assert_eq!(violation.severity, Severity::Error);
    // `if` is on the first line of the body, after the package clause and func header
    assert_eq!(violation.line, 4);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn test_returned_error_is_not_flagged() {
    let report = check_source_with(&go_func(RETURNED_ERROR), &errordemote_only());
    assert!(report.is_clean());
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn test_directive_on_line_above_suppresses() {
    let body = format!("\t//nolint:errordemote // config is optional\n{}", DEMOTED_ERROR);
    let report = check_source_with(&go_func(&body), &errordemote_only());
    assert!(report.is_clean());
}

#[test]
fn test_directive_by_rule_id_suppresses() {
    let body = format!("\t//nolint:ODH-GO-001\n{}", DEMOTED_ERROR);
    assert!(check_source_with(&go_func(&body), &errordemote_only()).is_clean());
}

#[test]
fn test_directive_for_other_linter_does_not_suppress() {
    let body = format!("\t//nolint:gosec\n{}", DEMOTED_ERROR);
    assert_eq!(
        check_source_with(&go_func(&body), &errordemote_only()).violations.len(),
        1
    );
}

#[test]
fn test_bare_nolint_suppresses_every_rule() {
    // A directive without a rule list is a blanket suppression
    let body = format!("\t//nolint\n{}", DEMOTED_ERROR);
    assert!(check_source_with(&go_func(&body), &errordemote_only()).is_clean());
}

#[test]
fn test_justification_comment_suppresses() {
    let body = format!(
        "\t// RESILIENCE: fall back to defaults when the config map is absent\n{}",
        DEMOTED_ERROR
    );
    assert!(check_source_with(&go_func(&body), &errordemote_only()).is_clean());
}

#[test]
fn test_suppression_removes_exactly_one_violation() {
    let body = format!(
        "{}\n\t//nolint:errordemote\n{}",
        DEMOTED_ERROR.replace("value, err", "first, err"),
        DEMOTED_ERROR
    );
    let unsuppressed = format!("{}\n{}", DEMOTED_ERROR.replace("value, err", "first, err"), DEMOTED_ERROR);

    let before = check_source_with(&go_func(&unsuppressed), &errordemote_only());
    let after = check_source_with(&go_func(&body), &errordemote_only());
    assert_eq!(before.violations.len(), 2);
    assert_eq!(after.violations.len(), 1);
    assert_eq!(after.violations[0].line, 4);
}

#[test]
fn test_all_detectors_on_one_file() {
    let source = r#"package controllers

import (
	"example.com/operator/api/v1"
)

const (
	appLabel  = "app.kubernetes.io/name"
	nameLabel = "app.kubernetes.io/name"
)

func reconcile(obj interface{}) error {
	pod := obj.(*Pod)
	if value, err := getConfig(pod); err == nil {
		use(value)
	} else {
		log.V(1).Info("no config", "error", err)
	}
	return nil
}
"#;
    let report = check_source(source);
    assert_eq!(ids(&report), vec!["ODH-GO-001", "ODH-GO-002", "ODH-GO-003"]);
    assert_eq!(report.errors(), 1);
    assert_eq!(report.warnings(), 1);
    assert_eq!(report.infos(), 1);
}

#[test]
fn test_api_layer_importing_controllers() {
    let dir = TempDir::new().unwrap();
    write_file(
        dir.path(),
        "api/v1/types.go",
        "package v1\n\nimport \"example.com/operator/controllers\"\n",
    );
    write_file(
        dir.path(),
        "controllers/reconcile.go",
        "package controllers\n\nimport \"example.com/operator/api/v1\"\n",
    );

    let files = assert_ok!(collect_go_files(&[dir.path().to_path_buf()], &[]));
    let sources: Vec<SourceFile> = files
        .iter()
        .map(|path| assert_ok!(SourceFile::from_path(path)))
        .collect();

    let registry = RuleRegistry::go_rules(&GoRulesConfig::default());
    let report = ExecutionEngine::new(&registry, &Selection::default()).run_all(&sources);

    assert_eq!(report.documents_checked, 2);
    assert_eq!(ids(&report), vec!["ODH-GO-004"]);
    assert!(report.violations[0].file.ends_with("api/v1/types.go"));
    assert_eq!(report.violations[0].line, 3);
}

#[test]
fn test_vendor_is_excluded_by_default_config() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "main.go", &go_func(RETURNED_ERROR));
    write_file(dir.path(), "vendor/dep/dep.go", &go_func(DEMOTED_ERROR));

    let config = GoRulesConfig::default();
    let files = assert_ok!(collect_go_files(&[dir.path().to_path_buf()], &config.exclude));
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("main.go"));
}

#[test]
fn test_broken_source_does_not_panic() {
    let report = check_source("package main\n\nfunc broken( {\n\tif x, err := f(); err == nil {\n");
    assert_eq!(report.documents_checked, 1);
}
