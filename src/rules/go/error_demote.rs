#![forbid(unsafe_code)]

//! Detects errors that are demoted to log statements instead of being returned
//!
//! The flagged shape is:
//!
//! ```go
//! if value, err := getConfig(ctx, cli); err == nil {
//!     config.Value = value
//! } else {
//!     log.Info("couldn't get config", "error", err)
//! }
//! ```
//!
//! The check is purely syntactic. Any call whose selector is in
//! [`LOG_METHODS`] counts as logging, whether or not the receiver is a logger.

use crate::rules::RuleMeta;
use crate::syntax::pattern::{NodeMatcher, named_children, subtree_any};
use crate::syntax::{SourceFile, SuppressionPolicy};
use crate::types::{Category, RuleId, Severity};
use tree_sitter::Node;

/// Selector names treated as logging calls
pub const LOG_METHODS: &[&str] = &["Info", "Debug", "Warn", "Warning", "Trace", "V"];

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-GO-001"),
    name: "errordemote",
    category: Category::GoErrorHandling,
    severity: Severity::Error,
    description: "An error returned by a call is only logged (Info/Debug/Warn level) and execution continues \
                  with a default value. Return the error, or document why it is safe to continue with \
                  //nolint:errordemote or a RESILIENCE: comment.",
    fixable: false,
};

const MESSAGE: &str = "error demoted to log statement instead of being returned; \
                       add //nolint:errordemote with justification or return the error";

#[derive(Debug, Default)]
pub struct ErrorDemoteMatcher;

impl NodeMatcher for ErrorDemoteMatcher {
    type Scratch = ();

    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["if_statement"]
    }

    fn check(&self, node: Node<'_>, file: &SourceFile, _: &mut ()) -> Option<String> {
        is_error_demotion(node, file).then(|| MESSAGE.to_string())
    }

    fn suppression(&self) -> SuppressionPolicy {
        SuppressionPolicy::DIRECTIVES_AND_JUSTIFICATIONS
    }
}

fn is_error_demotion(if_stmt: Node<'_>, file: &SourceFile) -> bool {
    let Some(init) = if_stmt.child_by_field_name("initializer") else {
        return false;
    };
    if init.kind() != "short_var_declaration" {
        return false;
    }

    let Some(left) = init.child_by_field_name("left") else {
        return false;
    };
    let bound = named_children(left);
    if bound.len() < 2 {
        return false;
    }

    // Only the last bound name is inspected
    let Some(last) = bound.last() else {
        return false;
    };
    if !matches!(last.kind(), "identifier" | "blank_identifier") {
        return false;
    }
    let last_name = file.text(last);
    if !last_name.contains("err") && last_name != "_" {
        return false;
    }

    let Some(condition) = if_stmt.child_by_field_name("condition") else {
        return false;
    };
    if !is_err_nil_test(condition, file) {
        return false;
    }

    if if_stmt.child_by_field_name("consequence").is_none() {
        return false;
    }
    let Some(alternative) = if_stmt.child_by_field_name("alternative") else {
        return false;
    };

    has_log_call(alternative, file) && !has_error_return(alternative, file)
}

/// `err == nil`, `err != nil`, or either with the operands swapped
fn is_err_nil_test(condition: Node<'_>, file: &SourceFile) -> bool {
    if condition.kind() != "binary_expression" {
        return false;
    }
    let operator = condition
        .child_by_field_name("operator")
        .map(|op| op.kind())
        .unwrap_or_default();
    if operator != "==" && operator != "!=" {
        return false;
    }

    let (Some(left), Some(right)) = (
        condition.child_by_field_name("left"),
        condition.child_by_field_name("right"),
    ) else {
        return false;
    };

    let is_nil = |n: &Node<'_>| n.kind() == "nil";
    let is_err_ident = |n: &Node<'_>| n.kind() == "identifier" && file.text(n).contains("err");

    if !is_nil(&left) && !is_nil(&right) {
        return false;
    }
    is_err_ident(&left) || is_err_ident(&right)
}

fn has_log_call(branch: Node<'_>, file: &SourceFile) -> bool {
    subtree_any(branch, |node| {
        if node.kind() != "call_expression" {
            return false;
        }
        node.child_by_field_name("function")
            .filter(|function| function.kind() == "selector_expression")
            .and_then(|selector| selector.child_by_field_name("field"))
            .is_some_and(|field| LOG_METHODS.contains(&file.text(&field)))
    })
}

/// A `return` whose results include a bare identifier containing "err"
fn has_error_return(branch: Node<'_>, file: &SourceFile) -> bool {
    subtree_any(branch, |node| {
        if node.kind() != "return_statement" {
            return false;
        }
        named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "expression_list")
            .flat_map(named_children)
            .any(|result| result.kind() == "identifier" && file.text(&result).contains("err"))
    })
}
