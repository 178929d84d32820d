#![forbid(unsafe_code)]

//! Flags type assertions that panic on mismatch
//!
//! `v := x.(T)` panics when `x` does not hold a `T`; the comma-ok form
//! `v, ok := x.(T)` does not. Type switches are not affected.

use crate::rules::RuleMeta;
use crate::syntax::SourceFile;
use crate::syntax::pattern::{NodeMatcher, named_children};
use crate::types::{Category, RuleId, Severity};
use tree_sitter::Node;

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-GO-002"),
    name: "unchecked-type-assertion",
    category: Category::GoTypeSafety,
    severity: Severity::Warning,
    description: "A single-value type assertion panics if the dynamic type does not match. \
                  Use the two-value form `v, ok := x.(T)` and handle the mismatch.",
    fixable: false,
};

#[derive(Debug, Default)]
pub struct TypeAssertionMatcher;

impl NodeMatcher for TypeAssertionMatcher {
    type Scratch = ();

    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["type_assertion_expression"]
    }

    fn check(&self, node: Node<'_>, file: &SourceFile, _: &mut ()) -> Option<String> {
        if is_comma_ok(node) {
            return None;
        }
        let asserted = node
            .child_by_field_name("type")
            .map(|t| file.text(&t))
            .unwrap_or("?");
        Some(format!(
            "type assertion to {} is not checked; use the comma-ok form",
            asserted
        ))
    }
}

/// Is the assertion the sole right-hand side of a two-value binding?
fn is_comma_ok(assertion: Node<'_>) -> bool {
    let Some(list) = assertion.parent() else {
        return false;
    };
    if list.kind() != "expression_list" || named_children(list).len() != 1 {
        return false;
    }
    let Some(binding) = list.parent() else {
        return false;
    };

    match binding.kind() {
        "short_var_declaration" | "assignment_statement" => binding
            .child_by_field_name("left")
            .is_some_and(|left| named_children(left).len() >= 2),
        "var_spec" => {
            let mut cursor = binding.walk();
            binding.children_by_field_name("name", &mut cursor).count() >= 2
        }
        _ => false,
    }
}
