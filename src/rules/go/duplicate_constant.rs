#![forbid(unsafe_code)]

//! Flags string constants that repeat the value of an earlier constant

use crate::rules::RuleMeta;
use crate::syntax::SourceFile;
use crate::syntax::pattern::{NodeMatcher, named_children};
use crate::syntax::source::line_of;
use crate::types::{Category, RuleId, Severity};
use std::collections::HashMap;
use tree_sitter::Node;

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-GO-003"),
    name: "duplicate-string-constant",
    category: Category::GoMaintainability,
    severity: Severity::Info,
    description: "Two constants in the same file hold the same string literal. \
                  Reuse the existing constant so the value is defined once.",
    fixable: false,
};

#[derive(Debug, Default)]
pub struct DuplicateConstantMatcher;

/// First definition of each literal: value -> (name, line)
type SeenConstants = HashMap<String, (String, u32)>;

impl NodeMatcher for DuplicateConstantMatcher {
    type Scratch = SeenConstants;

    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["const_spec"]
    }

    fn check(&self, node: Node<'_>, file: &SourceFile, seen: &mut SeenConstants) -> Option<String> {
        let mut cursor = node.walk();
        let names: Vec<Node<'_>> = node.children_by_field_name("name", &mut cursor).collect();
        let [name] = names.as_slice() else {
            return None;
        };

        let value = node.child_by_field_name("value")?;
        let values = named_children(value);
        let [literal] = values.as_slice() else {
            return None;
        };
        if !matches!(
            literal.kind(),
            "interpreted_string_literal" | "raw_string_literal"
        ) {
            return None;
        }

        let literal = file.text(literal).to_string();
        let name = file.text(name).to_string();

        match seen.get(&literal) {
            Some((first, line)) => Some(format!(
                "constant {} duplicates the value of {} (line {})",
                name, first, line
            )),
            None => {
                seen.insert(literal, (name, line_of(&node)));
                None
            }
        }
    }
}
