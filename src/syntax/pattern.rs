#![forbid(unsafe_code)]

//! Single-pass syntax tree matching
//!
//! Every Go detector is a [`NodeMatcher`]: it names the node kinds it cares
//! about and a predicate over a node's local structure. [`PatternRule`] turns
//! a matcher into a [`Rule`] by walking the whole tree once in preorder,
//! evaluating the predicate on nodes of interest and passing every hit
//! through the matcher's [`SuppressionPolicy`].

use crate::rules::{Rule, RuleMeta, Violation};
use crate::syntax::source::line_of;
use crate::syntax::{SourceFile, SuppressionPolicy};
use tree_sitter::Node;

/// A structural predicate evaluated during a preorder traversal
pub trait NodeMatcher: Send + Sync {
    /// Per-traversal scratch state, created fresh for every file
    type Scratch: Default;

    fn meta(&self) -> &RuleMeta;

    /// Node kinds the predicate is evaluated on
    fn node_kinds(&self) -> &'static [&'static str];

    /// Returns a message if `node` matches
    fn check(&self, node: Node<'_>, file: &SourceFile, scratch: &mut Self::Scratch)
    -> Option<String>;

    fn suppression(&self) -> SuppressionPolicy {
        SuppressionPolicy::DIRECTIVES
    }
}

/// Adapts a [`NodeMatcher`] to the [`Rule`] contract
#[derive(Debug, Default)]
pub struct PatternRule<M> {
    matcher: M,
}

impl<M: NodeMatcher> PatternRule<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &M {
        &self.matcher
    }
}

impl<M: NodeMatcher> Rule<SourceFile> for PatternRule<M> {
    fn meta(&self) -> &RuleMeta {
        self.matcher.meta()
    }

    fn validate(&self, file: &SourceFile) -> Vec<Violation> {
        let kinds = self.matcher.node_kinds();
        let policy = self.matcher.suppression();
        let mut scratch = M::Scratch::default();
        let mut violations = Vec::new();

        preorder(file.tree().root_node(), |node| {
            if !kinds.contains(&node.kind()) {
                return;
            }
            let Some(message) = self.matcher.check(node, file, &mut scratch) else {
                return;
            };
            let line = line_of(&node);
            if policy.is_suppressed(file.comments(), line, self.meta()) {
                return;
            }
            violations.push(Violation::new(self.meta(), file.path(), message).at_line(line));
        });

        violations
    }
}

/// Visit every node under `root` (inclusive) in preorder
pub fn preorder<'tree>(root: Node<'tree>, mut visit: impl FnMut(Node<'tree>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.node() == root {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// True if any node in the subtree of `root` satisfies `predicate`
pub fn subtree_any<'tree>(root: Node<'tree>, mut predicate: impl FnMut(Node<'tree>) -> bool) -> bool {
    let mut found = false;
    preorder(root, |node| {
        if !found && predicate(node) {
            found = true;
        }
    });
    found
}

/// Named children of a node, collected so they can outlive the cursor
pub fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
