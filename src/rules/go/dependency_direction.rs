#![forbid(unsafe_code)]

//! Enforces layering between packages
//!
//! Each [`DependencyLayer`] names a directory prefix and the import path
//! fragments that files under it may not reference, e.g. API types must not
//! import controller code.

use crate::rules::RuleMeta;
use crate::syntax::SourceFile;
use crate::syntax::pattern::NodeMatcher;
use crate::types::{Category, RuleId, Severity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tree_sitter::Node;

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-GO-004"),
    name: "dependency-direction",
    category: Category::GoArchitecture,
    severity: Severity::Error,
    description: "A package imports code from a layer it must not depend on. \
                  Move the shared code down a layer or invert the dependency.",
    fixable: false,
};

/// One layering constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLayer {
    /// Directory prefix identifying the layer, e.g. `api/`
    pub path: String,

    /// Import path fragments files in this layer must not import
    pub forbidden: Vec<String>,
}

impl DependencyLayer {
    /// Does the file at `path` belong to this layer?
    fn contains(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");
        normalized.starts_with(&self.path) || normalized.contains(&format!("/{}", self.path))
    }
}

/// Layers applied when the configuration names none
pub fn default_layers() -> Vec<DependencyLayer> {
    vec![DependencyLayer {
        path: "api/".to_string(),
        forbidden: vec!["/controllers".to_string(), "/internal/".to_string()],
    }]
}

#[derive(Debug, Clone)]
pub struct DependencyDirectionMatcher {
    layers: Vec<DependencyLayer>,
}

impl DependencyDirectionMatcher {
    pub fn new(layers: Vec<DependencyLayer>) -> Self {
        Self { layers }
    }
}

impl Default for DependencyDirectionMatcher {
    fn default() -> Self {
        Self::new(default_layers())
    }
}

impl NodeMatcher for DependencyDirectionMatcher {
    type Scratch = ();

    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &["import_spec"]
    }

    fn check(&self, node: Node<'_>, file: &SourceFile, _: &mut ()) -> Option<String> {
        let path = node.child_by_field_name("path")?;
        let import = file.text(&path).trim_matches(|c| c == '"' || c == '`');

        self.layers
            .iter()
            .filter(|layer| layer.contains(file.path()))
            .find_map(|layer| {
                layer
                    .forbidden
                    .iter()
                    .find(|fragment| import.contains(fragment.as_str()))
                    .map(|fragment| {
                        format!(
                            "{} imports {}; packages under {} must not depend on {}",
                            file.path().display(),
                            import,
                            layer.path,
                            fragment
                        )
                    })
            })
    }
}
