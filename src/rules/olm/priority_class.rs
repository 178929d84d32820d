#![forbid(unsafe_code)]

use crate::bundle::Bundle;
use crate::rules::olm::values::is_true;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-006"),
    name: "priorityclass-globaldefault-true",
    category: Category::OlmSecurity,
    severity: Severity::Error,
    description: "PriorityClass globalDefault should always be false in operator bundles. Setting \
                  globalDefault means all pods in the cluster without an explicit priority class \
                  will use this default, which can unintentionally affect other workloads.",
    fixable: true,
};

/// A shipped PriorityClass would become the cluster-wide default
///
/// `globalDefault` is a top-level field of PriorityClass; it is also looked
/// up under `spec` for manifests that nest it there.
#[derive(Debug, Default)]
pub struct PriorityClassGlobalDefaultRule;

impl Rule<Bundle> for PriorityClassGlobalDefaultRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        bundle
            .resources_of_kind("PriorityClass")
            .filter(|pc| {
                pc.field("globalDefault")
                    .or_else(|| pc.spec_field("globalDefault"))
                    .is_some_and(is_true)
            })
            .map(|pc| {
                Violation::new(
                    &META,
                    &pc.file,
                    format!(
                        "PriorityClass '{}' has globalDefault set to true",
                        pc.metadata.name
                    ),
                )
                .with_description(
                    "PriorityClass globalDefault should be false in operator bundles. Setting it \
                     to true affects all pods cluster-wide.",
                )
            })
            .collect()
    }
}
