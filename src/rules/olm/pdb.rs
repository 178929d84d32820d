#![forbid(unsafe_code)]

//! PodDisruptionBudgets that make nodes impossible to drain

use crate::bundle::{Bundle, Resource};
use crate::rules::olm::values::{is_full, is_zero};
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};
use serde_yaml::Value;

static MAX_UNAVAILABLE_META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-004"),
    name: "pdb-maxunavailable-zero",
    category: Category::OlmUpgrade,
    severity: Severity::Error,
    description: "PodDisruptionBudget maxUnavailable field cannot be set to 0 or 0%. This can make a \
                  node impossible to drain and block important lifecycle actions like operator \
                  upgrades or even cluster upgrades.",
    fixable: false,
};

static MIN_AVAILABLE_META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-005"),
    name: "pdb-minavailable-hundred-percent",
    category: Category::OlmUpgrade,
    severity: Severity::Error,
    description: "PodDisruptionBudget minAvailable field cannot be set to 100%. This can make a node \
                  impossible to drain and block important lifecycle actions like operator upgrades \
                  or even cluster upgrades.",
    fixable: false,
};

const PDB_KIND: &str = "PodDisruptionBudget";

/// Applies `blocks_drain` to one `spec` field of every PDB in the bundle
fn check_budgets(
    bundle: &Bundle,
    field: &str,
    blocks_drain: fn(&Value) -> bool,
    violation: impl Fn(&Resource) -> Violation,
) -> Vec<Violation> {
    bundle
        .resources_of_kind(PDB_KIND)
        .filter(|pdb| pdb.spec_field(field).is_some_and(blocks_drain))
        .map(violation)
        .collect()
}

#[derive(Debug, Default)]
pub struct PdbMaxUnavailableRule;

impl Rule<Bundle> for PdbMaxUnavailableRule {
    fn meta(&self) -> &RuleMeta {
        &MAX_UNAVAILABLE_META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        check_budgets(bundle, "maxUnavailable", is_zero, |pdb| {
            Violation::new(
                &MAX_UNAVAILABLE_META,
                &pdb.file,
                format!(
                    "PodDisruptionBudget '{}' has maxUnavailable set to 0 or 0%",
                    pdb.metadata.name
                ),
            )
            .with_description(
                "Setting maxUnavailable to 0 or 0% prevents node drains and can block cluster \
                 lifecycle operations. Use a value >= 1.",
            )
        })
    }
}

#[derive(Debug, Default)]
pub struct PdbMinAvailableRule;

impl Rule<Bundle> for PdbMinAvailableRule {
    fn meta(&self) -> &RuleMeta {
        &MIN_AVAILABLE_META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        check_budgets(bundle, "minAvailable", is_full, |pdb| {
            Violation::new(
                &MIN_AVAILABLE_META,
                &pdb.file,
                format!(
                    "PodDisruptionBudget '{}' has minAvailable set to 100%",
                    pdb.metadata.name
                ),
            )
            .with_description(
                "Setting minAvailable to 100% prevents node drains and can block cluster \
                 lifecycle operations. Use a lower percentage or an absolute number.",
            )
        })
    }
}
