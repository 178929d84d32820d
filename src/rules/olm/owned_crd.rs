#![forbid(unsafe_code)]

use crate::bundle::Bundle;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-011"),
    name: "owned-crd-missing",
    category: Category::OlmRequirement,
    severity: Severity::Error,
    description: "Every CRD listed under spec.customresourcedefinitions.owned must be shipped in the \
                  bundle with the declared version, otherwise OLM cannot install the CSV.",
    fixable: false,
};

/// Owned CRDs declared by the CSV but absent from the bundle
#[derive(Debug, Default)]
pub struct OwnedCrdRule;

impl Rule<Bundle> for OwnedCrdRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(csv) = &bundle.csv else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for owned in &csv.spec.custom_resource_definitions.owned {
            let message = match bundle.crd(&owned.name) {
                None => format!(
                    "Owned CRD '{}' is not included in the bundle manifests",
                    owned.name
                ),
                Some(crd) if !owned.version.is_empty() && !crd.has_version(&owned.version) => {
                    format!(
                        "Owned CRD '{}' declares version '{}' which the CRD does not define",
                        owned.name, owned.version
                    )
                }
                Some(_) => continue,
            };
            violations.push(Violation::new(&META, &csv.file, message));
        }
        violations
    }
}
