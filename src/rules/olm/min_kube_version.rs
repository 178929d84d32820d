#![forbid(unsafe_code)]

use crate::bundle::Bundle;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-001"),
    name: "missing-minkubeversion",
    category: Category::OlmBestPractice,
    severity: Severity::Warning,
    description: "ClusterServiceVersion should specify spec.minKubeVersion to indicate the minimum \
                  Kubernetes version supported by the operator. Without this, the operator may be \
                  installed on incompatible clusters.",
    fixable: false,
};

/// The CSV does not declare `spec.minKubeVersion`
#[derive(Debug, Default)]
pub struct MinKubeVersionRule;

impl Rule<Bundle> for MinKubeVersionRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(csv) = &bundle.csv else {
            return Vec::new();
        };

        let declared = csv
            .spec
            .min_kube_version
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty());
        if declared {
            return Vec::new();
        }

        vec![
            Violation::new(
                &META,
                &csv.file,
                "ClusterServiceVersion is missing spec.minKubeVersion field",
            )
            .with_description(
                "It is recommended to specify the minimum Kubernetes version your operator \
                 supports. This prevents installation on incompatible clusters.",
            ),
        ]
    }
}
