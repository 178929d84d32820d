#![forbid(unsafe_code)]

//! Constraints OLM places on bundles that ship conversion webhooks

use crate::bundle::Bundle;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};
use std::collections::BTreeSet;

static ALL_NAMESPACES_META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-003"),
    name: "conversion-webhook-requires-allnamespaces",
    category: Category::OlmRequirement,
    severity: Severity::Error,
    description: "CSVs featuring a conversion webhook may only support the AllNamespaces install \
                  mode. OLM requires this because conversion webhooks need to be accessible \
                  cluster-wide.",
    fixable: true,
};

static PRESERVE_UNKNOWN_FIELDS_META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-010"),
    name: "conversion-webhook-preserve-unknown-fields",
    category: Category::OlmRequirement,
    severity: Severity::Error,
    description: "CRDs targeted by conversion webhooks must have spec.preserveUnknownFields set to \
                  false or nil. This is required for proper conversion webhook functionality.",
    fixable: true,
};

const ALL_NAMESPACES: &str = "AllNamespaces";

/// A conversion webhook is declared but AllNamespaces is not supported
#[derive(Debug, Default)]
pub struct ConversionAllNamespacesRule;

impl Rule<Bundle> for ConversionAllNamespacesRule {
    fn meta(&self) -> &RuleMeta {
        &ALL_NAMESPACES_META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(csv) = &bundle.csv else {
            return Vec::new();
        };
        if csv.conversion_webhooks().next().is_none() || csv.supports_install_mode(ALL_NAMESPACES) {
            return Vec::new();
        }

        vec![
            Violation::new(
                &ALL_NAMESPACES_META,
                &csv.file,
                "CSV defines conversion webhook but AllNamespaces install mode is not supported",
            )
            .with_description(
                "OLM requires AllNamespaces install mode for operators with conversion webhooks. \
                 Set installModes[type=AllNamespaces].supported = true",
            ),
        ]
    }
}

/// A CRD converted by a webhook keeps `preserveUnknownFields: true`
#[derive(Debug, Default)]
pub struct ConversionPreserveUnknownFieldsRule;

impl Rule<Bundle> for ConversionPreserveUnknownFieldsRule {
    fn meta(&self) -> &RuleMeta {
        &PRESERVE_UNKNOWN_FIELDS_META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(csv) = &bundle.csv else {
            return Vec::new();
        };

        let converted: BTreeSet<&str> = csv
            .conversion_webhooks()
            .flat_map(|w| w.conversion_crds.iter().map(String::as_str))
            .collect();
        if converted.is_empty() {
            return Vec::new();
        }

        bundle
            .crds
            .iter()
            .filter(|crd| crd.spec.preserve_unknown_fields == Some(true))
            .filter_map(|crd| {
                let full_name = crd.full_name();
                converted.contains(full_name.as_str()).then(|| {
                    Violation::new(
                        &PRESERVE_UNKNOWN_FIELDS_META,
                        &crd.file,
                        format!(
                            "CRD '{}' is targeted by conversion webhook but has preserveUnknownFields=true",
                            full_name
                        ),
                    )
                    .with_description(
                        "CRDs used with conversion webhooks must have spec.preserveUnknownFields \
                         set to false or nil. Set it to false.",
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::olm::fixtures;

    const CONVERSION: &str = r#"webhookdefinitions:
  - type: ConversionWebhook
    generateName: cwidget.example.com
    conversionCRDs: [widgets.example.com]"#;

    #[test]
    fn test_conversion_without_all_namespaces() {
        let bundle = fixtures::with_csv(&format!(
            "installModes:\n  - type: OwnNamespace\n    supported: true\n  - type: AllNamespaces\n    supported: false\n{CONVERSION}"
        ));
        let violations = ConversionAllNamespacesRule.validate(&bundle);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].fixable);
        assert_eq!(violations[0].rule_id.as_str(), "ODH-OLM-003");
    }

    #[test]
    fn test_conversion_with_all_namespaces_passes() {
        let bundle = fixtures::with_csv(&format!(
            "installModes:\n  - type: AllNamespaces\n    supported: true\n{CONVERSION}"
        ));
        assert!(ConversionAllNamespacesRule.validate(&bundle).is_empty());
    }

    #[test]
    fn test_no_conversion_webhook_passes() {
        let bundle = fixtures::with_csv("installModes: []");
        assert!(ConversionAllNamespacesRule.validate(&bundle).is_empty());
        assert!(ConversionPreserveUnknownFieldsRule.validate(&bundle).is_empty());
    }

    #[test]
    fn test_preserve_unknown_fields_on_converted_crd() {
        let mut bundle = fixtures::with_csv(CONVERSION);
        bundle.crds = vec![
            fixtures::crd("widgets", "example.com", "preserveUnknownFields: true"),
            fixtures::crd("gadgets", "example.com", "preserveUnknownFields: true"),
            fixtures::crd("gizmos", "example.com", "preserveUnknownFields: false"),
        ];

        let violations = ConversionPreserveUnknownFieldsRule.validate(&bundle);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("'widgets.example.com'"));
        assert!(violations[0].file.ends_with("widgets.crd.yaml"));
    }

    #[test]
    fn test_unset_preserve_unknown_fields_passes() {
        let mut bundle = fixtures::with_csv(CONVERSION);
        bundle.crds = vec![fixtures::crd("widgets", "example.com", "versions: []")];
        assert!(ConversionPreserveUnknownFieldsRule.validate(&bundle).is_empty());
    }
}
