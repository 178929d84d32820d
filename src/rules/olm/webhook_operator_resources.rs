#![forbid(unsafe_code)]

use crate::bundle::{Bundle, WebhookRule};
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-002"),
    name: "webhook-intercepts-operator-resources",
    category: Category::OlmRequirement,
    severity: Severity::Error,
    description: "OLM will place the CSV in failed phase if webhook rules intercept: (1) all groups \
                  (apiGroups: ['*']), (2) the operators.coreos.com group, or (3) \
                  ValidatingWebhookConfigurations or MutatingWebhookConfigurations resources. This \
                  prevents operators from breaking OLM's ability to manage other operators.",
    fixable: false,
};

const OPERATORS_GROUP: &str = "operators.coreos.com";
const WEBHOOK_CONFIG_RESOURCES: &[&str] = &[
    "validatingwebhookconfigurations",
    "mutatingwebhookconfigurations",
];

/// Admission webhooks whose rules would let them intercept OLM itself
#[derive(Debug, Default)]
pub struct WebhookOperatorResourcesRule;

impl Rule<Bundle> for WebhookOperatorResourcesRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(csv) = &bundle.csv else {
            return Vec::new();
        };

        let mut violations = Vec::new();
        for webhook in csv.spec.webhook_definitions.iter().filter(|w| !w.is_conversion()) {
            let name = &webhook.generate_name;
            for rule in &webhook.rules {
                if intercepts_all_groups(rule) {
                    violations.push(
                        Violation::new(
                            &META,
                            &csv.file,
                            format!(
                                "Webhook '{}' intercepts all API groups (apiGroups: ['*']). OLM will fail the CSV.",
                                name
                            ),
                        )
                        .with_description(
                            "Webhooks cannot intercept all API groups. This would prevent OLM \
                             from managing other operators.",
                        ),
                    );
                }
                if intercepts_operator_group(rule) {
                    violations.push(
                        Violation::new(
                            &META,
                            &csv.file,
                            format!(
                                "Webhook '{}' intercepts the '{}' API group. OLM will fail the CSV.",
                                name, OPERATORS_GROUP
                            ),
                        )
                        .with_description(
                            "Webhooks cannot intercept the operators.coreos.com group. This would \
                             break OLM's ability to manage operators.",
                        ),
                    );
                }
                if intercepts_webhook_configs(rule) {
                    violations.push(
                        Violation::new(
                            &META,
                            &csv.file,
                            format!(
                                "Webhook '{}' intercepts ValidatingWebhookConfigurations or \
                                 MutatingWebhookConfigurations resources. OLM will fail the CSV.",
                                name
                            ),
                        )
                        .with_description(
                            "Webhooks cannot intercept webhook configuration resources. This \
                             would break OLM's ability to configure webhooks.",
                        ),
                    );
                }
            }
        }
        violations
    }
}

fn intercepts_all_groups(rule: &WebhookRule) -> bool {
    rule.api_groups.iter().any(|g| g == "*")
}

fn intercepts_operator_group(rule: &WebhookRule) -> bool {
    rule.api_groups.iter().any(|g| g == OPERATORS_GROUP)
}

fn intercepts_webhook_configs(rule: &WebhookRule) -> bool {
    rule.resources
        .iter()
        .any(|r| WEBHOOK_CONFIG_RESOURCES.contains(&r.to_lowercase().as_str()))
}
