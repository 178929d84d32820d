#![forbid(unsafe_code)]

use crate::bundle::Bundle;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-012"),
    name: "default-channel-not-listed",
    category: Category::OlmBestPractice,
    severity: Severity::Warning,
    description: "The default channel annotation names a channel the bundle does not belong to. \
                  Add it to operators.operatorframework.io.bundle.channels.v1 or change the default.",
    fixable: false,
};

#[derive(Debug, Default)]
pub struct DefaultChannelRule;

impl Rule<Bundle> for DefaultChannelRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(annotations) = &bundle.annotations else {
            return Vec::new();
        };
        let Some(default_channel) = &annotations.default_channel else {
            return Vec::new();
        };
        if annotations.channels.contains(default_channel) {
            return Vec::new();
        }

        vec![Violation::new(
            &META,
            &annotations.file,
            format!(
                "Default channel '{}' is not in the channel list [{}]",
                default_channel,
                annotations.channels.join(", ")
            ),
        )]
    }
}
