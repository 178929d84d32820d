#![forbid(unsafe_code)]

use crate::bundle::Bundle;
use crate::rules::{Rule, RuleMeta, Violation};
use crate::types::{Category, RuleId, Severity};

static META: RuleMeta = RuleMeta {
    id: RuleId::builtin("ODH-OLM-007"),
    name: "channel-naming-convention",
    category: Category::OlmBestPractice,
    severity: Severity::Warning,
    description: "Channel names should follow recommended conventions using prefixes like 'stable', \
                  'fast', or 'candidate' to indicate the support level and maturity. This provides \
                  a consistent user experience across operators.",
    fixable: false,
};

/// Prefixes that convey a channel's maturity
pub const RECOMMENDED_PREFIXES: &[&str] = &["stable", "fast", "candidate", "preview", "alpha", "beta"];

#[derive(Debug, Default)]
pub struct ChannelNamingRule;

impl Rule<Bundle> for ChannelNamingRule {
    fn meta(&self) -> &RuleMeta {
        &META
    }

    fn validate(&self, bundle: &Bundle) -> Vec<Violation> {
        let Some(annotations) = &bundle.annotations else {
            return Vec::new();
        };

        annotations
            .channels
            .iter()
            .filter(|channel| {
                let lower = channel.to_lowercase();
                !RECOMMENDED_PREFIXES.iter().any(|p| lower.starts_with(p))
            })
            .map(|channel| {
                Violation::new(
                    &META,
                    &annotations.file,
                    format!(
                        "Channel '{}' does not follow recommended naming conventions",
                        channel
                    ),
                )
                .with_description(format!(
                    "Consider using a channel name starting with: {}. This helps users \
                     understand the support level and maturity.",
                    RECOMMENDED_PREFIXES.join(", ")
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::olm::fixtures;

    #[test]
    fn test_unprefixed_channels_warn() {
        let bundle = fixtures::with_channels(&["stable", "Fast-2.x", "release-1.0", "latest"], None);
        let violations = ChannelNamingRule.validate(&bundle);
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Channel 'release-1.0' does not follow recommended naming conventions",
                "Channel 'latest' does not follow recommended naming conventions",
            ]
        );
        assert!(violations[0].file.ends_with("annotations.yaml"));
        assert!(violations[0].description.contains("stable, fast, candidate"));
    }

    #[test]
    fn test_no_annotations_passes() {
        assert!(ChannelNamingRule.validate(&Bundle::default()).is_empty());
    }
}
