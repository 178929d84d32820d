#![forbid(unsafe_code)]

//! Rule registry for one document type
//!
//! A registry is assembled once, explicitly, and handed to the engine:
//! - [`RuleRegistry::bundle_rules`] for OLM bundles
//! - [`RuleRegistry::go_rules`] for Go source files
//!
//! There is no global rule list and no registration after construction.
//! Registry order is presentation order only; the engine sorts its output.

use crate::bundle::Bundle;
use crate::config::GoRulesConfig;
use crate::rules::Rule;
use crate::rules::go::{
    DependencyDirectionMatcher, DuplicateConstantMatcher, ErrorDemoteMatcher, TypeAssertionMatcher,
};
use crate::rules::olm::{
    ChannelNamingRule, ConversionAllNamespacesRule, ConversionPreserveUnknownFieldsRule,
    DefaultChannelRule, MinKubeVersionRule, OwnedCrdRule, PdbMaxUnavailableRule,
    PdbMinAvailableRule, PriorityClassGlobalDefaultRule, WebhookOperatorResourcesRule,
};
use crate::syntax::{PatternRule, SourceFile};

/// Ordered collection of rules over documents of type `D`
pub struct RuleRegistry<D: ?Sized> {
    rules: Vec<Box<dyn Rule<D>>>,
}

impl<D: ?Sized> RuleRegistry<D> {
    /// Build a registry from an explicit rule list
    pub fn from_rules(rules: Vec<Box<dyn Rule<D>>>) -> Self {
        Self { rules }
    }

    /// Get a rule by ID
    pub fn get(&self, id: &str) -> Option<&dyn Rule<D>> {
        self.rules
            .iter()
            .find(|rule| rule.id().as_str() == id)
            .map(|rule| rule.as_ref())
    }

    /// Iterate over all rules in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule<D>> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleRegistry<Bundle> {
    /// All builtin manifest rules
    pub fn bundle_rules() -> Self {
        Self::from_rules(vec![
            Box::new(MinKubeVersionRule),
            Box::new(WebhookOperatorResourcesRule),
            Box::new(ConversionAllNamespacesRule),
            Box::new(PdbMaxUnavailableRule),
            Box::new(PdbMinAvailableRule),
            Box::new(PriorityClassGlobalDefaultRule),
            Box::new(ChannelNamingRule),
            Box::new(ConversionPreserveUnknownFieldsRule),
            Box::new(OwnedCrdRule),
            Box::new(DefaultChannelRule),
        ])
    }
}

impl RuleRegistry<SourceFile> {
    /// All builtin Go detectors
    ///
    /// Layers for the dependency-direction detector come from `config`,
    /// falling back to the builtin defaults when none are configured.
    pub fn go_rules(config: &GoRulesConfig) -> Self {
        let dependency_direction = if config.layers.is_empty() {
            DependencyDirectionMatcher::default()
        } else {
            DependencyDirectionMatcher::new(config.layers.clone())
        };

        Self::from_rules(vec![
            Box::new(PatternRule::new(ErrorDemoteMatcher)),
            Box::new(PatternRule::new(TypeAssertionMatcher)),
            Box::new(PatternRule::new(DuplicateConstantMatcher)),
            Box::new(PatternRule::new(dependency_direction)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleMeta, Violation};
    use crate::types::{Category, RuleId, Severity};
    use std::collections::HashSet;

    fn assert_ids_unique_and_valid<D: ?Sized>(registry: &RuleRegistry<D>) {
        let mut seen = HashSet::new();
        for rule in registry.iter() {
            let id = rule.id().as_str();
            assert!(RuleId::new(id).is_some(), "invalid rule ID {id}");
            assert!(seen.insert(id.to_string()), "duplicate rule ID {id}");
        }
    }

    #[test]
    fn test_bundle_rules_ids_unique() {
        let registry = RuleRegistry::bundle_rules();
        assert_eq!(registry.len(), 10);
        assert_ids_unique_and_valid(&registry);
    }

    #[test]
    fn test_go_rules_ids_unique() {
        let registry = RuleRegistry::go_rules(&GoRulesConfig::default());
        assert_eq!(registry.len(), 4);
        assert_ids_unique_and_valid(&registry);
    }

    #[test]
    fn test_get_is_a_bijection_over_ids() {
        let registry = RuleRegistry::bundle_rules();
        for rule in registry.iter() {
            let found = registry.get(rule.id().as_str()).unwrap();
            assert_eq!(found.id(), rule.id());
            assert_eq!(found.name(), rule.name());
        }
    }

    #[test]
    fn test_get_nonexistent() {
        let registry = RuleRegistry::bundle_rules();
        assert!(registry.get("ODH-OLM-008").is_none());
        assert!(registry.get("ODH-OLM-009").is_none());
        assert!(registry.get("odh-olm-001").is_none());
    }

    #[test]
    fn test_registration_order_is_kept() {
        let ids: Vec<String> = RuleRegistry::bundle_rules()
            .iter()
            .map(|rule| rule.id().to_string())
            .collect();
        assert_eq!(ids.first().map(String::as_str), Some("ODH-OLM-001"));
        assert_eq!(ids.last().map(String::as_str), Some("ODH-OLM-012"));
    }

    static META: RuleMeta = RuleMeta {
        id: RuleId::builtin("TEST-STR-001"),
        name: "always",
        category: Category::GoMaintainability,
        severity: Severity::Info,
        description: "always fires",
        fixable: false,
    };

    struct Always;

    impl Rule<str> for Always {
        fn meta(&self) -> &RuleMeta {
            &META
        }

        fn validate(&self, _: &str) -> Vec<Violation> {
            vec![Violation::new(&META, std::path::Path::new("x"), "always")]
        }
    }

    #[test]
    fn test_custom_registry() {
        let registry: RuleRegistry<str> = RuleRegistry::from_rules(vec![Box::new(Always)]);
        assert!(!registry.is_empty());
        assert_eq!(registry.get("TEST-STR-001").unwrap().validate("").len(), 1);

        let empty: RuleRegistry<str> = RuleRegistry::from_rules(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
    }
}
