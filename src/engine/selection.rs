#![forbid(unsafe_code)]

//! Which rules of a registry are active for a run
//!
//! A non-empty enable set is an allow-list and the disable set is ignored.
//! Otherwise every rule runs except the disabled ones. IDs that name no
//! registered rule are ignored.

use crate::rules::{Rule, RuleRegistry};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub enable: BTreeSet<String>,
    pub disable: BTreeSet<String>,
}

impl Selection {
    pub fn new(
        enable: impl IntoIterator<Item = String>,
        disable: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            enable: enable.into_iter().collect(),
            disable: disable.into_iter().collect(),
        }
    }

    /// Build a selection from comma-separated ID lists
    pub fn from_lists(enable: &str, disable: &str) -> Self {
        Self {
            enable: parse_id_list(enable),
            disable: parse_id_list(disable),
        }
    }

    /// Is the rule with this ID selected?
    pub fn is_active(&self, id: &str) -> bool {
        if self.enable.is_empty() {
            !self.disable.contains(id)
        } else {
            self.enable.contains(id)
        }
    }

    /// Active rules of `registry`, in registry order
    pub fn apply<'r, D: ?Sized>(&self, registry: &'r RuleRegistry<D>) -> Vec<&'r dyn Rule<D>> {
        for id in self.enable.iter().chain(&self.disable) {
            if registry.get(id).is_none() {
                debug!("Ignoring unknown rule ID '{}'", id);
            }
        }
        if !self.enable.is_empty() && !self.disable.is_empty() {
            debug!("Enable list given; ignoring disable list");
        }

        registry
            .iter()
            .filter(|rule| self.is_active(rule.id().as_str()))
            .collect()
    }
}

/// Split a comma-separated ID list, trimming entries and dropping empty ones
pub fn parse_id_list(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
