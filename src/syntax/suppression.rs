#![forbid(unsafe_code)]

//! Comment-window suppression scanning
//!
//! Suppression is a textual proximity search: a candidate violation at line
//! `L` is dropped when a qualifying comment sits within a few lines above it.
//! Comments are not associated with statements; only their line matters.
//!
//! Two forms are recognized:
//!
//! - **Directives**: `//nolint:<names>` naming the rule (by name or ID), on
//!   line `L` or up to [`DIRECTIVE_LOOKBACK`] lines above. A bare `//nolint`
//!   without a colon suppresses every rule.
//! - **Justifications**: a comment in the [`JUSTIFICATION_LOOKBACK`] lines
//!   above `L` containing one of [`JUSTIFICATION_KEYWORDS`]. Only detectors
//!   that opt in honour these.

use crate::rules::RuleMeta;
use crate::syntax::Comment;
use regex::Regex;
use std::sync::LazyLock;

/// Lines above the candidate searched for `nolint` directives
pub const DIRECTIVE_LOOKBACK: u32 = 1;

/// Lines above the candidate searched for justification keywords
pub const JUSTIFICATION_LOOKBACK: u32 = 3;

/// Hedge words that document a deliberate decision to tolerate an error
///
/// Matched case-insensitively as substrings.
pub const JUSTIFICATION_KEYWORDS: &[&str] = &[
    "resilience:",
    "resilient:",
    "non-critical",
    "optional",
    "safe to ignore",
    "safe to continue",
    "safe default",
    "may not exist",
];

static NOLINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bnolint\b(:[A-Za-z0-9_,\-]*)?").expect("nolint pattern is valid")
});

/// Which suppression forms a detector honours, and how far up it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionPolicy {
    pub directive_lookback: u32,
    /// `None` disables justification suppression
    pub justification_lookback: Option<u32>,
}

impl SuppressionPolicy {
    /// Only `nolint` directives suppress
    pub const DIRECTIVES: SuppressionPolicy = SuppressionPolicy {
        directive_lookback: DIRECTIVE_LOOKBACK,
        justification_lookback: None,
    };

    /// Directives and justification comments suppress
    pub const DIRECTIVES_AND_JUSTIFICATIONS: SuppressionPolicy = SuppressionPolicy {
        directive_lookback: DIRECTIVE_LOOKBACK,
        justification_lookback: Some(JUSTIFICATION_LOOKBACK),
    };

    /// Returns true if a candidate at `line` must not be reported
    pub fn is_suppressed(&self, comments: &[Comment], line: u32, rule: &RuleMeta) -> bool {
        let directive_from = line.saturating_sub(self.directive_lookback);
        let directive = comments
            .iter()
            .filter(|c| c.line >= directive_from && c.line <= line)
            .any(|c| directive_applies(&c.text, rule));
        if directive {
            return true;
        }

        match self.justification_lookback {
            Some(lookback) => {
                let from = line.saturating_sub(lookback);
                comments
                    .iter()
                    .filter(|c| c.line >= from && c.line < line)
                    .any(|c| has_justification(&c.text))
            }
            None => false,
        }
    }
}

/// Does a comment contain a `nolint` directive covering this rule?
///
/// A directive without a `:` list is a blanket suppression.
pub fn directive_applies(comment: &str, rule: &RuleMeta) -> bool {
    NOLINT.captures_iter(comment).any(|caps| match caps.get(1) {
        None => true,
        Some(list) => list.as_str()[1..]
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .any(|name| {
                name.eq_ignore_ascii_case(rule.name) || name.eq_ignore_ascii_case(rule.id.as_str())
            }),
    })
}

/// Does a comment contain one of the justification keywords?
pub fn has_justification(comment: &str) -> bool {
    let lower = comment.to_lowercase();
    JUSTIFICATION_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
}
