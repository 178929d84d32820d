//! Rules command implementation
//!
//! Prints the builtin rules grouped by category:
//!
//! ```text
//! === OLM-Best-Practice ===
//!   ODH-OLM-001  missing-minkubeversion  [warning]
//!       ClusterServiceVersion should specify spec.minKubeVersion ...
//!
//! Total: 14 rules
//! ```

use crate::bundle::Bundle;
use crate::cli::args::RuleFamily;
use crate::cli::common::{self, EXIT_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::config::GoRulesConfig;
use crate::rules::{RuleMeta, RuleRegistry};
use crate::syntax::SourceFile;
use crate::types::Category;
use std::io;
use termcolor::{ColorSpec, StandardStream, WriteColor};

/// Run the rules command and return the process exit code
pub fn run_list(family: RuleFamily, globals: &GlobalOptions<'_>) -> i32 {
    let config = match common::load_config(globals.config) {
        Ok(config) => config,
        Err(e) => {
            common::report_error(&e.into());
            return EXIT_ERROR;
        }
    };
    let color = common::resolve_color(globals.color, config.output.color);
    let mut stdout = StandardStream::stdout(common::color_choice(color));

    let metas = collect_metas(family, &config.go);
    match write_listing(&mut stdout, &metas) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            common::report_error(&e.into());
            EXIT_ERROR
        }
    }
}

/// Metadata of every rule in the requested family, in registry order
pub(crate) fn collect_metas(family: RuleFamily, go: &GoRulesConfig) -> Vec<RuleMeta> {
    let mut metas = Vec::new();
    if matches!(family, RuleFamily::Bundle | RuleFamily::All) {
        let registry: RuleRegistry<Bundle> = RuleRegistry::bundle_rules();
        metas.extend(registry.iter().map(|rule| rule.meta().clone()));
    }
    if matches!(family, RuleFamily::Go | RuleFamily::All) {
        let registry: RuleRegistry<SourceFile> = RuleRegistry::go_rules(go);
        metas.extend(registry.iter().map(|rule| rule.meta().clone()));
    }
    metas
}

/// Write the grouped listing; empty categories are skipped
pub(crate) fn write_listing<W: WriteColor>(out: &mut W, metas: &[RuleMeta]) -> io::Result<()> {
    for category in Category::ALL {
        let mut in_category: Vec<&RuleMeta> =
            metas.iter().filter(|meta| meta.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        in_category.sort_by(|a, b| a.id.cmp(&b.id));

        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "=== {} ===", category)?;
        out.reset()?;

        for meta in in_category {
            write!(out, "  {}  {}  [{}]", meta.id, meta.name, meta.severity)?;
            if meta.fixable {
                write!(out, " (fixable)")?;
            }
            writeln!(out)?;
            writeln!(out, "      {}", meta.description)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Total: {} rules", metas.len())
}
