//! Bundle command implementation
//!
//! Loads one OLM bundle, runs the selected manifest rules and prints the
//! report. A bundle that cannot be loaded aborts before any rule runs.

use crate::bundle::load_bundle;
use crate::cli::args::OutputFormat;
use crate::cli::common::{self, GlobalOptions};
use crate::engine::{ExecutionEngine, Report};
use crate::error::LintError;
use crate::rules::RuleRegistry;
use std::path::Path;
use tracing::debug;

/// Run the bundle command and return the process exit code
pub fn run_bundle(
    path: &Path,
    enable: Option<&str>,
    disable: Option<&str>,
    format: Option<OutputFormat>,
    globals: &GlobalOptions<'_>,
) -> i32 {
    common::exit_code(run_bundle_inner(path, enable, disable, format, globals))
}

fn run_bundle_inner(
    path: &Path,
    enable: Option<&str>,
    disable: Option<&str>,
    format: Option<OutputFormat>,
    globals: &GlobalOptions<'_>,
) -> Result<Report, LintError> {
    let config = common::load_config(globals.config)?;
    let bundle = load_bundle(path)?;

    let registry = RuleRegistry::bundle_rules();
    let selection = common::build_selection(&config.rules, enable, disable);
    let engine = ExecutionEngine::new(&registry, &selection);
    debug!(
        "Validating bundle {} with {} rule(s)",
        bundle.root.display(),
        engine.rules().len()
    );

    let report = engine.run(&bundle);
    common::write_report(
        &report,
        common::resolve_format(format, config.output.format),
        common::resolve_color(globals.color, config.output.color),
    )?;
    Ok(report)
}
