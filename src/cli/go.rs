//! Go command implementation
//!
//! Discovers Go files below the given paths, parses them in parallel and runs
//! the selected detectors over every file.

use crate::cli::args::OutputFormat;
use crate::cli::common::{self, GlobalOptions};
use crate::engine::{ExecutionEngine, Report, collect_go_files};
use crate::error::LintError;
use crate::rules::RuleRegistry;
use crate::syntax::SourceFile;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Run the go command and return the process exit code
pub fn run_go(
    paths: &[PathBuf],
    enable: Option<&str>,
    disable: Option<&str>,
    format: Option<OutputFormat>,
    globals: &GlobalOptions<'_>,
) -> i32 {
    common::exit_code(run_go_inner(paths, enable, disable, format, globals))
}

fn run_go_inner(
    paths: &[PathBuf],
    enable: Option<&str>,
    disable: Option<&str>,
    format: Option<OutputFormat>,
    globals: &GlobalOptions<'_>,
) -> Result<Report, LintError> {
    let config = common::load_config(globals.config)?;
    let files = collect_go_files(paths, &config.go.exclude)?;

    let sources = files
        .par_iter()
        .map(|path| SourceFile::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = RuleRegistry::go_rules(&config.go);
    let selection = common::build_selection(&config.rules, enable, disable);
    let engine = ExecutionEngine::new(&registry, &selection);
    debug!(
        "Checking {} file(s) with {} rule(s)",
        sources.len(),
        engine.rules().len()
    );

    let report = engine.run_all(&sources);
    common::write_report(
        &report,
        common::resolve_format(format, config.output.format),
        common::resolve_color(globals.color, config.output.color),
    )?;
    Ok(report)
}
