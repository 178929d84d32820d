//! Common helper functions shared across CLI commands
//!
//! Configuration loading, merging of command-line overrides into the
//! configuration, and report output.

use crate::cli::args;
use crate::config::{ColorOption, Config, OutputFormat, RulesConfig};
use crate::engine::{Report, Selection};
use crate::engine::selection::parse_id_list;
use crate::error::{ConfigError, LintError};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::io::{IsTerminal, Write};
use std::path::Path;
use termcolor::{ColorChoice, StandardStream, WriteColor};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Global options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions<'a> {
    pub config: Option<&'a Path>,
    pub color: Option<args::ColorChoice>,
}

/// Load the configuration named by `--config`, or discover the default one
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed or validated.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    Config::discover(explicit)
}

/// Build the rule selection for a run
///
/// A non-empty `--enable`/`--disable` list replaces the corresponding
/// configuration list; an absent or empty one keeps it.
pub(crate) fn build_selection(
    rules: &RulesConfig,
    enable: Option<&str>,
    disable: Option<&str>,
) -> Selection {
    let pick = |cli: Option<&str>, configured: &[String]| {
        let ids = cli.map(parse_id_list).unwrap_or_default();
        if ids.is_empty() {
            configured
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect::<Vec<_>>()
        } else {
            ids.into_iter().collect()
        }
    };

    Selection::new(pick(enable, &rules.enable), pick(disable, &rules.disable))
}

/// Command-line format wins over the configured one
pub(crate) fn resolve_format(cli: Option<args::OutputFormat>, configured: OutputFormat) -> OutputFormat {
    match cli {
        Some(args::OutputFormat::Human) => OutputFormat::Human,
        Some(args::OutputFormat::Jsonl) => OutputFormat::Jsonl,
        None => configured,
    }
}

/// Command-line color choice wins over the configured one
pub(crate) fn resolve_color(cli: Option<args::ColorChoice>, configured: ColorOption) -> ColorOption {
    match cli {
        Some(args::ColorChoice::Auto) => ColorOption::Auto,
        Some(args::ColorChoice::Always) => ColorOption::Always,
        Some(args::ColorChoice::Never) => ColorOption::Never,
        None => configured,
    }
}

/// Map a color option onto termcolor, disabling color when stdout is not a terminal
pub(crate) fn color_choice(option: ColorOption) -> ColorChoice {
    match option {
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
        ColorOption::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorOption::Auto => ColorChoice::Never,
    }
}

/// Write the report to stdout in the requested format
///
/// # Errors
///
/// Returns `LintError::Io` if writing fails.
pub(crate) fn write_report(report: &Report, format: OutputFormat, color: ColorOption) -> Result<(), LintError> {
    let mut stdout = StandardStream::stdout(color_choice(color));
    match format {
        OutputFormat::Human => HumanFormatter::new().write_report(&mut stdout, report)?,
        OutputFormat::Jsonl => {
            let output = JsonlFormatter::new()
                .format(report)
                .map_err(std::io::Error::from)?;
            stdout.write_all(output.as_bytes())?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Turn the outcome of a validation run into an exit code
///
/// Fatal errors are printed to stderr and map to [`EXIT_ERROR`].
pub(crate) fn exit_code(result: Result<Report, LintError>) -> i32 {
    match result {
        Ok(report) if report.has_errors() => EXIT_VIOLATIONS,
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            report_error(&e);
            EXIT_ERROR
        }
    }
}

/// Print a fatal error to stderr
pub(crate) fn report_error(error: &LintError) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(termcolor::ColorSpec::new().set_fg(Some(termcolor::Color::Red)));
    let _ = write!(stderr, "Error:");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", error);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(enable: &[&str], disable: &[&str]) -> RulesConfig {
        RulesConfig {
            enable: enable.iter().map(|s| s.to_string()).collect(),
            disable: disable.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_selection_falls_back_to_config() {
        let selection = build_selection(&rules(&[], &["ODH-OLM-007"]), None, None);
        assert!(selection.enable.is_empty());
        assert!(selection.disable.contains("ODH-OLM-007"));
    }

    #[test]
    fn test_cli_lists_override_config() {
        let selection = build_selection(
            &rules(&["ODH-OLM-001"], &["ODH-OLM-007"]),
            Some("ODH-OLM-004, ODH-OLM-005"),
            Some(""),
        );
        assert_eq!(selection.enable.len(), 2);
        assert!(selection.enable.contains("ODH-OLM-004"));
        assert!(!selection.enable.contains("ODH-OLM-001"));
        assert!(selection.disable.contains("ODH-OLM-007"));
    }

    #[test]
    fn test_resolve_format_and_color() {
        assert_eq!(resolve_format(None, OutputFormat::Jsonl), OutputFormat::Jsonl);
        assert_eq!(
            resolve_format(Some(args::OutputFormat::Human), OutputFormat::Jsonl),
            OutputFormat::Human
        );
        assert_eq!(resolve_color(None, ColorOption::Never), ColorOption::Never);
        assert_eq!(
            resolve_color(Some(args::ColorChoice::Always), ColorOption::Never),
            ColorOption::Always
        );
    }

    #[test]
    fn test_color_choice_mapping() {
        assert_eq!(color_choice(ColorOption::Always), ColorChoice::Always);
        assert_eq!(color_choice(ColorOption::Never), ColorChoice::Never);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(Ok(Report::default())), EXIT_SUCCESS);
        let err = LintError::Config(ConfigError::Validation("bad".to_string()));
        assert_eq!(exit_code(Err(err)), EXIT_ERROR);
    }
}
