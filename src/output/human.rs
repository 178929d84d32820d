#![forbid(unsafe_code)]

//! Human-readable report
//!
//! ```text
//! Found 2 issue(s):
//!   - 1 error(s)
//!   - 1 warning(s)
//!
//! ❌ [ODH-OLM-004] PodDisruptionBudget 'controller' has maxUnavailable set to 0 or 0%
//!    File: /bundle/manifests/pdb.yaml
//!    Category: OLM-Upgrade
//!    Setting maxUnavailable to 0 or 0% prevents node drains ...
//!
//! ⚠️  [ODH-OLM-001] ClusterServiceVersion is missing spec.minKubeVersion field
//!    ...
//!
//! ❌ Validation failed: 1 error(s), 1 warning(s)
//! ```

use crate::engine::Report;
use crate::rules::Violation;
use crate::types::Severity;
use std::io;
use termcolor::{Color, ColorSpec, NoColor, WriteColor};

/// Human-readable formatter writing to any [`WriteColor`] sink
#[derive(Debug, Default)]
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Render the report without color
    pub fn format(&self, report: &Report) -> io::Result<String> {
        let mut out = NoColor::new(Vec::new());
        self.write_report(&mut out, report)?;
        Ok(String::from_utf8_lossy(&out.into_inner()).into_owned())
    }

    /// Write the violation listing followed by the summary line
    pub fn write_report<W: WriteColor>(&self, out: &mut W, report: &Report) -> io::Result<()> {
        if report.is_clean() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "✓ No issues found")?;
            out.reset()?;
        } else {
            writeln!(out, "Found {} issue(s):", report.violations.len())?;
            if report.errors() > 0 {
                writeln!(out, "  - {} error(s)", report.errors())?;
            }
            if report.warnings() > 0 {
                writeln!(out, "  - {} warning(s)", report.warnings())?;
            }
            if report.infos() > 0 {
                writeln!(out, "  - {} info", report.infos())?;
            }
            writeln!(out)?;

            for violation in &report.violations {
                self.write_violation(out, violation)?;
                writeln!(out)?;
            }
        }

        self.write_summary(out, report)
    }

    fn write_violation<W: WriteColor>(&self, out: &mut W, violation: &Violation) -> io::Result<()> {
        out.set_color(&severity_color(violation.severity))?;
        write!(out, "{}", severity_icon(violation.severity))?;
        out.reset()?;

        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, " [{}]", violation.rule_id)?;
        out.reset()?;
        writeln!(out, " {}", violation.message)?;

        writeln!(out, "   File: {}", violation.location())?;
        writeln!(out, "   Category: {}", violation.category)?;
        if !violation.description.is_empty() {
            writeln!(out, "   {}", violation.description)?;
        }
        if violation.fixable {
            writeln!(out, "   ℹ️  This issue is potentially auto-fixable")?;
        }
        Ok(())
    }

    fn write_summary<W: WriteColor>(&self, out: &mut W, report: &Report) -> io::Result<()> {
        writeln!(out)?;
        let (errors, warnings) = (report.errors(), report.warnings());

        if errors > 0 {
            out.set_color(&severity_color(Severity::Error))?;
            writeln!(
                out,
                "❌ Validation failed: {} error(s), {} warning(s)",
                errors, warnings
            )?;
        } else if warnings > 0 {
            out.set_color(&severity_color(Severity::Warning))?;
            writeln!(out, "⚠️  Validation passed with {} warning(s)", warnings)?;
        } else {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            writeln!(out, "✓ All checks passed!")?;
        }
        out.reset()
    }
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "❌",
        Severity::Warning => "⚠️ ",
        Severity::Info => "ℹ️ ",
    }
}

fn severity_color(severity: Severity) -> ColorSpec {
    let mut spec = ColorSpec::new();
    match severity {
        Severity::Error => spec.set_fg(Some(Color::Red)).set_bold(true),
        Severity::Warning => spec.set_fg(Some(Color::Yellow)),
        Severity::Info => spec.set_fg(Some(Color::Cyan)),
    };
    spec
}
