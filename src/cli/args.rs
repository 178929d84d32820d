//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for validation commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// Which rule family `odhlint rules` lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleFamily {
    /// OLM bundle manifest rules
    Bundle,
    /// Go source detectors
    Go,
    /// Both families
    All,
}

/// odhlint CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "odhlint")]
#[command(about = "Lint Go sources and OLM operator bundles")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./odhlint.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output coloring; overrides the configuration file
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,
}

/// Available odhlint subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate an OLM bundle directory
    Bundle {
        /// Bundle root containing manifests/ and optionally metadata/
        path: PathBuf,

        /// Comma-separated rule IDs to run exclusively
        #[arg(long, value_name = "IDS")]
        enable: Option<String>,

        /// Comma-separated rule IDs to skip (ignored with --enable)
        #[arg(long, value_name = "IDS")]
        disable: Option<String>,

        /// Output format; overrides the configuration file
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Check Go source files and directories
    Go {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Comma-separated rule IDs to run exclusively
        #[arg(long, value_name = "IDS")]
        enable: Option<String>,

        /// Comma-separated rule IDs to skip (ignored with --enable)
        #[arg(long, value_name = "IDS")]
        disable: Option<String>,

        /// Output format; overrides the configuration file
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List available rules grouped by category
    Rules {
        /// Rule family to list
        #[arg(long, default_value = "all")]
        family: RuleFamily,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bundle_args() {
        let cli = Cli::parse_from([
            "odhlint",
            "bundle",
            "./bundle",
            "--disable",
            "ODH-OLM-007",
            "-f",
            "jsonl",
        ]);
        match cli.command {
            Command::Bundle {
                path,
                enable,
                disable,
                format,
            } => {
                assert_eq!(path, PathBuf::from("./bundle"));
                assert_eq!(enable, None);
                assert_eq!(disable.as_deref(), Some("ODH-OLM-007"));
                assert_eq!(format, Some(OutputFormat::Jsonl));
            }
            _ => panic!("Expected Bundle command"),
        }
        assert_eq!(cli.color, None);
        assert!(!cli.debug);
    }

    #[test]
    fn test_bundle_requires_path() {
        assert!(Cli::try_parse_from(["odhlint", "bundle"]).is_err());
    }

    #[test]
    fn test_go_default_paths() {
        let cli = Cli::parse_from(["odhlint", "go"]);
        match cli.command {
            Command::Go { paths, format, .. } => {
                assert_eq!(paths, vec![PathBuf::from(".")]);
                assert_eq!(format, None);
            }
            _ => panic!("Expected Go command"),
        }
    }

    #[test]
    fn test_go_with_paths_and_enable() {
        let cli = Cli::parse_from(["odhlint", "go", "pkg/", "cmd/main.go", "--enable", "ODH-GO-001"]);
        match cli.command {
            Command::Go { paths, enable, .. } => {
                assert_eq!(paths, vec![PathBuf::from("pkg/"), PathBuf::from("cmd/main.go")]);
                assert_eq!(enable.as_deref(), Some("ODH-GO-001"));
            }
            _ => panic!("Expected Go command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "odhlint",
            "rules",
            "--color",
            "never",
            "--debug",
            "--config",
            "custom.toml",
        ]);
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_rules_family() {
        let cli = Cli::parse_from(["odhlint", "rules"]);
        assert!(matches!(cli.command, Command::Rules { family: RuleFamily::All }));

        let cli = Cli::parse_from(["odhlint", "rules", "--family", "go"]);
        assert!(matches!(cli.command, Command::Rules { family: RuleFamily::Go }));
    }

    #[test]
    fn test_invalid_format() {
        assert!(Cli::try_parse_from(["odhlint", "go", "--format", "xml"]).is_err());
    }
}
