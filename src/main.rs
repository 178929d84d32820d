//! odhlint CLI entry point

use clap::Parser;
use odhlint::cli::{Cli, Command, GlobalOptions};
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so report output on stdout stays machine-readable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("odhlint=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("odhlint=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("odhlint starting with args: {:?}", cli);

    let globals = GlobalOptions {
        config: cli.config.as_deref(),
        color: cli.color,
    };

    let exit_code = match &cli.command {
        Command::Bundle {
            path,
            enable,
            disable,
            format,
        } => odhlint::cli::bundle::run_bundle(
            path,
            enable.as_deref(),
            disable.as_deref(),
            *format,
            &globals,
        ),
        Command::Go {
            paths,
            enable,
            disable,
            format,
        } => odhlint::cli::go::run_go(
            paths,
            enable.as_deref(),
            disable.as_deref(),
            *format,
            &globals,
        ),
        Command::Rules { family } => odhlint::cli::list::run_list(*family, &globals),
    };

    process::exit(exit_code);
}
