//! cartfile - Cartfile dependency declaration CLI tool
//!
//! Parses declarations given on the command line, prints them in canonical
//! form and optionally computes their stable identifiers.

use cartfile::cli::CliArgs;
use cartfile::orchestrator::Inspector;
use cartfile::output::{create_formatter, OutputConfig};
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    init_tracing(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "cartfile=debug" } else { "cartfile=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("cartfile v{}", env!("CARGO_PKG_VERSION"));
    }

    let inspector = Inspector::new(args.clone())?;
    let report = inspector.run().await;

    let mut output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    output_config.color = io::stdout().is_terminal();
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    // Quiet mode keeps stdout clean, so errors still need to surface
    if args.quiet {
        for error in &report.errors {
            eprintln!("{}", error);
        }
    }

    if report.has_errors() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
