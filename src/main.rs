//! dephealth - Dependency health analysis CLI tool
//!
//! Analyzes a local project or a GitHub repository:
//! - Outdated dependency listing
//! - Known security advisories
//! - Used/unused dependency classification
//! - Repository activity score (remote references)

use clap::Parser;
use dephealth::analyzer::Analyzer;
use dephealth::cli::CliArgs;
use dephealth::output::{create_formatter, OutputConfig};
use dephealth::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

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

/// Diagnostics go to stderr; default to warnings, verbose raises to debug,
/// RUST_LOG overrides both
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "dephealth=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("dephealth v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.location);
    }

    let mut progress = if args.quiet || args.json {
        Progress::disabled()
    } else {
        Progress::default()
    };
    progress.spinner(&format!("Analyzing {}", args.location));

    let analyzer = Analyzer::new()?;
    let report = analyzer.analyze(&args.location, args.ecosystem).await;

    progress.finish_and_clear();

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
