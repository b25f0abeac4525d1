//! CLI argument parsing module for dephealth

use crate::domain::EcosystemHint;
use clap::Parser;

/// Dependency health analyzer
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dephealth",
    version,
    about = "Analyze dependency health of a local project or GitHub repository"
)]
pub struct CliArgs {
    /// Project location: a filesystem path or a GitHub repository
    /// reference (https://github.com/owner/repo or github.com/owner/repo)
    #[arg(default_value = ".")]
    pub location: String,

    /// Package ecosystem to analyze
    #[arg(long, value_enum, default_value_t = EcosystemHint::Auto)]
    pub ecosystem: EcosystemHint,

    /// Output the report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}
