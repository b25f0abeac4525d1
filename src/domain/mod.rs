//! Core domain models for dephealth
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem types for the supported package-manager families
//! - Dependency declaration structures extracted from manifest files
//! - Report structures assembled by the analyzer (outdated entries,
//!   vulnerabilities, usage records, repository activity)

mod dependency;
mod ecosystem;
mod report;

pub use dependency::{DependencyDeclaration, DependencyRole, DependencySet};
pub use ecosystem::{Ecosystem, EcosystemHint};
pub use report::{
    AnalysisReport, Fix, LatestVersion, OutdatedEntry, RepositoryActivity, UsageRecord,
    Vulnerability,
};
