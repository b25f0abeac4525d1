//! dephealth - Dependency health analysis library
//!
//! This library assesses the health of a project's dependencies:
//! - Ecosystem detection and manifest extraction (npm, pip)
//! - Outdated-ness resolution via the package manager CLI or registry API
//! - Security advisory aggregation (npm audit)
//! - Used/unused classification from a source scan
//! - Repository activity scoring for GitHub-hosted projects

pub mod activity;
pub mod analyzer;
pub mod audit;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod outdated;
pub mod output;
pub mod progress;
pub mod registry;
pub mod repo;
pub mod tool;
pub mod usage;
pub mod workspace;
