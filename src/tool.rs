//! Package-manager CLI integration
//!
//! This module provides:
//! - The `PackageTool` trait over the npm subcommands the analyzer shells
//!   out to (`outdated`, `audit`)
//! - A system implementation that executes the real binary
//!
//! Capturing exit code, stdout and stderr separately matters here: npm
//! signals "outdated packages exist" with exit code 1 plus valid JSON on
//! stdout, so success cannot be read off the status alone.

use crate::error::ToolError;
use std::path::Path;
use std::process::Command;

/// Captured output of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, or -1 when the process was killed by a signal
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn new(status_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running package-manager commands against a project directory
pub trait PackageTool: Send + Sync {
    /// Run the outdated-report command (`npm outdated --json`)
    fn outdated(&self, project_dir: &Path) -> Result<ToolOutput, ToolError>;

    /// Run the vulnerability-audit command (`npm audit --json`)
    fn audit(&self, project_dir: &Path) -> Result<ToolOutput, ToolError>;
}

/// Package tool that executes the real npm binary
#[derive(Debug, Default)]
pub struct SystemNpm;

impl SystemNpm {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str], project_dir: &Path) -> Result<ToolOutput, ToolError> {
        let command_str = format!("npm {}", args.join(" "));
        let output = Command::new("npm")
            .args(args)
            .current_dir(project_dir)
            .output()
            .map_err(|e| ToolError::launch(&command_str, e))?;

        Ok(ToolOutput::new(
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        ))
    }
}

impl PackageTool for SystemNpm {
    fn outdated(&self, project_dir: &Path) -> Result<ToolOutput, ToolError> {
        self.run(&["outdated", "--json"], project_dir)
    }

    fn audit(&self, project_dir: &Path) -> Result<ToolOutput, ToolError> {
        self.run(&["audit", "--json"], project_dir)
    }
}
