//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Outdated package listing with role and version columns
//! - Severity-colored vulnerability display
//! - Unused dependency highlighting
//! - Repository activity summary for remote analyses

use crate::domain::{AnalysisReport, RepositoryActivity, Vulnerability};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, paint: impl Fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn severity_label(&self, severity: &str) -> String {
        if !self.color {
            return severity.to_string();
        }
        match severity {
            "critical" => severity.red().bold().to_string(),
            "high" => severity.red().to_string(),
            "moderate" => severity.yellow().to_string(),
            _ => severity.dimmed().to_string(),
        }
    }

    fn write_outdated(
        &self,
        report: &AnalysisReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.paint("Outdated packages:", |s| s.bold()))?;
        if report.outdated.is_empty() {
            writeln!(
                writer,
                "  {}",
                self.paint("none reported", |s| s.green())
            )?;
            return Ok(());
        }

        for entry in &report.outdated {
            let marker = if entry.is_outdated {
                self.paint("outdated", |s| s.yellow())
            } else {
                self.paint("current", |s| s.green())
            };
            writeln!(
                writer,
                "  {:<30} {:>12} -> {:<12} ({}, {})",
                entry.name,
                entry.current.as_deref().unwrap_or("unknown"),
                entry.latest.as_str(),
                entry.role,
                marker,
            )?;
            if self.verbosity == Verbosity::Verbose {
                writeln!(
                    writer,
                    "      wanted: {}",
                    entry.wanted.as_deref().unwrap_or("unknown")
                )?;
            }
        }
        Ok(())
    }

    fn write_vulnerability(
        &self,
        vulnerability: &Vulnerability,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "  {:<30} {} (affects {})",
            vulnerability.name,
            self.severity_label(&vulnerability.severity),
            vulnerability.affected_range.as_deref().unwrap_or("unknown range"),
        )?;
        if self.verbosity == Verbosity::Verbose {
            for node in &vulnerability.affected_nodes {
                writeln!(writer, "      at {}", node)?;
            }
            if let Some(fix) = &vulnerability.fix {
                match fix {
                    crate::domain::Fix::Flag(true) => writeln!(writer, "      fix available")?,
                    crate::domain::Fix::Flag(false) => writeln!(writer, "      no fix available")?,
                    crate::domain::Fix::Upgrade { target_version } => {
                        writeln!(writer, "      fix: upgrade to {}", target_version)?
                    }
                }
            }
        }
        Ok(())
    }

    fn write_usage(&self, report: &AnalysisReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let unused: Vec<_> = report.usage.iter().filter(|r| !r.used).collect();
        let used_count = report.usage.len() - unused.len();
        writeln!(
            writer,
            "{} {} of {} declared packages referenced in source",
            self.paint("Usage:", |s| s.bold()),
            used_count,
            report.usage.len(),
        )?;

        if self.verbosity == Verbosity::Verbose {
            for record in &report.usage {
                writeln!(
                    writer,
                    "  {:<30} {} reference(s)",
                    record.name, record.import_count
                )?;
            }
        } else {
            for record in unused {
                writeln!(
                    writer,
                    "  {:<30} {}",
                    record.name,
                    self.paint("unused", |s| s.yellow())
                )?;
            }
        }
        Ok(())
    }

    fn write_activity(
        &self,
        activity: &RepositoryActivity,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.paint("Repository activity:", |s| s.bold()))?;
        if let Some(error) = &activity.error {
            writeln!(
                writer,
                "  {}",
                self.paint(&format!("unavailable: {}", error), |s| s.yellow())
            )?;
            return Ok(());
        }

        let state = if activity.is_active {
            self.paint("active", |s| s.green())
        } else {
            self.paint("inactive", |s| s.yellow())
        };
        writeln!(
            writer,
            "  score {}/100 ({}), {} commits in the last 30 days",
            activity.activity_score, state, activity.recent_commit_count
        )?;
        writeln!(
            writer,
            "  {} total commits by {} contributors, last commit {}",
            activity.total_commit_count,
            activity.contributor_count,
            activity.last_commit_date.as_deref().unwrap_or("unknown"),
        )?;
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &AnalysisReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if let Some(error) = &report.error {
            writeln!(
                writer,
                "{} {}",
                self.paint("Analysis failed:", |s| s.red().bold()),
                error
            )?;
            return Ok(());
        }

        if self.verbosity == Verbosity::Quiet {
            writeln!(
                writer,
                "{} outdated, {} vulnerabilities, {} unused",
                report.outdated.iter().filter(|e| e.is_outdated).count(),
                report.vulnerabilities.len(),
                report.usage.iter().filter(|r| !r.used).count(),
            )?;
            return Ok(());
        }

        writeln!(
            writer,
            "{} {}",
            self.paint("Detected files:", |s| s.bold()),
            report.detected_files.join(", ")
        )?;
        writeln!(writer)?;

        self.write_outdated(report, writer)?;
        writeln!(writer)?;

        writeln!(
            writer,
            "{}",
            self.paint("Vulnerabilities:", |s| s.bold())
        )?;
        if report.vulnerabilities.is_empty() {
            writeln!(writer, "  {}", self.paint("none reported", |s| s.green()))?;
        } else {
            for vulnerability in &report.vulnerabilities {
                self.write_vulnerability(vulnerability, writer)?;
            }
        }
        writeln!(writer)?;

        self.write_usage(report, writer)?;

        if let Some(activity) = &report.activity {
            writeln!(writer)?;
            self.write_activity(activity, writer)?;
        }

        Ok(())
    }
}
