//! requirements-list extractor (`requirements.txt` and friends)
//!
//! Line-oriented grammar:
//! - blank lines and `#` comments are skipped
//! - `name<op><version>` with op in `[<>=~!]+` yields a declaration
//! - a bare package name (no version, no embedded space) yields an
//!   unversioned declaration with a default `==` operator
//! - anything else is silently skipped

use crate::domain::{DependencyDeclaration, DependencyRole};
use crate::manifest::DependencyExtractor;
use regex::Regex;
use std::sync::LazyLock;

static REQUIREMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_.-]+)([<>=~!]+)([A-Za-z0-9_.-]+)").unwrap());

static BARE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Parse a single requirement expression (`flask==1.0.0`, `requests`, ...)
pub(crate) fn parse_requirement(
    expr: &str,
    role: DependencyRole,
) -> Option<DependencyDeclaration> {
    let trimmed = expr.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    if let Some(caps) = REQUIREMENT_RE.captures(trimmed) {
        return Some(DependencyDeclaration::new(
            &caps[1],
            Some(caps[3].to_string()),
            Some(caps[2].to_string()),
            role,
        ));
    }

    if BARE_NAME_RE.is_match(trimmed) {
        return Some(DependencyDeclaration::unversioned(trimmed, role));
    }

    None
}

/// Extractor for requirements-list files
pub struct RequirementsExtractor;

impl DependencyExtractor for RequirementsExtractor {
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration> {
        content
            .lines()
            .filter_map(|line| parse_requirement(line, DependencyRole::Direct))
            .collect()
    }

    fn format_name(&self) -> &'static str {
        "requirements"
    }
}
