//! pyproject.toml extractor
//!
//! A best-effort section-scoped line scan rather than a strict TOML parse,
//! so damaged files still contribute their well-formed lines. Covers:
//! - PEP 621 `[project]` `dependencies = [ ... ]` list entries (parsed with
//!   the requirements grammar)
//! - `[tool.poetry.dependencies]` / `[tool.poetry.dev-dependencies]` tables
//!   with `name = "version"` and `name = { version = "version", ... }` forms
//! - bare `[dependencies]` / `[project.dependencies]` table headers

use crate::domain::{DependencyDeclaration, DependencyRole};
use crate::manifest::requirements_txt::parse_requirement;
use crate::manifest::DependencyExtractor;
use regex::Regex;
use std::sync::LazyLock;

static SIMPLE_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([A-Za-z0-9_.-]+)\s*=\s*"([^"]+)""#).unwrap());

static TABLE_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z0-9_.-]+)\s*=\s*\{\s*version\s*=\s*"([^"]+)""#).unwrap()
});

/// Dependency table sections searched for, with the role their entries take
const SECTIONS: &[(&str, DependencyRole)] = &[
    ("dependencies", DependencyRole::Direct),
    ("project.dependencies", DependencyRole::Direct),
    ("tool.poetry.dependencies", DependencyRole::Direct),
    ("tool.poetry.dev-dependencies", DependencyRole::Dev),
];

/// Extractor for pyproject.toml manifests
pub struct PyprojectExtractor;

impl DependencyExtractor for PyprojectExtractor {
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration> {
        let mut declarations = Vec::new();

        extract_pep621_list(content, &mut declarations);

        for (section, role) in SECTIONS {
            let Some(body) = section_body(content, section) else {
                continue;
            };
            for line in body.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                if let Some(caps) = SIMPLE_ENTRY_RE.captures(trimmed) {
                    declarations.push(DependencyDeclaration::new(
                        &caps[1],
                        Some(caps[2].to_string()),
                        Some("==".to_string()),
                        *role,
                    ));
                } else if let Some(caps) = TABLE_ENTRY_RE.captures(trimmed) {
                    declarations.push(DependencyDeclaration::new(
                        &caps[1],
                        Some(caps[2].to_string()),
                        Some("==".to_string()),
                        *role,
                    ));
                }
            }
        }

        declarations
    }

    fn format_name(&self) -> &'static str {
        "pyproject.toml"
    }
}

/// Returns the text between a `[section]` header and the next table header
fn section_body<'a>(content: &'a str, section: &str) -> Option<&'a str> {
    let header = format!("[{}]", section);
    let start = content.find(&header)? + header.len();
    let rest = &content[start..];
    let end = rest.find("\n[").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Parse the PEP 621 `dependencies = [ "name>=1.0", ... ]` list inside
/// `[project]`, applying the requirements grammar to each quoted entry
fn extract_pep621_list(content: &str, output: &mut Vec<DependencyDeclaration>) {
    let Some(project) = section_body(content, "project") else {
        return;
    };
    let Some(list_start) = project.find("dependencies") else {
        return;
    };
    let after = &project[list_start..];
    let Some(open) = after.find('[') else {
        return;
    };
    let rest = &after[open + 1..];
    let Some(close) = rest.find(']') else {
        return;
    };

    for entry in rest[..close].split(',') {
        let cleaned = entry.trim().trim_matches(|c| c == '"' || c == '\'');
        if let Some(declaration) = parse_requirement(cleaned, DependencyRole::Direct) {
            output.push(declaration);
        }
    }
}
