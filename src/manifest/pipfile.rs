//! Pipfile extractor
//!
//! Section-scoped line scan over `[packages]` and `[dev-packages]`. Pipfile
//! version strings carry their own operator (`"==1.0.0"`, `">=2.0"`) or the
//! wildcard `"*"`, which maps to an unversioned declaration. Inline tables
//! with a `version` key are handled the same way.

use crate::domain::{DependencyDeclaration, DependencyRole};
use crate::manifest::DependencyExtractor;
use regex::Regex;
use std::sync::LazyLock;

static SIMPLE_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([A-Za-z0-9_.-]+)\s*=\s*"([^"]+)""#).unwrap());

static TABLE_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z0-9_.-]+)\s*=\s*\{.*version\s*=\s*"([^"]+)""#).unwrap()
});

static SPEC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([<>=~!]+)?\s*([A-Za-z0-9_.-]+)$").unwrap());

const SECTIONS: &[(&str, DependencyRole)] = &[
    ("packages", DependencyRole::Direct),
    ("dev-packages", DependencyRole::Dev),
];

/// Extractor for Pipfile manifests
pub struct PipfileExtractor;

impl DependencyExtractor for PipfileExtractor {
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration> {
        let mut declarations = Vec::new();

        for (section, role) in SECTIONS {
            let Some(body) = section_body(content, section) else {
                continue;
            };
            for line in body.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                let captured = SIMPLE_ENTRY_RE
                    .captures(trimmed)
                    .or_else(|| TABLE_ENTRY_RE.captures(trimmed));
                if let Some(caps) = captured {
                    declarations.push(declaration_from_spec(&caps[1], &caps[2], *role));
                }
            }
        }

        declarations
    }

    fn format_name(&self) -> &'static str {
        "Pipfile"
    }
}

fn section_body<'a>(content: &'a str, section: &str) -> Option<&'a str> {
    let header = format!("[{}]", section);
    let start = content.find(&header)? + header.len();
    let rest = &content[start..];
    let end = rest.find("\n[").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Split a Pipfile version spec into operator and version
fn declaration_from_spec(name: &str, spec: &str, role: DependencyRole) -> DependencyDeclaration {
    if spec == "*" {
        return DependencyDeclaration::unversioned(name, role);
    }
    match SPEC_RE.captures(spec) {
        Some(caps) => DependencyDeclaration::new(
            name,
            Some(caps[2].to_string()),
            Some(
                caps.get(1)
                    .map(|op| op.as_str().to_string())
                    .unwrap_or_else(|| "==".to_string()),
            ),
            role,
        ),
        // Unrecognized spec shapes keep the raw string as the version
        None => DependencyDeclaration::new(name, Some(spec.to_string()), None, role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<DependencyDeclaration> {
        PipfileExtractor.extract(content)
    }

    #[test]
    fn test_extract_packages() {
        let deps = extract(
            r#"[[source]]
url = "https://pypi.org/simple"

[packages]
flask = "==1.0.0"
requests = ">=2.28.0"
click = "*"
"#,
        );
        assert_eq!(deps.len(), 3);
        let flask = deps.iter().find(|d| d.name == "flask").unwrap();
        assert_eq!(flask.version.as_deref(), Some("1.0.0"));
        assert_eq!(flask.operator.as_deref(), Some("=="));
        let requests = deps.iter().find(|d| d.name == "requests").unwrap();
        assert_eq!(requests.operator.as_deref(), Some(">="));
        let click = deps.iter().find(|d| d.name == "click").unwrap();
        assert!(click.version.is_none());
    }

    #[test]
    fn test_dev_packages_role() {
        let deps = extract("[dev-packages]\npytest = \"==7.4.0\"\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].role, DependencyRole::Dev);
    }

    #[test]
    fn test_inline_table_entry() {
        let deps = extract(
            "[packages]\nrequests = { version = \"==2.31.0\", extras = [\"socks\"] }\n",
        );
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].version.as_deref(), Some("2.31.0"));
        assert_eq!(deps[0].operator.as_deref(), Some("=="));
    }

    #[test]
    fn test_bare_version_gets_default_operator() {
        let deps = extract("[packages]\nflask = \"1.0.0\"\n");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].version.as_deref(), Some("1.0.0"));
        assert_eq!(deps[0].operator.as_deref(), Some("=="));
    }

    #[test]
    fn test_sections_missing() {
        assert!(extract("[[source]]\nurl = \"https://pypi.org/simple\"\n").is_empty());
    }

    #[test]
    fn test_unparsable_lines_skipped() {
        let deps = extract("[packages]\nflask = \"==1.0.0\"\nnot a toml line\n");
        assert_eq!(deps.len(), 1);
    }
}
