//! setup.py extractor
//!
//! Pulls the quoted entries out of the `install_requires = [ ... ]` list and
//! runs each through the requirements grammar. No Python evaluation; a list
//! built dynamically (comprehensions, variables) yields nothing.

use crate::domain::{DependencyDeclaration, DependencyRole};
use crate::manifest::requirements_txt::parse_requirement;
use crate::manifest::DependencyExtractor;
use regex::Regex;
use std::sync::LazyLock;

static INSTALL_REQUIRES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"install_requires\s*=\s*\[([^\]]*)\]").unwrap());

static QUOTED_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).unwrap());

/// Extractor for setup.py manifests
pub struct SetupPyExtractor;

impl DependencyExtractor for SetupPyExtractor {
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration> {
        let Some(caps) = INSTALL_REQUIRES_RE.captures(content) else {
            return Vec::new();
        };

        QUOTED_ENTRY_RE
            .captures_iter(&caps[1])
            .filter_map(|entry| parse_requirement(&entry[1], DependencyRole::Direct))
            .collect()
    }

    fn format_name(&self) -> &'static str {
        "setup.py"
    }
}
