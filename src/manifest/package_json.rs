//! package.json extractor for npm projects
//!
//! Merges the `dependencies` and `devDependencies` maps into one
//! declaration table. A name present in both maps keeps the `dependency`
//! role (the direct map wins).

use crate::domain::{DependencyDeclaration, DependencyRole};
use crate::manifest::DependencyExtractor;
use serde_json::Value;

/// Extractor for package.json manifests
pub struct PackageJsonExtractor;

impl DependencyExtractor for PackageJsonExtractor {
    fn extract(&self, content: &str) -> Vec<DependencyDeclaration> {
        let json: Value = match serde_json::from_str(content) {
            Ok(json) => json,
            // Malformed JSON contributes nothing; the caller decides whether
            // an empty set is a hard failure.
            Err(_) => return Vec::new(),
        };

        let mut declarations = Vec::new();

        if let Some(deps) = json.get("dependencies").and_then(|v| v.as_object()) {
            for (name, version) in deps {
                if let Some(version) = version.as_str() {
                    declarations.push(DependencyDeclaration::new(
                        name.clone(),
                        Some(version.to_string()),
                        None,
                        DependencyRole::Direct,
                    ));
                }
            }
        }

        let direct_names: Vec<String> = declarations.iter().map(|d| d.name.clone()).collect();

        if let Some(deps) = json.get("devDependencies").and_then(|v| v.as_object()) {
            for (name, version) in deps {
                if direct_names.contains(name) {
                    continue;
                }
                if let Some(version) = version.as_str() {
                    declarations.push(DependencyDeclaration::new(
                        name.clone(),
                        Some(version.to_string()),
                        None,
                        DependencyRole::Dev,
                    ));
                }
            }
        }

        declarations
    }

    fn format_name(&self) -> &'static str {
        "package.json"
    }
}
