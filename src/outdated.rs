//! Outdated-ness resolution
//!
//! Two resolution strategies, one per ecosystem:
//! - npm: one `npm outdated --json` invocation for the whole project. The
//!   tool exits 1 when outdated packages exist, so the stdout JSON decides
//!   success, not the exit code.
//! - pip: one registry lookup per declared package, issued concurrently.
//!   Each slot resolves independently; one failed lookup never taints the
//!   others.
//!
//! Every failure in this module degrades to an empty or unknown value and
//! is recorded through `tracing`; nothing here aborts the analysis.

use crate::domain::{DependencySet, LatestVersion, OutdatedEntry};
use crate::registry::PackageRegistry;
use crate::tool::PackageTool;
use std::path::Path;
use tracing::warn;

/// Resolve outdated entries for an npm project.
///
/// Only packages the tool reports appear in the result; an up-to-date
/// project yields an empty list. Entries follow declaration order, with
/// packages unknown to the declaration set (hoisted transitives) appended
/// alphabetically.
pub fn npm_outdated(
    tool: &dyn PackageTool,
    project_dir: &Path,
    declarations: &DependencySet,
) -> Vec<OutdatedEntry> {
    let output = match tool.outdated(project_dir) {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "npm outdated unavailable, reporting no outdated packages");
            return Vec::new();
        }
    };

    if output.stdout.trim().is_empty() {
        if output.status_code != 0 {
            warn!(
                status = output.status_code,
                stderr = %output.stderr.trim(),
                "npm outdated produced no output"
            );
        }
        return Vec::new();
    }

    let parsed: serde_json::Value = match serde_json::from_str(&output.stdout) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "unparsable npm outdated output, reporting no outdated packages");
            return Vec::new();
        }
    };

    let Some(packages) = parsed.as_object() else {
        warn!("npm outdated output was not a JSON object");
        return Vec::new();
    };

    let mut entries: Vec<OutdatedEntry> = packages
        .iter()
        .filter_map(|(name, record)| entry_from_record(name, record, declarations))
        .collect();

    let position = |entry: &OutdatedEntry| {
        declarations
            .iter()
            .position(|d| d.name == entry.name)
            .unwrap_or(usize::MAX)
    };
    entries.sort_by(|a, b| position(a).cmp(&position(b)).then(a.name.cmp(&b.name)));
    entries
}

fn entry_from_record(
    name: &str,
    record: &serde_json::Value,
    declarations: &DependencySet,
) -> Option<OutdatedEntry> {
    let record = record.as_object()?;
    let field = |key: &str| {
        record
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    };

    let latest = match field("latest") {
        Some(version) => LatestVersion::Resolved(version),
        None => LatestVersion::Unavailable,
    };

    Some(OutdatedEntry::new(
        name,
        field("current"),
        field("wanted"),
        latest,
        declarations.role_of(name),
    ))
}

/// Resolve outdated entries for a pip project via concurrent registry
/// lookups. Every declaration gets an entry; `wanted` mirrors the declared
/// version since no lockfile resolution happens here.
pub async fn pip_outdated(
    registry: &dyn PackageRegistry,
    declarations: &DependencySet,
) -> Vec<OutdatedEntry> {
    let lookups = declarations.iter().map(|declaration| async move {
        let latest = match registry.latest_version(&declaration.name).await {
            Ok(version) => LatestVersion::Resolved(version),
            Err(e) if e.is_not_found() => LatestVersion::NotFound,
            Err(e) => {
                warn!(package = %declaration.name, error = %e, "latest-version lookup failed");
                LatestVersion::Unavailable
            }
        };
        OutdatedEntry::new(
            &declaration.name,
            declaration.version.clone(),
            declaration.version.clone(),
            latest,
            declaration.role,
        )
    });

    futures::future::join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyDeclaration, DependencyRole};
    use crate::error::{RegistryError, ToolError};
    use crate::tool::ToolOutput;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MockTool {
        result: Result<ToolOutput, &'static str>,
    }

    impl PackageTool for MockTool {
        fn outdated(&self, _project_dir: &Path) -> Result<ToolOutput, ToolError> {
            match &self.result {
                Ok(output) => Ok(output.clone()),
                Err(msg) => Err(ToolError::launch(
                    "npm outdated --json",
                    std::io::Error::new(std::io::ErrorKind::NotFound, *msg),
                )),
            }
        }

        fn audit(&self, _project_dir: &Path) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::new(0, "{}", ""))
        }
    }

    struct MockRegistry {
        versions: HashMap<String, Result<String, &'static str>>,
    }

    #[async_trait]
    impl PackageRegistry for MockRegistry {
        fn registry_name(&self) -> &'static str {
            "PyPI"
        }

        async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
            match self.versions.get(package) {
                Some(Ok(version)) => Ok(version.clone()),
                Some(Err("404")) => Err(RegistryError::package_not_found(package, "PyPI")),
                Some(Err(msg)) => Err(RegistryError::network_error(package, "PyPI", *msg)),
                None => Err(RegistryError::package_not_found(package, "PyPI")),
            }
        }
    }

    fn npm_declarations() -> DependencySet {
        let mut set = DependencySet::new();
        set.insert(DependencyDeclaration::new(
            "lodash",
            Some("^4.17.0".into()),
            None,
            DependencyRole::Direct,
        ));
        set.insert(DependencyDeclaration::new(
            "jest",
            Some("^29.0.0".into()),
            None,
            DependencyRole::Dev,
        ));
        set
    }

    #[test]
    fn test_npm_outdated_parses_report() {
        let stdout = r#"{
            "lodash": {"current": "4.17.0", "wanted": "4.17.21", "latest": "4.17.21"},
            "jest": {"current": "29.0.0", "wanted": "29.7.0", "latest": "29.7.0"}
        }"#;
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, stdout, "")),
        };

        let entries = npm_outdated(&tool, Path::new("."), &npm_declarations());
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "lodash");
        assert_eq!(entries[0].current.as_deref(), Some("4.17.0"));
        assert_eq!(entries[0].wanted.as_deref(), Some("4.17.21"));
        assert_eq!(
            entries[0].latest,
            LatestVersion::Resolved("4.17.21".into())
        );
        assert!(entries[0].is_outdated);
        assert_eq!(entries[0].role, DependencyRole::Direct);

        assert_eq!(entries[1].name, "jest");
        assert_eq!(entries[1].role, DependencyRole::Dev);
    }

    #[test]
    fn test_npm_outdated_exit_one_is_not_failure() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(
                1,
                r#"{"lodash": {"current": "4.0.0", "wanted": "4.0.0", "latest": "4.17.21"}}"#,
                "",
            )),
        };
        let entries = npm_outdated(&tool, Path::new("."), &npm_declarations());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_outdated);
    }

    #[test]
    fn test_npm_outdated_empty_output_means_up_to_date() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(0, "", "")),
        };
        assert!(npm_outdated(&tool, Path::new("."), &npm_declarations()).is_empty());
    }

    #[test]
    fn test_npm_outdated_tool_unavailable_degrades() {
        let tool = MockTool {
            result: Err("npm not installed"),
        };
        assert!(npm_outdated(&tool, Path::new("."), &npm_declarations()).is_empty());
    }

    #[test]
    fn test_npm_outdated_unparsable_output_degrades() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, "not json at all", "")),
        };
        assert!(npm_outdated(&tool, Path::new("."), &npm_declarations()).is_empty());
    }

    #[test]
    fn test_npm_outdated_missing_fields_become_unknown() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, r#"{"lodash": {"wanted": "4.17.21"}}"#, "")),
        };
        let entries = npm_outdated(&tool, Path::new("."), &npm_declarations());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].current.is_none());
        assert_eq!(entries[0].latest, LatestVersion::Unavailable);
        assert!(!entries[0].is_outdated);
    }

    #[test]
    fn test_npm_outdated_unknown_package_defaults_to_direct_role() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(
                1,
                r#"{"hoisted-transitive": {"current": "1.0.0", "wanted": "1.0.0", "latest": "2.0.0"}}"#,
                "",
            )),
        };
        let entries = npm_outdated(&tool, Path::new("."), &npm_declarations());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, DependencyRole::Direct);
    }

    fn pip_declarations() -> DependencySet {
        let mut set = DependencySet::new();
        set.insert(DependencyDeclaration::direct("flask", "1.0.0", "=="));
        set.insert(DependencyDeclaration::direct("requests", "2.28.0", ">="));
        set.insert(DependencyDeclaration::unversioned(
            "click",
            DependencyRole::Direct,
        ));
        set
    }

    #[tokio::test]
    async fn test_pip_outdated_resolves_each_declaration() {
        let registry = MockRegistry {
            versions: HashMap::from([
                ("flask".to_string(), Ok("3.0.0".to_string())),
                ("requests".to_string(), Ok("2.31.0".to_string())),
                ("click".to_string(), Ok("8.1.7".to_string())),
            ]),
        };

        let entries = pip_outdated(&registry, &pip_declarations()).await;
        assert_eq!(entries.len(), 3);

        let flask = &entries[0];
        assert_eq!(flask.name, "flask");
        assert_eq!(flask.current.as_deref(), Some("1.0.0"));
        assert_eq!(flask.wanted.as_deref(), Some("1.0.0"));
        assert_eq!(flask.latest, LatestVersion::Resolved("3.0.0".into()));
        assert!(flask.is_outdated);

        // Unversioned declaration resolves but never counts as outdated
        let click = &entries[2];
        assert!(click.current.is_none());
        assert!(!click.is_outdated);
    }

    #[tokio::test]
    async fn test_pip_outdated_not_found_package() {
        let mut set = DependencySet::new();
        set.insert(DependencyDeclaration::direct(
            "nonexistentpkg123",
            "1.0.0",
            "==",
        ));
        let registry = MockRegistry {
            versions: HashMap::from([("nonexistentpkg123".to_string(), Err("404"))]),
        };

        let entries = pip_outdated(&registry, &set).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].latest, LatestVersion::NotFound);
        assert!(!entries[0].is_outdated);
    }

    #[tokio::test]
    async fn test_pip_outdated_failure_isolated_per_package() {
        let registry = MockRegistry {
            versions: HashMap::from([
                ("flask".to_string(), Ok("3.0.0".to_string())),
                ("requests".to_string(), Err("connection refused")),
                ("click".to_string(), Ok("8.1.7".to_string())),
            ]),
        };

        let entries = pip_outdated(&registry, &pip_declarations()).await;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].latest, LatestVersion::Resolved("3.0.0".into()));
        assert_eq!(entries[1].latest, LatestVersion::Unavailable);
        assert_eq!(entries[2].latest, LatestVersion::Resolved("8.1.7".into()));
    }
}
