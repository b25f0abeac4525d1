//! Vulnerability aggregation via `npm audit --json`
//!
//! The audit tool exits nonzero whenever advisories exist, so the stdout
//! JSON decides success here too. Advisory content passes through close to
//! verbatim; the `via` entries in particular mix plain strings and advisory
//! objects, which the report keeps as raw JSON values.
//!
//! pip projects never reach this module. Any failure degrades to an empty
//! advisory list with a `tracing` record.

use crate::domain::{Fix, Vulnerability};
use crate::tool::PackageTool;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// Top-level shape of the audit report
#[derive(Debug, Deserialize)]
struct AuditReport {
    #[serde(default)]
    vulnerabilities: BTreeMap<String, RawVulnerability>,
}

/// One advisory as the audit tool emits it
#[derive(Debug, Deserialize)]
struct RawVulnerability {
    severity: String,
    range: Option<String>,
    #[serde(default)]
    nodes: Vec<String>,
    #[serde(default)]
    via: Vec<serde_json::Value>,
    #[serde(default)]
    effects: Vec<String>,
    #[serde(rename = "fixAvailable")]
    fix_available: Option<serde_json::Value>,
}

/// Collect security advisories for an npm project.
///
/// Advisories come back sorted by package name. An unavailable or
/// unparsable audit yields an empty list.
pub fn npm_audit(tool: &dyn PackageTool, project_dir: &Path) -> Vec<Vulnerability> {
    let output = match tool.audit(project_dir) {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "npm audit unavailable, reporting no vulnerabilities");
            return Vec::new();
        }
    };

    if output.stdout.trim().is_empty() {
        warn!(
            status = output.status_code,
            stderr = %output.stderr.trim(),
            "npm audit produced no output"
        );
        return Vec::new();
    }

    let report: AuditReport = match serde_json::from_str(&output.stdout) {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "unparsable npm audit output, reporting no vulnerabilities");
            return Vec::new();
        }
    };

    report
        .vulnerabilities
        .into_iter()
        .map(|(name, raw)| Vulnerability {
            name,
            severity: raw.severity,
            affected_range: raw.range,
            affected_nodes: raw.nodes,
            upstream_causes: raw.via,
            downstream_effects: raw.effects,
            fix: raw.fix_available.and_then(parse_fix),
        })
        .collect()
}

/// The audit tool reports `fixAvailable` either as a bare boolean or as an
/// object naming the upgrade target.
fn parse_fix(value: serde_json::Value) -> Option<Fix> {
    match value {
        serde_json::Value::Bool(flag) => Some(Fix::Flag(flag)),
        serde_json::Value::Object(object) => object
            .get("version")
            .and_then(|v| v.as_str())
            .map(|version| Fix::Upgrade {
                target_version: version.to_string(),
            }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::tool::ToolOutput;

    struct MockTool {
        result: Result<ToolOutput, &'static str>,
    }

    impl PackageTool for MockTool {
        fn outdated(&self, _project_dir: &Path) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::new(0, "", ""))
        }

        fn audit(&self, _project_dir: &Path) -> Result<ToolOutput, ToolError> {
            match &self.result {
                Ok(output) => Ok(output.clone()),
                Err(msg) => Err(ToolError::launch(
                    "npm audit --json",
                    std::io::Error::new(std::io::ErrorKind::NotFound, *msg),
                )),
            }
        }
    }

    const SAMPLE_AUDIT: &str = r#"{
        "auditReportVersion": 2,
        "vulnerabilities": {
            "lodash": {
                "name": "lodash",
                "severity": "high",
                "isDirect": true,
                "via": [
                    {"source": 1065, "title": "Prototype Pollution", "severity": "high"},
                    "minimist"
                ],
                "effects": ["some-cli"],
                "range": "<4.17.12",
                "nodes": ["node_modules/lodash"],
                "fixAvailable": {"name": "lodash", "version": "4.17.21", "isSemVerMajor": false}
            },
            "minimist": {
                "name": "minimist",
                "severity": "moderate",
                "via": [{"source": 1179}],
                "effects": [],
                "range": "<0.2.1",
                "nodes": ["node_modules/minimist"],
                "fixAvailable": true
            }
        },
        "metadata": {"vulnerabilities": {"total": 2}}
    }"#;

    #[test]
    fn test_audit_parses_advisories() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, SAMPLE_AUDIT, "")),
        };
        let advisories = npm_audit(&tool, Path::new("."));
        assert_eq!(advisories.len(), 2);

        let lodash = &advisories[0];
        assert_eq!(lodash.name, "lodash");
        assert_eq!(lodash.severity, "high");
        assert_eq!(lodash.affected_range.as_deref(), Some("<4.17.12"));
        assert_eq!(lodash.affected_nodes, vec!["node_modules/lodash"]);
        assert_eq!(lodash.upstream_causes.len(), 2);
        assert_eq!(lodash.downstream_effects, vec!["some-cli"]);
        assert_eq!(
            lodash.fix,
            Some(Fix::Upgrade {
                target_version: "4.17.21".into()
            })
        );

        let minimist = &advisories[1];
        assert_eq!(minimist.fix, Some(Fix::Flag(true)));
    }

    #[test]
    fn test_audit_mixed_via_entries_kept_verbatim() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, SAMPLE_AUDIT, "")),
        };
        let advisories = npm_audit(&tool, Path::new("."));
        let lodash = &advisories[0];
        assert!(lodash.upstream_causes[0].is_object());
        assert_eq!(lodash.upstream_causes[1], serde_json::json!("minimist"));
    }

    #[test]
    fn test_audit_clean_project() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(
                0,
                r#"{"auditReportVersion": 2, "vulnerabilities": {}, "metadata": {}}"#,
                "",
            )),
        };
        assert!(npm_audit(&tool, Path::new(".")).is_empty());
    }

    #[test]
    fn test_audit_tool_unavailable_degrades() {
        let tool = MockTool {
            result: Err("npm not installed"),
        };
        assert!(npm_audit(&tool, Path::new(".")).is_empty());
    }

    #[test]
    fn test_audit_unparsable_output_degrades() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(1, "ERR! something broke", "")),
        };
        assert!(npm_audit(&tool, Path::new(".")).is_empty());
    }

    #[test]
    fn test_audit_missing_fix_field() {
        let tool = MockTool {
            result: Ok(ToolOutput::new(
                1,
                r#"{"vulnerabilities": {"x": {"severity": "low", "range": "<1.0.0"}}}"#,
                "",
            )),
        };
        let advisories = npm_audit(&tool, Path::new("."));
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].fix.is_none());
        assert!(advisories[0].affected_nodes.is_empty());
    }
}
