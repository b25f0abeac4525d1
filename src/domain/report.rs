//! Report structures assembled by the analyzer
//!
//! These types form the result shape consumed by the presentation layer.
//! Field names serialize in camelCase to match the JSON contract the
//! dashboard expects.

use super::DependencyRole;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Outcome of a latest-version lookup for one package.
///
/// A tagged result instead of sentinel strings, so comparison logic can
/// never mistake an unavailable lookup for a real version. On the wire it
/// still reads `"unknown"` / `"not found"` for compatibility with the
/// report consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestVersion {
    /// The registry reported this concrete version
    Resolved(String),
    /// The lookup failed (network error, tool missing, bad response)
    Unavailable,
    /// The registry does not know the package
    NotFound,
}

impl LatestVersion {
    /// Returns the concrete version, if the lookup resolved one
    pub fn resolved(&self) -> Option<&str> {
        match self {
            LatestVersion::Resolved(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the wire representation of this outcome
    pub fn as_str(&self) -> &str {
        match self {
            LatestVersion::Resolved(v) => v,
            LatestVersion::Unavailable => "unknown",
            LatestVersion::NotFound => "not found",
        }
    }
}

impl fmt::Display for LatestVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for LatestVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LatestVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "unknown" => LatestVersion::Unavailable,
            "not found" => LatestVersion::NotFound,
            _ => LatestVersion::Resolved(s),
        })
    }
}

/// Serde adapter rendering `None` versions as the string `"unknown"`
mod version_or_unknown {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or("unknown"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|v| v != "unknown"))
    }
}

/// Outdated-ness classification for one declared package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutdatedEntry {
    /// Package name
    pub name: String,
    /// Currently declared/installed version
    #[serde(with = "version_or_unknown")]
    pub current: Option<String>,
    /// Version the declared constraint would install
    #[serde(with = "version_or_unknown")]
    pub wanted: Option<String>,
    /// Latest version published in the registry
    pub latest: LatestVersion,
    /// Role from the manifest
    pub role: DependencyRole,
    /// Whether the package is behind the registry's latest version
    pub is_outdated: bool,
}

impl OutdatedEntry {
    /// Builds an entry, computing `is_outdated` from its parts.
    ///
    /// Outdated only when both sides are concrete and differ by exact
    /// string comparison; no semantic version comparison is performed.
    pub fn new(
        name: impl Into<String>,
        current: Option<String>,
        wanted: Option<String>,
        latest: LatestVersion,
        role: DependencyRole,
    ) -> Self {
        let is_outdated = match (&current, latest.resolved()) {
            (Some(current), Some(latest)) => current != latest,
            _ => false,
        };
        Self {
            name: name.into(),
            current,
            wanted,
            latest,
            role,
            is_outdated,
        }
    }
}

/// Fix recommendation attached to an advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, rename_all = "camelCase")]
pub enum Fix {
    /// The audit tool only reports whether a fix exists
    Flag(bool),
    /// A concrete upgrade target
    #[serde(rename_all = "camelCase")]
    Upgrade {
        /// Version to upgrade to
        target_version: String,
    },
}

/// One security advisory, sourced verbatim from the audit facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    /// Affected package name
    pub name: String,
    /// Advisory severity (`low`, `moderate`, `high`, `critical`)
    pub severity: String,
    /// Version range the advisory applies to
    pub affected_range: Option<String>,
    /// Filesystem locations of affected installs
    pub affected_nodes: Vec<String>,
    /// Packages or advisories this vulnerability comes through
    pub upstream_causes: Vec<serde_json::Value>,
    /// Dependents affected by this vulnerability
    pub downstream_effects: Vec<String>,
    /// Fix recommendation, when the audit tool offers one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

/// Used/unused classification for one declared dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Package name
    pub name: String,
    /// Whether any source file references the package
    pub used: bool,
    /// Number of import/require references found
    pub import_count: u32,
}

impl UsageRecord {
    /// Creates a record from a reference count; `used` follows the count
    pub fn from_count(name: impl Into<String>, import_count: u32) -> Self {
        Self {
            name: name.into(),
            used: import_count > 0,
            import_count,
        }
    }
}

/// Commit-history statistics and activity score for a remote repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryActivity {
    /// Committer date of the most recent commit
    pub last_commit_date: Option<String>,
    /// Commits within the trailing 30-day window
    pub recent_commit_count: u32,
    /// All commits reachable from the current branch tip
    pub total_commit_count: u64,
    /// Distinct author identities across all commits
    pub contributor_count: u32,
    /// Bounded 0-100 activity heuristic
    pub activity_score: u8,
    /// Whether any commit landed in the last 30 days
    pub is_active: bool,
    /// Failure message when the history could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepositoryActivity {
    /// The failure form: zeroed statistics carrying an error message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            last_commit_date: None,
            recent_commit_count: 0,
            total_commit_count: 0,
            contributor_count: 0,
            activity_score: 0,
            is_active: false,
            error: Some(message.into()),
        }
    }
}

/// Aggregate result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Outdated-ness classification per declared package
    pub outdated: Vec<OutdatedEntry>,
    /// Known security advisories for the dependency set
    pub vulnerabilities: Vec<Vulnerability>,
    /// Used/unused classification per declared package
    pub usage: Vec<UsageRecord>,
    /// Repository activity, present only for remote references
    pub activity: Option<RepositoryActivity>,
    /// Manifest files the locator found, as project-relative paths
    pub detected_files: Vec<String>,
    /// Hard-failure message; when set, all other fields are empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Creates an empty report skeleton
    pub fn empty() -> Self {
        Self {
            outdated: Vec::new(),
            vulnerabilities: Vec::new(),
            usage: Vec::new(),
            activity: None,
            detected_files: Vec::new(),
            error: None,
        }
    }

    /// The hard-failure form: an error message with empty collections
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::empty()
        }
    }

    /// Returns true when the run aborted with a hard failure
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_version_as_str() {
        assert_eq!(LatestVersion::Resolved("1.2.3".into()).as_str(), "1.2.3");
        assert_eq!(LatestVersion::Unavailable.as_str(), "unknown");
        assert_eq!(LatestVersion::NotFound.as_str(), "not found");
    }

    #[test]
    fn test_latest_version_serde_round_trip() {
        for latest in [
            LatestVersion::Resolved("2.0.0".into()),
            LatestVersion::Unavailable,
            LatestVersion::NotFound,
        ] {
            let json = serde_json::to_string(&latest).unwrap();
            let parsed: LatestVersion = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, latest);
        }
        assert_eq!(
            serde_json::to_string(&LatestVersion::NotFound).unwrap(),
            "\"not found\""
        );
    }

    #[test]
    fn test_outdated_entry_differs() {
        let entry = OutdatedEntry::new(
            "flask",
            Some("1.0.0".into()),
            Some("1.0.0".into()),
            LatestVersion::Resolved("3.0.0".into()),
            DependencyRole::Direct,
        );
        assert!(entry.is_outdated);
    }

    #[test]
    fn test_outdated_entry_equal_versions() {
        let entry = OutdatedEntry::new(
            "flask",
            Some("3.0.0".into()),
            Some("3.0.0".into()),
            LatestVersion::Resolved("3.0.0".into()),
            DependencyRole::Direct,
        );
        assert!(!entry.is_outdated);
    }

    #[test]
    fn test_outdated_entry_unavailable_latest() {
        let entry = OutdatedEntry::new(
            "flask",
            Some("1.0.0".into()),
            Some("1.0.0".into()),
            LatestVersion::Unavailable,
            DependencyRole::Direct,
        );
        assert!(!entry.is_outdated);
    }

    #[test]
    fn test_outdated_entry_not_found_latest() {
        let entry = OutdatedEntry::new(
            "nonexistentpkg123",
            Some("1.0.0".into()),
            Some("1.0.0".into()),
            LatestVersion::NotFound,
            DependencyRole::Direct,
        );
        assert!(!entry.is_outdated);
    }

    #[test]
    fn test_outdated_entry_unknown_current() {
        let entry = OutdatedEntry::new(
            "requests",
            None,
            None,
            LatestVersion::Resolved("2.31.0".into()),
            DependencyRole::Direct,
        );
        assert!(!entry.is_outdated);
    }

    #[test]
    fn test_outdated_entry_serializes_unknown_current() {
        let entry = OutdatedEntry::new(
            "requests",
            None,
            None,
            LatestVersion::Resolved("2.31.0".into()),
            DependencyRole::Direct,
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["current"], "unknown");
        assert_eq!(json["wanted"], "unknown");
        assert_eq!(json["latest"], "2.31.0");
        assert_eq!(json["isOutdated"], false);
        assert_eq!(json["role"], "dependency");
    }

    #[test]
    fn test_fix_deserializes_flag_and_upgrade() {
        let fix: Fix = serde_json::from_str("true").unwrap();
        assert_eq!(fix, Fix::Flag(true));

        let fix: Fix = serde_json::from_str(r#"{"targetVersion":"4.17.21"}"#).unwrap();
        assert_eq!(
            fix,
            Fix::Upgrade {
                target_version: "4.17.21".into()
            }
        );
    }

    #[test]
    fn test_usage_record_from_count() {
        let used = UsageRecord::from_count("lodash", 5);
        assert!(used.used);
        assert_eq!(used.import_count, 5);

        let unused = UsageRecord::from_count("left-pad", 0);
        assert!(!unused.used);
        assert_eq!(unused.import_count, 0);
    }

    #[test]
    fn test_repository_activity_failed() {
        let activity = RepositoryActivity::failed("clone failed");
        assert!(!activity.is_active);
        assert_eq!(activity.activity_score, 0);
        assert_eq!(activity.error.as_deref(), Some("clone failed"));
    }

    #[test]
    fn test_report_failure() {
        let report = AnalysisReport::failure("Project path does not exist: /missing");
        assert!(report.is_failure());
        assert!(report.outdated.is_empty());
        assert!(report.vulnerabilities.is_empty());
        assert!(report.usage.is_empty());
        assert!(report.activity.is_none());
        assert!(report.detected_files.is_empty());
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = AnalysisReport::empty();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("detectedFiles").is_some());
        assert!(json.get("error").is_none());
    }
}
