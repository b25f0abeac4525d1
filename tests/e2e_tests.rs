//! CLI surface tests running the compiled binary.
//!
//! Only scenarios that need no network, npm or git are exercised here; the
//! pipeline itself is covered with mocked collaborators in the integration
//! tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn dephealth() -> Command {
    Command::cargo_bin("dephealth").unwrap()
}

#[test]
fn missing_path_fails_with_message() {
    dephealth()
        .arg("/no/such/project")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Project path does not exist: /no/such/project",
        ));
}

#[test]
fn missing_path_json_report() {
    let output = dephealth()
        .args(["/no/such/project", "--json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["error"],
        "Project path does not exist: /no/such/project"
    );
    assert_eq!(report["outdated"].as_array().unwrap().len(), 0);
    assert_eq!(report["detectedFiles"].as_array().unwrap().len(), 0);
    assert!(report["activity"].is_null());
}

#[test]
fn help_shows_usage() {
    dephealth()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--ecosystem"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn version_flag() {
    dephealth()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dephealth"));
}

#[test]
fn invalid_ecosystem_rejected() {
    dephealth()
        .args([".", "--ecosystem", "cargo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn empty_directory_reports_no_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), r#"{"name": "empty"}"#).unwrap();

    dephealth()
        .arg(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No dependencies found in the detected files",
        ));
}

#[test]
fn directory_without_manifests_reports_none_found() {
    let dir = tempfile::tempdir().unwrap();

    dephealth()
        .args([dir.path().to_str().unwrap(), "--ecosystem", "pip"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No pip dependency files found in the project",
        ));
}
