//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BUILD: &str = r#"{
  "projects": [
    {
      "path": ":app",
      "variants": [
        {
          "name": "main",
          "declared": [
            { "identifier": "org.apache.commons:commons-math3", "configuration": "compile" },
            { "identifier": "commons-io:commons-io", "configuration": "compile", "resolved_version": "2.6" },
            { "identifier": ":core", "configuration": "implementation" }
          ],
          "edges": [
            [":app", "org.apache.commons:commons-math3"],
            [":app", "commons-io:commons-io"],
            [":app", ":core"],
            [":core", "com.squareup.okio:okio"]
          ],
          "usages": [
            { "owner": "commons-io:commons-io", "class_name": "org.apache.commons.io.IOUtils" },
            { "owner": "com.squareup.okio:okio", "class_name": "okio.Buffer" }
          ]
        }
      ]
    }
  ]
}"#;

const CLEAN: &str = r#"{
  "projects": [
    {
      "path": ":lib",
      "variants": [
        {
          "declared": [ { "identifier": "a:a", "configuration": "implementation" } ],
          "edges": [ [":lib", "a:a"] ],
          "usages": [ { "owner": "a:a", "class_name": "a.A" } ]
        }
      ]
    }
  ]
}"#;

const RIPPLE: &str = r#"
projects:
  - path: ":lib"
    variants:
      - declared: [ { identifier: "okio:okio", configuration: api } ]
        edges: [ [":lib", "okio:okio"] ]
  - path: ":app"
    variants:
      - declared: [ { identifier: ":lib", configuration: implementation } ]
        edges: [ [":app", ":lib"], [":lib", "okio:okio"] ]
        usages:
          - { owner: ":lib", class_name: "lib.Lib" }
          - { owner: "okio:okio", class_name: "okio.Buffer" }
"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn depadvice() -> Command {
    Command::cargo_bin("depadvice").unwrap()
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    depadvice()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fail-on-advice"));
}

#[test]
fn test_version() {
    depadvice()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("depadvice"));
}

#[test]
fn test_missing_input_fails() {
    depadvice()
        .arg("does-not-exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

// ============================================================================
// Output Formats
// ============================================================================

#[test]
fn test_terminal_output() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);

    depadvice()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(":app"))
        .stdout(predicate::str::contains("Unused dependencies"))
        .stdout(predicate::str::contains("commons-math3"))
        .stdout(predicate::str::contains("(was compile)"));
}

#[test]
fn test_clean_build_reports_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", CLEAN);

    depadvice()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency issues found!"));
}

#[test]
fn test_json_output_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);
    let output = dir.path().join("report.json");

    depadvice()
        .arg(&input)
        .args(["--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let advice = &json["projects"][0]["advice"]["dependency_advice"];
    let kinds: Vec<&str> = advice
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["REMOVE", "REMOVE", "CHANGE", "ADD"]);
    assert_eq!(json["should_fail"], false);
}

#[test]
fn test_traces_flag() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);

    depadvice()
        .arg(&input)
        .arg("--traces")
        .assert()
        .success()
        .stdout(predicate::str::contains(":core -> com.squareup.okio:okio"));
}

#[test]
fn test_ripples_reported() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.yaml", RIPPLE);

    depadvice()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ripples:"))
        .stdout(predicate::str::contains(":lib remove api \"okio:okio\" forces :app"));

    let output = depadvice().arg(&input).args(["--format", "json"]).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ripples"][0]["source_project"], ":lib");
    assert_eq!(json["ripples"][0]["impacted_project"], ":app");
}

#[test]
fn test_bundle_config_suppresses_advice() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.yaml", RIPPLE);
    write(
        dir.path(),
        ".depadvice.yml",
        "bundles:\n  okio: [\":lib\", \"okio:.*\"]\n",
    );

    depadvice()
        .arg(&input)
        .arg("--fail-on-advice")
        .assert()
        .failure()
        .stdout(predicate::str::contains("okio:okio"))
        .stdout(predicate::str::contains("Ripples:").not());
}

// ============================================================================
// Fail Policy
// ============================================================================

#[test]
fn test_fail_on_advice() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);

    depadvice()
        .arg(&input)
        .arg("--fail-on-advice")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_fail_on_advice_clean_build_passes() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", CLEAN);

    depadvice().arg(&input).arg("--fail-on-advice").assert().success();
}

#[test]
fn test_config_severity_and_exclude() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);
    write(
        dir.path(),
        ".depadvice.yml",
        "issues:\n  unused_dependencies:\n    severity: fail\n    exclude: [\"org.apache.commons:*\", \":core\"]\n",
    );

    // Every unused dependency is excluded, so nothing in the failing category survives
    depadvice().arg(&input).assert().success();

    write(
        dir.path(),
        ".depadvice.yml",
        "issues:\n  unused_dependencies:\n    severity: fail\n",
    );
    depadvice().arg(&input).assert().failure();
}

#[test]
fn test_explicit_config_ignore() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "build.json", BUILD);
    let config = write(dir.path(), "custom.toml", "[issues.any]\nseverity = \"ignore\"\n");

    depadvice()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--fail-on-advice")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependency issues found!"));
}

#[test]
fn test_malformed_variant_fails_build() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "build.yaml",
        "projects:\n  - path: \":app\"\n    variants:\n      - declared:\n          - { identifier: \"a:a\", configuration: api }\n        edges: []\n",
    );

    depadvice()
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Malformed graph"));
}
