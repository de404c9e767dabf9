//! End-to-end tests of the `skiff` binary.
//!
//! Builds use `cat` as the bundler: it prints a stats file written into the
//! project, which is all the command engine needs.

#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STATS: &str = r#"{
  "modules": [
    { "identifier": "/app/src/handler.js", "rawRequest": "src/handler" },
    { "identifier": "/app/src/db.js", "rawRequest": "./db", "issuer": "/app/src/handler.js" },
    { "identifier": "external \"pg/lib/client\"", "rawRequest": "pg/lib/client", "issuer": "/app/src/db.js" },
    { "identifier": "external \"fs\"", "rawRequest": "fs", "issuer": "/app/src/handler.js" }
  ],
  "errors": [],
  "warnings": []
}"#;

const FAILED_STATS: &str = r#"{
  "modules": [],
  "errors": [{ "message": "Can't resolve 'left-pad'", "moduleName": "./src/pad.js" }],
  "warnings": []
}"#;

fn skiff(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("skiff").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_project(dir: &Path, builds: &[(&str, &str)]) {
    let mut config = String::from("[plugin]\nconcurrency = 2\n");
    for (name, stats) in builds {
        let file = format!("{name}.stats.json");
        fs::write(dir.join(&file), stats).unwrap();
        config.push_str(&format!(
            "\n[[builds]]\nname = \"{name}\"\ncommand = [\"cat\", \"{file}\"]\n"
        ));
    }
    fs::write(dir.join("skiff.config.toml"), config).unwrap();
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    skiff(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn build_without_config_fails() {
    let dir = TempDir::new().unwrap();
    skiff(dir.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("skiff.config.toml"));
}

#[test]
fn inspect_reports_externals_with_origin() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stats.json"), STATS).unwrap();

    skiff(dir.path())
        .args(["inspect", "stats.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pg (from src/handler)"))
        .stdout(predicate::str::contains("fs").not());
}

#[test]
fn inspect_json_manifest() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("stats.json"), STATS).unwrap();

    let output = skiff(dir.path())
        .args(["inspect", "stats.json", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(manifest["succeeded"], true);
    assert_eq!(manifest["builds"][0]["externalModules"][0]["external"], "pg");
    assert_eq!(manifest["builds"][0]["externalModules"][0]["origin"], "src/handler");
}

#[test]
fn inspect_traces_origins_through_webpack_reasons() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("stats.json"),
        r#"{
  "modules": [
    { "identifier": "/app/src/handler.js", "name": "./src/handler.js",
      "reasons": [ { "userRequest": "src/handler" } ] },
    { "identifier": "/app/src/db.js", "name": "./src/db.js", "issuer": "/app/src/handler.js",
      "reasons": [ { "moduleIdentifier": "/app/src/handler.js", "userRequest": "./db" } ] },
    { "identifier": "external \"pg\"", "name": "external \"pg\"", "issuer": "/app/src/db.js",
      "reasons": [ { "moduleIdentifier": "/app/src/db.js", "userRequest": "pg" } ] }
  ]
}"#,
    )
    .unwrap();

    skiff(dir.path())
        .args(["inspect", "stats.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pg (from src/handler)"));
}

#[test]
fn build_help_describes_expected_stats() {
    let dir = TempDir::new().unwrap();
    skiff(dir.path())
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reasons"));
}

#[test]
fn inspect_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    skiff(dir.path())
        .args(["inspect", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[cfg(unix)]
#[test]
fn build_prints_manifest_for_every_configuration() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), &[("api", STATS), ("worker", STATS)]);

    let output = skiff(dir.path()).args(["build", "--json"]).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let manifest: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let builds = manifest["builds"].as_array().unwrap();
    assert_eq!(builds.len(), 2);
    assert!(builds[0]["outputPath"].as_str().unwrap().ends_with(".webpack/api"));
    assert!(builds[1]["outputPath"].as_str().unwrap().ends_with(".webpack/worker"));
}

#[cfg(unix)]
#[test]
fn failing_builds_are_reported_together() {
    let dir = TempDir::new().unwrap();
    write_project(
        dir.path(),
        &[("api", FAILED_STATS), ("ok", STATS), ("worker", FAILED_STATS)],
    );

    let output = skiff(dir.path()).arg("build").output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Compilation failed"));
    assert_eq!(stderr.matches("Can't resolve 'left-pad'").count(), 2);
}

#[cfg(unix)]
#[test]
fn build_removes_stale_output_unless_kept() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), &[("api", STATS)]);
    let stale = dir.path().join(".webpack/api/old.js");

    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old").unwrap();
    skiff(dir.path()).args(["build", "--keep-output"]).assert().success();
    assert!(stale.exists());

    skiff(dir.path()).arg("build").assert().success();
    assert!(!stale.exists());
}

#[test]
fn clean_removes_output_directories() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), &[("api", STATS)]);
    let out = dir.path().join(".webpack/api");
    fs::create_dir_all(&out).unwrap();

    skiff(dir.path())
        .arg("clean")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed 1 output directory"));
    assert!(!out.exists());
}
