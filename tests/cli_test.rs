//! Integration tests for the buildready binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("buildready.yml"), config).unwrap();
    temp
}

fn buildready(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("buildready"));
    cmd.current_dir(temp.path())
        .env_remove("BUILDREADY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

const NO_TOOLS: &str = r#"
requirements:
  - name: Tools
    fact: tools
    kind: string-list
    threshold: []
"#;

const MISSING_TOOL: &str = r#"
requirements:
  - name: Tools
    fact: tools
    kind: string-list
    threshold: [buildready-test-missing-tool]
"#;

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("buildready"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Check that a machine can run the build"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("buildready"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_no_args_runs_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(NO_TOOLS);
    buildready(&temp)
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: PASS (1/1 checks passed)"))
        .stdout(predicate::str::contains("[System]"));
    Ok(())
}

#[test]
fn cli_check_fails_for_missing_tool() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MISSING_TOOL);
    buildready(&temp)
        .args(["check", "--no-context", "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Tools: buildready-test-missing-tool",
        ))
        .stdout(predicate::str::contains("Not found"))
        .stdout(predicate::str::contains("Result: FAIL (0/1 checks passed)"))
        .stderr(predicate::str::contains("Not ready"));
    Ok(())
}

#[test]
fn cli_check_saves_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(NO_TOOLS);
    let out = temp.path().join("reports").join("ready.txt");
    let assert = buildready(&temp)
        .args(["check", "--no-context", "--no-color", "--output"])
        .arg(&out)
        .assert()
        .success();

    let saved = fs::read_to_string(&out)?;
    let printed = String::from_utf8(assert.get_output().stdout.clone())?;
    assert_eq!(saved, printed);
    assert!(!saved.contains("[System]"));
    Ok(())
}

#[test]
fn cli_check_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(MISSING_TOOL);
    let assert = buildready(&temp)
        .args(["check", "--json", "--no-context"])
        .assert()
        .code(1);

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(value["result"], "FAIL");
    assert_eq!(value["checks"][0]["actual"], "Not found");
    Ok(())
}

#[test]
fn cli_quiet_prints_only_report() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(NO_TOOLS);
    buildready(&temp)
        .args(["check", "--quiet", "--no-context"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build Readiness Report"))
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn cli_invalid_catalog_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        "requirements:\n  - { name: RAM, fact: ram, kind: minimum-version, threshold: \"4\" }\n",
    );
    buildready(&temp)
        .arg("check")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid requirement 'RAM'"));
    Ok(())
}

#[test]
fn cli_malformed_yaml_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("requirements: [unclosed\n");
    buildready(&temp)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_missing_explicit_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    buildready(&temp)
        .args(["check", "--config", "nope.yml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_config_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("elsewhere.yml");
    fs::write(&config, NO_TOOLS)?;
    buildready(&temp)
        .env("BUILDREADY_CONFIG", &config)
        .args(["catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("string-list"))
        .stderr(predicate::str::contains("elsewhere.yml"));
    Ok(())
}

#[test]
fn cli_catalog_schema() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let assert = buildready(&temp)
        .args(["catalog", "--schema"])
        .assert()
        .success();
    let schema: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert!(schema["properties"]["requirements"].is_object());
    Ok(())
}

#[test]
fn cli_summary_has_no_checks() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(NO_TOOLS);
    buildready(&temp)
        .args(["summary", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("System Summary"))
        .stdout(predicate::str::contains("[Hardware]"))
        .stdout(predicate::str::contains("[Checks]").not());
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    buildready(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildready"));
    Ok(())
}
