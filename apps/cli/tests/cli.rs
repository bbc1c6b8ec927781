use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONTRACTS: [&str; 6] =
    ["TestCustomErrors", "TestEnums", "TestGasEstimation", "TestHelpers", "TestReturns", "TestToken"];

fn write_artifacts(root: &Path) {
    for name in CONTRACTS {
        let dir = root.join("contracts").join(format!("{name}.sol"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{name}.json")),
            format!(r#"{{"contractName":"{name}","abi":[{{"type":"function","name":"ping"}}],"bytecode":"0x6080604052"}}"#),
        )
        .unwrap();
    }
}

/// Workspace with artifacts and an isolated working directory (no stray `tnode.toml`).
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_artifacts(&temp.path().join("artifacts"));
    temp
}

fn cli(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tnode-deploy").unwrap();
    cmd.current_dir(temp.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn units_lists_every_unit() {
    let temp = workspace();
    let mut assert = cli(&temp).arg("units").assert().success();
    for name in CONTRACTS {
        assert = assert.stdout(predicate::str::contains(format!("tags=[{name}]")));
    }
}

#[test]
fn plan_follows_tags() {
    let temp = workspace();
    cli(&temp)
        .args(["plan", "--tags", "TestToken,TestEnums"])
        .assert()
        .success()
        .stdout(predicate::eq(" 1. TestEnums\n 2. TestToken\n"));
}

#[test]
fn unknown_tag_fails() {
    let temp = workspace();
    cli(&temp)
        .args(["plan", "--tags", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No unit carries tag 'Nope'"));
}

#[test]
fn deploy_writes_records_and_export_reads_them() {
    let temp = workspace();

    let mut assert =
        cli(&temp).args(["deploy", "--deployments", "deployments"]).assert().success();
    for name in CONTRACTS {
        assert = assert.stdout(predicate::str::contains(name));
        assert!(temp.path().join("deployments/devchain").join(format!("{name}.json")).is_file());
    }
    assert!(temp.path().join("deployments/devchain/.chainId").is_file());

    let output = cli(&temp).args(["export", "--deployments", "deployments"]).output().unwrap();
    assert!(output.status.success());
    let export: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(export["name"], "devchain");
    assert_eq!(export["chainId"], 31_337);
    assert_eq!(export["contracts"]["TestToken"]["tags"][0], "TestToken");
    assert_eq!(export["contracts"]["TestToken"]["abi"][0]["name"], "ping");
}

#[test]
fn environment_selects_network() {
    let temp = workspace();
    cli(&temp)
        .env("TNODE__NETWORK__NAME", "ci")
        .args(["deploy", "--tags", "TestHelpers", "--deployments", "deployments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TestHelpers"));

    assert!(temp.path().join("deployments/ci/TestHelpers.json").is_file());
    assert!(!temp.path().join("deployments/ci/TestToken.json").exists());
}

#[test]
fn config_file_is_honoured() {
    let temp = workspace();
    fs::write(
        temp.path().join("custom.toml"),
        "[network]\nname = \"localhost\"\nchain_id = 1337\n\n[deployments]\ndir = \"out\"\n",
    )
    .unwrap();

    cli(&temp).args(["--config", "custom.toml", "deploy", "--tags", "TestToken"]).assert().success();

    let marker = fs::read_to_string(temp.path().join("out/localhost/.chainId")).unwrap();
    assert_eq!(marker, "1337");
}

#[test]
fn unresolvable_deployer_fails_the_run() {
    let temp = workspace();
    cli(&temp)
        .env("TNODE__ACCOUNTS__NAMED__DEPLOYER", "99")
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Named account 'deployer' is unavailable"));
}

#[test]
fn missing_artifacts_fail_fast() {
    let temp = TempDir::new().unwrap();
    cli(&temp)
        .arg("units")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load artifacts"));
}
