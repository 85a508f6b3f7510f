// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use assert_cmd::Command;

fn create2_deploy() -> Command {
    let mut cmd = Command::cargo_bin("create2-deploy").unwrap();
    cmd.env_remove("CREATE2_FACTORY")
        .env_remove("PRIVATE_KEY")
        .env_remove("ETH_RPC_URL");
    cmd
}

#[test]
fn help_exits_successfully() {
    let output = create2_deploy().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--constructor-args", "--salt", "--verify", "--dry-run", "--factory"] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn contract_is_required() {
    create2_deploy().assert().failure();
}

#[test]
fn invalid_salt_is_rejected() {
    let output = create2_deploy()
        .args(["Counter", "--salt", "0xzz", "--dry-run"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid salt"));
}

#[test]
fn build_failure_is_fatal() {
    let root = tempfile::TempDir::new().unwrap();
    create2_deploy()
        .env("PATH", root.path())
        .args(["Counter", "--dry-run", "--root"])
        .arg(root.path())
        .assert()
        .failure();
}
