use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the branchguard binary.
#[allow(deprecated)]
fn branchguard_cmd() -> Command {
    Command::cargo_bin("branchguard").unwrap()
}

#[test]
fn help_works() {
    branchguard_cmd().arg("--help").assert().success();
}

#[test]
fn audit_help_lists_flags() {
    branchguard_cmd()
        .args(["audit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--org"))
        .stdout(predicate::str::contains("--pat"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--fail-fast"));
}

#[test]
fn audit_requires_a_token() {
    branchguard_cmd()
        .env_remove("AZURE_DEVOPS_EXT_PAT")
        .args(["audit", "--org", "acme"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("branchguard error:"))
        .stderr(predicate::str::contains("personal access token"));
}

#[test]
fn usage_errors_exit_one() {
    branchguard_cmd()
        .args(["audit", "--no-such-flag"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--no-such-flag"));

    branchguard_cmd().assert().code(1);
}

#[test]
fn version_exits_zero() {
    branchguard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("branchguard"));
}
