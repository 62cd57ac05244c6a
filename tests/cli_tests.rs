//! Binary-level tests for the failure contract: a run that cannot
//! resolve its inputs exits non-zero, reports the reason, and writes
//! no step outputs.

use assert_cmd::Command;
use predicates::prelude::*;

fn command() -> Command {
    let mut cmd = Command::cargo_bin("release-sync").expect("binary builds");
    // Isolate from any ambient runner environment.
    for var in [
        "GITHUB_TOKEN",
        "GH_TOKEN",
        "GITHUB_SHA",
        "GITHUB_REPOSITORY",
        "GITHUB_API_URL",
        "GITHUB_OUTPUT",
        "INPUT_TAG_NAME",
        "INPUT_RELEASE_NAME",
        "INPUT_BODY",
        "INPUT_BODY_PATH",
        "INPUT_DRAFT",
        "INPUT_PRERELEASE",
        "INPUT_COMMITISH",
        "INPUT_REPOSITORY",
        "INPUT_REPLACE_OLD_TAG",
        "INPUT_AUTO_SUBVERSION",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn with_run_context(mut cmd: Command) -> Command {
    cmd.env("GITHUB_TOKEN", "token")
        .env("GITHUB_SHA", "sha1234")
        .env("GITHUB_REPOSITORY", "owner/repo");
    cmd
}

#[test]
fn missing_token_fails_before_anything_else() {
    command()
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Missing runner context: GITHUB_TOKEN",
        ));
}

#[test]
fn missing_tag_name_fails_without_network() {
    with_run_context(command())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Missing required input: tag_name",
        ));
}

#[test]
fn missing_release_name_fails_without_network() {
    with_run_context(command())
        .env("INPUT_TAG_NAME", "refs/tags/v1.0.0")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "::error::Missing required input: release_name",
        ));
}

#[test]
fn unreadable_body_path_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    with_run_context(command())
        .env("INPUT_TAG_NAME", "v1.0.0")
        .env("INPUT_RELEASE_NAME", "v1.0.0")
        .env("INPUT_BODY_PATH", dir.path().join("missing.md"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("::error::Failed to read body file"));
}

#[test]
fn failed_run_writes_no_outputs() {
    let output_file = tempfile::NamedTempFile::new().unwrap();
    with_run_context(command())
        .env("GITHUB_OUTPUT", output_file.path())
        .assert()
        .failure();

    let written = std::fs::read_to_string(output_file.path()).unwrap();
    assert!(written.is_empty());
}

#[test]
fn help_describes_the_inputs() {
    command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tag-name"))
        .stdout(predicate::str::contains("--replace-old-tag"));
}
