// CLI surface checks; none of these reach the network

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("freelance-match").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("post"))
        .stdout(predicate::str::contains("candidates"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_post_requires_title_and_skills() {
    let mut cmd = Command::cargo_bin("freelance-match").unwrap();

    cmd.arg("post")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--title"));
}

#[test]
fn test_config_masks_token() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("freelance-match").unwrap();

    cmd.current_dir(dir.path())
        .env("FREELANCE_MATCH_TOKEN", "super-secret")
        .env_remove("RUST_LOG")
        .args(["--company", "acme", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("owner_id = \"acme\""))
        .stdout(predicate::str::contains("***"))
        .stdout(predicate::str::contains("super-secret").not());
}

#[test]
fn test_malformed_env_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "THIS LINE IS BROKEN\n").unwrap();
    let mut cmd = Command::cargo_bin("freelance-match").unwrap();

    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--company", "acme", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("owner_id = \"acme\""))
        .stderr(predicate::str::contains("Ignoring .env file"));
}
